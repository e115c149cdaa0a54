//! pocket-calc: terminal pocket calculator
//!
//! Run with: cargo run --bin pocket-calc -- --chain carry

use std::fs::File;
use std::io;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pocket_calculator::cli::Cli;
use pocket_calculator::config::CalculatorConfig;
use pocket_calculator::error::{AppError, AppResult};
use pocket_calculator::tui::{keypad_area, render, CalculatorApp, InputHandler};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;
    let config = cli.calculator_config()?;
    info!(?config, "starting pocket-calc");

    let app = run_terminal(config)?;

    if let Some(path) = &cli.export_tape {
        app.session().tape().save(path)?;
        info!(path = %path.display(), entries = app.session().tape().len(), "tape exported");
    }
    Ok(())
}

/// Logs go to `--log-file` only; the terminal belongs to the UI
fn init_tracing(cli: &Cli) -> AppResult<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| AppError::logging(e.to_string()))
}

/// Restores the terminal when dropped, including on early return
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> AppResult<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    }
}

fn run_terminal(config: CalculatorConfig) -> AppResult<CalculatorApp> {
    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = CalculatorApp::with_config(config);
    let result = run_app(&mut terminal, &mut app);

    drop(guard);
    terminal.show_cursor()?;
    result.map(|()| app)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut CalculatorApp,
) -> AppResult<()> {
    let input_handler = InputHandler::new();
    let mut pad = Rect::default();

    while !app.should_quit() {
        terminal.draw(|f| {
            pad = keypad_area(f.area());
            render(app, f);
        })?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                app.handle_action(input_handler.handle_key(key));
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                app.click(pad, mouse.column, mouse.row);
            }
            _ => {}
        }
    }
    Ok(())
}
