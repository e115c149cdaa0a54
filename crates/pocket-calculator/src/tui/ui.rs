//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;

/// Window title
pub const TITLE: &str = " Pocket Calculator ";

/// Keyboard shortcuts shown under the tape
pub const HELP_LINE: &str = "0-9 . + - * /  Enter =  n ±  ⌫  Esc C  Ctrl+L clear tape  q quit";

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Returns where the keypad is drawn inside a frame of size `area`
///
/// Used to hit-test mouse clicks against the keypad.
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    split_columns(area)[1]
}

fn split_columns(area: Rect) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Min(30), Constraint::Length(26)])
        .split(area);
    [chunks[0], chunks[1]]
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn create_layout(&self, area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Display
                Constraint::Min(4),    // Tape
                Constraint::Length(4), // Status
                Constraint::Length(1), // Help
            ])
            .split(area)
            .to_vec()
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let session = self.app.session();
        let value_style = if session.is_showing_result() {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };

        let lines = vec![
            Line::from(Span::styled(
                self.app.pending_line(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(session.display(), value_style)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Display ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .render(area, buf);
    }

    fn render_tape(&self, area: Rect, buf: &mut Buffer) {
        let session = self.app.session();
        let precision = session.config().max_fraction_digits;
        let visible = area.height.saturating_sub(2) as usize;

        let items: Vec<ListItem> = session
            .tape()
            .iter_rev()
            .take(visible)
            .map(|entry| {
                ListItem::new(Span::styled(
                    entry.display_with_precision(precision),
                    Style::default().fg(Color::Gray),
                ))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Tape (newest first) ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .app
            .status()
            .into_iter()
            .map(|line| {
                let style = if line.starts_with('✓') {
                    Style::default().fg(Color::Green)
                } else if line.starts_with('✗') {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Span::styled(line, style))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Status ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let [main_area, pad_area] = split_columns(area);
        let chunks = self.create_layout(main_area);
        if chunks.len() >= 4 {
            self.render_display(chunks[0], buf);
            self.render_tape(chunks[1], buf);
            self.render_status(chunks[2], buf);
            Paragraph::new(Span::styled(HELP_LINE, Style::default().fg(Color::DarkGray)))
                .render(chunks[3], buf);
        }

        KeypadWidget::new(self.app.keypad()).render(pad_area, buf);
    }
}
