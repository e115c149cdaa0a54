//! Property-based tests for the terminal keypad and key mapping

#![cfg(feature = "tui")]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pocket_calculator::prelude::*;
use pocket_calculator::tui::{InputHandler, KeyAction, Keypad};
use proptest::prelude::*;
use ratatui::layout::Rect;

// ===== Strategy definitions =====

fn digit_strategy() -> impl Strategy<Value = u8> {
    0u8..=9u8
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Add),
        Just(Operation::Subtract),
        Just(Operation::Multiply),
        Just(Operation::Divide),
    ]
}

fn grid_position_strategy() -> impl Strategy<Value = (usize, usize)> {
    (0usize..5usize, 0usize..4usize)
}

fn area_strategy() -> impl Strategy<Value = Rect> {
    (0u16..50, 0u16..20, 10u16..80, 7u16..40).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    /// Every digit key is on the keypad
    #[test]
    fn prop_every_digit_has_a_button(d in digit_strategy()) {
        let keypad = Keypad::new();
        prop_assert!(keypad.find_button(Key::Digit(d)).is_some());
    }

    /// Highlighting an operator presses exactly that button
    #[test]
    fn prop_highlight_single_operator(op in operation_strategy()) {
        let mut keypad = Keypad::new();
        keypad.highlight_operation(Some(op));
        let pressed: Vec<Key> = keypad
            .buttons_with_positions()
            .filter(|(_, b)| b.pressed)
            .map(|(_, b)| b.key)
            .collect();
        prop_assert_eq!(pressed, vec![Key::Operator(op)]);
    }

    /// Grid lookups agree with index lookups
    #[test]
    fn prop_grid_position_consistent((row, col) in grid_position_strategy()) {
        let keypad = Keypad::new();
        let (_, cols) = keypad.dimensions();
        let by_pos = keypad.get_button_at(row, col).map(|b| b.key);
        let by_index = keypad.get_button(row * cols + col).map(|b| b.key);
        prop_assert_eq!(by_pos, by_index);
    }

    /// Clicks outside the keypad area never hit a button
    #[test]
    fn prop_hit_test_outside_area(area in area_strategy(), dx in 0u16..10, dy in 0u16..10) {
        let keypad = Keypad::new();
        let right = area.x + area.width + dx;
        let below = area.y + area.height + dy;
        prop_assert_eq!(keypad.hit_test(area, right, area.y + 1), None);
        prop_assert_eq!(keypad.hit_test(area, area.x + 1, below), None);
    }

    /// Any hit is a valid button index
    #[test]
    fn prop_hit_test_in_range(area in area_strategy(), fx in 0.0f64..1.0, fy in 0.0f64..1.0) {
        let keypad = Keypad::new();
        let x = area.x + (f64::from(area.width) * fx) as u16;
        let y = area.y + (f64::from(area.height) * fy) as u16;
        if let Some(index) = keypad.hit_test(area, x, y) {
            prop_assert!(index < keypad.button_count());
        }
    }

    /// Typed digits reach the calculator unchanged
    #[test]
    fn prop_digit_keys_map(d in digit_strategy()) {
        let handler = InputHandler::new();
        let c = char::from(b'0' + d);
        let event = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        prop_assert_eq!(handler.handle_key(event), KeyAction::Press(Key::Digit(d)));
    }

    /// Operator symbols map to operator keys
    #[test]
    fn prop_operator_keys_map(op in operation_strategy()) {
        let handler = InputHandler::new();
        let c = match op {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
            Operation::Divide => '/',
        };
        let event = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        prop_assert_eq!(handler.handle_key(event), KeyAction::Press(Key::Operator(op)));
    }
}
