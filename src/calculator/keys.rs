//! Keyboard shortcuts for the calculator.
//!
//! Maps key names as reported by a UI toolkit onto session actions.

use super::builder::{Operator, Symbol};

/// What a key press asks the session to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Input(Symbol),
    Equals,
}

/// Translate a key name into an action.
///
/// Only digits, `.`, the six operators, `Enter`/`=`, `Backspace` and
/// `Escape` are bound. Function keys and parentheses are keypad-only.
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "Enter" | "=" => return Some(KeyAction::Equals),
        "Backspace" => return Some(KeyAction::Input(Symbol::Delete)),
        "Escape" => return Some(KeyAction::Input(Symbol::Clear)),
        "." => return Some(KeyAction::Input(Symbol::Point)),
        _ => {}
    }

    let mut chars = key.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return None;
    };

    if c.is_ascii_digit() {
        return Some(KeyAction::Input(Symbol::Digit(c)));
    }
    Operator::from_char(c).map(|op| KeyAction::Input(Symbol::Operator(op)))
}
