//! Calculator session state.
//!
//! A [`Session`] owns the current expression, the error flag and the history.
//! Every operation returns the [`DisplayState`] a UI should show next.

use serde::Serialize;
use tracing::debug;

use super::builder::{self, EMPTY_EXPRESSION, ERROR_MARKER, Symbol};
use super::evaluation::{CalcResult, evaluate_expression};
use super::keys::{KeyAction, action_for_key};
use crate::error::EvalError;
use crate::history::{History, HistoryEntry};

/// What the display shows after an operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    /// The expression text, a result, or the error marker.
    pub expression: String,
    /// Error message when the last evaluation failed.
    pub error: Option<String>,
    pub is_error: bool,
}

#[derive(Clone, Debug)]
pub struct Session {
    expression: String,
    error: Option<EvalError>,
    /// The input that failed, kept while the error marker is displayed.
    failed_expression: Option<String>,
    history: History,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(History::default())
    }
}

impl Session {
    pub fn new(history: History) -> Self {
        Self {
            expression: EMPTY_EXPRESSION.to_string(),
            error: None,
            failed_expression: None,
            history,
        }
    }

    /// Feed one keypad symbol.
    ///
    /// Any input after an error starts over from the empty expression.
    pub fn submit_symbol(&mut self, symbol: Symbol) -> DisplayState {
        if self.error.is_some() {
            self.reset();
        }
        self.expression = builder::apply(&self.expression, symbol);
        self.display()
    }

    /// Evaluate the current expression. Does nothing while an error is shown.
    pub fn submit_equals(&mut self) -> DisplayState {
        if self.error.is_some() {
            return self.display();
        }

        let result = evaluate_expression(&self.expression);
        match &result {
            CalcResult::Success { result: text, .. } => {
                debug!(expression = %self.expression, result = %text, "evaluated");
                if let Some(entry) = HistoryEntry::from_calc_result(&result) {
                    self.history.append(entry);
                }
                self.expression = text.clone();
            }
            CalcResult::Error { error, .. } => {
                debug!(expression = %self.expression, %error, "evaluation failed");
                self.failed_expression = Some(std::mem::replace(
                    &mut self.expression,
                    ERROR_MARKER.to_string(),
                ));
                self.error = Some(*error);
            }
        }

        self.display()
    }

    /// Replace the expression wholesale, as when pasting or re-using a
    /// history entry. Clears any error.
    pub fn set_expression(&mut self, text: &str) -> DisplayState {
        self.reset();
        let text = text.trim();
        if !text.is_empty() {
            self.expression = text.to_string();
        }
        self.display()
    }

    pub fn clear(&mut self) -> DisplayState {
        self.submit_symbol(Symbol::Clear)
    }

    pub fn delete_last(&mut self) -> DisplayState {
        self.submit_symbol(Symbol::Delete)
    }

    /// Handle a keyboard key. Unbound keys leave the state untouched.
    pub fn press_key(&mut self, key: &str) -> DisplayState {
        match action_for_key(key) {
            Some(KeyAction::Input(symbol)) => self.submit_symbol(symbol),
            Some(KeyAction::Equals) => self.submit_equals(),
            None => self.display(),
        }
    }

    pub fn display(&self) -> DisplayState {
        DisplayState {
            expression: self.expression.clone(),
            error: self.error.map(|e| e.to_string()),
            is_error: self.error.is_some(),
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn error(&self) -> Option<EvalError> {
        self.error
    }

    pub fn failed_expression(&self) -> Option<&str> {
        self.failed_expression.as_deref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn reset(&mut self) {
        self.expression = EMPTY_EXPRESSION.to_string();
        self.error = None;
        self.failed_expression = None;
    }
}
