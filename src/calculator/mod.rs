//! Calculator module for building and evaluating keypad expressions.
//!
//! This module provides functionality to:
//! - Edit the expression one keypad symbol at a time
//! - Evaluate expressions and classify failures
//! - Drive a display session with history and keyboard shortcuts

mod builder;
mod evaluation;
mod keys;
mod session;

pub use builder::{
    EMPTY_EXPRESSION, ERROR_MARKER, Operator, Symbol, UnknownSymbol, apply, build,
};
pub use evaluation::{
    CalcResult, OPERATORS, RESULT_PRECISION, classify, evaluate, evaluate_expression,
    format_result, is_operator,
};
pub use keys::{KeyAction, action_for_key};
pub use session::{DisplayState, Session};
