//! Expression engine shared by the calculator and the graph sampler.
//!
//! This module provides functionality to:
//! - Tokenize text under a configurable [`Grammar`]
//! - Insert implied multiplication and balance open parentheses
//! - Parse into an explicit [`Expr`] tree and evaluate it

mod ast;
mod grammar;
mod lexer;
mod parser;

pub use ast::{BinaryOp, Expr};
pub use grammar::{CALCULATOR_FUNCTIONS, Constant, Function, Grammar, PLOT_FUNCTIONS};
pub use lexer::{Token, TokenKind, tokenize};
pub use parser::{MAX_DEPTH, parse};

use crate::error::ParseError;

/// Number of `(` in `text` that have no matching `)`.
pub fn unmatched_opens(text: &str) -> usize {
    let opens = text.chars().filter(|&c| c == '(').count();
    let closes = text.chars().filter(|&c| c == ')').count();
    opens.saturating_sub(closes)
}

/// Append one `)` for every unmatched `(`.
pub fn auto_close(text: &str) -> String {
    let mut closed = text.to_string();
    closed.push_str(&")".repeat(unmatched_opens(text)));
    closed
}

/// Auto-close, tokenize and parse `text` into a tree.
pub fn compile(text: &str, grammar: Grammar) -> Result<Expr, ParseError> {
    let closed = auto_close(text);
    let tokens = tokenize(&closed, grammar)?;
    parse(&tokens)
}
