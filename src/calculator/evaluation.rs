//! Expression evaluation for keypad input.
//!
//! Wraps the expression engine to provide a simple interface for evaluating
//! calculator expressions, classifying failures and formatting results.

use tracing::debug;

use crate::error::EvalError;
use crate::expr::{self, Grammar};

/// Decimal places kept in a displayed result.
pub const RESULT_PRECISION: usize = 10;

/// Characters that act as binary operators on the keypad.
pub const OPERATORS: [char; 6] = ['+', '-', '*', '/', '%', '^'];

pub fn is_operator(c: char) -> bool {
    OPERATORS.contains(&c)
}

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// Successful calculation with a finite numeric result.
    Success {
        /// The expression that was evaluated, parentheses balanced.
        expression: String,
        /// The numeric value, rounded to [`RESULT_PRECISION`] places.
        value: f64,
        /// Canonical text of the value.
        result: String,
    },
    /// The expression was rejected or produced no finite number.
    Error {
        /// The submitted expression.
        expression: String,
        error: EvalError,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (result or error message).
    pub fn display(&self) -> String {
        match self {
            Self::Success { result, .. } => result.clone(),
            Self::Error { error, .. } => error.to_string(),
        }
    }

    pub fn error(&self) -> Option<EvalError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error, .. } => Some(*error),
        }
    }

    /// Collapse into the result text or the failure kind.
    pub fn into_result(self) -> Result<String, EvalError> {
        match self {
            Self::Success { result, .. } => Ok(result),
            Self::Error { error, .. } => Err(error),
        }
    }
}

/// Evaluate a calculator expression.
///
/// Never panics and never returns anything but a formatted number or one of
/// the two [`EvalError`] kinds.
pub fn evaluate_expression(input: &str) -> CalcResult {
    let trimmed = input.trim();

    // An empty or operator-terminated expression is incomplete
    if trimmed.chars().last().is_none_or(is_operator) {
        debug!(expression = trimmed, "rejected incomplete expression");
        return CalcResult::Error {
            expression: trimmed.to_string(),
            error: EvalError::InvalidExpression,
        };
    }

    let expression = expr::auto_close(trimmed);

    let tree = match expr::compile(&expression, Grammar::Calculator) {
        Ok(tree) => tree,
        Err(e) => {
            debug!(expression = %expression, error = %e, "parse failed");
            return CalcResult::Error {
                expression,
                error: EvalError::InvalidExpression,
            };
        }
    };

    match classify(tree.eval(0.0)) {
        Ok(value) => CalcResult::Success {
            result: format_result(value),
            expression,
            value,
        },
        Err(error) => {
            debug!(expression = %expression, "non-finite result");
            CalcResult::Error { expression, error }
        }
    }
}

/// Shorthand for [`evaluate_expression`] returning the result text.
pub fn evaluate(input: &str) -> Result<String, EvalError> {
    evaluate_expression(input).into_result()
}

/// Reject non-finite values and round the rest to [`RESULT_PRECISION`] places.
pub fn classify(value: f64) -> Result<f64, EvalError> {
    if !value.is_finite() {
        return Err(EvalError::DivisionByZero);
    }
    Ok(round_to_precision(value))
}

fn round_to_precision(value: f64) -> f64 {
    // Round through decimal text so that e.g. 0.1 + 0.2 lands on 0.3 exactly
    format!("{:.*}", RESULT_PRECISION, value)
        .parse()
        .unwrap_or(value)
}

/// Format a rounded value canonically: no trailing zeros, no exponent, and
/// negative zero shown as `0`.
pub fn format_result(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}
