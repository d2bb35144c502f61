//! Error types shared across the calculator and graph modules.

use thiserror::Error;

/// The two failure kinds surfaced by an evaluation.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    /// Malformed or incomplete input, including empty text and a trailing operator.
    #[error("Invalid Expression")]
    InvalidExpression,
    /// The result is infinite or not a number.
    #[error("Division by Zero")]
    DivisionByZero,
}

/// A lexing or parsing failure, positioned at a character offset of the input.
///
/// Never reaches callers of the evaluator directly: it is collapsed into
/// [`EvalError::InvalidExpression`] at the evaluation boundary, but the graph
/// module uses the message to explain why a function was rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },
    #[error("unknown name '{name}' at position {position}")]
    UnknownName { name: String, position: usize },
    #[error("malformed number '{text}' at position {position}")]
    MalformedNumber { text: String, position: usize },
    #[error("unexpected '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },
    #[error("'{name}' at position {position} must be followed by '('")]
    MissingArgument { name: String, position: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unmatched ')' at position {position}")]
    UnmatchedClose { position: usize },
    #[error("expression nests deeper than {0} levels")]
    TooDeep(usize),
}

impl From<ParseError> for EvalError {
    fn from(_: ParseError) -> Self {
        EvalError::InvalidExpression
    }
}

/// Validation failures for graph settings.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("x range [{min}, {max}] must be finite with min below max")]
    InvalidXRange { min: f64, max: f64 },
    #[error("y range [{min}, {max}] must be finite with min below max")]
    InvalidYRange { min: f64, max: f64 },
    #[error("step {0} must be a positive finite number")]
    InvalidStep(f64),
    #[error("step {step} over the x range would produce {count} points (limit {limit})")]
    TooManySamples { step: f64, count: f64, limit: usize },
}

/// Failures reported when editing the equation set.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Enter a function to plot.")]
    EmptyEquation,
    #[error("Maximum of {0} equations reached. Please remove one to add another.")]
    TooManyEquations(usize),
    #[error(
        "Invalid function: could not evaluate 'y = {text}'. Check syntax (e.g., missing '*' or unmatched brackets). ({reason})"
    )]
    InvalidFunction { text: String, reason: String },
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
