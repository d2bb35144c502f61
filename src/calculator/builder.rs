//! Keystroke-by-keystroke expression editing.
//!
//! [`apply`] decides how one input symbol changes the expression text. It
//! never evaluates anything and never inserts an implied `*`; normalising the
//! text is left to the evaluator.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::evaluation::is_operator;
use crate::expr::{CALCULATOR_FUNCTIONS, Function, unmatched_opens};

/// The placeholder shown when nothing has been entered.
pub const EMPTY_EXPRESSION: &str = "0";

/// What the display shows after a failed evaluation.
pub const ERROR_MARKER: &str = "Error";

/// A binary operator key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Percent,
    Power,
}

impl Operator {
    pub fn as_char(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Percent => '%',
            Self::Power => '^',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '%' => Some(Self::Percent),
            '^' => Some(Self::Power),
            _ => None,
        }
    }
}

/// One discrete keypad input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// An ASCII digit `0`-`9`.
    Digit(char),
    Point,
    Operator(Operator),
    /// A scientific prefix such as `sin(`.
    Function(Function),
    Pi,
    OpenParen,
    CloseParen,
    Delete,
    Clear,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown input symbol '{0}'")]
pub struct UnknownSymbol(pub String);

impl FromStr for Symbol {
    type Err = UnknownSymbol;

    /// Parse a keypad label: `"7"`, `"."`, `"+"`, `"sin("`, `"π"`, `"DEL"`, `"C"`...
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let symbol = match label {
            "." => Self::Point,
            "π" => Self::Pi,
            "(" => Self::OpenParen,
            ")" => Self::CloseParen,
            "DEL" => Self::Delete,
            "C" => Self::Clear,
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Self::Digit(c),
                    (Some(c), None) => Operator::from_char(c)
                        .map(Self::Operator)
                        .ok_or_else(|| unknown(label))?,
                    _ => CALCULATOR_FUNCTIONS
                        .iter()
                        .find(|f| f.keypad_prefix() == Some(label))
                        .map(|&f| Self::Function(f))
                        .ok_or_else(|| unknown(label))?,
                }
            }
        };
        Ok(symbol)
    }
}

fn unknown(label: &str) -> UnknownSymbol {
    UnknownSymbol(label.to_string())
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Point => write!(f, "."),
            Self::Operator(op) => write!(f, "{}", op.as_char()),
            Self::Function(func) => write!(f, "{}", func.keypad_prefix().unwrap_or(func.name())),
            Self::Pi => write!(f, "π"),
            Self::OpenParen => write!(f, "("),
            Self::CloseParen => write!(f, ")"),
            Self::Delete => write!(f, "DEL"),
            Self::Clear => write!(f, "C"),
        }
    }
}

/// Compute the expression that results from entering `symbol` after `current`.
pub fn apply(current: &str, symbol: Symbol) -> String {
    let is_empty = current == EMPTY_EXPRESSION;
    let last = current.chars().last();
    let after_operator = last.is_some_and(is_operator);

    match symbol {
        Symbol::Clear => EMPTY_EXPRESSION.to_string(),

        Symbol::Delete => {
            if current == ERROR_MARKER {
                return EMPTY_EXPRESSION.to_string();
            }
            let mut next = current.to_string();
            next.pop();
            if next.is_empty() {
                EMPTY_EXPRESSION.to_string()
            } else {
                next
            }
        }

        Symbol::Digit(d) if !d.is_ascii_digit() => current.to_string(),
        Symbol::Digit(d) => replace_or_append(current, is_empty, &d.to_string()),

        Symbol::Point => {
            let run = current.rsplit(is_operator).next().unwrap_or(current);
            if run.contains('.') {
                current.to_string()
            } else if after_operator {
                format!("{current}0.")
            } else {
                format!("{current}.")
            }
        }

        Symbol::Operator(op) => {
            let c = op.as_char();
            match last {
                Some(prev) if is_operator(prev) => {
                    if c == '-' && prev != '-' {
                        // Unary minus after another operator
                        format!("{current}-")
                    } else if c == '-' {
                        current.to_string()
                    } else {
                        // Latest operator wins
                        let mut next = current.to_string();
                        next.pop();
                        next.push(c);
                        next
                    }
                }
                _ => format!("{current}{c}"),
            }
        }

        Symbol::Function(function) => match function.keypad_prefix() {
            Some(prefix) => replace_or_append(current, is_empty, prefix),
            None => current.to_string(),
        },

        Symbol::Pi => replace_or_append(current, is_empty, "π"),

        Symbol::OpenParen => replace_or_append(current, is_empty, "("),

        Symbol::CloseParen => {
            if unmatched_opens(current) > 0 {
                format!("{current})")
            } else {
                current.to_string()
            }
        }
    }
}

fn replace_or_append(current: &str, is_empty: bool, token: &str) -> String {
    if is_empty {
        token.to_string()
    } else {
        format!("{current}{token}")
    }
}

/// Apply a sequence of symbols starting from the empty expression.
pub fn build<I>(symbols: I) -> String
where
    I: IntoIterator<Item = Symbol>,
{
    symbols
        .into_iter()
        .fold(EMPTY_EXPRESSION.to_string(), |expr, symbol| apply(&expr, symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(labels: &[&str]) -> String {
        build(labels.iter().map(|l| l.parse::<Symbol>().unwrap()))
    }

    fn step(current: &str, label: &str) -> String {
        apply(current, label.parse().unwrap())
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("7".parse(), Ok(Symbol::Digit('7')));
        assert_eq!("^".parse(), Ok(Symbol::Operator(Operator::Power)));
        assert_eq!("sqrt(".parse(), Ok(Symbol::Function(Function::Sqrt)));
        assert_eq!("DEL".parse(), Ok(Symbol::Delete));
        assert_eq!(
            "abs(".parse::<Symbol>(),
            Err(UnknownSymbol("abs(".to_string()))
        );
        assert!("12".parse::<Symbol>().is_err());
        assert!("".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_labels_round_trip_through_display() {
        for label in ["3", ".", "%", "ln(", "π", "(", ")", "DEL", "C"] {
            let symbol: Symbol = label.parse().unwrap();
            assert_eq!(symbol.to_string(), label);
        }
    }

    #[test]
    fn test_clear() {
        assert_eq!(step("12+sin(3", "C"), "0");
        assert_eq!(step("0", "C"), "0");
    }

    #[test]
    fn test_delete() {
        assert_eq!(step("123", "DEL"), "12");
        assert_eq!(step("7", "DEL"), "0");
        assert_eq!(step("0", "DEL"), "0");
        assert_eq!(step("2π", "DEL"), "2");
        assert_eq!(step("Error", "DEL"), "0");
    }

    #[test]
    fn test_digit_replaces_placeholder() {
        assert_eq!(keys(&["0", "1"]), "1");
        assert_eq!(keys(&["1", "0", "5"]), "105");
    }

    #[test]
    fn test_decimal_point() {
        assert_eq!(keys(&["."]), "0.");
        assert_eq!(keys(&["1", ".", "5", "."]), "1.5");
        assert_eq!(keys(&["1", ".", "5", "+", "."]), "1.5+0.");
        assert_eq!(keys(&["1", ".", "5", "+", "2", "."]), "1.5+2.");
    }

    #[test]
    fn test_operator_collisions() {
        assert_eq!(keys(&["5", "+", "*"]), "5*");
        assert_eq!(keys(&["5", "*", "-"]), "5*-");
        assert_eq!(keys(&["5", "-", "-"]), "5-");
        assert_eq!(keys(&["5", "*", "-", "+"]), "5*+");
        assert_eq!(keys(&["5", "%", "^"]), "5^");
    }

    #[test]
    fn test_operator_on_placeholder_appends() {
        assert_eq!(keys(&["+"]), "0+");
        assert_eq!(keys(&["-"]), "0-");
    }

    #[test]
    fn test_prefixes_and_constants() {
        assert_eq!(keys(&["sin("]), "sin(");
        assert_eq!(keys(&["2", "sqrt("]), "2sqrt(");
        assert_eq!(keys(&["π"]), "π");
        assert_eq!(keys(&["2", "π"]), "2π");
        assert_eq!(keys(&["(", "1", ")", "π"]), "(1)π");
        assert_eq!(keys(&["3", "+", "π"]), "3+π");
    }

    #[test]
    fn test_close_paren_requires_open() {
        assert_eq!(keys(&["5", ")"]), "5");
        assert_eq!(keys(&["(", "5", ")", ")"]), "(5)");
        assert_eq!(keys(&["cos(", "(", "1", ")", ")"]), "cos((1))");
    }

    #[test]
    fn test_plot_only_function_is_ignored() {
        assert_eq!(apply("12", Symbol::Function(Function::Abs)), "12");
    }
}
