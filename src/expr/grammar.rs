//! Token vocabularies understood by the expression engine.
//!
//! The calculator keypad and the graph function input share one parser but
//! accept slightly different text. [`Grammar`] captures those differences.

use std::f64::consts;

/// Which flavour of input text is being read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// Keypad text: exact `sin(`-style prefixes, `π`, `%`, and implied
    /// multiplication between adjacent operands.
    Calculator,
    /// Typed function text in `x`: case-insensitive whole-word names, `pi`
    /// and `e` constants, `**` as power, no implied multiplication.
    Function,
}

impl Grammar {
    /// Whether adjacent operands such as `2(` or `)π` get a `*` inserted.
    pub fn implicit_multiplication(self) -> bool {
        matches!(self, Self::Calculator)
    }

    /// Whether `%` (percent of) is accepted.
    pub fn percent(self) -> bool {
        matches!(self, Self::Calculator)
    }

    /// Whether `**` is read as power.
    pub fn double_star_power(self) -> bool {
        matches!(self, Self::Function)
    }

    /// Whether the plotted variable `x` may appear.
    pub fn variable(self) -> bool {
        matches!(self, Self::Function)
    }

    /// Look up a function by name in this grammar.
    ///
    /// The function grammar matches case-insensitively; the calculator grammar
    /// only knows the lowercase keypad names.
    pub fn function(self, name: &str) -> Option<Function> {
        match self {
            Self::Calculator => CALCULATOR_FUNCTIONS
                .iter()
                .copied()
                .find(|f| f.name() == name),
            Self::Function => {
                let lower = name.to_ascii_lowercase();
                PLOT_FUNCTIONS.iter().copied().find(|f| f.name() == lower)
            }
        }
    }
}

/// Functions on the calculator keypad, in keypad order.
pub const CALCULATOR_FUNCTIONS: [Function; 6] = [
    Function::Sin,
    Function::Cos,
    Function::Tan,
    Function::Log,
    Function::Ln,
    Function::Sqrt,
];

/// Functions accepted in plotted equations.
pub const PLOT_FUNCTIONS: [Function; 7] = [
    Function::Sin,
    Function::Cos,
    Function::Tan,
    Function::Log,
    Function::Ln,
    Function::Sqrt,
    Function::Abs,
];

/// A single-argument scientific function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    /// Base-10 logarithm.
    Log,
    /// Natural logarithm.
    Ln,
    Sqrt,
    Abs,
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
        }
    }

    /// The keypad prefix (`"sin("` etc.), or `None` for functions that only
    /// exist in plotted equations.
    pub fn keypad_prefix(self) -> Option<&'static str> {
        match self {
            Self::Sin => Some("sin("),
            Self::Cos => Some("cos("),
            Self::Tan => Some("tan("),
            Self::Log => Some("log("),
            Self::Ln => Some("ln("),
            Self::Sqrt => Some("sqrt("),
            Self::Abs => None,
        }
    }

    /// Apply the function. Trigonometry is in radians.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Sin => value.sin(),
            Self::Cos => value.cos(),
            Self::Tan => value.tan(),
            Self::Log => value.log10(),
            Self::Ln => value.ln(),
            Self::Sqrt => value.sqrt(),
            Self::Abs => value.abs(),
        }
    }
}

/// Named constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => consts::PI,
            Self::E => consts::E,
        }
    }
}
