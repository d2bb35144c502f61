//! Expression tree and its tree-walking evaluator.

use super::grammar::Function;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
            Self::Power => lhs.powf(rhs),
        }
    }
}

/// A parsed expression. Constants are folded into [`Expr::Number`] while parsing.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    /// The plotted variable `x`.
    Variable,
    Negate(Box<Expr>),
    /// `a%`, one hundredth of the operand.
    Percent(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// A left-associative run of same-precedence operators, `a + b - c`.
    /// Kept flat so long sums and products do not deepen the tree.
    Chain {
        first: Box<Expr>,
        rest: Vec<(BinaryOp, Expr)>,
    },
    Call {
        function: Function,
        argument: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// `first` alone, or a [`Expr::Chain`] when `rest` is non-empty.
    pub fn chain(first: Expr, rest: Vec<(BinaryOp, Expr)>) -> Self {
        if rest.is_empty() {
            first
        } else {
            Self::Chain {
                first: Box::new(first),
                rest,
            }
        }
    }

    /// Evaluate with `x` bound to the given value.
    ///
    /// Never fails: division by zero and domain errors surface as infinities
    /// or NaN for the caller to classify.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Variable => x,
            Self::Negate(inner) => -inner.eval(x),
            Self::Percent(inner) => inner.eval(x) / 100.0,
            Self::Binary { op, lhs, rhs } => op.apply(lhs.eval(x), rhs.eval(x)),
            Self::Chain { first, rest } => rest
                .iter()
                .fold(first.eval(x), |acc, (op, rhs)| op.apply(acc, rhs.eval(x))),
            Self::Call { function, argument } => function.apply(argument.eval(x)),
        }
    }

    /// Whether the tree mentions `x` anywhere.
    pub fn uses_variable(&self) -> bool {
        match self {
            Self::Number(_) => false,
            Self::Variable => true,
            Self::Negate(inner) | Self::Percent(inner) => inner.uses_variable(),
            Self::Binary { lhs, rhs, .. } => lhs.uses_variable() || rhs.uses_variable(),
            Self::Chain { first, rest } => {
                first.uses_variable() || rest.iter().any(|(_, operand)| operand.uses_variable())
            }
            Self::Call { argument, .. } => argument.uses_variable(),
        }
    }
}
