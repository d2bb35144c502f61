//! Function sampling for plots.
//!
//! A [`CompiledFunction`] is parsed once with the function grammar and then
//! evaluated at evenly spaced `x` values. [`Samples`] is a lazy iterator that
//! can be cloned to restart from the first point.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::settings::GraphSettings;
use crate::error::{ParseError, SettingsError};
use crate::expr::{self, Expr, Grammar};

/// Where new equations are test-evaluated before being accepted.
pub const PROBE_X: f64 = 2.0;

/// Decimal places kept on sampled `x` values.
const X_DECIMALS: i32 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

/// Function text in `x`, parsed and ready to evaluate.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledFunction {
    text: String,
    tree: Expr,
}

impl CompiledFunction {
    pub fn compile(text: &str) -> Result<Self, ParseError> {
        let tree = expr::compile(text, Grammar::Function)?;
        debug!(text, constant = !tree.uses_variable(), "function compiled");
        Ok(Self {
            text: text.to_string(),
            tree,
        })
    }

    /// `y = x`.
    pub fn identity() -> Self {
        Self {
            text: "x".to_string(),
            tree: Expr::Variable,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Evaluate at `x`. May be infinite or NaN.
    pub fn eval(&self, x: f64) -> f64 {
        self.tree.eval(x)
    }

    /// Evaluate at [`PROBE_X`], returning the value only if it is finite.
    pub fn probe(&self) -> Option<f64> {
        let y = self.eval(PROBE_X);
        y.is_finite().then_some(y)
    }
}

/// Lazily evaluated plot points for one function.
///
/// Points whose `y` is not finite or falls outside the y range are skipped,
/// leaving gaps at asymptotes and off-screen excursions.
#[derive(Clone, Debug)]
pub struct Samples<'a> {
    function: &'a CompiledFunction,
    x_min: f64,
    x_max: f64,
    step: f64,
    y_min: f64,
    y_max: f64,
    index: u64,
    last: u64,
}

impl Iterator for Samples<'_> {
    type Item = PlotPoint;

    fn next(&mut self) -> Option<PlotPoint> {
        while self.index <= self.last {
            // Computed from the index so error does not accumulate
            let x = (self.x_min + self.index as f64 * self.step).min(self.x_max);
            self.index += 1;

            let y = self.function.eval(x);
            if y.is_finite() && y >= self.y_min && y <= self.y_max {
                return Some(PlotPoint { x: round_x(x), y });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last + 1).saturating_sub(self.index);
        (0, usize::try_from(remaining).ok())
    }
}

fn round_x(x: f64) -> f64 {
    let scale = 10f64.powi(X_DECIMALS);
    (x * scale).round() / scale
}

/// Sample `function` over the ranges in `settings`.
///
/// Fails if the settings are invalid or would produce more than
/// [`MAX_SAMPLES`](super::settings::MAX_SAMPLES) points.
pub fn sample<'a>(
    function: &'a CompiledFunction,
    settings: &GraphSettings,
) -> Result<Samples<'a>, SettingsError> {
    settings.validate()?;
    Ok(samples(function, settings))
}

/// Sample without validating; callers must hold validated settings.
pub(crate) fn samples<'a>(function: &'a CompiledFunction, settings: &GraphSettings) -> Samples<'a> {
    let [x_min, x_max] = settings.x_range;
    let [y_min, y_max] = settings.y_range;
    let last = settings.step_count();
    debug!(function = function.text(), points = last + 1, "sampling");

    Samples {
        function,
        x_min,
        x_max,
        step: settings.step,
        y_min,
        y_max,
        index: 0,
        last,
    }
}
