//! Graph mode: plotted equations and their sampled points.
//!
//! This module provides functionality to:
//! - Validate and keep the set of plotted equations
//! - Hold plot settings and apply partial updates
//! - Sample each equation into chart-ready datasets

mod plot;
mod sampler;
mod settings;

pub use plot::{Dataset, Equation, EquationId, Graph, MAX_EQUATIONS, PALETTE, SEED_EQUATION};
pub use sampler::{CompiledFunction, PROBE_X, PlotPoint, Samples, sample};
pub use settings::{GraphSettings, MAX_SAMPLES, SettingsPatch};
