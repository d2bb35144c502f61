//! Calculator core: a keystroke expression builder, a safe scientific
//! evaluator and a function sampler for plotting.

pub mod calculator;
pub mod config;
pub mod error;
pub mod expr;
pub mod graph;
pub mod history;

pub use calculator::{CalcResult, DisplayState, Session, Symbol, evaluate, evaluate_expression};
pub use config::Config;
pub use error::{EvalError, GraphError, ParseError, SettingsError};
pub use graph::{Dataset, Graph, GraphSettings, PlotPoint, SettingsPatch};
pub use history::{History, HistoryEntry, HistoryStore, JsonFileStore};

#[cfg(test)]
mod proptests;
