//! The set of plotted equations.

use serde::Serialize;
use tracing::{debug, info};

use super::sampler::{CompiledFunction, PlotPoint, samples};
use super::settings::{GraphSettings, SettingsPatch};
use crate::error::{GraphError, SettingsError};

/// Most equations plotted at once.
pub const MAX_EQUATIONS: usize = 5;

/// Line colors, assigned by position in the set.
pub const PALETTE: [&str; 5] = ["#50D7D7", "#4F94D4", "#EF4444", "#A73BFF", "#FFD700"];

/// Equation shown on a fresh graph.
pub const SEED_EQUATION: &str = "x";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EquationId(pub u64);

/// A plotted function. The text never changes once added.
#[derive(Clone, Debug, PartialEq)]
pub struct Equation {
    id: EquationId,
    color: &'static str,
    function: CompiledFunction,
}

impl Equation {
    pub fn id(&self) -> EquationId {
        self.id
    }

    pub fn text(&self) -> &str {
        self.function.text()
    }

    pub fn color(&self) -> &'static str {
        self.color
    }

    pub fn label(&self) -> String {
        format!("y = {}", self.text())
    }
}

/// Points for one equation, ready for a chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub points: Vec<PlotPoint>,
    pub color: String,
}

#[derive(Clone, Debug)]
pub struct Graph {
    equations: Vec<Equation>,
    settings: GraphSettings,
    next_id: u64,
}

impl Default for Graph {
    fn default() -> Self {
        let mut graph = Self::empty(GraphSettings::default());
        graph.push(CompiledFunction::identity());
        graph
    }
}

impl Graph {
    /// A graph showing the seed equation `y = x`.
    pub fn new(settings: GraphSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let mut graph = Self::default();
        graph.settings = settings;
        Ok(graph)
    }

    /// A graph with no equations. `settings` must already be valid.
    pub fn empty(settings: GraphSettings) -> Self {
        Self {
            equations: Vec::new(),
            settings,
            next_id: 1,
        }
    }

    /// Validate and add an equation.
    ///
    /// The text is compiled and probed at `x = 2`; a failure leaves the set
    /// unchanged.
    pub fn add_equation(&mut self, text: &str) -> Result<EquationId, GraphError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GraphError::EmptyEquation);
        }
        if self.equations.len() >= MAX_EQUATIONS {
            return Err(GraphError::TooManyEquations(MAX_EQUATIONS));
        }

        let invalid = |reason: String| GraphError::InvalidFunction {
            text: text.to_string(),
            reason,
        };
        let function = CompiledFunction::compile(text).map_err(|e| invalid(e.to_string()))?;
        if function.probe().is_none() {
            return Err(invalid("no finite value at x = 2".to_string()));
        }

        Ok(self.push(function))
    }

    fn push(&mut self, function: CompiledFunction) -> EquationId {
        let id = EquationId(self.next_id);
        self.next_id += 1;
        let color = PALETTE[self.equations.len() % PALETTE.len()];
        info!(id = id.0, text = function.text(), color, "equation added");

        self.equations.push(Equation {
            id,
            color,
            function,
        });
        id
    }

    /// Remove an equation. Returns whether it was present.
    pub fn remove_equation(&mut self, id: EquationId) -> bool {
        let before = self.equations.len();
        self.equations.retain(|eq| eq.id != id);
        self.equations.len() != before
    }

    pub fn clear(&mut self) {
        self.equations.clear();
    }

    /// Apply a partial settings change. Invalid changes are rejected whole.
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> Result<(), SettingsError> {
        self.settings = self.settings.merged(patch)?;
        debug!(settings = ?self.settings, "settings updated");
        Ok(())
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    /// Sample every equation from scratch.
    pub fn datasets(&self) -> Vec<Dataset> {
        self.equations
            .iter()
            .map(|eq| Dataset {
                label: eq.label(),
                points: samples(&eq.function, &self.settings).collect(),
                color: eq.color.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_seed_equation() {
        let graph = Graph::default();
        assert_eq!(graph.equations().len(), 1);
        assert_eq!(graph.equations()[0].label(), "y = x");
        assert_eq!(graph.equations()[0].text(), SEED_EQUATION);
        assert_eq!(graph.equations()[0].color(), PALETTE[0]);
    }

    #[test]
    fn test_seed_takes_first_id() {
        let mut graph = Graph::default();
        assert_eq!(graph.equations()[0].id(), EquationId(1));
        assert_eq!(graph.add_equation("x^2").unwrap(), EquationId(2));
        assert_eq!(graph.equations()[1].color(), PALETTE[1]);
    }

    #[test]
    fn test_add_assigns_ids_and_colors() {
        let mut graph = Graph::empty(GraphSettings::default());
        let a = graph.add_equation("sin(x)").unwrap();
        let b = graph.add_equation("  x^2  ").unwrap();
        assert!(b > a);
        assert_eq!(graph.equations()[1].text(), "x^2");
        assert_eq!(graph.equations()[1].color(), PALETTE[1]);
    }

    #[test]
    fn test_add_rejects_empty() {
        let mut graph = Graph::default();
        assert_eq!(graph.add_equation("   "), Err(GraphError::EmptyEquation));
    }

    #[test]
    fn test_add_rejects_sixth_equation() {
        let mut graph = Graph::empty(GraphSettings::default());
        for text in ["x", "2*x", "3*x", "4*x", "5*x"] {
            graph.add_equation(text).unwrap();
        }
        assert_eq!(
            graph.add_equation("6*x"),
            Err(GraphError::TooManyEquations(MAX_EQUATIONS))
        );
        assert_eq!(graph.equations().len(), MAX_EQUATIONS);
    }

    #[test]
    fn test_add_rejects_unevaluable_text() {
        let mut graph = Graph::default();
        let err = graph.add_equation("2x").unwrap_err();
        assert!(matches!(err, GraphError::InvalidFunction { .. }));
        assert!(err.to_string().contains("y = 2x"));

        assert!(matches!(
            graph.add_equation("1/(x-2)"),
            Err(GraphError::InvalidFunction { .. })
        ));
        assert!(matches!(
            graph.add_equation("foo(x)"),
            Err(GraphError::InvalidFunction { .. })
        ));
        assert_eq!(graph.equations().len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut graph = Graph::default();
        let id = graph.add_equation("cos(x)").unwrap();
        assert!(graph.remove_equation(id));
        assert!(!graph.remove_equation(id));
        assert_eq!(graph.equations().len(), 1);

        graph.clear();
        assert!(graph.datasets().is_empty());
    }

    #[test]
    fn test_colors_follow_position() {
        let mut graph = Graph::empty(GraphSettings::default());
        let first = graph.add_equation("x").unwrap();
        graph.add_equation("x+1").unwrap();
        graph.remove_equation(first);
        graph.add_equation("x+2").unwrap();
        // Two equations remain, so the new one takes the second color
        assert_eq!(graph.equations()[1].color(), PALETTE[1]);
    }

    #[test]
    fn test_datasets_break_at_asymptote() {
        let mut graph = Graph::empty(GraphSettings::default());
        graph.add_equation("1/x").unwrap();
        let datasets = graph.datasets();
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].label, "y = 1/x");
        assert!(datasets[0].points.iter().all(|p| p.x != 0.0));
        assert!(datasets[0].points.iter().all(|p| p.y.abs() <= 20.0));
    }

    #[test]
    fn test_update_settings() {
        let mut graph = Graph::default();
        let patch = SettingsPatch {
            x_min: Some(0.0),
            x_max: Some(1.0),
            step: Some(0.5),
            ..Default::default()
        };
        graph.update_settings(&patch).unwrap();
        assert_eq!(graph.datasets()[0].points.len(), 3);

        let bad = SettingsPatch {
            step: Some(0.0),
            ..Default::default()
        };
        assert!(graph.update_settings(&bad).is_err());
        assert_eq!(graph.settings().step, 0.5);
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let settings = GraphSettings {
            x_range: [1.0, 1.0],
            ..GraphSettings::default()
        };
        assert!(Graph::new(settings).is_err());
    }
}
