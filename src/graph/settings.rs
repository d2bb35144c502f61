//! Plot settings and partial updates.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Upper bound on points sampled per equation.
pub const MAX_SAMPLES: usize = 100_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphSettings {
    pub show_grid: bool,
    pub show_legend: bool,
    /// `[min, max]` of the sampled x values.
    pub x_range: [f64; 2],
    /// `[min, max]` of the visible y values.
    pub y_range: [f64; 2],
    /// Distance between sampled x values.
    pub step: f64,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_legend: true,
            x_range: [-20.0, 20.0],
            y_range: [-20.0, 20.0],
            step: 0.1,
        }
    }
}

impl GraphSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let [x_min, x_max] = self.x_range;
        if !(x_min.is_finite() && x_max.is_finite() && x_min < x_max) {
            return Err(SettingsError::InvalidXRange {
                min: x_min,
                max: x_max,
            });
        }

        let [y_min, y_max] = self.y_range;
        if !(y_min.is_finite() && y_max.is_finite() && y_min < y_max) {
            return Err(SettingsError::InvalidYRange {
                min: y_min,
                max: y_max,
            });
        }

        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(SettingsError::InvalidStep(self.step));
        }

        let count = ((x_max - x_min) / self.step).ceil() + 1.0;
        if count > MAX_SAMPLES as f64 {
            return Err(SettingsError::TooManySamples {
                step: self.step,
                count,
                limit: MAX_SAMPLES,
            });
        }

        Ok(())
    }

    /// Index of the last sample: `ceil((x_max - x_min) / step)`.
    ///
    /// Only meaningful for validated settings.
    pub fn step_count(&self) -> u64 {
        let [x_min, x_max] = self.x_range;
        ((x_max - x_min) / self.step).ceil() as u64
    }

    /// Merge a partial update, returning the new settings if they validate.
    pub fn merged(&self, patch: &SettingsPatch) -> Result<Self, SettingsError> {
        let mut next = self.clone();
        if let Some(show_grid) = patch.show_grid {
            next.show_grid = show_grid;
        }
        if let Some(show_legend) = patch.show_legend {
            next.show_legend = show_legend;
        }
        if let Some(x_min) = patch.x_min {
            next.x_range[0] = x_min;
        }
        if let Some(x_max) = patch.x_max {
            next.x_range[1] = x_max;
        }
        if let Some(y_min) = patch.y_min {
            next.y_range[0] = y_min;
        }
        if let Some(y_max) = patch.y_max {
            next.y_range[1] = y_max;
        }
        if let Some(step) = patch.step {
            next.step = step;
        }
        next.validate()?;
        Ok(next)
    }
}

/// A partial settings update. Unset fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub show_grid: Option<bool>,
    pub show_legend: Option<bool>,
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub step: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = GraphSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.step_count(), 400);
    }

    #[test]
    fn test_merge_partial() {
        let patch = SettingsPatch {
            y_max: Some(50.0),
            show_grid: Some(false),
            ..Default::default()
        };
        let merged = GraphSettings::default().merged(&patch).unwrap();
        assert_eq!(merged.y_range, [-20.0, 50.0]);
        assert_eq!(merged.x_range, [-20.0, 20.0]);
        assert!(!merged.show_grid);
        assert!(merged.show_legend);
    }

    #[test]
    fn test_invalid_ranges() {
        let inverted = SettingsPatch {
            x_min: Some(30.0),
            ..Default::default()
        };
        assert!(matches!(
            GraphSettings::default().merged(&inverted),
            Err(SettingsError::InvalidXRange { .. })
        ));

        let nan = SettingsPatch {
            y_min: Some(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(
            GraphSettings::default().merged(&nan),
            Err(SettingsError::InvalidYRange { .. })
        ));
    }

    #[test]
    fn test_step_bounds() {
        let negative = SettingsPatch {
            step: Some(-0.1),
            ..Default::default()
        };
        assert_eq!(
            GraphSettings::default().merged(&negative),
            Err(SettingsError::InvalidStep(-0.1))
        );

        let tiny = SettingsPatch {
            step: Some(1e-6),
            ..Default::default()
        };
        assert!(matches!(
            GraphSettings::default().merged(&tiny),
            Err(SettingsError::TooManySamples { .. })
        ));
    }
}
