use crate::error::{HrmError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a correlation value is compared against the detection threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdPolarity {
    /// `|c| > threshold`, catching inverted beats as well.
    #[default]
    Absolute,
    /// `c > threshold` on the raw signed correlation.
    Positive,
}

/// Parameters of the template-correlation beat detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Correlation magnitude a sample must exceed to count as a beat.
    pub threshold: f64,
    /// Samples skipped after each detection.
    pub refractory_samples: usize,
    /// Number of leading reference samples used as the template.
    pub template_len: usize,
    /// Physiological voltage bound (mV) beyond which the strip is rescaled.
    pub voltage_bound: f64,
    pub polarity: ThresholdPolarity,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: 4.75,
            refractory_samples: 100,
            template_len: 119,
            voltage_bound: 2.0,
            polarity: ThresholdPolarity::Absolute,
        }
    }
}

impl DetectorConfig {
    /// Parse a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text).map_err(invalid)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HrmError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(invalid)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(HrmError::InvalidConfig(format!(
                "threshold must be positive, got {}",
                self.threshold
            )));
        }
        if self.refractory_samples == 0 {
            return Err(HrmError::InvalidConfig(
                "refractory_samples must be at least 1".into(),
            ));
        }
        if self.template_len == 0 {
            return Err(HrmError::InvalidConfig(
                "template_len must be at least 1".into(),
            ));
        }
        if !(self.voltage_bound.is_finite() && self.voltage_bound > 0.0) {
            return Err(HrmError::InvalidConfig(format!(
                "voltage_bound must be positive, got {}",
                self.voltage_bound
            )));
        }
        Ok(())
    }
}

fn invalid(err: impl std::fmt::Display) -> HrmError {
    HrmError::InvalidConfig(err.to_string())
}
