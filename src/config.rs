//! Pipeline configuration
//!
//! A single value object carries every tunable of the pipeline: window and
//! lag sizes, forecast horizon, the minimum history a material needs before
//! a model is attempted, and the seasonality flags handed to the model
//! capability. No module-level defaults exist; the orchestrator receives
//! this object explicitly.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Seasonality composition mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonalityMode {
    Additive,
    Multiplicative,
}

/// Seasonal components the model capability should fit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityConfig {
    /// Yearly (month-of-year) seasonality
    pub yearly: bool,
    /// Weekly (day-of-week) seasonality
    pub weekly: bool,
    /// Daily seasonality. Unused at daily sampling frequency.
    pub daily: bool,
    pub mode: SeasonalityMode,
}

impl Default for SeasonalityConfig {
    fn default() -> Self {
        SeasonalityConfig {
            yearly: true,
            weekly: true,
            daily: false,
            mode: SeasonalityMode::Multiplicative,
        }
    }
}

/// Configuration for the forecasting pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Trailing moving-average window sizes, in rows of one material
    pub windows: Vec<usize>,
    /// Lag offsets, in rows of one material
    pub lags: Vec<usize>,
    /// Number of future periods to forecast past the last observation
    pub horizon: usize,
    /// Minimum feature rows a material must retain to be trained
    pub min_history: usize,
    /// Confidence level for prediction intervals
    pub confidence_level: f64,
    pub seasonality: SeasonalityConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        ForecastConfig {
            windows: vec![7, 30, 90],
            lags: vec![1, 7, 30],
            horizon: 30,
            min_history: 60,
            confidence_level: 0.95,
            seasonality: SeasonalityConfig::default(),
        }
    }
}

impl ForecastConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set moving-average window sizes
    pub fn with_windows(mut self, windows: Vec<usize>) -> Self {
        self.windows = windows;
        self
    }

    /// Set lag offsets
    pub fn with_lags(mut self, lags: Vec<usize>) -> Self {
        self.lags = lags;
        self
    }

    /// Set the forecast horizon
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Set the minimum training history threshold
    pub fn with_min_history(mut self, min_history: usize) -> Self {
        self.min_history = min_history;
        self
    }

    /// Set the prediction interval confidence level
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    /// Set the seasonality flags
    pub fn with_seasonality(mut self, seasonality: SeasonalityConfig) -> Self {
        self.seasonality = seasonality;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.windows.is_empty() {
            return Err(Error::InvalidInput(
                "at least one moving-average window is required".to_string(),
            ));
        }
        if self.lags.is_empty() {
            return Err(Error::InvalidInput(
                "at least one lag offset is required".to_string(),
            ));
        }
        if self.windows.iter().any(|&w| w == 0) {
            return Err(Error::InvalidInput(
                "window sizes must be at least 1".to_string(),
            ));
        }
        if self.lags.iter().any(|&k| k == 0) {
            return Err(Error::InvalidInput(
                "lag offsets must be at least 1".to_string(),
            ));
        }
        if self.horizon == 0 {
            return Err(Error::InvalidInput(
                "forecast horizon must be at least 1".to_string(),
            ));
        }
        if self.confidence_level <= 0.0 || self.confidence_level >= 1.0 {
            return Err(Error::InvalidInput(format!(
                "confidence level ({}) must be strictly between 0 and 1",
                self.confidence_level
            )));
        }
        Ok(())
    }
}
