//! Accuracy metrics
//!
//! Point-error metrics between two aligned numeric series, plus the
//! per-material `AccuracyReport` the orchestrator emits.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Regression metrics over aligned (actual, predicted) slices
pub mod regression {
    use super::*;

    fn check_aligned(actual: &[f64], predicted: &[f64]) -> Result<()> {
        if actual.len() != predicted.len() {
            return Err(Error::LengthMismatch {
                expected: actual.len(),
                actual: predicted.len(),
            });
        }
        if actual.is_empty() {
            return Err(Error::EmptyData(
                "metric requires at least one observation".to_string(),
            ));
        }
        Ok(())
    }

    /// Mean Absolute Error (MAE)
    pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
        check_aligned(actual, predicted)?;
        let sum: f64 = actual
            .iter()
            .zip(predicted)
            .map(|(a, p)| (a - p).abs())
            .sum();
        Ok(sum / actual.len() as f64)
    }

    /// Mean Squared Error (MSE)
    pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
        check_aligned(actual, predicted)?;
        let sum: f64 = actual
            .iter()
            .zip(predicted)
            .map(|(a, p)| (a - p).powi(2))
            .sum();
        Ok(sum / actual.len() as f64)
    }

    /// Root Mean Squared Error (RMSE)
    pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
        Ok(mean_squared_error(actual, predicted)?.sqrt())
    }

    /// Mean Absolute Percentage Error (MAPE), as a percentage
    ///
    /// Undefined when any actual value is exactly zero; this signals
    /// `MetricUndefined` instead of producing infinity or NaN.
    pub fn mean_absolute_percentage_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
        check_aligned(actual, predicted)?;
        if actual.iter().any(|&a| a == 0.0) {
            return Err(Error::MetricUndefined(
                "MAPE is undefined when actual values contain zero".to_string(),
            ));
        }
        let sum: f64 = actual
            .iter()
            .zip(predicted)
            .map(|(a, p)| ((a - p) / a).abs())
            .sum();
        Ok(sum / actual.len() as f64 * 100.0)
    }

    /// Coefficient of determination (R2 score)
    pub fn r2_score(actual: &[f64], predicted: &[f64]) -> Result<f64> {
        check_aligned(actual, predicted)?;
        let mean = actual.iter().sum::<f64>() / actual.len() as f64;
        let ss_res: f64 = actual
            .iter()
            .zip(predicted)
            .map(|(a, p)| (a - p).powi(2))
            .sum();
        let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();

        if ss_tot == 0.0 {
            Ok(0.0) // constant actual series
        } else {
            Ok(1.0 - ss_res / ss_tot)
        }
    }
}

/// Per-material accuracy report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    pub mae: f64,
    pub rmse: f64,
    /// `None` when the metric is undefined for this series (zero actuals)
    pub mape: Option<f64>,
    pub r2: f64,
}

impl AccuracyReport {
    /// Compute all metrics for one aligned (actual, predicted) pair
    ///
    /// An undefined MAPE becomes a missing metric rather than a failure;
    /// every other metric error propagates.
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Result<Self> {
        let mape = match regression::mean_absolute_percentage_error(actual, predicted) {
            Ok(value) => Some(value),
            Err(Error::MetricUndefined(_)) => None,
            Err(e) => return Err(e),
        };

        Ok(AccuracyReport {
            mae: regression::mean_absolute_error(actual, predicted)?,
            rmse: regression::root_mean_squared_error(actual, predicted)?,
            mape,
            r2: regression::r2_score(actual, predicted)?,
        })
    }
}
