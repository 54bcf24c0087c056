//! Forecasting model capability
//!
//! The pipeline treats model internals as opaque: anything implementing
//! [`Forecaster`] can be fitted on one material's [`TrainingSeries`], asked
//! for a future-horizon [`ForecastResult`], and re-run over historical dates
//! for evaluation. [`seasonal::SeasonalTrendForecaster`] is the default
//! capability.

pub mod seasonal;

pub use seasonal::SeasonalTrendForecaster;

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One material's series in the shape the model capability requires:
/// ascending dates paired with target values. Construction goes through
/// [`TrainingSeries::new`], which guarantees the series is non-empty and
/// date-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TrainingSeries {
    /// Create a series, re-establishing ascending date order
    pub fn new(mut pairs: Vec<(NaiveDate, f64)>) -> Result<Self> {
        if pairs.is_empty() {
            return Err(Error::EmptyData("training series is empty".to_string()));
        }
        pairs.sort_by_key(|&(date, _)| date);
        let (dates, values) = pairs.into_iter().unzip();
        Ok(TrainingSeries { dates, values })
    }

    /// Observation dates, ascending
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Target values, aligned with `dates`
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Last observed date
    pub fn last_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }
}

/// Per-material forecast over a future horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Contiguous future dates, starting the day after the last observation
    pub dates: Vec<NaiveDate>,
    /// Point estimates
    pub yhat: Vec<f64>,
    /// Lower interval bound per date
    pub yhat_lower: Vec<f64>,
    /// Upper interval bound per date
    pub yhat_upper: Vec<f64>,
    /// Name of the model that produced the forecast
    pub method: String,
    pub confidence_level: f64,
}

impl ForecastResult {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Opaque forecasting capability, fitted per material
pub trait Forecaster: Send {
    /// Fit the model on one material's series
    fn fit(&mut self, series: &TrainingSeries) -> Result<()>;

    /// Forecast a future horizon past the last observed date
    fn forecast(&self, horizon: usize, confidence_level: f64) -> Result<ForecastResult>;

    /// Point predictions for arbitrary dates (used to re-predict the
    /// material's own history during evaluation)
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<f64>>;

    fn name(&self) -> &str;
}
