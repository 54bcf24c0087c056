//! Seasonal trend forecaster
//!
//! Default model capability: a least-squares linear trend combined with
//! day-of-week and month-of-year seasonal factors, composed multiplicatively
//! or additively per configuration. Prediction intervals come from the
//! in-sample residual standard deviation and widen with the horizon.

use crate::config::{SeasonalityConfig, SeasonalityMode};
use crate::error::{Error, Result};
use crate::model::{ForecastResult, Forecaster, TrainingSeries};
use chrono::{Datelike, Duration, NaiveDate};

const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone)]
struct FittedState {
    /// Trend intercept at the series origin
    intercept: f64,
    /// Trend slope per day
    slope: f64,
    /// Date the trend's day index is counted from
    origin: NaiveDate,
    /// Day-of-week seasonal factors, Monday = 0
    weekly: [f64; 7],
    /// Month-of-year seasonal factors, January = 0
    yearly: [f64; 12],
    residual_std: f64,
    last_date: NaiveDate,
}

/// Linear trend with multiplicative or additive calendar seasonality
#[derive(Debug, Clone)]
pub struct SeasonalTrendForecaster {
    config: SeasonalityConfig,
    fitted: Option<FittedState>,
}

impl SeasonalTrendForecaster {
    pub fn new(config: SeasonalityConfig) -> Self {
        SeasonalTrendForecaster {
            config,
            fitted: None,
        }
    }

    fn neutral(&self) -> f64 {
        match self.config.mode {
            SeasonalityMode::Multiplicative => 1.0,
            SeasonalityMode::Additive => 0.0,
        }
    }

    /// Least-squares line over (day index, value)
    fn fit_trend(xs: &[f64], ys: &[f64]) -> (f64, f64) {
        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let mut cov = 0.0;
        let mut var = 0.0;
        for (x, y) in xs.iter().zip(ys) {
            cov += (x - x_mean) * (y - y_mean);
            var += (x - x_mean).powi(2);
        }

        let slope = if var.abs() < EPSILON { 0.0 } else { cov / var };
        (y_mean - slope * x_mean, slope)
    }

    /// Mean seasonal component per calendar bucket; neutral where a bucket
    /// has no observations
    fn bucket_means<const N: usize>(
        &self,
        buckets: impl Iterator<Item = usize>,
        components: &[f64],
    ) -> [f64; N] {
        let mut sums = [0.0; N];
        let mut counts = [0usize; N];
        for (bucket, &component) in buckets.zip(components) {
            sums[bucket] += component;
            counts[bucket] += 1;
        }

        let mut means = [self.neutral(); N];
        for i in 0..N {
            if counts[i] > 0 {
                means[i] = sums[i] / counts[i] as f64;
            }
        }
        means
    }

    fn seasonal_component(&self, state: &FittedState, date: NaiveDate) -> f64 {
        let weekly = state.weekly[date.weekday().num_days_from_monday() as usize];
        let yearly = state.yearly[(date.month() - 1) as usize];
        match self.config.mode {
            SeasonalityMode::Multiplicative => weekly * yearly,
            SeasonalityMode::Additive => weekly + yearly,
        }
    }

    fn point_estimate(&self, state: &FittedState, date: NaiveDate) -> f64 {
        let day = (date - state.origin).num_days() as f64;
        let trend = state.intercept + state.slope * day;
        match self.config.mode {
            SeasonalityMode::Multiplicative => trend * self.seasonal_component(state, date),
            SeasonalityMode::Additive => trend + self.seasonal_component(state, date),
        }
    }

    fn fitted_state(&self) -> Result<&FittedState> {
        self.fitted
            .as_ref()
            .ok_or_else(|| Error::InvalidOperation("model not fitted".to_string()))
    }
}

impl Forecaster for SeasonalTrendForecaster {
    fn fit(&mut self, series: &TrainingSeries) -> Result<()> {
        if series.len() < 2 {
            return Err(Error::InvalidInput(format!(
                "series too short to fit a trend: {} observations",
                series.len()
            )));
        }
        if self.config.mode == SeasonalityMode::Multiplicative
            && series.values().iter().any(|&v| v <= 0.0)
        {
            return Err(Error::InvalidInput(
                "multiplicative seasonality requires strictly positive values".to_string(),
            ));
        }

        let origin = series.dates()[0];
        let xs: Vec<f64> = series
            .dates()
            .iter()
            .map(|&d| (d - origin).num_days() as f64)
            .collect();
        let (intercept, slope) = Self::fit_trend(&xs, series.values());

        // Detrend, then average the seasonal signal per calendar bucket.
        let components: Vec<f64> = series
            .values()
            .iter()
            .zip(&xs)
            .map(|(&y, &x)| {
                let trend = intercept + slope * x;
                match self.config.mode {
                    SeasonalityMode::Multiplicative => {
                        if trend.abs() < EPSILON {
                            1.0
                        } else {
                            y / trend
                        }
                    }
                    SeasonalityMode::Additive => y - trend,
                }
            })
            .collect();

        let weekly: [f64; 7] = if self.config.weekly {
            self.bucket_means(
                series
                    .dates()
                    .iter()
                    .map(|d| d.weekday().num_days_from_monday() as usize),
                &components,
            )
        } else {
            [self.neutral(); 7]
        };

        let yearly: [f64; 12] = if self.config.yearly {
            self.bucket_means(
                series.dates().iter().map(|d| (d.month() - 1) as usize),
                &components,
            )
        } else {
            [self.neutral(); 12]
        };

        let mut state = FittedState {
            intercept,
            slope,
            origin,
            weekly,
            yearly,
            residual_std: 0.0,
            last_date: series.last_date(),
        };

        let residuals: Vec<f64> = series
            .dates()
            .iter()
            .zip(series.values())
            .map(|(&d, &y)| y - self.point_estimate(&state, d))
            .collect();
        let variance =
            residuals.iter().map(|r| r * r).sum::<f64>() / residuals.len() as f64;
        state.residual_std = variance.sqrt();

        self.fitted = Some(state);
        Ok(())
    }

    fn forecast(&self, horizon: usize, confidence_level: f64) -> Result<ForecastResult> {
        if horizon == 0 {
            return Err(Error::InvalidInput(
                "forecast horizon must be at least 1".to_string(),
            ));
        }
        let state = self.fitted_state()?;
        let z = get_z_score(confidence_level);

        let mut dates = Vec::with_capacity(horizon);
        let mut yhat = Vec::with_capacity(horizon);
        let mut yhat_lower = Vec::with_capacity(horizon);
        let mut yhat_upper = Vec::with_capacity(horizon);

        for h in 1..=horizon {
            let date = state.last_date + Duration::days(h as i64);
            let estimate = self.point_estimate(state, date);
            // Interval widens with horizon
            let margin = z * state.residual_std * (h as f64).sqrt();
            dates.push(date);
            yhat.push(estimate);
            yhat_lower.push(estimate - margin);
            yhat_upper.push(estimate + margin);
        }

        Ok(ForecastResult {
            dates,
            yhat,
            yhat_lower,
            yhat_upper,
            method: self.name().to_string(),
            confidence_level,
        })
    }

    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<f64>> {
        let state = self.fitted_state()?;
        Ok(dates.iter().map(|&d| self.point_estimate(state, d)).collect())
    }

    fn name(&self) -> &str {
        "SeasonalTrend"
    }
}

/// Z-score for a two-sided confidence level
fn get_z_score(confidence_level: f64) -> f64 {
    match (confidence_level * 100.0) as i32 {
        90 => 1.645,
        95 => 1.96,
        99 => 2.576,
        _ => 1.96,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn series(start: &str, values: Vec<f64>) -> TrainingSeries {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
        let pairs = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (start + Duration::days(i as i64), v))
            .collect();
        TrainingSeries::new(pairs).unwrap()
    }

    fn trending_series(days: usize) -> TrainingSeries {
        series(
            "2023-01-02",
            (0..days)
                .map(|i| 100.0 + i as f64 * 0.5 + 10.0 * ((i % 7) as f64 / 7.0))
                .collect(),
        )
    }

    #[test]
    fn test_fit_and_forecast_lengths() {
        let ts = trending_series(120);
        let mut model = SeasonalTrendForecaster::new(SeasonalityConfig::default());
        model.fit(&ts).unwrap();

        let result = model.forecast(14, 0.95).unwrap();
        assert_eq!(result.len(), 14);
        assert_eq!(result.dates[0], ts.last_date() + Duration::days(1));
        assert_eq!(
            *result.dates.last().unwrap(),
            ts.last_date() + Duration::days(14)
        );
        assert_eq!(result.method, "SeasonalTrend");
    }

    #[test]
    fn test_forecast_without_fit_fails() {
        let model = SeasonalTrendForecaster::new(SeasonalityConfig::default());
        assert!(matches!(
            model.forecast(7, 0.95).unwrap_err(),
            Error::InvalidOperation(_)
        ));
    }

    #[test]
    fn test_multiplicative_rejects_non_positive_values() {
        let ts = series("2023-01-02", vec![5.0, 0.0, 3.0, 4.0]);
        let mut model = SeasonalTrendForecaster::new(SeasonalityConfig::default());
        assert!(matches!(model.fit(&ts).unwrap_err(), Error::InvalidInput(_)));

        let additive = SeasonalityConfig {
            mode: SeasonalityMode::Additive,
            ..SeasonalityConfig::default()
        };
        let mut model = SeasonalTrendForecaster::new(additive);
        assert!(model.fit(&ts).is_ok());
    }

    #[test]
    fn test_too_short_series_rejected() {
        let ts = series("2023-01-02", vec![5.0]);
        let mut model = SeasonalTrendForecaster::new(SeasonalityConfig::default());
        assert!(model.fit(&ts).is_err());
    }

    #[test]
    fn test_intervals_widen_with_horizon() {
        let ts = trending_series(200);
        let mut model = SeasonalTrendForecaster::new(SeasonalityConfig::default());
        model.fit(&ts).unwrap();

        let result = model.forecast(10, 0.95).unwrap();
        let first_width = result.yhat_upper[0] - result.yhat_lower[0];
        let last_width = result.yhat_upper[9] - result.yhat_lower[9];
        assert!(
            last_width > first_width,
            "interval should widen with forecast horizon"
        );
    }

    #[test]
    fn test_predict_recovers_linear_trend() {
        // Pure line, no seasonal structure: predictions should track it.
        let ts = series("2023-01-02", (0..100).map(|i| 50.0 + i as f64).collect());
        let mut model = SeasonalTrendForecaster::new(SeasonalityConfig::default());
        model.fit(&ts).unwrap();

        let predicted = model.predict(ts.dates()).unwrap();
        for (p, a) in predicted.iter().zip(ts.values()) {
            assert!((p - a).abs() / a < 0.05, "predicted {} vs actual {}", p, a);
        }
    }

    #[test]
    fn test_seasonality_flags_disable_components() {
        let config = SeasonalityConfig {
            yearly: false,
            weekly: false,
            daily: false,
            mode: SeasonalityMode::Multiplicative,
        };
        let ts = trending_series(60);
        let mut model = SeasonalTrendForecaster::new(config);
        model.fit(&ts).unwrap();

        let state = model.fitted.as_ref().unwrap();
        assert!(state.weekly.iter().all(|&f| f == 1.0));
        assert!(state.yearly.iter().all(|&f| f == 1.0));
    }
}
