//! Forecast orchestration
//!
//! Partitions the feature table by material, fits one independent model per
//! material, forecasts the configured horizon, and evaluates each model
//! against its own history. Materials share no mutable state and no model is
//! ever reused across materials, so the fan-out runs on a rayon worker pool;
//! outputs are keyed by material_id, making the lack of ordering harmless.
//!
//! Per-material failures (too little history, model rejection) are recorded
//! and excluded from the forecast/accuracy maps without aborting the run.
//! Only structural input problems escalate to the caller.

use crate::config::ForecastConfig;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::features::{build_features, FeatureRow, FeatureTable};
use crate::metrics::AccuracyReport;
use crate::model::{ForecastResult, Forecaster, SeasonalTrendForecaster, TrainingSeries};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Why a material was excluded from the outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    InsufficientHistory,
    ModelFit,
}

/// Structured record of one material's failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityFailure {
    pub material_id: String,
    pub kind: FailureKind,
    pub reason: String,
}

/// Result set of one run, keyed by material_id
///
/// A material appears either in both `forecasts` and `accuracy`, or in
/// `failures`; absence from the success maps is a valid, checked state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastOutcome {
    pub forecasts: HashMap<String, ForecastResult>,
    pub accuracy: HashMap<String, AccuracyReport>,
    pub failures: HashMap<String, EntityFailure>,
}

impl ForecastOutcome {
    /// Materials with a forecast, sorted
    pub fn forecasted_materials(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.forecasts.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

enum EntityResult {
    Success {
        material_id: String,
        forecast: ForecastResult,
        accuracy: AccuracyReport,
    },
    Failure(EntityFailure),
}

/// Per-material demand forecaster
#[derive(Debug, Clone)]
pub struct DemandForecaster {
    config: ForecastConfig,
}

impl DemandForecaster {
    pub fn new(config: ForecastConfig) -> Self {
        DemandForecaster { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Run the full pipeline: feature engineering, per-material fan-out,
    /// reassembly keyed by material_id
    pub fn run(&self, dataset: &Dataset) -> Result<ForecastOutcome> {
        self.config.validate()?;

        let table = build_features(&dataset.sales, &dataset.inventory, &self.config)?;
        log::info!(
            "feature table built: {} rows across {} materials",
            table.rows.len(),
            table.material_ids().len()
        );

        let mut outcome = self.run_on_features(&table);

        // A material whose history is shorter than the largest lag loses
        // every row to the incomplete-row filter and never reaches the
        // fan-out; record it as insufficient history instead of dropping it
        // silently.
        for material_id in dataset.material_ids() {
            if !outcome.forecasts.contains_key(&material_id)
                && !outcome.failures.contains_key(&material_id)
            {
                let error = Error::InsufficientHistory {
                    material_id: material_id.clone(),
                    rows: 0,
                    required: self.config.min_history,
                };
                log::warn!("material {} excluded: {}", material_id, error);
                outcome.failures.insert(
                    material_id.clone(),
                    EntityFailure {
                        material_id,
                        kind: FailureKind::InsufficientHistory,
                        reason: error.to_string(),
                    },
                );
            }
        }

        Ok(outcome)
    }

    /// Fan out over an already-built feature table
    pub fn run_on_features(&self, table: &FeatureTable) -> ForecastOutcome {
        let partitions = table.partition_by_material();

        let results: Vec<EntityResult> = partitions
            .into_par_iter()
            .map(|(material_id, rows)| self.process_entity(material_id, &rows))
            .collect();

        let mut outcome = ForecastOutcome::default();
        for result in results {
            match result {
                EntityResult::Success {
                    material_id,
                    forecast,
                    accuracy,
                } => {
                    outcome.forecasts.insert(material_id.clone(), forecast);
                    outcome.accuracy.insert(material_id, accuracy);
                }
                EntityResult::Failure(failure) => {
                    log::warn!(
                        "material {} excluded: {}",
                        failure.material_id,
                        failure.reason
                    );
                    outcome.failures.insert(failure.material_id.clone(), failure);
                }
            }
        }

        log::info!(
            "run complete: {} forecasted, {} failed",
            outcome.forecasts.len(),
            outcome.failures.len()
        );
        outcome
    }

    /// Select -> adapt -> train -> forecast -> evaluate for one material
    fn process_entity(&self, material_id: &str, rows: &[&FeatureRow]) -> EntityResult {
        match self.train_and_score(material_id, rows) {
            Ok((forecast, accuracy)) => EntityResult::Success {
                material_id: material_id.to_string(),
                forecast,
                accuracy,
            },
            Err(error) => {
                // Errors raised past the history check come from the model
                // stage; wrap any that are not already entity-scoped so the
                // record names its material.
                let error = if error.is_per_entity() {
                    error
                } else {
                    Error::ModelFit {
                        material_id: material_id.to_string(),
                        reason: error.to_string(),
                    }
                };
                EntityResult::Failure(EntityFailure {
                    material_id: material_id.to_string(),
                    kind: match error {
                        Error::InsufficientHistory { .. } => FailureKind::InsufficientHistory,
                        _ => FailureKind::ModelFit,
                    },
                    reason: error.to_string(),
                })
            }
        }
    }

    fn train_and_score(
        &self,
        material_id: &str,
        rows: &[&FeatureRow],
    ) -> Result<(ForecastResult, AccuracyReport)> {
        if rows.len() < self.config.min_history {
            return Err(Error::InsufficientHistory {
                material_id: material_id.to_string(),
                rows: rows.len(),
                required: self.config.min_history,
            });
        }

        // Adapt the generic (date, target) columns to the model's shape.
        let series =
            TrainingSeries::new(rows.iter().map(|r| (r.date, r.quantity)).collect())?;

        log::debug!(
            "training model for material {} on {} rows",
            material_id,
            series.len()
        );
        let mut model: Box<dyn Forecaster> =
            Box::new(SeasonalTrendForecaster::new(self.config.seasonality));
        model.fit(&series)?;

        let forecast = model.forecast(self.config.horizon, self.config.confidence_level)?;

        // Evaluate against the material's own history.
        let predicted = model.predict(series.dates())?;
        let accuracy = AccuracyReport::compute(series.values(), &predicted)?;

        Ok((forecast, accuracy))
    }
}

impl Default for DemandForecaster {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}
