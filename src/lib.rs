//! # demandrs
//!
//! Per-material demand forecasting from historical transaction, delivery,
//! and inventory records.
//!
//! The crate aligns heterogeneous time-indexed tables, derives calendar and
//! rolling-window features, fits one independent forecasting model per
//! material, and reassembles per-material forecasts and accuracy metrics
//! into a uniform result set.
//!
//! # Pipeline
//!
//! raw tables -> aggregation -> calendar features -> as-of inventory join
//! -> window/lag features -> incomplete-row filtering -> per-material
//! train/forecast/evaluate fan-out.

pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod forecast;
pub mod metrics;
pub mod model;

// Re-export commonly used types
pub use config::{ForecastConfig, SeasonalityConfig, SeasonalityMode};
pub use dataset::{Dataset, DeliveryRecord, InventoryRecord, MaterialRecord, SalesRecord};
pub use error::{Error, Result};
pub use features::{build_features, FeatureRow, FeatureTable, FilterSummary};
pub use forecast::{DemandForecaster, EntityFailure, FailureKind, ForecastOutcome};
pub use metrics::AccuracyReport;
pub use model::{ForecastResult, Forecaster, TrainingSeries};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
