//! Feature engineering
//!
//! Derives the per-(material, date) feature table the orchestrator trains
//! on: aggregation to daily grain, calendar fields, the as-of inventory
//! join, trailing moving averages and lags, and the explicit
//! incomplete-row filtering stage.

pub mod aggregate;
pub mod asof;
pub mod calendar;
pub mod window;

pub use aggregate::{aggregate_inventory, aggregate_sales, AggregatedInventory, AggregatedSale};
pub use asof::merge_asof;
pub use calendar::CalendarFeatures;
pub use window::{add_lags, add_moving_averages, drop_incomplete, FilterSummary};

use crate::config::ForecastConfig;
use crate::dataset::{InventoryRecord, SalesRecord};
use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;

/// Sort rows by (material_id, date) and return each material's row range.
/// Re-establishes the per-material ascending order every entity-scoped
/// stage depends on.
pub(crate) fn partition_ranges(rows: &mut [FeatureRow]) -> Vec<Range<usize>> {
    rows.sort_by(|a, b| (&a.material_id, a.date).cmp(&(&b.material_id, b.date)));

    let mut ranges = Vec::new();
    let mut start = 0;
    for i in 1..=rows.len() {
        if i == rows.len() || rows[i].material_id != rows[start].material_id {
            ranges.push(start..i);
            start = i;
        }
    }
    ranges
}

/// One feature row at (material, date) grain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub material_id: String,
    pub date: NaiveDate,
    /// Aggregated target quantity
    pub quantity: f64,
    pub calendar: CalendarFeatures,
    /// As-of joined inventory level; absent when no snapshot exists at or
    /// before this date
    pub inventory: Option<f64>,
    /// One trailing mean per configured window, in config order
    pub moving_averages: Vec<Option<f64>>,
    /// One lagged target per configured lag, in config order
    pub lags: Vec<Option<f64>>,
}

/// The assembled feature table of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureTable {
    pub rows: Vec<FeatureRow>,
    /// Window sizes the moving-average columns were built with
    pub windows: Vec<usize>,
    /// Lag offsets the lag columns were built with
    pub lags: Vec<usize>,
    pub filter: FilterSummary,
}

impl FeatureTable {
    /// Rows of one material, in ascending date order
    pub fn material_rows(&self, material_id: &str) -> Vec<&FeatureRow> {
        self.rows
            .iter()
            .filter(|r| r.material_id == material_id)
            .collect()
    }

    /// Partition the table into per-material row groups
    pub fn partition_by_material(&self) -> HashMap<&str, Vec<&FeatureRow>> {
        let mut groups: HashMap<&str, Vec<&FeatureRow>> = HashMap::new();
        for row in &self.rows {
            groups.entry(row.material_id.as_str()).or_default().push(row);
        }
        groups
    }

    /// Distinct material ids present in the table, sorted
    pub fn material_ids(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| r.material_id.clone())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Build the feature table from raw sales and inventory records
///
/// Stages, in order: sum sales to (material, date) grain, derive calendar
/// fields, as-of join the pre-aggregated inventory signal, attach moving
/// averages and lags over each material's own chronology, then drop rows
/// with incomplete feature coverage.
pub fn build_features(
    sales: &[SalesRecord],
    inventory: &[InventoryRecord],
    config: &ForecastConfig,
) -> Result<FeatureTable> {
    config.validate()?;

    let aggregated = aggregate_sales(sales);
    let rows: Vec<FeatureRow> = aggregated
        .into_iter()
        .map(|sale| FeatureRow {
            calendar: CalendarFeatures::from_date(sale.date),
            material_id: sale.material_id,
            date: sale.date,
            quantity: sale.quantity,
            inventory: None,
            moving_averages: Vec::new(),
            lags: Vec::new(),
        })
        .collect();

    let inventory_agg = aggregate_inventory(inventory);
    let rows = merge_asof(rows, &inventory_agg);
    let rows = add_moving_averages(rows, &config.windows);
    let rows = add_lags(rows, &config.lags);
    let (rows, filter) = drop_incomplete(rows);

    Ok(FeatureTable {
        rows,
        windows: config.windows.clone(),
        lags: config.lags.clone(),
        filter,
    })
}
