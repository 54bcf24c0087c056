//! Aggregation to (material, date) grain
//!
//! Collapses transaction-level records into exactly one row per distinct
//! (material_id, date) group present in the input. Grouping is exact-match
//! on the key pair; groups absent from the input do not appear in the
//! output (no zero-fill). Output is sorted by (material_id, date) so
//! downstream stages see a deterministic order.

use crate::dataset::{InventoryRecord, SalesRecord};
use chrono::NaiveDate;
use std::collections::HashMap;

/// One aggregated sales row: quantities summed per (material, date)
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSale {
    pub material_id: String,
    pub date: NaiveDate,
    pub quantity: f64,
}

/// One aggregated inventory row: same-day snapshots averaged
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedInventory {
    pub material_id: String,
    pub date: NaiveDate,
    pub inventory_quantity: f64,
}

/// Sum sales quantities per (material_id, shipping_date)
pub fn aggregate_sales(sales: &[SalesRecord]) -> Vec<AggregatedSale> {
    let mut groups: HashMap<(&str, NaiveDate), f64> = HashMap::new();
    for record in sales {
        *groups
            .entry((record.material_id.as_str(), record.shipping_date))
            .or_insert(0.0) += record.quantity;
    }

    let mut rows: Vec<AggregatedSale> = groups
        .into_iter()
        .map(|((material_id, date), quantity)| AggregatedSale {
            material_id: material_id.to_string(),
            date,
            quantity,
        })
        .collect();
    rows.sort_by(|a, b| (&a.material_id, a.date).cmp(&(&b.material_id, b.date)));
    rows
}

/// Average inventory snapshots per (material_id, date)
///
/// Pre-aggregation required before the as-of join: the auxiliary signal must
/// carry one value per (material, date).
pub fn aggregate_inventory(inventory: &[InventoryRecord]) -> Vec<AggregatedInventory> {
    let mut groups: HashMap<(&str, NaiveDate), (f64, usize)> = HashMap::new();
    for record in inventory {
        let entry = groups
            .entry((record.material_id.as_str(), record.date))
            .or_insert((0.0, 0));
        entry.0 += record.inventory_quantity;
        entry.1 += 1;
    }

    let mut rows: Vec<AggregatedInventory> = groups
        .into_iter()
        .map(|((material_id, date), (sum, count))| AggregatedInventory {
            material_id: material_id.to_string(),
            date,
            inventory_quantity: sum / count as f64,
        })
        .collect();
    rows.sort_by(|a, b| (&a.material_id, a.date).cmp(&(&b.material_id, b.date)));
    rows
}
