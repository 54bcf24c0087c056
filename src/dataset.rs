//! Input records handed to the pipeline
//!
//! The ingestion collaborator parses raw files and produces these typed
//! records; date-like columns arrive already parsed. Records are immutable
//! once loaded; every pipeline stage derives new rows rather than mutating
//! its input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One sales transaction at shipping grain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub material_id: String,
    pub shipping_date: NaiveDate,
    /// Standardized shipping quantity
    pub quantity: f64,
}

impl SalesRecord {
    pub fn new(material_id: impl Into<String>, shipping_date: NaiveDate, quantity: f64) -> Self {
        SalesRecord {
            material_id: material_id.into(),
            shipping_date,
            quantity,
        }
    }
}

/// One delivery event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub material_id: String,
    pub delivery_date: NaiveDate,
    pub quantity: f64,
}

/// Material master data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub material_id: String,
    pub description: String,
    pub unit: String,
}

/// One inventory snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub material_id: String,
    pub date: NaiveDate,
    pub inventory_quantity: f64,
}

impl InventoryRecord {
    pub fn new(material_id: impl Into<String>, date: NaiveDate, inventory_quantity: f64) -> Self {
        InventoryRecord {
            material_id: material_id.into(),
            date,
            inventory_quantity,
        }
    }
}

/// The four input tables of one forecasting run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub sales: Vec<SalesRecord>,
    pub deliveries: Vec<DeliveryRecord>,
    pub materials: Vec<MaterialRecord>,
    pub inventory: Vec<InventoryRecord>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distinct material ids present in the sales table, sorted
    pub fn material_ids(&self) -> Vec<String> {
        self.sales
            .iter()
            .map(|r| r.material_id.clone())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
