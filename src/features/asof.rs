//! As-of alignment of the inventory signal
//!
//! For each (material, date) feature row, attaches the most recent
//! pre-aggregated inventory value for the same material whose date is at or
//! before the row's date. The match is entity-scoped and strictly
//! backward-looking; a row with no eligible inventory record keeps `None`,
//! never zero. Both sides are re-sorted ascending internally rather than
//! trusting caller ordering.

use crate::features::aggregate::AggregatedInventory;
use crate::features::{partition_ranges, FeatureRow};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Backward as-of join of inventory onto the feature rows
pub fn merge_asof(mut rows: Vec<FeatureRow>, inventory: &[AggregatedInventory]) -> Vec<FeatureRow> {
    let ranges = partition_ranges(&mut rows);

    // One ascending (date, level) sequence per material.
    let mut by_material: HashMap<&str, Vec<(NaiveDate, f64)>> = HashMap::new();
    for record in inventory {
        by_material
            .entry(record.material_id.as_str())
            .or_default()
            .push((record.date, record.inventory_quantity));
    }
    for series in by_material.values_mut() {
        series.sort_by_key(|&(date, _)| date);
    }

    // Two-pointer sweep per material: rows within a range are ascending,
    // so the cursor only ever moves forward.
    for range in ranges {
        let Some(series) = by_material.get(rows[range.start].material_id.as_str()) else {
            continue;
        };
        let mut cursor = 0;
        for i in range {
            while cursor < series.len() && series[cursor].0 <= rows[i].date {
                cursor += 1;
            }
            // cursor now points past the last eligible record
            rows[i].inventory = cursor.checked_sub(1).map(|c| series[c].1);
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::calendar::CalendarFeatures;

    fn parse_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn row(material_id: &str, date: &str, quantity: f64) -> FeatureRow {
        let date = parse_date(date);
        FeatureRow {
            material_id: material_id.to_string(),
            date,
            quantity,
            calendar: CalendarFeatures::from_date(date),
            inventory: None,
            moving_averages: Vec::new(),
            lags: Vec::new(),
        }
    }

    fn inv(material_id: &str, date: &str, level: f64) -> AggregatedInventory {
        AggregatedInventory {
            material_id: material_id.to_string(),
            date: parse_date(date),
            inventory_quantity: level,
        }
    }

    #[test]
    fn test_backward_match_at_or_before() {
        let rows = vec![
            row("M1", "2024-01-01", 1.0),
            row("M1", "2024-01-03", 2.0),
            row("M1", "2024-01-05", 3.0),
        ];
        let inventory = vec![inv("M1", "2024-01-01", 100.0), inv("M1", "2024-01-04", 80.0)];

        let joined = merge_asof(rows, &inventory);
        assert_eq!(joined[0].inventory, Some(100.0)); // exact match
        assert_eq!(joined[1].inventory, Some(100.0)); // Jan 4 is in the future
        assert_eq!(joined[2].inventory, Some(80.0));
    }

    #[test]
    fn test_no_eligible_record_stays_absent() {
        let rows = vec![row("M1", "2024-01-01", 1.0), row("M1", "2024-01-10", 2.0)];
        let inventory = vec![inv("M1", "2024-01-05", 50.0)];

        let joined = merge_asof(rows, &inventory);
        assert_eq!(joined[0].inventory, None);
        assert_eq!(joined[1].inventory, Some(50.0));
    }

    #[test]
    fn test_join_is_entity_scoped() {
        let rows = vec![row("M1", "2024-01-02", 1.0), row("M2", "2024-01-02", 2.0)];
        let inventory = vec![inv("M1", "2024-01-01", 42.0)];

        let joined = merge_asof(rows, &inventory);
        let m1 = joined.iter().find(|r| r.material_id == "M1").unwrap();
        let m2 = joined.iter().find(|r| r.material_id == "M2").unwrap();
        assert_eq!(m1.inventory, Some(42.0));
        assert_eq!(m2.inventory, None);
    }

    #[test]
    fn test_unsorted_inputs_are_resorted() {
        let rows = vec![row("M1", "2024-01-05", 2.0), row("M1", "2024-01-01", 1.0)];
        let inventory = vec![inv("M1", "2024-01-04", 9.0), inv("M1", "2024-01-01", 7.0)];

        let joined = merge_asof(rows, &inventory);
        assert_eq!(joined[0].date, parse_date("2024-01-01"));
        assert_eq!(joined[0].inventory, Some(7.0));
        assert_eq!(joined[1].inventory, Some(9.0));
    }
}
