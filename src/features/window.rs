//! Window and lag feature generation
//!
//! All features here derive from the per-material chronological ordering of
//! that material's own rows; values never leak across materials. Ascending
//! date order is an enforced precondition, re-established internally.
//!
//! Moving averages are positional trailing means with an expanding window
//! below the configured size (minimum window 1): the first row's average
//! equals the row's own value for every window size. Lags are positional
//! shifts, `None` for the first k rows of a material.

use crate::features::{partition_ranges, FeatureRow};
use serde::{Deserialize, Serialize};

/// Effect of the incomplete-row filtering stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSummary {
    pub retained: usize,
    pub dropped: usize,
}

/// Attach one trailing moving-average column per configured window size
pub fn add_moving_averages(mut rows: Vec<FeatureRow>, windows: &[usize]) -> Vec<FeatureRow> {
    let ranges = partition_ranges(&mut rows);

    for range in ranges {
        for offset in 0..range.len() {
            let i = range.start + offset;
            let mut averages = Vec::with_capacity(windows.len());
            for &window in windows {
                // Expanding below the window size: at least one row is
                // always available, so the mean is always defined.
                let start = range.start + offset.saturating_sub(window.saturating_sub(1));
                let slice = &rows[start..=i];
                let sum: f64 = slice.iter().map(|r| r.quantity).sum();
                averages.push(Some(sum / slice.len() as f64));
            }
            rows[i].moving_averages = averages;
        }
    }

    rows
}

/// Attach one lagged-target column per configured lag offset
pub fn add_lags(mut rows: Vec<FeatureRow>, lags: &[usize]) -> Vec<FeatureRow> {
    let ranges = partition_ranges(&mut rows);

    for range in ranges {
        for offset in 0..range.len() {
            let i = range.start + offset;
            let lag_values = lags
                .iter()
                .map(|&lag| {
                    offset
                        .checked_sub(lag)
                        .map(|source| rows[range.start + source].quantity)
                })
                .collect();
            rows[i].lags = lag_values;
        }
    }

    rows
}

/// Drop rows with incomplete lag or window coverage
///
/// The pipeline trains only on rows with full feature coverage. The drop is
/// total by design and materially changes training set size, so its effect
/// is returned and logged rather than left implicit.
pub fn drop_incomplete(rows: Vec<FeatureRow>) -> (Vec<FeatureRow>, FilterSummary) {
    let total = rows.len();
    let retained: Vec<FeatureRow> = rows
        .into_iter()
        .filter(|row| {
            row.moving_averages.iter().all(Option::is_some)
                && row.lags.iter().all(Option::is_some)
        })
        .collect();

    let summary = FilterSummary {
        retained: retained.len(),
        dropped: total - retained.len(),
    };
    log::info!(
        "incomplete-row filter: retained {} rows, dropped {}",
        summary.retained,
        summary.dropped
    );
    (retained, summary)
}
