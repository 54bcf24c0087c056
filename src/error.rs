use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum Error {
    /// A timestamp or grouping key is malformed or unsortable. Structural
    /// input problem, fatal for the whole run.
    #[error("data alignment error: {0}")]
    DataAlignment(String),

    /// A material has too few rows to satisfy the window/lag requirements
    /// or to train a model. Recorded per material, never aborts the run.
    #[error("insufficient history for material {material_id}: {rows} rows, {required} required")]
    InsufficientHistory {
        material_id: String,
        rows: usize,
        required: usize,
    },

    /// The forecasting capability rejected the series.
    #[error("model fit failed for material {material_id}: {reason}")]
    ModelFit { material_id: String, reason: String },

    /// A requested accuracy metric cannot be computed for the given series
    /// (e.g. MAPE over actuals containing zero).
    #[error("metric undefined: {0}")]
    MetricUndefined(String),

    #[error("length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("empty data: {0}")]
    EmptyData(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl Error {
    /// Whether this error is isolated to a single material rather than
    /// structural for the whole run.
    pub fn is_per_entity(&self) -> bool {
        matches!(
            self,
            Error::InsufficientHistory { .. } | Error::ModelFit { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_entity_classification() {
        assert!(Error::InsufficientHistory {
            material_id: "M1".to_string(),
            rows: 3,
            required: 60,
        }
        .is_per_entity());
        assert!(Error::ModelFit {
            material_id: "M1".to_string(),
            reason: "rejected".to_string(),
        }
        .is_per_entity());

        assert!(!Error::DataAlignment("bad key".to_string()).is_per_entity());
        assert!(!Error::EmptyData("empty".to_string()).is_per_entity());
        assert!(!Error::InvalidInput("bad".to_string()).is_per_entity());
    }
}
