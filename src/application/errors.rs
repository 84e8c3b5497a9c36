// Error taxonomy for the data-access core
use crate::domain::measurement::{Metric, TimeInterval};
use thiserror::Error;

/// A raw API record failed structural or value-range validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` is invalid: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl SchemaError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SchemaError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }

    /// The offending field, for callers that report per-field diagnostics.
    pub fn field(&self) -> &'static str {
        match self {
            SchemaError::MissingField(field) => field,
            SchemaError::InvalidValue { field, .. } => field,
        }
    }
}

/// Failure of a single remote fetch. Scoped to one gap: the planner never
/// lets one of these abort sibling gaps or touch existing cache state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Terminal outcome of a resolve call: every gap failed and the cache held
/// nothing inside the requested range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no data available for device {device_id}, metric {metric}, range {interval}")]
pub struct DataUnavailable {
    pub device_id: String,
    pub metric: Metric,
    pub interval: TimeInterval,
    /// What went wrong, one entry per failed gap fetch.
    pub causes: Vec<FetchError>,
}
