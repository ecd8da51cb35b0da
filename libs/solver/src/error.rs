//! Error taxonomy for mixture solving
//!
//! Every failure is recoverable and maps to a stable `kind()` code so the
//! request boundary can report it without inspecting messages.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MixError {
    #[error("Missing required field `{field}`")]
    MissingField { field: String },

    #[error("Field `{field}` is not a valid number: {value}")]
    InvalidNumeric { field: String, value: String },

    #[error("Desired intensity {target} must lie strictly between {min} and {max}")]
    OutOfRange {
        target: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("Desired intensity {target} equals the intensity of component {index}")]
    AmbiguousTarget { target: Decimal, index: usize },

    #[error("Unsupported number of components: {count} (expected 2, 3 or 4)")]
    UnsupportedCardinality { count: usize },

    #[error("Total quantity must be positive, got {total}")]
    NonPositiveTotal { total: Decimal },

    #[error("Degenerate ratio: {reason}")]
    DegenerateRatio { reason: String },

    #[error("No valid solution: {reason}")]
    NoValidSolution { reason: String },

    #[error("Inconsistent result: {message}")]
    InconsistentResult { message: String },
}

impl MixError {
    /// Machine-readable error code
    pub fn kind(&self) -> &'static str {
        match self {
            MixError::MissingField { .. } => "missing_field",
            MixError::InvalidNumeric { .. } => "invalid_numeric",
            MixError::OutOfRange { .. } => "out_of_range",
            MixError::AmbiguousTarget { .. } => "ambiguous_target",
            MixError::UnsupportedCardinality { .. } => "unsupported_cardinality",
            MixError::NonPositiveTotal { .. } => "non_positive_total",
            MixError::DegenerateRatio { .. } => "degenerate_ratio",
            MixError::NoValidSolution { .. } => "no_valid_solution",
            MixError::InconsistentResult { .. } => "inconsistent_result",
        }
    }

    /// True when the failure points at the solver's own arithmetic rather
    /// than at the caller's input
    pub fn is_internal(&self) -> bool {
        matches!(self, MixError::InconsistentResult { .. })
    }

    pub(crate) fn overflow(operation: &str) -> Self {
        MixError::InconsistentResult {
            message: format!("arithmetic overflow while computing {}", operation),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        MixError::DegenerateRatio {
            reason: reason.into(),
        }
    }

    pub(crate) fn no_solution(reason: impl Into<String>) -> Self {
        MixError::NoValidSolution {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MixError>;
