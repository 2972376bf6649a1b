//! Store error envelope.
//!
//! Wraps the core error types and adds the two failures only the storage
//! boundary can raise: missing records and uniqueness conflicts.

use thiserror::Error;

use centavo_shared::error::AppError;

use centavo_core::cost_center::error::CostCenterError;
use centavo_core::ledger::error::LedgerError;
use centavo_core::workflow::error::WorkflowError;

/// Result type alias using `StoreError`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the store layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A referenced record does not exist.
    #[error("{entity} {key} not found")]
    NotFound {
        /// Entity kind (e.g. "cost center").
        entity: &'static str,
        /// The key that missed.
        key: String,
    },

    /// A uniqueness constraint at the storage boundary was violated.
    #[error("{entity} {field} \"{value}\" is already in use")]
    Duplicate {
        /// Entity kind.
        entity: &'static str,
        /// The constrained field.
        field: &'static str,
        /// The duplicated value.
        value: String,
    },

    /// A cost center validation failure.
    #[error(transparent)]
    CostCenter(#[from] CostCenterError),

    /// A workflow guard failure.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// A ledger materialization failure.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl StoreError {
    /// Shorthand for a `NotFound` error.
    #[must_use]
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::Duplicate { .. } => Self::Conflict(err.to_string()),
            StoreError::CostCenter(inner) => inner.into(),
            StoreError::Workflow(inner) => inner.into(),
            StoreError::Ledger(inner) => inner.into(),
        }
    }
}
