//! Materialization error types.

use thiserror::Error;

use centavo_shared::error::AppError;

use crate::workflow::types::RequestStatus;

/// Errors that can occur when materializing a cash movement.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Only disbursed requests produce a movement.
    #[error("Only disbursed requests can be recorded as cash movements (current status: {status})")]
    NotDisbursed {
        /// The request's current status.
        status: RequestStatus,
    },

    /// A request is settled by exactly one movement.
    #[error("Request {reference} already has a linked cash movement")]
    AlreadyMaterialized {
        /// The request's reference.
        reference: String,
    },
}

impl LedgerError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        422
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotDisbursed { .. } => "NOT_DISBURSED",
            Self::AlreadyMaterialized { .. } => "ALREADY_MATERIALIZED",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        Self::BusinessRule(err.to_string())
    }
}
