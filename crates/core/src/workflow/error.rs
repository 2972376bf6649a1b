//! Workflow error types for the request lifecycle.
//!
//! Two kinds of failure exist: validation errors (a precondition for a
//! transition is unmet) and permission/state errors (wrong state, wrong
//! roster, or a skipped prior tier). Both abort the action atomically and
//! surface verbatim to the caller.

use rust_decimal::Decimal;
use thiserror::Error;

use centavo_shared::error::AppError;

use crate::cost_center::types::AuthTier;
use crate::workflow::types::RequestStatus;

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: RequestStatus,
        /// The attempted target status.
        to: RequestStatus,
    },

    /// Approve/reject attempted while no tier is pending.
    #[error("Request is not awaiting authorization (current status: {status})")]
    NotAwaitingAuthorization {
        /// The current status.
        status: RequestStatus,
    },

    /// Attempted to edit a request outside draft.
    #[error("Request cannot be modified in status {status}")]
    NotEditable {
        /// The current status.
        status: RequestStatus,
    },

    /// Submission requires a concept (catalog or free text).
    #[error("A concept is required: pick one from the catalog or spell one out")]
    MissingConcept,

    /// Submission requires a provider (catalog or free text).
    #[error("A provider is required: pick one from the catalog or spell one out")]
    MissingProvider,

    /// Submission requires a strictly positive amount.
    #[error("Estimated amount must be greater than zero (got {amount})")]
    NonPositiveAmount {
        /// The rejected amount.
        amount: Decimal,
    },

    /// Drafts may not carry a negative amount.
    #[error("Estimated amount cannot be negative (got {amount})")]
    NegativeAmount {
        /// The rejected amount.
        amount: Decimal,
    },

    /// The center cannot start the authorization chain.
    #[error(
        "Cost center \"{center}\" has no tier 1 authorizers configured; contact an administrator"
    )]
    NoTierOneAuthorizers {
        /// Name of the offending center.
        center: String,
    },

    /// A higher tier acted before a lower tier decided.
    #[error("{tier} approval requires a prior {missing} approval")]
    MissingPriorApproval {
        /// The tier attempting to act.
        tier: AuthTier,
        /// The lower tier that has not decided yet.
        missing: AuthTier,
    },

    /// The acting user is not on the tier's roster for this center.
    #[error(
        "{user} is not a {tier} authorizer for cost center \"{center}\". Valid authorizers: {authorizers}"
    )]
    NotOnRoster {
        /// Display name of the acting user.
        user: String,
        /// Name of the center whose roster was checked.
        center: String,
        /// The tier whose roster was checked.
        tier: AuthTier,
        /// Joined display names of the tier's valid authorizers.
        authorizers: String,
    },

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. }
            | Self::NotEditable { .. }
            | Self::MissingConcept
            | Self::MissingProvider
            | Self::NonPositiveAmount { .. }
            | Self::NegativeAmount { .. }
            | Self::NoTierOneAuthorizers { .. }
            | Self::RejectionReasonRequired => 400,

            Self::NotAwaitingAuthorization { .. }
            | Self::MissingPriorApproval { .. }
            | Self::NotOnRoster { .. } => 403,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotAwaitingAuthorization { .. } => "NOT_AWAITING_AUTHORIZATION",
            Self::NotEditable { .. } => "NOT_EDITABLE",
            Self::MissingConcept => "MISSING_CONCEPT",
            Self::MissingProvider => "MISSING_PROVIDER",
            Self::NonPositiveAmount { .. } => "NON_POSITIVE_AMOUNT",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::NoTierOneAuthorizers { .. } => "NO_TIER1_AUTHORIZERS",
            Self::MissingPriorApproval { .. } => "MISSING_PRIOR_APPROVAL",
            Self::NotOnRoster { .. } => "NOT_ON_ROSTER",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err.status_code() {
            403 => Self::Forbidden(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
