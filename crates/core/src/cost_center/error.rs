//! Cost-center-specific error types.

use rust_decimal::Decimal;
use thiserror::Error;

use centavo_shared::error::AppError;

/// Errors raised when validating a cost center write.
#[derive(Debug, Error)]
pub enum CostCenterError {
    /// Tier-1 ceiling must be strictly positive.
    #[error("Tier 1 limit must be greater than zero (got {limit})")]
    NonPositiveTierOneLimit {
        /// The rejected limit.
        limit: Decimal,
    },

    /// Tier-2 ceiling must exceed the tier-1 ceiling.
    #[error(
        "Cost center \"{center}\": tier 2 limit {tier2_limit} must exceed tier 1 limit {tier1_limit}"
    )]
    LimitsOutOfOrder {
        /// Name of the offending center.
        center: String,
        /// The tier-1 ceiling.
        tier1_limit: Decimal,
        /// The tier-2 ceiling.
        tier2_limit: Decimal,
    },

    /// An active center must be able to start the authorization chain.
    #[error("Active cost center \"{center}\" must have at least one tier 1 authorizer")]
    EmptyTierOneRoster {
        /// Name of the offending center.
        center: String,
    },

    /// A user may authorize at one tier of a center at most.
    #[error("Cost center \"{center}\": {users} cannot be on more than one authorizer roster")]
    OverlappingRosters {
        /// Name of the offending center.
        center: String,
        /// Display names of the users found on several rosters, joined.
        users: String,
    },
}

impl CostCenterError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        400
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveTierOneLimit { .. } => "NON_POSITIVE_TIER1_LIMIT",
            Self::LimitsOutOfOrder { .. } => "TIER_LIMITS_OUT_OF_ORDER",
            Self::EmptyTierOneRoster { .. } => "EMPTY_TIER1_ROSTER",
            Self::OverlappingRosters { .. } => "OVERLAPPING_ROSTERS",
        }
    }
}

impl From<CostCenterError> for AppError {
    fn from(err: CostCenterError) -> Self {
        Self::Validation(err.to_string())
    }
}
