//! Per-center authorization policy for Centavo.
//!
//! Each cost center carries its own tier thresholds and authorizer rosters,
//! so the same amount can require different approval tiers in different
//! centers. The workflow state machine stays center-agnostic by asking the
//! policy attached to each request.
//!
//! # Modules
//!
//! - `types` - Cost center entity, tiers, and roster members
//! - `policy` - Tier resolution, roster checks, and validation
//! - `error` - Cost-center-specific error types

pub mod error;
pub mod policy;
pub mod types;

#[cfg(test)]
mod policy_props;

pub use error::CostCenterError;
pub use types::{AuthTier, CostCenter, RosterMember};
