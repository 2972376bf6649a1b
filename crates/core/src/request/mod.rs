//! Purchase request entity for Centavo.
//!
//! The request record carries the audit fields for every authorization tier
//! plus the treasury disbursement, and knows how to apply the actions the
//! workflow service produces.

pub mod types;

pub use types::{
    Actor, ConceptRef, Disbursement, PaymentMethod, ProviderRef, PurchaseRequest, TierApproval,
};
