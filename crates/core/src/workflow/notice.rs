//! Timeline notice bodies for workflow transitions.
//!
//! Every state change appends a human-readable entry to the request's
//! timeline; these builders produce the bodies. The timeline is the sole
//! audit trail, so each body names the people and amounts involved.

use crate::cost_center::types::{AuthTier, CostCenter};
use crate::request::types::{Actor, PurchaseRequest};
use crate::workflow::types::RequestStatus;

/// Body for the submission notice: center, amount, required tier range,
/// and who can pick the request up at tier 1.
#[must_use]
pub fn submitted(request: &PurchaseRequest, center: &CostCenter) -> String {
    format!(
        "Request {} sent for authorization\nCost center: {}\nAmount: {}\nRequired tier: {}\nAvailable authorizers: {}",
        request.reference,
        center.name,
        request.amount,
        center.tier_range_label(request.required_tier),
        center.roster_names(AuthTier::Tier1),
    )
}

/// Body for an approval notice. Says whether the chain is complete or who
/// is up next.
#[must_use]
pub fn approved(
    actor: &Actor,
    tier: AuthTier,
    new_status: RequestStatus,
    center: &CostCenter,
) -> String {
    match new_status.awaiting_tier() {
        Some(next) => format!(
            "Approved by {} ({})\nMoves to {}\nAuthorizers: {}",
            actor.name,
            tier,
            next,
            center.roster_names(next),
        ),
        None => format!(
            "Request AUTHORIZED by {} ({} - authorization complete)",
            actor.name, tier,
        ),
    }
}

/// Body for a rejection notice, including the tier and the reason.
#[must_use]
pub fn rejected(actor: &Actor, tier: AuthTier, reason: &str) -> String {
    format!(
        "Request REJECTED by {} ({})\nReason: {}",
        actor.name, tier, reason,
    )
}

/// Body for the disbursement notice.
#[must_use]
pub fn disbursed(actor: &Actor) -> String {
    format!("Funds disbursed by {}", actor.name)
}

/// Body for the cancellation notice.
#[must_use]
pub fn cancelled() -> String {
    "Request cancelled.".to_string()
}

/// Body for the reopen notice.
#[must_use]
pub fn reopened() -> String {
    "Request returned to draft.".to_string()
}
