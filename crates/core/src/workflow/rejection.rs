//! Single-use rejection ticket.
//!
//! Rejecting needs a reason, so the action is split in two: opening a
//! ticket (which runs the same state and roster guards as an approval) and
//! confirming it with the collected reason. The ticket is a short-lived
//! value object; confirming consumes it.

use centavo_shared::types::RequestId;

use crate::cost_center::types::{AuthTier, CostCenter};
use crate::request::types::{Actor, PurchaseRequest};
use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::types::WorkflowAction;

/// A pending rejection: the target request and the tier turning it down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionTicket {
    /// The request being rejected.
    pub request_id: RequestId,
    /// The tier at which the rejection occurs.
    pub tier: AuthTier,
}

impl RejectionTicket {
    /// Opens a rejection ticket for the request's currently pending tier.
    ///
    /// Fails with the same errors as an approval would: the request must be
    /// awaiting a tier and the actor must be on that tier's roster for the
    /// request's center.
    pub fn open(
        request: &PurchaseRequest,
        center: &CostCenter,
        actor: &Actor,
    ) -> Result<Self, WorkflowError> {
        let tier = request
            .status
            .awaiting_tier()
            .ok_or(WorkflowError::NotAwaitingAuthorization {
                status: request.status,
            })?;
        WorkflowService::check_authorization(request, center, actor, tier)?;

        Ok(Self {
            request_id: request.id,
            tier,
        })
    }

    /// Confirms the rejection with the collected reason, consuming the
    /// ticket.
    ///
    /// The reason must be non-blank after trimming. State and roster are
    /// re-checked against the current record, so a ticket opened against a
    /// stale state fails closed instead of rejecting twice.
    pub fn confirm(
        self,
        request: &PurchaseRequest,
        center: &CostCenter,
        actor: &Actor,
        reason: &str,
    ) -> Result<WorkflowAction, WorkflowError> {
        debug_assert_eq!(self.request_id, request.id);
        WorkflowService::reject(request, center, actor, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use centavo_shared::types::{Currency, Money, UserId};

    use crate::cost_center::types::RosterMember;
    use crate::request::types::{ConceptRef, PaymentMethod, ProviderRef};
    use crate::workflow::types::RequestStatus;

    fn fixture() -> (PurchaseRequest, CostCenter, Actor) {
        let approver = Actor::new(UserId::new(), "Ana");
        let mut center = CostCenter::new("OPS", "Operations", dec!(1000), dec!(2000));
        center.tier1_roster = vec![RosterMember::new(approver.id, approver.name.clone())];

        let mut request = PurchaseRequest::new(
            "PR-00001",
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            Actor::new(UserId::new(), "Rita"),
            &center,
            Money::new(dec!(400), Currency::Mxn),
            PaymentMethod::Cash,
        )
        .unwrap();
        request.concept = Some(ConceptRef::Other("Paint".into()));
        request.provider = Some(ProviderRef::Other("Hardware store".into()));
        let action = WorkflowService::submit(&request, &center).unwrap();
        request.apply(&action);

        (request, center, approver)
    }

    #[test]
    fn test_open_captures_pending_tier() {
        let (request, center, approver) = fixture();
        let ticket = RejectionTicket::open(&request, &center, &approver).unwrap();
        assert_eq!(ticket.request_id, request.id);
        assert_eq!(ticket.tier, AuthTier::Tier1);
    }

    #[test]
    fn test_open_enforces_roster() {
        let (request, center, _) = fixture();
        let outsider = Actor::new(UserId::new(), "Mallory");
        assert!(matches!(
            RejectionTicket::open(&request, &center, &outsider),
            Err(WorkflowError::NotOnRoster { .. })
        ));
    }

    #[test]
    fn test_confirm_writes_reason_and_rejects() {
        let (mut request, center, approver) = fixture();
        let ticket = RejectionTicket::open(&request, &center, &approver).unwrap();
        let action = ticket
            .confirm(&request, &center, &approver, "quote is outdated")
            .unwrap();
        request.apply(&action);

        assert_eq!(request.status, RequestStatus::Rejected);
        let decision = request.tier1.as_ref().unwrap();
        assert_eq!(decision.authorizer, approver.id);
        assert_eq!(decision.comment.as_deref(), Some("quote is outdated"));
    }

    #[test]
    fn test_confirm_rejects_blank_reason() {
        let (request, center, approver) = fixture();
        let ticket = RejectionTicket::open(&request, &center, &approver).unwrap();
        assert!(matches!(
            ticket.confirm(&request, &center, &approver, "   "),
            Err(WorkflowError::RejectionReasonRequired)
        ));
        assert_eq!(request.status, RequestStatus::AwaitingTier1);
    }

    #[test]
    fn test_confirm_fails_closed_on_stale_state() {
        let (mut request, center, approver) = fixture();
        let ticket = RejectionTicket::open(&request, &center, &approver).unwrap();

        // Someone else approves before the ticket is confirmed.
        let action = WorkflowService::approve(&request, &center, &approver).unwrap();
        request.apply(&action);
        assert_eq!(request.status, RequestStatus::Authorized);

        assert!(matches!(
            ticket.confirm(&request, &center, &approver, "late objection"),
            Err(WorkflowError::NotAwaitingAuthorization { .. })
        ));
    }
}
