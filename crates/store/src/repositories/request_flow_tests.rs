//! End-to-end tests of the request lifecycle through the repositories:
//! store, sequence, timeline, and presentation feedback working together.

use std::sync::Once;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use centavo_shared::config::AppConfig;
use centavo_shared::types::{Currency, Money, UserId};

use centavo_core::cost_center::types::{CostCenter, RosterMember};
use centavo_core::request::types::{Actor, ConceptRef, PaymentMethod, ProviderRef};
use centavo_core::workflow::error::WorkflowError;
use centavo_core::workflow::types::RequestStatus;

use crate::error::StoreError;
use crate::memory::{InMemoryTimeline, PrefixSequence};
use crate::ports::{Feedback, NavTarget};
use crate::repositories::cost_center::CostCenterRepository;
use crate::repositories::request::{CreateRequestInput, RequestRepository};

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("info")
            .try_init();
    });
}

struct Harness {
    centers: CostCenterRepository,
    requests: RequestRepository<PrefixSequence, InMemoryTimeline>,
    u1: Actor,
    u2: Actor,
    u3: Actor,
    treasurer: Actor,
    requester: Actor,
    center_id: centavo_shared::types::CostCenterId,
}

fn harness() -> Harness {
    init_tracing();
    let config = AppConfig::default();

    let u1 = Actor::new(UserId::new(), "U1");
    let u2 = Actor::new(UserId::new(), "U2");
    let u3 = Actor::new(UserId::new(), "U3");

    let mut center = CostCenter::new("OPS", "Operations", dec!(1000), dec!(2000));
    center.tier1_roster = vec![RosterMember::new(u1.id, u1.name.clone())];
    center.tier2_roster = vec![RosterMember::new(u2.id, u2.name.clone())];
    center.tier3_roster = vec![RosterMember::new(u3.id, u3.name.clone())];

    let mut centers = CostCenterRepository::new();
    let center_id = centers.create(center).unwrap();

    let requests = RequestRepository::new(
        PrefixSequence::from_config(&config.sequence),
        InMemoryTimeline::new(),
        &config,
    );

    Harness {
        centers,
        requests,
        u1,
        u2,
        u3,
        treasurer: Actor::new(UserId::new(), "Tess"),
        requester: Actor::new(UserId::new(), "Rita"),
        center_id,
    }
}

fn input(h: &Harness, amount: Decimal) -> CreateRequestInput {
    CreateRequestInput {
        requested_on: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        concept: Some(ConceptRef::Other("Cleaning supplies".into())),
        cost_center_id: h.center_id,
        amount: Money::new(amount, Currency::Mxn),
        payment_method: PaymentMethod::Cash,
        provider: Some(ProviderRef::Other("Corner hardware".into())),
        justification: Some("Monthly restock".into()),
    }
}

#[test]
fn test_references_come_from_the_sequence() {
    let mut h = harness();
    let first = h
        .requests
        .create(&h.requester, input(&h, dec!(100)), &h.centers)
        .unwrap();
    let second = h
        .requests
        .create(&h.requester, input(&h, dec!(200)), &h.centers)
        .unwrap();
    assert_eq!(h.requests.get(first).unwrap().reference, "PR-00001");
    assert_eq!(h.requests.get(second).unwrap().reference, "PR-00002");
    assert_eq!(h.requests.get(first).unwrap().requester, h.requester);
}

#[test]
fn test_full_lifecycle_tier2_amount() {
    let mut h = harness();
    let id = h
        .requests
        .create(&h.requester, input(&h, dec!(1500)), &h.centers)
        .unwrap();

    h.requests.submit(id, &h.centers).unwrap();
    assert_eq!(h.requests.get(id).unwrap().status, RequestStatus::AwaitingTier1);

    let feedback = h.requests.approve(id, &h.u1, &h.centers).unwrap();
    assert!(matches!(feedback, Feedback::Toast { .. }));
    assert_eq!(h.requests.get(id).unwrap().status, RequestStatus::AwaitingTier2);

    h.requests.approve(id, &h.u2, &h.centers).unwrap();
    assert_eq!(h.requests.get(id).unwrap().status, RequestStatus::Authorized);

    let feedback = h
        .requests
        .disburse(id, &h.treasurer, Some("paid at the window".into()))
        .unwrap();
    assert!(matches!(feedback, Feedback::Toast { .. }));

    let request = h.requests.get(id).unwrap();
    assert_eq!(request.status, RequestStatus::Disbursed);
    let movement_id = request.movement_id.unwrap();
    let movement = h.requests.movement(movement_id).unwrap();
    assert_eq!(movement.reference, "MOV-00001");
    assert_eq!(movement.request_id, id);
    assert_eq!(movement.amount, Money::new(dec!(1500), Currency::Mxn));
    assert_eq!(movement.concept, "Cleaning supplies");
    assert_eq!(movement.recorded_by.name, "Tess");

    // Navigation directive opens the linked movement.
    let feedback = h.requests.open_movement(id).unwrap();
    assert_eq!(feedback, Feedback::Open(NavTarget::Movement(movement_id)));

    // The timeline captured one notice per transition.
    let entries = h.requests.timeline().for_request(id);
    assert_eq!(entries.len(), 4);
    assert!(entries[0].body.contains("sent for authorization"));
    assert!(entries[0].body.contains("Operations"));
    assert!(entries[0].body.contains("U1"));
    assert!(entries[1].body.contains("Approved by U1"));
    assert!(entries[1].body.contains("U2"));
    assert!(entries[2].body.contains("AUTHORIZED by U2"));
    assert!(entries[3].body.contains("Funds disbursed by Tess"));
}

#[test]
fn test_tier3_chain_climbs_every_roster() {
    let mut h = harness();
    let id = h
        .requests
        .create(&h.requester, input(&h, dec!(2500)), &h.centers)
        .unwrap();
    h.requests.submit(id, &h.centers).unwrap();

    h.requests.approve(id, &h.u1, &h.centers).unwrap();
    h.requests.approve(id, &h.u2, &h.centers).unwrap();
    h.requests.approve(id, &h.u3, &h.centers).unwrap();

    let request = h.requests.get(id).unwrap();
    assert_eq!(request.status, RequestStatus::Authorized);
    assert!(request.tier3.is_some());
}

#[test]
fn test_wrong_roster_member_cannot_approve() {
    let mut h = harness();
    let id = h
        .requests
        .create(&h.requester, input(&h, dec!(1500)), &h.centers)
        .unwrap();
    h.requests.submit(id, &h.centers).unwrap();

    let err = h.requests.approve(id, &h.u2, &h.centers).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Workflow(WorkflowError::NotOnRoster { .. })
    ));
    assert!(err.to_string().contains("U1"));
    assert_eq!(h.requests.get(id).unwrap().status, RequestStatus::AwaitingTier1);
}

#[test]
fn test_rejection_flow_records_reason_and_navigates_back() {
    let mut h = harness();
    let id = h
        .requests
        .create(&h.requester, input(&h, dec!(500)), &h.centers)
        .unwrap();
    h.requests.submit(id, &h.centers).unwrap();

    let ticket = h.requests.reject_open(id, &h.u1, &h.centers).unwrap();

    // Blank reason is refused and nothing changes.
    let err = h
        .requests
        .reject_confirm(ticket.clone(), &h.u1, "   ", &h.centers)
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Workflow(WorkflowError::RejectionReasonRequired)
    ));
    assert_eq!(h.requests.get(id).unwrap().status, RequestStatus::AwaitingTier1);

    let feedback = h
        .requests
        .reject_confirm(ticket, &h.u1, "precio excesivo", &h.centers)
        .unwrap();
    assert_eq!(
        feedback,
        Feedback::Open(NavTarget::RequestList {
            status: RequestStatus::AwaitingTier1
        })
    );

    let request = h.requests.get(id).unwrap();
    assert_eq!(request.status, RequestStatus::Rejected);
    assert_eq!(
        request.tier1.as_ref().unwrap().comment.as_deref(),
        Some("precio excesivo")
    );

    let entries = h.requests.timeline().for_request(id);
    assert!(entries.last().unwrap().body.contains("precio excesivo"));

    // Reopening clears the tier records.
    h.requests.reopen(id).unwrap();
    let request = h.requests.get(id).unwrap();
    assert_eq!(request.status, RequestStatus::Draft);
    assert!(request.tier1.is_none());
}

#[test]
fn test_cancel_and_reopen() {
    let mut h = harness();
    let id = h
        .requests
        .create(&h.requester, input(&h, dec!(500)), &h.centers)
        .unwrap();
    h.requests.cancel(id).unwrap();
    assert_eq!(h.requests.get(id).unwrap().status, RequestStatus::Cancelled);

    h.requests.reopen(id).unwrap();
    assert_eq!(h.requests.get(id).unwrap().status, RequestStatus::Draft);

    // A fully authorized request cannot be withdrawn.
    h.requests.submit(id, &h.centers).unwrap();
    h.requests.approve(id, &h.u1, &h.centers).unwrap();
    let err = h.requests.cancel(id).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Workflow(WorkflowError::InvalidTransition { .. })
    ));
}

#[test]
fn test_amending_a_draft_recomputes_required_tier() {
    let mut h = harness();
    let id = h
        .requests
        .create(&h.requester, input(&h, dec!(500)), &h.centers)
        .unwrap();
    h.requests
        .update_amount(id, Money::new(dec!(2500), Currency::Mxn), &h.centers)
        .unwrap();
    assert_eq!(
        h.requests.get(id).unwrap().required_tier,
        centavo_core::cost_center::types::AuthTier::Tier3
    );

    h.requests.submit(id, &h.centers).unwrap();
    let err = h
        .requests
        .update_amount(id, Money::new(dec!(100), Currency::Mxn), &h.centers)
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Workflow(WorkflowError::NotEditable { .. })
    ));
}

#[test]
fn test_authorizable_by_follows_state_and_roster() {
    let mut h = harness();
    let small = h
        .requests
        .create(&h.requester, input(&h, dec!(100)), &h.centers)
        .unwrap();
    let big = h
        .requests
        .create(&h.requester, input(&h, dec!(1500)), &h.centers)
        .unwrap();
    h.requests.submit(small, &h.centers).unwrap();
    h.requests.submit(big, &h.centers).unwrap();

    // Both wait at tier 1: U1 sees both, U2 none.
    assert_eq!(h.requests.authorizable_by(h.u1.id, &h.centers).len(), 2);
    assert!(h.requests.authorizable_by(h.u2.id, &h.centers).is_empty());

    // After U1 approves the big one, it moves to U2's queue.
    h.requests.approve(big, &h.u1, &h.centers).unwrap();
    let for_u2 = h.requests.authorizable_by(h.u2.id, &h.centers);
    assert_eq!(for_u2.len(), 1);
    assert_eq!(for_u2[0].id, big);

    // Drafts and authorized requests never show up.
    h.requests.approve(small, &h.u1, &h.centers).unwrap();
    assert_eq!(h.requests.authorizable_by(h.u1.id, &h.centers).len(), 0);
}

#[test]
fn test_open_movement_before_disbursement_fails() {
    let mut h = harness();
    let id = h
        .requests
        .create(&h.requester, input(&h, dec!(100)), &h.centers)
        .unwrap();
    let err = h.requests.open_movement(id).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn test_disburse_twice_fails() {
    let mut h = harness();
    let id = h
        .requests
        .create(&h.requester, input(&h, dec!(100)), &h.centers)
        .unwrap();
    h.requests.submit(id, &h.centers).unwrap();
    h.requests.approve(id, &h.u1, &h.centers).unwrap();
    h.requests.disburse(id, &h.treasurer, None).unwrap();

    let err = h.requests.disburse(id, &h.treasurer, None).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Workflow(WorkflowError::InvalidTransition { .. })
    ));
}

#[test]
fn test_submission_is_blocked_without_concept() {
    let mut h = harness();
    let mut draft = input(&h, dec!(100));
    draft.concept = None;
    let id = h.requests.create(&h.requester, draft, &h.centers).unwrap();
    let err = h.requests.submit(id, &h.centers).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Workflow(WorkflowError::MissingConcept)
    ));
    // No notice was posted for the failed attempt.
    assert!(h.requests.timeline().for_request(id).is_empty());
}
