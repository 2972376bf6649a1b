//! Property-based tests for the workflow state machine.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use centavo_shared::types::{Currency, Money, UserId};

use crate::cost_center::types::{AuthTier, CostCenter, RosterMember};
use crate::request::types::{
    Actor, ConceptRef, PaymentMethod, ProviderRef, PurchaseRequest, TierApproval,
};
use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::types::RequestStatus;

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_whitespace() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just(' '), Just('\t'), Just('\n')], 0..10)
        .prop_map(|chars| chars.into_iter().collect())
}

struct Fixture {
    center: CostCenter,
    tier_actors: [Actor; 3],
    request: PurchaseRequest,
}

fn fixture(amount: Decimal) -> Fixture {
    let tier_actors = [
        Actor::new(UserId::new(), "U1"),
        Actor::new(UserId::new(), "U2"),
        Actor::new(UserId::new(), "U3"),
    ];
    let mut center = CostCenter::new(
        "OPS",
        "Operations",
        Decimal::new(100_000, 2),
        Decimal::new(200_000, 2),
    );
    center.tier1_roster = vec![RosterMember::new(tier_actors[0].id, "U1")];
    center.tier2_roster = vec![RosterMember::new(tier_actors[1].id, "U2")];
    center.tier3_roster = vec![RosterMember::new(tier_actors[2].id, "U3")];

    let mut request = PurchaseRequest::new(
        "PR-00001",
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        Actor::new(UserId::new(), "Requester"),
        &center,
        Money::new(amount, Currency::Mxn),
        PaymentMethod::Cash,
    )
    .unwrap();
    request.concept = Some(ConceptRef::Other("supplies".into()));
    request.provider = Some(ProviderRef::Other("corner shop".into()));

    Fixture {
        center,
        tier_actors,
        request,
    }
}

fn stub_approval(actor: &Actor) -> TierApproval {
    TierApproval {
        authorizer: actor.id,
        authorizer_name: actor.name.clone(),
        decided_at: Utc::now(),
        comment: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Climbing the full chain from submission always ends Authorized, with
    /// exactly the tiers up to the required tier carrying records, and the
    /// stored required tier never changing along the way.
    #[test]
    fn prop_full_chain_reaches_authorized(amount in arb_amount()) {
        let Fixture { center, tier_actors, mut request } = fixture(amount);

        let action = WorkflowService::submit(&request, &center).unwrap();
        prop_assert!(WorkflowService::is_valid_transition(request.status, action.new_status()));
        request.apply(&action);
        prop_assert_eq!(request.status, RequestStatus::AwaitingTier1);

        let required = request.required_tier;
        let mut approvals = 0usize;
        while let Some(tier) = request.status.awaiting_tier() {
            let idx = match tier {
                AuthTier::Tier1 => 0,
                AuthTier::Tier2 => 1,
                AuthTier::Tier3 => 2,
            };
            let action = WorkflowService::approve(&request, &center, &tier_actors[idx]).unwrap();
            prop_assert!(WorkflowService::is_valid_transition(request.status, action.new_status()));
            request.apply(&action);
            approvals += 1;
            prop_assert_eq!(request.required_tier, required);
        }

        prop_assert_eq!(request.status, RequestStatus::Authorized);
        let expected = match required {
            AuthTier::Tier1 => 1,
            AuthTier::Tier2 => 2,
            AuthTier::Tier3 => 3,
        };
        prop_assert_eq!(approvals, expected);
        for tier in AuthTier::all() {
            prop_assert_eq!(request.tier_approval(tier).is_some(), tier <= required);
        }
    }

    /// A higher tier can never act while any lower tier record is missing.
    #[test]
    fn prop_no_tier_skipping(
        amount in arb_amount(),
        tier1_set in any::<bool>(),
        tier2_set in any::<bool>(),
    ) {
        let Fixture { center, tier_actors, mut request } = fixture(amount);

        request.status = RequestStatus::AwaitingTier3;
        if tier1_set {
            request.tier1 = Some(stub_approval(&tier_actors[0]));
        }
        if tier2_set {
            request.tier2 = Some(stub_approval(&tier_actors[1]));
        }

        let result = WorkflowService::approve(&request, &center, &tier_actors[2]);
        if tier1_set && tier2_set {
            prop_assert!(result.is_ok());
        } else {
            let is_missing_prior = matches!(result, Err(WorkflowError::MissingPriorApproval { .. }));
            prop_assert!(is_missing_prior);
        }
    }

    /// Reopening always lands in Draft with every tier record cleared.
    #[test]
    fn prop_reopen_clears_records(
        amount in arb_amount(),
        from_rejected in any::<bool>(),
    ) {
        let Fixture { center: _, tier_actors, mut request } = fixture(amount);
        request.tier1 = Some(stub_approval(&tier_actors[0]));
        request.tier2 = Some(stub_approval(&tier_actors[1]));
        request.tier3 = Some(stub_approval(&tier_actors[2]));
        request.status = if from_rejected {
            RequestStatus::Rejected
        } else {
            RequestStatus::Cancelled
        };

        let action = WorkflowService::reopen(&request).unwrap();
        request.apply(&action);
        prop_assert_eq!(request.status, RequestStatus::Draft);
        prop_assert!(request.tier1.is_none());
        prop_assert!(request.tier2.is_none());
        prop_assert!(request.tier3.is_none());
    }

    /// Reopen fails from every non-reopenable status.
    #[test]
    fn prop_reopen_fails_elsewhere(amount in arb_amount()) {
        let Fixture { center: _, tier_actors: _, mut request } = fixture(amount);
        for status in [
            RequestStatus::Draft,
            RequestStatus::AwaitingTier1,
            RequestStatus::AwaitingTier2,
            RequestStatus::AwaitingTier3,
            RequestStatus::Authorized,
            RequestStatus::Disbursed,
        ] {
            request.status = status;
            let is_invalid_transition = matches!(
                WorkflowService::reopen(&request),
                Err(WorkflowError::InvalidTransition { .. })
            );
            prop_assert!(is_invalid_transition);
        }
    }

    /// A whitespace-only reason never transitions the request.
    #[test]
    fn prop_blank_reason_never_rejects(
        amount in arb_amount(),
        reason in arb_whitespace(),
    ) {
        let Fixture { center, tier_actors, mut request } = fixture(amount);
        let action = WorkflowService::submit(&request, &center).unwrap();
        request.apply(&action);

        let result = WorkflowService::reject(&request, &center, &tier_actors[0], &reason);
        prop_assert!(matches!(result, Err(WorkflowError::RejectionReasonRequired)));
        prop_assert_eq!(request.status, RequestStatus::AwaitingTier1);
        prop_assert!(request.tier1.is_none());
    }

    /// A valid rejection at tier 1 records the trimmed reason verbatim.
    #[test]
    fn prop_rejection_records_trimmed_reason(
        amount in arb_amount(),
        reason in "[a-zA-Z][a-zA-Z ]{0,30}[a-zA-Z]",
    ) {
        let Fixture { center, tier_actors, mut request } = fixture(amount);
        let action = WorkflowService::submit(&request, &center).unwrap();
        request.apply(&action);

        let padded = format!("  {reason}  ");
        let action = WorkflowService::reject(&request, &center, &tier_actors[0], &padded).unwrap();
        request.apply(&action);
        prop_assert_eq!(request.status, RequestStatus::Rejected);
        prop_assert_eq!(
            request.tier1.as_ref().unwrap().comment.as_deref(),
            Some(reason.as_str())
        );
    }
}
