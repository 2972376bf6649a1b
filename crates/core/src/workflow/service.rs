//! Workflow service for purchase request state transitions.
//!
//! This module implements the core state machine logic for routing a
//! request through its authorization tiers. All methods are associated
//! functions that validate a transition against the current record and the
//! cost center policy, returning a `WorkflowAction` with the audit trail
//! data; nothing is written until `PurchaseRequest::apply` runs, so a guard
//! failure leaves the record untouched.

use chrono::Utc;

use crate::cost_center::types::{AuthTier, CostCenter};
use crate::request::types::{Actor, Disbursement, PurchaseRequest, TierApproval};
use crate::workflow::error::WorkflowError;
use crate::workflow::types::{RequestStatus, WorkflowAction};

/// Stateless service for managing request workflow transitions.
pub struct WorkflowService;

impl WorkflowService {
    /// Submit a draft request into the authorization chain.
    ///
    /// Guards: draft status; concept and provider set (catalog entry or
    /// non-blank free text); strictly positive amount; the center has at
    /// least one tier-1 authorizer. The required tier is recomputed here so
    /// the routing decision matches the amount being submitted.
    ///
    /// Routing always starts at tier 1 and climbs sequentially, whatever
    /// the required tier is.
    pub fn submit(
        request: &PurchaseRequest,
        center: &CostCenter,
    ) -> Result<WorkflowAction, WorkflowError> {
        debug_assert_eq!(request.cost_center_id, center.id);

        if request.status != RequestStatus::Draft {
            return Err(WorkflowError::InvalidTransition {
                from: request.status,
                to: RequestStatus::AwaitingTier1,
            });
        }

        match &request.concept {
            None => return Err(WorkflowError::MissingConcept),
            Some(concept) if concept.is_blank() => return Err(WorkflowError::MissingConcept),
            Some(_) => {}
        }

        match &request.provider {
            None => return Err(WorkflowError::MissingProvider),
            Some(provider) if provider.is_blank() => return Err(WorkflowError::MissingProvider),
            Some(_) => {}
        }

        if !request.amount.is_positive() {
            return Err(WorkflowError::NonPositiveAmount {
                amount: request.amount.amount,
            });
        }

        if center.roster(AuthTier::Tier1).is_empty() {
            return Err(WorkflowError::NoTierOneAuthorizers {
                center: center.name.clone(),
            });
        }

        Ok(WorkflowAction::Submit {
            new_status: RequestStatus::AwaitingTier1,
            required_tier: center.required_tier(request.amount.amount),
        })
    }

    /// Approve the request at its current tier.
    ///
    /// Guards: an awaiting status; every lower tier already decided; the
    /// actor is on the center's roster for the pending tier. Moves to the
    /// next awaiting status while the required tier is higher, otherwise to
    /// `Authorized`.
    pub fn approve(
        request: &PurchaseRequest,
        center: &CostCenter,
        actor: &Actor,
    ) -> Result<WorkflowAction, WorkflowError> {
        debug_assert_eq!(request.cost_center_id, center.id);

        let tier = Self::pending_tier(request)?;
        Self::check_authorization(request, center, actor, tier)?;

        let new_status = if request.required_tier > tier {
            tier.next()
                .map_or(RequestStatus::Authorized, RequestStatus::awaiting)
        } else {
            RequestStatus::Authorized
        };

        Ok(WorkflowAction::Approve {
            new_status,
            tier,
            approval: TierApproval {
                authorizer: actor.id,
                authorizer_name: actor.name.clone(),
                decided_at: Utc::now(),
                comment: None,
            },
        })
    }

    /// Reject the request at its current tier with a mandatory reason.
    ///
    /// Reached through `RejectionTicket`, which collects the reason; the
    /// same state and roster guards as `approve` apply, plus the reason
    /// must be non-blank after trimming.
    pub fn reject(
        request: &PurchaseRequest,
        center: &CostCenter,
        actor: &Actor,
        reason: &str,
    ) -> Result<WorkflowAction, WorkflowError> {
        debug_assert_eq!(request.cost_center_id, center.id);

        let reason = reason.trim();
        if reason.is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }

        let tier = Self::pending_tier(request)?;
        Self::check_authorization(request, center, actor, tier)?;

        Ok(WorkflowAction::Reject {
            new_status: RequestStatus::Rejected,
            tier,
            approval: TierApproval {
                authorizer: actor.id,
                authorizer_name: actor.name.clone(),
                decided_at: Utc::now(),
                comment: Some(reason.to_string()),
            },
        })
    }

    /// Release the funds for a fully authorized request.
    pub fn disburse(
        request: &PurchaseRequest,
        actor: &Actor,
        comment: Option<String>,
    ) -> Result<WorkflowAction, WorkflowError> {
        if request.status != RequestStatus::Authorized {
            return Err(WorkflowError::InvalidTransition {
                from: request.status,
                to: RequestStatus::Disbursed,
            });
        }

        Ok(WorkflowAction::Disburse {
            new_status: RequestStatus::Disbursed,
            disbursement: Disbursement {
                disbursed_by: actor.id,
                disbursed_by_name: actor.name.clone(),
                disbursed_at: Utc::now(),
                comment,
            },
        })
    }

    /// Withdraw a request that has not been fully authorized.
    pub fn cancel(request: &PurchaseRequest) -> Result<WorkflowAction, WorkflowError> {
        if !request.status.is_cancellable() {
            return Err(WorkflowError::InvalidTransition {
                from: request.status,
                to: RequestStatus::Cancelled,
            });
        }

        Ok(WorkflowAction::Cancel {
            new_status: RequestStatus::Cancelled,
        })
    }

    /// Return a rejected or cancelled request to draft.
    ///
    /// Applying the action clears all three tier decision records.
    pub fn reopen(request: &PurchaseRequest) -> Result<WorkflowAction, WorkflowError> {
        if !request.status.is_reopenable() {
            return Err(WorkflowError::InvalidTransition {
                from: request.status,
                to: RequestStatus::Draft,
            });
        }

        Ok(WorkflowAction::Reopen {
            new_status: RequestStatus::Draft,
        })
    }

    /// Check if a status transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: RequestStatus, to: RequestStatus) -> bool {
        use RequestStatus::{
            Authorized, AwaitingTier1, AwaitingTier2, AwaitingTier3, Cancelled, Disbursed, Draft,
            Rejected,
        };
        matches!(
            (from, to),
            (Draft, AwaitingTier1 | Cancelled)
                | (AwaitingTier1, AwaitingTier2 | Authorized | Rejected | Cancelled)
                | (AwaitingTier2, AwaitingTier3 | Authorized | Rejected | Cancelled)
                | (AwaitingTier3, Authorized | Rejected | Cancelled)
                | (Authorized, Disbursed)
                | (Rejected | Cancelled, Draft)
        )
    }

    fn pending_tier(request: &PurchaseRequest) -> Result<AuthTier, WorkflowError> {
        request
            .status
            .awaiting_tier()
            .ok_or(WorkflowError::NotAwaitingAuthorization {
                status: request.status,
            })
    }

    pub(crate) fn check_authorization(
        request: &PurchaseRequest,
        center: &CostCenter,
        actor: &Actor,
        tier: AuthTier,
    ) -> Result<(), WorkflowError> {
        for prior in tier.prior_tiers() {
            if request.tier_approval(*prior).is_none() {
                return Err(WorkflowError::MissingPriorApproval {
                    tier,
                    missing: *prior,
                });
            }
        }

        if !center.can_authorize(actor.id, tier) {
            return Err(WorkflowError::NotOnRoster {
                user: actor.name.clone(),
                center: center.name.clone(),
                tier,
                authorizers: center.roster_names(tier),
            });
        }

        Ok(())
    }
}
