//! Purchase request repository.
//!
//! Each lifecycle operation runs as one unit of work: fetch the record,
//! let `WorkflowService` validate and produce the action, apply it, append
//! the timeline notice. Guard failures surface before anything is written,
//! so a stale caller sees an error instead of a half-applied transition.

use std::collections::HashMap;

use chrono::NaiveDate;

use centavo_shared::config::AppConfig;
use centavo_shared::types::{CostCenterId, Money, MovementId, RequestId, UserId};

use centavo_core::ledger::service::LedgerService;
use centavo_core::ledger::types::CashMovement;
use centavo_core::request::types::{
    Actor, ConceptRef, PaymentMethod, ProviderRef, PurchaseRequest,
};
use centavo_core::workflow::notice;
use centavo_core::workflow::rejection::RejectionTicket;
use centavo_core::workflow::service::WorkflowService;
use centavo_core::workflow::types::{RequestStatus, WorkflowAction};

use crate::error::{StoreError, StoreResult};
use crate::ports::{Feedback, MessageKind, NavTarget, SequenceGenerator, TimelineSink};
use crate::repositories::cost_center::CostCenterRepository;

/// Input for creating a draft request.
#[derive(Debug, Clone)]
pub struct CreateRequestInput {
    /// The date the request is raised.
    pub requested_on: NaiveDate,
    /// What the money is for, if already known.
    pub concept: Option<ConceptRef>,
    /// The cost center that pays and routes the request.
    pub cost_center_id: CostCenterId,
    /// Estimated cost.
    pub amount: Money,
    /// How the funds will be paid out.
    pub payment_method: PaymentMethod,
    /// Who the purchase is from, if already known.
    pub provider: Option<ProviderRef>,
    /// Free-text justification.
    pub justification: Option<String>,
}

/// In-memory purchase request store with the workflow orchestration.
#[derive(Debug)]
pub struct RequestRepository<S: SequenceGenerator, T: TimelineSink> {
    requests: HashMap<RequestId, PurchaseRequest>,
    movements: HashMap<MovementId, CashMovement>,
    sequence: S,
    timeline: T,
    request_code: String,
    movement_code: String,
}

impl<S: SequenceGenerator, T: TimelineSink> RequestRepository<S, T> {
    /// Creates a repository using the configured sequence prefixes.
    pub fn new(sequence: S, timeline: T, config: &AppConfig) -> Self {
        Self {
            requests: HashMap::new(),
            movements: HashMap::new(),
            sequence,
            timeline,
            request_code: config.sequence.request_prefix.clone(),
            movement_code: config.sequence.movement_prefix.clone(),
        }
    }

    /// Read access to the timeline sink (the audit trail).
    pub fn timeline(&self) -> &T {
        &self.timeline
    }

    /// Fetches a request by id.
    pub fn get(&self, id: RequestId) -> StoreResult<&PurchaseRequest> {
        self.requests
            .get(&id)
            .ok_or_else(|| StoreError::not_found("purchase request", id))
    }

    /// Fetches a cash movement by id.
    pub fn movement(&self, id: MovementId) -> StoreResult<&CashMovement> {
        self.movements
            .get(&id)
            .ok_or_else(|| StoreError::not_found("cash movement", id))
    }

    /// Creates a draft request for the acting user, assigning the sequence
    /// reference exactly once.
    pub fn create(
        &mut self,
        actor: &Actor,
        input: CreateRequestInput,
        centers: &CostCenterRepository,
    ) -> StoreResult<RequestId> {
        let center = centers.get(input.cost_center_id)?;
        let reference = self.sequence.next(&self.request_code);

        let mut request = PurchaseRequest::new(
            reference,
            input.requested_on,
            actor.clone(),
            center,
            input.amount,
            input.payment_method,
        )?;
        request.concept = input.concept;
        request.provider = input.provider;
        request.justification = input.justification;

        tracing::info!(reference = %request.reference, requester = %actor.name, "purchase request created");
        let id = request.id;
        self.requests.insert(id, request);
        Ok(id)
    }

    /// Changes a draft's estimated amount, recomputing the required tier.
    pub fn update_amount(
        &mut self,
        id: RequestId,
        amount: Money,
        centers: &CostCenterRepository,
    ) -> StoreResult<()> {
        let request = self
            .requests
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("purchase request", id))?;
        let center = centers.get(request.cost_center_id)?;
        request.set_amount(amount, center)?;
        Ok(())
    }

    /// Moves a draft to another cost center, recomputing the required tier.
    pub fn move_to_center(
        &mut self,
        id: RequestId,
        center_id: CostCenterId,
        centers: &CostCenterRepository,
    ) -> StoreResult<()> {
        let request = self
            .requests
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("purchase request", id))?;
        let center = centers.get(center_id)?;
        request.set_cost_center(center)?;
        Ok(())
    }

    /// Sends a draft into the authorization chain.
    pub fn submit(&mut self, id: RequestId, centers: &CostCenterRepository) -> StoreResult<()> {
        let request = self
            .requests
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("purchase request", id))?;
        let center = centers.get(request.cost_center_id)?;

        let from = request.status;
        let action = WorkflowService::submit(request, center)?;
        request.apply(&action);

        self.timeline
            .post(id, notice::submitted(request, center), MessageKind::Notification);
        tracing::info!(reference = %request.reference, %from, to = %request.status, "request submitted");
        Ok(())
    }

    /// Approves the request at its currently pending tier.
    pub fn approve(
        &mut self,
        id: RequestId,
        actor: &Actor,
        centers: &CostCenterRepository,
    ) -> StoreResult<Feedback> {
        let request = self
            .requests
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("purchase request", id))?;
        let center = centers.get(request.cost_center_id)?;

        let from = request.status;
        let action = WorkflowService::approve(request, center, actor)?;
        let WorkflowAction::Approve { tier, new_status, .. } = &action else {
            unreachable!("approve produces an Approve action");
        };
        let body = notice::approved(actor, *tier, *new_status, center);
        request.apply(&action);

        self.timeline.post(id, body, MessageKind::Notification);
        tracing::info!(reference = %request.reference, %from, to = %request.status, authorizer = %actor.name, "request approved");
        Ok(Feedback::Toast {
            title: "Authorized".to_string(),
            message: "Request authorized successfully".to_string(),
        })
    }

    /// Opens a rejection ticket for the request's currently pending tier.
    ///
    /// Runs the same guards as an approval; the caller collects the reason
    /// and comes back through `reject_confirm`.
    pub fn reject_open(
        &self,
        id: RequestId,
        actor: &Actor,
        centers: &CostCenterRepository,
    ) -> StoreResult<RejectionTicket> {
        let request = self.get(id)?;
        let center = centers.get(request.cost_center_id)?;
        Ok(RejectionTicket::open(request, center, actor)?)
    }

    /// Confirms a rejection ticket with the collected reason.
    ///
    /// Returns a navigation directive back to the authorization list the
    /// actor was working from.
    pub fn reject_confirm(
        &mut self,
        ticket: RejectionTicket,
        actor: &Actor,
        reason: &str,
        centers: &CostCenterRepository,
    ) -> StoreResult<Feedback> {
        let id = ticket.request_id;
        let request = self
            .requests
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("purchase request", id))?;
        let center = centers.get(request.cost_center_id)?;

        let from = request.status;
        let action = ticket.confirm(request, center, actor, reason)?;
        let WorkflowAction::Reject { tier, approval, .. } = &action else {
            unreachable!("confirm produces a Reject action");
        };
        let tier = *tier;
        let body = notice::rejected(actor, tier, approval.comment.as_deref().unwrap_or_default());
        request.apply(&action);

        self.timeline.post(id, body, MessageKind::Notification);
        tracing::info!(reference = %request.reference, %from, to = %request.status, authorizer = %actor.name, "request rejected");
        Ok(Feedback::Open(NavTarget::RequestList {
            status: RequestStatus::awaiting(tier),
        }))
    }

    /// Releases the funds and records the matching cash movement.
    pub fn disburse(
        &mut self,
        id: RequestId,
        actor: &Actor,
        comment: Option<String>,
    ) -> StoreResult<Feedback> {
        let request = self
            .requests
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("purchase request", id))?;

        let from = request.status;
        let action = WorkflowService::disburse(request, actor, comment)?;
        request.apply(&action);
        self.timeline
            .post(id, notice::disbursed(actor), MessageKind::Notification);

        let movement_reference = self.sequence.next(&self.movement_code);
        let movement = LedgerService::materialize(
            request,
            movement_reference,
            concept_label(request),
            provider_label(request),
        )?;
        request.movement_id = Some(movement.id);

        tracing::info!(
            reference = %request.reference,
            movement = %movement.reference,
            %from,
            to = %request.status,
            "request disbursed"
        );
        self.movements.insert(movement.id, movement);
        Ok(Feedback::Toast {
            title: "Disbursed".to_string(),
            message: "Funds disbursed successfully".to_string(),
        })
    }

    /// Withdraws a request that has not been fully authorized.
    pub fn cancel(&mut self, id: RequestId) -> StoreResult<()> {
        let request = self
            .requests
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("purchase request", id))?;

        let from = request.status;
        let action = WorkflowService::cancel(request)?;
        request.apply(&action);

        self.timeline
            .post(id, notice::cancelled(), MessageKind::Notification);
        tracing::info!(reference = %request.reference, %from, to = %request.status, "request cancelled");
        Ok(())
    }

    /// Returns a rejected or cancelled request to draft, clearing all tier
    /// decision records.
    pub fn reopen(&mut self, id: RequestId) -> StoreResult<()> {
        let request = self
            .requests
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("purchase request", id))?;

        let from = request.status;
        let action = WorkflowService::reopen(request)?;
        request.apply(&action);

        self.timeline
            .post(id, notice::reopened(), MessageKind::Notification);
        tracing::info!(reference = %request.reference, %from, to = %request.status, "request reopened");
        Ok(())
    }

    /// Requests currently waiting at a tier where `user` is an authorizer,
    /// ordered by reference.
    #[must_use]
    pub fn authorizable_by(
        &self,
        user: UserId,
        centers: &CostCenterRepository,
    ) -> Vec<&PurchaseRequest> {
        let mut matches: Vec<&PurchaseRequest> = self
            .requests
            .values()
            .filter(|request| {
                request.status.awaiting_tier().is_some_and(|tier| {
                    centers
                        .get(request.cost_center_id)
                        .is_ok_and(|center| center.can_authorize(user, tier))
                })
            })
            .collect();
        matches.sort_by(|a, b| a.reference.cmp(&b.reference));
        matches
    }

    /// Navigation directive opening the movement linked to a request.
    pub fn open_movement(&self, id: RequestId) -> StoreResult<Feedback> {
        let request = self.get(id)?;
        let movement_id = request
            .movement_id
            .ok_or_else(|| StoreError::not_found("cash movement for request", &request.reference))?;
        Ok(Feedback::Open(NavTarget::Movement(movement_id)))
    }
}

// Catalog labels resolve upstream in the platform; the id string is the
// in-memory fallback.
fn concept_label(request: &PurchaseRequest) -> String {
    match &request.concept {
        Some(ConceptRef::Other(text)) => text.trim().to_string(),
        Some(ConceptRef::Catalog(id)) => id.to_string(),
        None => String::new(),
    }
}

fn provider_label(request: &PurchaseRequest) -> String {
    match &request.provider {
        Some(ProviderRef::Other(text)) => text.trim().to_string(),
        Some(ProviderRef::Catalog(id)) => id.to_string(),
        None => String::new(),
    }
}
