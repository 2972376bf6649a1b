//! Purchase request domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use centavo_shared::types::{
    ConceptId, CostCenterId, Money, MovementId, ProviderId, RequestId, UserId,
};

use crate::cost_center::types::{AuthTier, CostCenter};
use crate::workflow::error::WorkflowError;
use crate::workflow::types::{RequestStatus, WorkflowAction};

/// The acting identity for an operation: id plus display name, as supplied
/// by the surrounding platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The user's identifier.
    pub id: UserId,
    /// The user's display name.
    pub name: String,
}

impl Actor {
    /// Creates an actor.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// How the funds will be paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash from the petty-cash box.
    Cash,
    /// Bank transfer.
    Transfer,
    /// Cheque.
    Cheque,
}

impl PaymentMethod {
    /// Returns the wire string for this method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Transfer => "transfer",
            Self::Cheque => "cheque",
        }
    }

    /// Parses a payment method from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "transfer" => Some(Self::Transfer),
            "cheque" => Some(Self::Cheque),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An expense concept: a catalog entry or a free-text override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConceptRef {
    /// Reference into the concept catalog.
    Catalog(ConceptId),
    /// Free-text concept for one-off expenses.
    Other(String),
}

impl ConceptRef {
    /// A free-text concept that trims to nothing does not count as set.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Catalog(_) => false,
            Self::Other(text) => text.trim().is_empty(),
        }
    }
}

/// A provider: a catalog entry or a free-text override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderRef {
    /// Reference into the provider catalog.
    Catalog(ProviderId),
    /// Free-text provider for one-off purchases.
    Other(String),
}

impl ProviderRef {
    /// A free-text provider that trims to nothing does not count as set.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Catalog(_) => false,
            Self::Other(text) => text.trim().is_empty(),
        }
    }
}

/// Audit record of one tier's decision (approval or rejection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierApproval {
    /// The user who decided.
    pub authorizer: UserId,
    /// The deciding user's display name.
    pub authorizer_name: String,
    /// When the decision was made.
    pub decided_at: DateTime<Utc>,
    /// Free-text comment; carries the reason on rejection.
    pub comment: Option<String>,
}

/// Audit record of the treasury disbursement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disbursement {
    /// The treasury user who released the funds.
    pub disbursed_by: UserId,
    /// The releasing user's display name.
    pub disbursed_by_name: String,
    /// When the funds were released.
    pub disbursed_at: DateTime<Utc>,
    /// Optional treasury comment.
    pub comment: Option<String>,
}

/// A petty-cash purchase request.
///
/// Routed through zero-to-three authorization tiers by the workflow service
/// according to its cost center's thresholds, then disbursed by treasury and
/// materialized into a cash movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRequest {
    /// Unique identifier.
    pub id: RequestId,
    /// Sequence-assigned reference, immutable after creation.
    pub reference: String,
    /// The date the request was raised.
    pub requested_on: NaiveDate,
    /// Who raised the request; immutable after creation.
    pub requester: Actor,
    /// What the money is for.
    pub concept: Option<ConceptRef>,
    /// The cost center that pays and routes the request.
    pub cost_center_id: CostCenterId,
    /// Estimated cost.
    pub amount: Money,
    /// How the funds will be paid out.
    pub payment_method: PaymentMethod,
    /// Who the purchase is from.
    pub provider: Option<ProviderRef>,
    /// Current lifecycle status.
    pub status: RequestStatus,
    /// The highest tier this request must reach. Derived from amount and
    /// center thresholds, recomputed on every amount/center change, and
    /// stored so transitions never re-derive it mid-flight.
    pub required_tier: AuthTier,
    /// Tier-1 decision record.
    pub tier1: Option<TierApproval>,
    /// Tier-2 decision record.
    pub tier2: Option<TierApproval>,
    /// Tier-3 decision record.
    pub tier3: Option<TierApproval>,
    /// Treasury disbursement record.
    pub disbursement: Option<Disbursement>,
    /// Free-text justification from the requester.
    pub justification: Option<String>,
    /// Notes visible to back office only.
    pub internal_notes: Option<String>,
    /// The cash movement created at disbursement, if any.
    pub movement_id: Option<MovementId>,
}

impl PurchaseRequest {
    /// Creates a draft request.
    ///
    /// The reference comes from the document sequence and is never changed
    /// afterwards. The required tier is computed from the center right away
    /// so it is always consistent with the stored amount.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::NegativeAmount` if the estimated amount is
    /// negative (zero is allowed while drafting).
    pub fn new(
        reference: impl Into<String>,
        requested_on: NaiveDate,
        requester: Actor,
        center: &CostCenter,
        amount: Money,
        payment_method: PaymentMethod,
    ) -> Result<Self, WorkflowError> {
        if amount.is_negative() {
            return Err(WorkflowError::NegativeAmount {
                amount: amount.amount,
            });
        }

        Ok(Self {
            id: RequestId::new(),
            reference: reference.into(),
            requested_on,
            requester,
            concept: None,
            cost_center_id: center.id,
            amount,
            payment_method,
            provider: None,
            status: RequestStatus::Draft,
            required_tier: center.required_tier(amount.amount),
            tier1: None,
            tier2: None,
            tier3: None,
            disbursement: None,
            justification: None,
            internal_notes: None,
            movement_id: None,
        })
    }

    /// Changes the estimated amount and recomputes the required tier.
    ///
    /// Draft-only: once submitted the amount is frozen.
    pub fn set_amount(&mut self, amount: Money, center: &CostCenter) -> Result<(), WorkflowError> {
        if self.status != RequestStatus::Draft {
            return Err(WorkflowError::NotEditable {
                status: self.status,
            });
        }
        if amount.is_negative() {
            return Err(WorkflowError::NegativeAmount {
                amount: amount.amount,
            });
        }
        self.amount = amount;
        self.required_tier = center.required_tier(amount.amount);
        Ok(())
    }

    /// Moves the request to another cost center and recomputes the required
    /// tier against the new center's thresholds. Draft-only.
    pub fn set_cost_center(&mut self, center: &CostCenter) -> Result<(), WorkflowError> {
        if self.status != RequestStatus::Draft {
            return Err(WorkflowError::NotEditable {
                status: self.status,
            });
        }
        self.cost_center_id = center.id;
        self.required_tier = center.required_tier(self.amount.amount);
        Ok(())
    }

    /// Returns the decision record for a tier.
    #[must_use]
    pub fn tier_approval(&self, tier: AuthTier) -> Option<&TierApproval> {
        match tier {
            AuthTier::Tier1 => self.tier1.as_ref(),
            AuthTier::Tier2 => self.tier2.as_ref(),
            AuthTier::Tier3 => self.tier3.as_ref(),
        }
    }

    fn tier_slot_mut(&mut self, tier: AuthTier) -> &mut Option<TierApproval> {
        match tier {
            AuthTier::Tier1 => &mut self.tier1,
            AuthTier::Tier2 => &mut self.tier2,
            AuthTier::Tier3 => &mut self.tier3,
        }
    }

    /// Returns true if every tier below `tier` already carries a decision.
    #[must_use]
    pub fn has_prior_approvals(&self, tier: AuthTier) -> bool {
        tier.prior_tiers()
            .iter()
            .all(|prior| self.tier_approval(*prior).is_some())
    }

    /// Applies a validated workflow action to this request.
    ///
    /// The action was produced by `WorkflowService` against the current
    /// state; applying is pure bookkeeping and cannot fail.
    pub fn apply(&mut self, action: &WorkflowAction) {
        match action {
            WorkflowAction::Submit {
                new_status,
                required_tier,
            } => {
                self.required_tier = *required_tier;
                self.status = *new_status;
            }
            WorkflowAction::Approve {
                new_status,
                tier,
                approval,
            }
            | WorkflowAction::Reject {
                new_status,
                tier,
                approval,
            } => {
                *self.tier_slot_mut(*tier) = Some(approval.clone());
                self.status = *new_status;
            }
            WorkflowAction::Disburse {
                new_status,
                disbursement,
            } => {
                self.disbursement = Some(disbursement.clone());
                self.status = *new_status;
            }
            WorkflowAction::Cancel { new_status } => {
                self.status = *new_status;
            }
            WorkflowAction::Reopen { new_status } => {
                self.tier1 = None;
                self.tier2 = None;
                self.tier3 = None;
                self.status = *new_status;
            }
        }
    }
}
