//! Workflow domain types for the request lifecycle.
//!
//! This module defines the core types used for routing a purchase request
//! through its authorization tiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cost_center::types::AuthTier;
use crate::request::types::{Disbursement, TierApproval};

/// Purchase request status in the authorization workflow.
///
/// Requests progress through these states from drafting to disbursement.
/// The valid transitions are:
/// - Draft → AwaitingTier1 (submit)
/// - AwaitingTierN → AwaitingTier(N+1) | Authorized (approve; the required
///   tier decides whether the chain continues)
/// - AwaitingTierN → Rejected (reject, via the rejection ticket)
/// - Authorized → Disbursed (disburse)
/// - Draft / AwaitingTierN → Cancelled (cancel)
/// - Rejected / Cancelled → Draft (reopen)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Request is being drafted and can be modified.
    Draft,
    /// Waiting for a tier-1 authorizer.
    AwaitingTier1,
    /// Waiting for a tier-2 authorizer.
    AwaitingTier2,
    /// Waiting for a tier-3 authorizer.
    AwaitingTier3,
    /// Fully authorized, waiting for treasury.
    Authorized,
    /// Funds released; terminal.
    Disbursed,
    /// Turned down at some tier; can be reopened.
    Rejected,
    /// Withdrawn before authorization completed; can be reopened.
    Cancelled,
}

impl RequestStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::AwaitingTier1 => "awaiting_tier1",
            Self::AwaitingTier2 => "awaiting_tier2",
            Self::AwaitingTier3 => "awaiting_tier3",
            Self::Authorized => "authorized",
            Self::Disbursed => "disbursed",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "awaiting_tier1" => Some(Self::AwaitingTier1),
            "awaiting_tier2" => Some(Self::AwaitingTier2),
            "awaiting_tier3" => Some(Self::AwaitingTier3),
            "authorized" => Some(Self::Authorized),
            "disbursed" => Some(Self::Disbursed),
            "rejected" => Some(Self::Rejected),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// The status that waits on a given tier.
    #[must_use]
    pub fn awaiting(tier: AuthTier) -> Self {
        match tier {
            AuthTier::Tier1 => Self::AwaitingTier1,
            AuthTier::Tier2 => Self::AwaitingTier2,
            AuthTier::Tier3 => Self::AwaitingTier3,
        }
    }

    /// The tier this status waits on, if it is an awaiting status.
    #[must_use]
    pub fn awaiting_tier(&self) -> Option<AuthTier> {
        match self {
            Self::AwaitingTier1 => Some(AuthTier::Tier1),
            Self::AwaitingTier2 => Some(AuthTier::Tier2),
            Self::AwaitingTier3 => Some(AuthTier::Tier3),
            _ => None,
        }
    }

    /// Returns true if the request can still be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the request can be withdrawn.
    #[must_use]
    pub fn is_cancellable(&self) -> bool {
        matches!(
            self,
            Self::Draft | Self::AwaitingTier1 | Self::AwaitingTier2 | Self::AwaitingTier3
        )
    }

    /// Returns true if the request can be returned to draft.
    #[must_use]
    pub fn is_reopenable(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Workflow action representing a state transition with audit data.
///
/// Each variant captures the action performed, the resulting status, and
/// the audit trail information (who, when, why). Actions are produced by
/// `WorkflowService` and materialized by `PurchaseRequest::apply`.
#[derive(Debug, Clone)]
pub enum WorkflowAction {
    /// Send a draft request into the authorization chain.
    Submit {
        /// The new status after submission (always awaiting tier 1).
        new_status: RequestStatus,
        /// The tier the request must climb to, frozen at submission.
        required_tier: AuthTier,
    },
    /// Approve the request at its current tier.
    Approve {
        /// The new status after approval.
        new_status: RequestStatus,
        /// The tier that decided.
        tier: AuthTier,
        /// The decision record written to that tier.
        approval: TierApproval,
    },
    /// Reject the request at its current tier.
    Reject {
        /// The new status after rejection (Rejected).
        new_status: RequestStatus,
        /// The tier that decided.
        tier: AuthTier,
        /// The decision record; its comment carries the reason.
        approval: TierApproval,
    },
    /// Release the funds for an authorized request.
    Disburse {
        /// The new status after disbursement.
        new_status: RequestStatus,
        /// The treasury audit record.
        disbursement: Disbursement,
    },
    /// Withdraw the request before authorization completes.
    Cancel {
        /// The new status after cancellation.
        new_status: RequestStatus,
    },
    /// Return a rejected or cancelled request to draft.
    Reopen {
        /// The new status after reopening (Draft). Applying clears all
        /// tier decision records.
        new_status: RequestStatus,
    },
}

impl WorkflowAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> RequestStatus {
        match self {
            Self::Submit { new_status, .. }
            | Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::Disburse { new_status, .. }
            | Self::Cancel { new_status }
            | Self::Reopen { new_status } => *new_status,
        }
    }
}
