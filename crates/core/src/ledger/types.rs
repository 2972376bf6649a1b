//! Cash movement domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use centavo_shared::types::{CostCenterId, Money, MovementId, RequestId};

use crate::request::types::{Actor, PaymentMethod};

/// An outgoing petty-cash movement, created when a request is disbursed.
///
/// Concept and provider are stored as resolved display labels: the movement
/// is a flat ledger row and must stay readable even if catalog entries are
/// later renamed or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashMovement {
    /// Unique identifier.
    pub id: MovementId,
    /// Sequence-assigned reference, immutable.
    pub reference: String,
    /// The date the money left the box.
    pub paid_on: NaiveDate,
    /// The request this movement settles.
    pub request_id: RequestId,
    /// The cost center charged.
    pub cost_center_id: CostCenterId,
    /// Resolved concept label.
    pub concept: String,
    /// Resolved provider label.
    pub provider: String,
    /// The disbursed amount.
    pub amount: Money,
    /// How the funds were paid out.
    pub payment_method: PaymentMethod,
    /// The treasury user who released the funds.
    pub recorded_by: Actor,
}
