//! Building a cash movement from a disbursed request.

use centavo_shared::types::MovementId;

use crate::ledger::error::LedgerError;
use crate::ledger::types::CashMovement;
use crate::request::types::{Actor, PurchaseRequest};
use crate::workflow::types::RequestStatus;

/// Stateless service materializing disbursed requests into movements.
pub struct LedgerService;

impl LedgerService {
    /// Creates the cash movement settling a disbursed request.
    ///
    /// The caller supplies the movement reference (from the document
    /// sequence) and the resolved concept/provider labels; the payment date
    /// is the disbursement timestamp's date.
    ///
    /// # Errors
    ///
    /// - `LedgerError::NotDisbursed` if the request has not been disbursed
    /// - `LedgerError::AlreadyMaterialized` if a movement is already linked
    pub fn materialize(
        request: &PurchaseRequest,
        reference: impl Into<String>,
        concept_label: impl Into<String>,
        provider_label: impl Into<String>,
    ) -> Result<CashMovement, LedgerError> {
        if request.status != RequestStatus::Disbursed {
            return Err(LedgerError::NotDisbursed {
                status: request.status,
            });
        }
        if request.movement_id.is_some() {
            return Err(LedgerError::AlreadyMaterialized {
                reference: request.reference.clone(),
            });
        }
        let Some(disbursement) = &request.disbursement else {
            // Disbursed status without a record means a corrupted row.
            return Err(LedgerError::NotDisbursed {
                status: request.status,
            });
        };

        Ok(CashMovement {
            id: MovementId::new(),
            reference: reference.into(),
            paid_on: disbursement.disbursed_at.date_naive(),
            request_id: request.id,
            cost_center_id: request.cost_center_id,
            concept: concept_label.into(),
            provider: provider_label.into(),
            amount: request.amount,
            payment_method: request.payment_method,
            recorded_by: Actor::new(
                disbursement.disbursed_by,
                disbursement.disbursed_by_name.clone(),
            ),
        })
    }
}
