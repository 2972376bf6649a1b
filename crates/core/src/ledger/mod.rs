//! Cash movement records for Centavo.
//!
//! A disbursed purchase request is materialized into exactly one cash
//! movement, the ledger-side record of the money leaving the box.
//!
//! # Modules
//!
//! - `types` - Cash movement record
//! - `error` - Materialization error types
//! - `service` - Building a movement from a disbursed request

pub mod error;
pub mod service;
pub mod types;

pub use error::LedgerError;
pub use service::LedgerService;
pub use types::CashMovement;
