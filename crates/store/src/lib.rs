//! Record store and orchestration glue for Centavo.
//!
//! The core crate is pure logic; this crate supplies what the surrounding
//! platform would normally provide: an in-memory record store with
//! storage-boundary uniqueness, a document sequence, the request timeline
//! (the sole audit trail), and the repositories that run each action as
//! fetch, core-service validation, apply, notify.
//!
//! # Modules
//!
//! - `ports` - Traits and descriptors at the platform boundary
//! - `memory` - In-memory implementations of the ports
//! - `error` - Store error envelope
//! - `repositories` - Cost center and purchase request repositories

pub mod error;
pub mod memory;
pub mod ports;
pub mod repositories;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryTimeline, PrefixSequence};
pub use ports::{Feedback, MessageKind, NavTarget, SequenceGenerator, TimelineEntry, TimelineSink};
pub use repositories::{CostCenterRepository, CreateRequestInput, RequestRepository};
