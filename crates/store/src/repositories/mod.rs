//! Repository abstractions for record access.
//!
//! Repositories run each state-changing action as one unit: fetch the
//! record, let the core services validate and produce the action, apply it,
//! append the timeline notice. A guard failure aborts before anything is
//! written.

pub mod cost_center;
pub mod request;

#[cfg(test)]
mod request_flow_tests;

pub use cost_center::CostCenterRepository;
pub use request::{CreateRequestInput, RequestRepository};
