//! Traits and descriptors at the platform boundary.
//!
//! The core is invoked in-process by a larger business platform; these are
//! the seams it consumes. Sequences assign document references, the
//! timeline sink collects the audit entries, and `Feedback` is what a
//! state-changing action hands back to the presentation layer.

use chrono::{DateTime, Utc};

use centavo_shared::types::{MovementId, RequestId};

use centavo_core::workflow::types::RequestStatus;

/// Unique-sequence generator keyed by document code.
///
/// Invoked once per document at creation; the returned reference is never
/// reassigned.
pub trait SequenceGenerator {
    /// Returns the next reference for the given document code.
    fn next(&mut self, code: &str) -> String;
}

/// Kind of a timeline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// A system-generated notice accompanying a state change.
    Notification,
    /// A free-form user comment.
    Comment,
}

/// One entry on a request's timeline.
#[derive(Debug, Clone)]
pub struct TimelineEntry {
    /// The request the entry belongs to.
    pub request_id: RequestId,
    /// Human-readable body.
    pub body: String,
    /// Kind of entry.
    pub kind: MessageKind,
    /// When the entry was appended.
    pub posted_at: DateTime<Utc>,
}

/// Sink accepting timeline entries. This is the sole audit trail; the core
/// performs no separate logging of decisions.
pub trait TimelineSink {
    /// Appends an entry to a request's timeline.
    fn post(&mut self, request_id: RequestId, body: String, kind: MessageKind);
}

/// Where a navigation directive points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    /// Open a cash movement record.
    Movement(MovementId),
    /// Open the request list filtered to a status.
    RequestList {
        /// The status to filter by.
        status: RequestStatus,
    },
}

/// What a state-changing action hands the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Nothing to show.
    None,
    /// A transient success notification.
    Toast {
        /// Short title.
        title: String,
        /// One-line message.
        message: String,
    },
    /// Navigate somewhere.
    Open(NavTarget),
}
