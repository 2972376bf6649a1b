//! In-memory implementations of the platform ports.

use std::collections::HashMap;

use chrono::Utc;

use centavo_shared::config::SequenceConfig;
use centavo_shared::types::RequestId;

use crate::ports::{MessageKind, SequenceGenerator, TimelineEntry, TimelineSink};

/// Sequence generator producing `{code}-{counter}` references with a
/// zero-padded counter, one counter per document code.
#[derive(Debug, Clone)]
pub struct PrefixSequence {
    padding: usize,
    counters: HashMap<String, u64>,
}

impl PrefixSequence {
    /// Creates a sequence with the given counter padding.
    #[must_use]
    pub fn new(padding: usize) -> Self {
        Self {
            padding,
            counters: HashMap::new(),
        }
    }

    /// Creates a sequence from the application sequence configuration.
    #[must_use]
    pub fn from_config(config: &SequenceConfig) -> Self {
        Self::new(config.padding)
    }
}

impl SequenceGenerator for PrefixSequence {
    fn next(&mut self, code: &str) -> String {
        let counter = self.counters.entry(code.to_string()).or_insert(0);
        *counter += 1;
        format!("{code}-{counter:0width$}", width = self.padding)
    }
}

/// Timeline sink keeping entries in memory, newest last.
#[derive(Debug, Default)]
pub struct InMemoryTimeline {
    entries: Vec<TimelineEntry>,
}

impl InMemoryTimeline {
    /// Creates an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries, in posting order.
    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Entries for one request, in posting order.
    #[must_use]
    pub fn for_request(&self, request_id: RequestId) -> Vec<&TimelineEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.request_id == request_id)
            .collect()
    }
}

impl TimelineSink for InMemoryTimeline {
    fn post(&mut self, request_id: RequestId, body: String, kind: MessageKind) {
        self.entries.push(TimelineEntry {
            request_id,
            body,
            kind,
            posted_at: Utc::now(),
        });
    }
}
