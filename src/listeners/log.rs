//! Result log.
//!
//! An ordered record of every dispatched result, rendered to text at the
//! moment it was dispatched. Backed by `im::Vector`, so snapshots are cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::results::{EffectResult, ResultType, TextContext};

/// One dispatched result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position in dispatch order, counted from 0. Never reused.
    pub sequence: u64,
    pub result_type: ResultType,
    pub acting_player: PlayerId,
    pub text: String,
}

/// Bounded log of dispatched results, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ResultLog {
    entries: Vector<LogEntry>,
    capacity: Option<usize>,
    next_sequence: u64,
}

impl ResultLog {
    /// Create a log keeping at most `capacity` entries (`None` = unbounded).
    #[must_use]
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: Vector::new(),
            capacity,
            next_sequence: 0,
        }
    }

    /// Record a result. Returns its sequence number.
    pub fn record(&mut self, result: &EffectResult, ctx: &TextContext<'_>) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.push_back(LogEntry {
            sequence,
            result_type: result.result_type(),
            acting_player: result.acting_player(),
            text: result.text(ctx),
        });
        if let Some(capacity) = self.capacity {
            while self.entries.len() > capacity {
                self.entries.pop_front();
            }
        }
        sequence
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Total results ever recorded, including dropped ones.
    #[must_use]
    pub fn total_recorded(&self) -> u64 {
        self.next_sequence
    }
}
