#![forbid(unsafe_code)]

//! Single-threaded history buffer: the cursor, branch, and eviction rules.
//!
//! [`HistoryBuffer`] knows nothing about cloning or applying state. It
//! stores already-captured values and moves a cursor over them. The
//! thread-safe [`VersionedHistory`](crate::VersionedHistory) wraps it in a
//! mutex and runs the caller's callbacks around it.
//!
//! # Layout
//!
//! ```text
//! push(s3)
//! ┌──────────────────────────────────────────────┐
//! │ entries: [v1:s0, v2:s1, v3:s2, v4:s3]        │
//! │ cursor:                         ^ (3)        │
//! └──────────────────────────────────────────────┘
//!
//! move_to(1)   (two undos)
//! ┌──────────────────────────────────────────────┐
//! │ entries: [v1:s0, v2:s1, v3:s2, v4:s3]        │
//! │ cursor:          ^ (1)                       │
//! └──────────────────────────────────────────────┘
//!
//! push(s4)     new branch: v3 and v4 are discarded
//! ┌──────────────────────────────────────────────┐
//! │ entries: [v1:s0, v2:s1, v5:s4]               │
//! │ cursor:                 ^ (2)                │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `entries` is never empty.
//! 2. `cursor < entries.len()`.
//! 3. Versions are strictly increasing front to back.
//! 4. `entries.len() <= capacity` after every `push` when `capacity > 0`.
//! 5. A version is never assigned twice, including across `reset`.

use std::collections::VecDeque;
use std::fmt;

use crate::snapshot::Snapshot;
use crate::version::{Version, VersionCounter};

/// What a [`HistoryBuffer::push`] did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PushOutcome {
    /// Version assigned to the new entry.
    pub version: Version,
    /// Entries after the cursor that were discarded (redo branch).
    pub truncated: usize,
    /// Version of the entry evicted for capacity, if any.
    pub evicted: Option<Version>,
}

/// Ordered snapshots plus a cursor. See the module docs for the rules.
pub(crate) struct HistoryBuffer<T> {
    entries: VecDeque<Snapshot<T>>,
    cursor: usize,
    counter: VersionCounter,
    /// Maximum retained entries; 0 = unbounded.
    capacity: usize,
    evicted_total: u64,
    truncated_total: u64,
    suppressed_total: u64,
}

impl<T> fmt::Debug for HistoryBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryBuffer")
            .field("retained", &self.entries.len())
            .field("cursor", &self.cursor)
            .field("next_version", &self.counter.peek())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T> HistoryBuffer<T> {
    /// Create a buffer holding a single seed entry at version 1.
    pub(crate) fn seeded(state: T, tag: Option<String>, capacity: usize) -> Self {
        let mut counter = VersionCounter::new();
        let mut entries = VecDeque::new();
        entries.push_back(Snapshot::capture(counter.next(), state, tag));
        Self {
            entries,
            cursor: 0,
            counter,
            capacity,
            evicted_total: 0,
            truncated_total: 0,
            suppressed_total: 0,
        }
    }

    // ====================================================================
    // Mutation
    // ====================================================================

    /// Append a captured state as the new current entry.
    ///
    /// Discards everything after the cursor, assigns the next version,
    /// then evicts from the front while over capacity. The new entry is
    /// always last, so eviction never removes the current position.
    pub(crate) fn push(&mut self, state: T, tag: Option<String>) -> PushOutcome {
        let keep = self.cursor + 1;
        let truncated = self.entries.len() - keep;
        self.entries.truncate(keep);
        self.truncated_total += truncated as u64;

        let version = self.counter.next();
        self.entries.push_back(Snapshot::capture(version, state, tag));
        self.cursor = self.entries.len() - 1;

        let evicted = self.enforce_capacity();

        PushOutcome {
            version,
            truncated,
            evicted,
        }
    }

    /// Move the cursor to `index`. Out-of-range indices are ignored.
    pub(crate) fn move_to(&mut self, index: usize) {
        if index < self.entries.len() {
            self.cursor = index;
        }
    }

    /// Drop every entry and re-seed with `state`.
    ///
    /// The version counter continues, so the seed gets a fresh version.
    pub(crate) fn reset(&mut self, state: T, tag: Option<String>) -> Version {
        self.entries.clear();
        let version = self.counter.next();
        self.entries.push_back(Snapshot::capture(version, state, tag));
        self.cursor = 0;
        version
    }

    /// Count a save that was skipped because it matched the current entry.
    pub(crate) fn note_suppressed(&mut self) {
        self.suppressed_total += 1;
    }

    /// Evict the oldest entry while over capacity.
    ///
    /// Called only right after a push, so at most one entry goes.
    fn enforce_capacity(&mut self) -> Option<Version> {
        let mut evicted = None;
        while self.capacity > 0 && self.entries.len() > self.capacity {
            let Some(oldest) = self.entries.pop_front() else {
                break;
            };
            self.cursor = self.cursor.saturating_sub(1);
            self.evicted_total += 1;
            evicted = Some(oldest.version());
        }
        evicted
    }

    // ====================================================================
    // Query
    // ====================================================================

    /// The entry under the cursor.
    pub(crate) fn current(&self) -> &Snapshot<T> {
        // Invariants 1 and 2 make this index always valid.
        &self.entries[self.cursor]
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Snapshot<T>> {
        self.entries.get(index)
    }

    pub(crate) fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub(crate) fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Index of the entry carrying `version`, if it is still retained.
    ///
    /// Versions are sorted, so this is a binary search.
    pub(crate) fn index_of(&self, version: Version) -> Option<usize> {
        self.entries
            .binary_search_by(|snap| snap.version().cmp(&version))
            .ok()
    }

    /// Index of the newest retained entry tagged `tag`.
    pub(crate) fn index_of_tag(&self, tag: &str) -> Option<usize> {
        self.entries.iter().rposition(|snap| snap.tag() == Some(tag))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Snapshot<T>> {
        self.entries.iter()
    }

    pub(crate) fn next_version(&self) -> Version {
        self.counter.peek()
    }

    pub(crate) fn evicted_total(&self) -> u64 {
        self.evicted_total
    }

    pub(crate) fn truncated_total(&self) -> u64 {
        self.truncated_total
    }

    pub(crate) fn suppressed_total(&self) -> u64 {
        self.suppressed_total
    }
}

// ============================================================================
// Tests
// ============================================================================
