#![forbid(unsafe_code)]

//! Thread-safe, bounded, versioned undo/redo history.
//!
//! [`VersionedHistory`] stores immutable snapshots of a caller's state and
//! moves a cursor over them. The caller keeps ownership of the live value
//! and passes it in by `&mut` whenever the history should write a stored
//! state back.
//!
//! # Concurrency
//!
//! One [`Mutex`] guards the whole buffer (snapshots, cursor, version
//! counter), so every operation is linearized. Lock acquisition has no
//! timeout. Callbacks other than the capture clone in `save` and `current`
//! run while the lock is held: a slow apply or equality stalls every other
//! caller of the same instance.
//!
//! # Failure
//!
//! A panicking callback propagates to the caller. No buffer mutation
//! precedes a callback, so the buffer stays consistent and a poisoned lock
//! is recovered on the next acquisition.
//!
//! # Example
//!
//! ```
//! use recall_history::VersionedHistory;
//!
//! let mut doc = String::from("a");
//! let history = VersionedHistory::new(&doc);
//!
//! doc.push('b');
//! history.save(&doc);
//! doc.push('c');
//! history.save(&doc);
//!
//! assert!(history.undo(&mut doc));
//! assert_eq!(doc, "ab");
//! assert!(history.redo(&mut doc));
//! assert_eq!(doc, "abc");
//! ```

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use crate::buffer::HistoryBuffer;
use crate::builder::{HistoryBuilder, StateHooks};
use crate::config::HistoryConfig;
use crate::snapshot::Snapshot;
use crate::version::Version;

const TARGET: &str = "recall.history";

/// Point-in-time counters for a [`VersionedHistory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryStats {
    /// Snapshots currently retained.
    pub retained: usize,
    /// Index of the current snapshot among the retained ones.
    pub cursor: usize,
    /// Configured capacity; `None` when unbounded.
    pub capacity: Option<usize>,
    /// Version of the current snapshot.
    pub current_version: Version,
    /// Version the next successful save will receive.
    pub next_version: Version,
    /// Snapshots dropped for capacity since creation.
    pub evicted_total: u64,
    /// Redo snapshots discarded by branching saves since creation.
    pub truncated_total: u64,
    /// Saves skipped as duplicates since creation.
    pub suppressed_total: u64,
}

/// Bounded undo/redo history over snapshots of `T`.
///
/// # Invariants
///
/// 1. At least one snapshot is retained at all times.
/// 2. The cursor always points at a retained snapshot.
/// 3. Retained versions are strictly increasing and never reused, even
///    across [`clear`](Self::clear).
/// 4. With a capacity `n > 0`, at most `n` snapshots are retained after any
///    operation.
/// 5. A save after one or more undos discards the redo branch.
pub struct VersionedHistory<T> {
    buffer: Mutex<HistoryBuffer<T>>,
    hooks: StateHooks<T>,
    initial_tag: Option<String>,
}

impl<T> fmt::Debug for VersionedHistory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("VersionedHistory")
            .field("retained", &stats.retained)
            .field("cursor", &stats.cursor)
            .field("current_version", &stats.current_version)
            .field("capacity", &stats.capacity)
            .field("custom_apply", &self.hooks.has_applier())
            .field("dedup", &self.hooks.has_equality())
            .finish()
    }
}

impl<T: Clone + 'static> VersionedHistory<T> {
    /// Create an unbounded history without duplicate suppression, seeded
    /// with a clone of `initial`.
    #[must_use]
    pub fn new(initial: &T) -> Self {
        Self::from_parts(
            StateHooks::from_cloner(Box::new(|state: &T| state.clone())),
            HistoryConfig::default(),
            initial,
        )
    }
}

impl<T> VersionedHistory<T> {
    /// Start a [`HistoryBuilder`].
    #[must_use]
    pub fn builder() -> HistoryBuilder<T> {
        HistoryBuilder::new()
    }

    pub(crate) fn from_parts(hooks: StateHooks<T>, config: HistoryConfig, initial: &T) -> Self {
        let seed = hooks.clone_state(initial);
        let HistoryConfig {
            capacity,
            initial_tag,
        } = config;
        tracing::debug!(
            target: TARGET,
            capacity,
            tag = ?initial_tag,
            "history created"
        );
        Self {
            buffer: Mutex::new(HistoryBuffer::seeded(seed, initial_tag.clone(), capacity)),
            hooks,
            initial_tag,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HistoryBuffer<T>> {
        match self.buffer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    // ====================================================================
    // Core Operations
    // ====================================================================

    /// Capture `state` as the new current snapshot and return its version.
    ///
    /// When duplicate suppression is configured and the capture equals the
    /// current snapshot, nothing changes and the current version is
    /// returned.
    pub fn save(&self, state: &T) -> Version {
        self.save_inner(state, None)
    }

    /// [`save`](Self::save) with a label attached to the snapshot.
    pub fn save_tagged(&self, state: &T, tag: impl Into<String>) -> Version {
        self.save_inner(state, Some(tag.into()))
    }

    fn save_inner(&self, state: &T, tag: Option<String>) -> Version {
        let _span = tracing::debug_span!("history.save", tagged = tag.is_some()).entered();

        // Capture before locking; nothing is mutated if the clone panics.
        let captured = self.hooks.clone_state(state);

        let mut buffer = self.lock();
        if self.hooks.is_duplicate(&captured, buffer.current().state()) {
            let version = buffer.current().version();
            buffer.note_suppressed();
            tracing::trace!(target: TARGET, %version, "duplicate save suppressed");
            return version;
        }

        let outcome = buffer.push(captured, tag);
        tracing::debug!(
            target: TARGET,
            version = %outcome.version,
            truncated = outcome.truncated,
            evicted = ?outcome.evicted,
            retained = buffer.len(),
            "snapshot saved"
        );
        outcome.version
    }

    /// Step back one snapshot and write it into `live`.
    ///
    /// Returns `false`, leaving `live` untouched, when already at the
    /// oldest retained snapshot.
    pub fn undo(&self, live: &mut T) -> bool {
        let mut buffer = self.lock();
        if !buffer.can_undo() {
            return false;
        }
        let target = buffer.cursor() - 1;
        self.apply_at(&mut buffer, target, live, "undo")
    }

    /// Step forward one snapshot and write it into `live`.
    ///
    /// Returns `false`, leaving `live` untouched, when there is no redo
    /// history.
    pub fn redo(&self, live: &mut T) -> bool {
        let mut buffer = self.lock();
        if !buffer.can_redo() {
            return false;
        }
        let target = buffer.cursor() + 1;
        self.apply_at(&mut buffer, target, live, "redo")
    }

    /// Jump to `version` and write it into `live`.
    ///
    /// Returns `false`, leaving `live` untouched, when the version was
    /// evicted, discarded, or never assigned.
    pub fn restore(&self, version: Version, live: &mut T) -> bool {
        let mut buffer = self.lock();
        match buffer.index_of(version) {
            Some(index) => self.apply_at(&mut buffer, index, live, "restore"),
            None => {
                tracing::debug!(target: TARGET, %version, "restore target not retained");
                false
            }
        }
    }

    /// Jump to the newest retained snapshot tagged `tag`.
    pub fn restore_tag(&self, tag: &str, live: &mut T) -> bool {
        let mut buffer = self.lock();
        match buffer.index_of_tag(tag) {
            Some(index) => self.apply_at(&mut buffer, index, live, "restore"),
            None => {
                tracing::debug!(target: TARGET, tag, "no retained snapshot with tag");
                false
            }
        }
    }

    /// Apply the entry at `index`, then commit the cursor.
    fn apply_at(
        &self,
        buffer: &mut HistoryBuffer<T>,
        index: usize,
        live: &mut T,
        op: &'static str,
    ) -> bool {
        let from = buffer.current().version();
        let Some(snapshot) = buffer.get(index) else {
            return false;
        };
        let to = snapshot.version();
        self.hooks.apply(live, snapshot.state());
        buffer.move_to(index);
        tracing::trace!(target: TARGET, op, %from, %to, "cursor moved");
        true
    }

    /// Drop every snapshot and re-seed with a capture of `initial`.
    ///
    /// The version counter is not reset: the new seed gets the next
    /// version, so versions stay unique for the life of the instance.
    pub fn clear(&self, initial: &T) -> Version {
        let seed = self.hooks.clone_state(initial);
        let mut buffer = self.lock();
        let dropped = buffer.len();
        let version = buffer.reset(seed, self.initial_tag.clone());
        tracing::debug!(target: TARGET, %version, dropped, "history cleared");
        version
    }

    // ====================================================================
    // Query
    // ====================================================================

    /// A fresh, caller-owned copy of the current state.
    ///
    /// The clone runs outside the lock.
    #[must_use]
    pub fn current(&self) -> T {
        let snapshot = self.current_snapshot();
        self.hooks.clone_state(snapshot.state())
    }

    /// The current snapshot, sharing its stored state.
    #[must_use]
    pub fn current_snapshot(&self) -> Snapshot<T> {
        self.lock().current().clone()
    }

    /// Version of the current snapshot.
    #[must_use]
    pub fn current_version(&self) -> Version {
        self.lock().current().version()
    }

    /// Check if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.lock().can_undo()
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.lock().can_redo()
    }

    /// Index of the current snapshot among the retained ones.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.lock().cursor()
    }

    /// Number of retained snapshots. Never zero.
    #[must_use]
    pub fn retained(&self) -> usize {
        self.lock().len()
    }

    /// Configured capacity, or `None` when unbounded.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        let capacity = self.lock().capacity();
        (capacity > 0).then_some(capacity)
    }

    /// Retained versions, oldest first.
    #[must_use]
    pub fn versions(&self) -> Vec<Version> {
        self.lock().iter().map(Snapshot::version).collect()
    }

    /// Retained snapshots, oldest first. States are shared, not copied.
    #[must_use]
    pub fn snapshots(&self) -> Vec<Snapshot<T>> {
        self.lock().iter().cloned().collect()
    }

    /// The retained snapshot with `version`, if any.
    #[must_use]
    pub fn snapshot(&self, version: Version) -> Option<Snapshot<T>> {
        let buffer = self.lock();
        let index = buffer.index_of(version)?;
        buffer.get(index).cloned()
    }

    /// Version of the newest retained snapshot tagged `tag`.
    #[must_use]
    pub fn find_tag(&self, tag: &str) -> Option<Version> {
        let buffer = self.lock();
        let index = buffer.index_of_tag(tag)?;
        buffer.get(index).map(Snapshot::version)
    }

    /// Counters and cursor position, read atomically.
    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        let buffer = self.lock();
        let capacity = buffer.capacity();
        HistoryStats {
            retained: buffer.len(),
            cursor: buffer.cursor(),
            capacity: (capacity > 0).then_some(capacity),
            current_version: buffer.current().version(),
            next_version: buffer.next_version(),
            evicted_total: buffer.evicted_total(),
            truncated_total: buffer.truncated_total(),
            suppressed_total: buffer.suppressed_total(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
