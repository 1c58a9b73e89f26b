#![forbid(unsafe_code)]

//! Immutable, versioned captures of caller state.

use std::fmt;
use std::sync::Arc;

use web_time::SystemTime;

use crate::version::Version;

/// One captured state plus its metadata.
///
/// The state lives behind an [`Arc`], so cloning a snapshot (or handing it
/// out of a history) shares the capture instead of copying it. Only `&T`
/// is ever exposed, which keeps the capture immutable for its whole life.
pub struct Snapshot<T> {
    version: Version,
    state: Arc<T>,
    tag: Option<Arc<str>>,
    timestamp: SystemTime,
}

impl<T> Snapshot<T> {
    /// Capture `state` under `version`, stamped with the current wall clock.
    pub(crate) fn capture(version: Version, state: T, tag: Option<String>) -> Self {
        Self {
            version,
            state: Arc::new(state),
            tag: tag.map(Arc::from),
            timestamp: SystemTime::now(),
        }
    }

    /// Version assigned when this snapshot was captured.
    #[must_use]
    pub fn version(&self) -> Version {
        self.version
    }

    /// The captured state.
    #[must_use]
    pub fn state(&self) -> &T {
        &self.state
    }

    /// The shared handle to the captured state.
    #[must_use]
    pub fn state_arc(&self) -> &Arc<T> {
        &self.state
    }

    /// Caller-supplied label, if any. Tags are not unique.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Wall-clock capture time.
    ///
    /// Non-decreasing per history in practice, but subject to system clock
    /// adjustments.
    #[must_use]
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            version: self.version,
            state: Arc::clone(&self.state),
            tag: self.tag.clone(),
            timestamp: self.timestamp,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("version", &self.version)
            .field("tag", &self.tag)
            .field("timestamp", &self.timestamp)
            .field("state", &self.state)
            .finish()
    }
}
