#![forbid(unsafe_code)]

//! Version identifiers for history snapshots.
//!
//! Every snapshot captured by a history receives a [`Version`] from a
//! per-instance counter. The counter only moves forward: versions discarded
//! by branching, evicted by capacity, or dropped by `clear` are never handed
//! out again.

use std::fmt;

/// Identifier of one snapshot within a single history instance.
///
/// Versions are strictly increasing in capture order and unique for the
/// lifetime of the history that assigned them. Comparing versions from two
/// different histories is meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u64);

impl Version {
    /// The first version a fresh history assigns (to its seed snapshot).
    pub const FIRST: Self = Self(1);

    /// Create a version from a raw value.
    ///
    /// Useful for looking up versions that were persisted elsewhere (logs,
    /// UI state). A raw value that the history never assigned simply fails
    /// to resolve.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw version number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

/// Monotonic version allocator.
///
/// Owned by a history buffer; never rewinds.
#[derive(Debug, Clone)]
pub(crate) struct VersionCounter {
    next: u64,
}

impl VersionCounter {
    pub(crate) const fn new() -> Self {
        Self {
            next: Version::FIRST.0,
        }
    }

    /// Hand out the next version and advance.
    pub(crate) fn next(&mut self) -> Version {
        let version = Version(self.next);
        self.next += 1;
        version
    }

    /// The version the next call to [`next`](Self::next) will return.
    pub(crate) const fn peek(&self) -> Version {
        Version(self.next)
    }
}
