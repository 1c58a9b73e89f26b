#![forbid(unsafe_code)]

//! Recall History
//!
//! Bounded, versioned undo/redo over immutable snapshots of caller state:
//! the runtime core of the Memento pattern.
//!
//! # Key Components
//!
//! - [`VersionedHistory`] - Thread-safe history with undo, redo, and
//!   random-access restore
//! - [`HistoryBuilder`] - Fluent setup of clone, apply, and equality
//!   callbacks plus capacity
//! - [`Snapshot`] - Immutable capture with [`Version`], tag, and timestamp
//! - [`Caretaker`] - Live value bundled with its history
//! - [`HistoryConfig`] - File-loadable settings (feature `config`)
//!
//! # Semantics
//!
//! ```text
//! save a, ab, abc        [v1:a, v2:ab, v3:abc]      cursor v3
//! undo                   [v1:a, v2:ab, v3:abc]      cursor v2
//! save abX               [v1:a, v2:ab, v4:abX]      cursor v4  (v3 gone)
//! restore v1             [v1:a, v2:ab, v4:abX]      cursor v1
//! save aY                [v1:a, v5:aY]              cursor v5
//! ```
//!
//! Versions come from a per-instance counter that never rewinds, so a
//! version is never reused, not even after [`VersionedHistory::clear`].
//! With a capacity, the oldest snapshot is evicted once the limit is
//! exceeded, and restoring an evicted version returns `false`.
//!
//! # Features
//!
//! - `config`: serde derives on [`HistoryConfig`] plus TOML/JSON loading.
//! - `hamt`: [`persistent`] re-exports `im` collections.
//!
//! # Logging
//!
//! Operations emit `tracing` events under the `recall.history` target.
//! No subscriber is installed by this crate.

mod buffer;
pub mod builder;
pub mod caretaker;
pub mod config;
pub mod error;
pub mod history;
#[cfg(feature = "hamt")]
pub mod persistent;
pub mod snapshot;
pub mod version;

pub use builder::HistoryBuilder;
pub use caretaker::Caretaker;
pub use config::HistoryConfig;
pub use error::{HistoryError, Result};
pub use history::{HistoryStats, VersionedHistory};
pub use snapshot::Snapshot;
pub use version::Version;
