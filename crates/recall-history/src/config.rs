#![forbid(unsafe_code)]

//! Data-only history configuration.
//!
//! [`HistoryConfig`] carries the settings that can live in a file. The
//! callbacks (clone, apply, equality) are code and are set on
//! [`HistoryBuilder`](crate::HistoryBuilder) instead.
//!
//! # Loading
//!
//! With the `config` feature enabled:
//!
//! ```toml
//! # history.toml
//! capacity = 200
//! initial_tag = "opened"
//! ```
//!
//! ```rust,ignore
//! let config = HistoryConfig::from_toml_file("history.toml")?;
//! let history = HistoryBuilder::cloneable().config(config).build(&doc)?;
//! ```
//!
//! `capacity` is unsigned, so a negative value is rejected at parse time.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "config")]
use crate::error::Result;

/// Settings for a [`VersionedHistory`](crate::VersionedHistory).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct HistoryConfig {
    /// Maximum number of retained snapshots; oldest evicted first.
    /// 0 = unbounded.
    pub capacity: usize,
    /// Tag given to the seed snapshot (and to the re-seed after `clear`).
    pub initial_tag: Option<String>,
}

impl HistoryConfig {
    /// Create a configuration retaining at most `capacity` snapshots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            initial_tag: None,
        }
    }

    /// Create an unbounded configuration.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Set the tag for the seed snapshot.
    #[must_use]
    pub fn with_initial_tag(mut self, tag: impl Into<String>) -> Self {
        self.initial_tag = Some(tag.into());
        self
    }

    /// Whether this configuration evicts at all.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.capacity > 0
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize to TOML.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
