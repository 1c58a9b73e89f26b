#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HistoryError>;

/// Errors raised while configuring or building a history.
///
/// Expected outcomes of normal use (nothing to undo, a version that was
/// evicted) are reported as `false` by the operations themselves, not as
/// errors.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("no clone function configured; use `HistoryBuilder::cloneable` or `clone_with`")]
    MissingCloner,

    #[cfg(feature = "config")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config")]
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
