#![forbid(unsafe_code)]

//! Fluent construction of [`VersionedHistory`].
//!
//! The builder collects the three state callbacks and the data-only
//! [`HistoryConfig`]:
//!
//! | Callback | Default | Purpose |
//! |---|---|---|
//! | clone | none (required) | isolated copy of a state for storage |
//! | apply | `*live = clone(stored)` | write a stored state back into a live value |
//! | equality | none | skip saves equal to the current snapshot |
//!
//! ```
//! use recall_history::HistoryBuilder;
//!
//! let history = HistoryBuilder::<Vec<u32>>::cloneable()
//!     .capacity(50)
//!     .dedup()
//!     .build(&vec![])
//!     .unwrap();
//!
//! let v = history.save(&vec![1]);
//! assert_eq!(history.save(&vec![1]), v); // suppressed
//! ```

use std::fmt;

use crate::config::HistoryConfig;
use crate::error::{HistoryError, Result};
use crate::history::VersionedHistory;

pub(crate) type Cloner<T> = Box<dyn Fn(&T) -> T + Send + Sync>;
pub(crate) type Applier<T> = Box<dyn Fn(&mut T, &T) + Send + Sync>;
pub(crate) type Equality<T> = Box<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// The resolved callbacks a history runs around its buffer.
pub(crate) struct StateHooks<T> {
    cloner: Cloner<T>,
    applier: Option<Applier<T>>,
    equality: Option<Equality<T>>,
}

impl<T> StateHooks<T> {
    /// Hooks with only a cloner: replacement apply, no dedup.
    pub(crate) fn from_cloner(cloner: Cloner<T>) -> Self {
        Self {
            cloner,
            applier: None,
            equality: None,
        }
    }

    pub(crate) fn clone_state(&self, state: &T) -> T {
        (self.cloner)(state)
    }

    /// Write `stored` into `live`, by the custom applier or by replacement.
    pub(crate) fn apply(&self, live: &mut T, stored: &T) {
        match &self.applier {
            Some(apply) => apply(live, stored),
            None => *live = (self.cloner)(stored),
        }
    }

    /// Whether `candidate` should be suppressed as a repeat of `current`.
    pub(crate) fn is_duplicate(&self, candidate: &T, current: &T) -> bool {
        self.equality
            .as_ref()
            .is_some_and(|eq| eq(candidate, current))
    }

    pub(crate) fn has_applier(&self) -> bool {
        self.applier.is_some()
    }

    pub(crate) fn has_equality(&self) -> bool {
        self.equality.is_some()
    }
}

/// Builder for [`VersionedHistory`].
///
/// Start from [`cloneable`](Self::cloneable) when `T: Clone`, or from
/// [`new`](Self::new) plus [`clone_with`](Self::clone_with) otherwise.
pub struct HistoryBuilder<T> {
    cloner: Option<Cloner<T>>,
    applier: Option<Applier<T>>,
    equality: Option<Equality<T>>,
    config: HistoryConfig,
}

impl<T> fmt::Debug for HistoryBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryBuilder")
            .field("cloner", &self.cloner.is_some())
            .field("applier", &self.applier.is_some())
            .field("equality", &self.equality.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl<T> Default for HistoryBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HistoryBuilder<T> {
    /// Start with no callbacks and an unbounded configuration.
    ///
    /// A clone function must be supplied before [`build`](Self::build).
    #[must_use]
    pub fn new() -> Self {
        Self {
            cloner: None,
            applier: None,
            equality: None,
            config: HistoryConfig::default(),
        }
    }

    /// Set the function that produces an isolated copy of a state.
    ///
    /// It must be a deep copy: a copy that shares mutable parts with the
    /// live value lets later edits leak into stored snapshots.
    #[must_use]
    pub fn clone_with<F>(mut self, cloner: F) -> Self
    where
        F: Fn(&T) -> T + Send + Sync + 'static,
    {
        self.cloner = Some(Box::new(cloner));
        self
    }

    /// Set how a stored state is written back into a live value.
    ///
    /// Without it, the live value is replaced by a fresh clone.
    #[must_use]
    pub fn apply_with<F>(mut self, applier: F) -> Self
    where
        F: Fn(&mut T, &T) + Send + Sync + 'static,
    {
        self.applier = Some(Box::new(applier));
        self
    }

    /// Suppress saves for which `equality(new, current)` holds.
    #[must_use]
    pub fn dedup_with<F>(mut self, equality: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.equality = Some(Box::new(equality));
        self
    }

    /// Retain at most `capacity` snapshots (0 = unbounded).
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Tag the seed snapshot.
    #[must_use]
    pub fn initial_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.initial_tag = Some(tag.into());
        self
    }

    /// Replace the data-only settings wholesale.
    #[must_use]
    pub fn config(mut self, config: HistoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the history, capturing `initial` as the seed snapshot.
    ///
    /// # Errors
    ///
    /// [`HistoryError::MissingCloner`] when no clone function was set.
    pub fn build(self, initial: &T) -> Result<VersionedHistory<T>> {
        let cloner = self.cloner.ok_or(HistoryError::MissingCloner)?;
        let hooks = StateHooks {
            cloner,
            applier: self.applier,
            equality: self.equality,
        };
        Ok(VersionedHistory::from_parts(hooks, self.config, initial))
    }
}

impl<T: Clone + 'static> HistoryBuilder<T> {
    /// Start with `Clone::clone` as the clone function.
    #[must_use]
    pub fn cloneable() -> Self {
        Self::new().clone_with(|state: &T| state.clone())
    }
}

impl<T: PartialEq + 'static> HistoryBuilder<T> {
    /// Suppress saves equal (by `PartialEq`) to the current snapshot.
    #[must_use]
    pub fn dedup(self) -> Self {
        self.dedup_with(|new: &T, current: &T| new == current)
    }
}
