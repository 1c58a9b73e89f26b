#![forbid(unsafe_code)]

//! A live value bundled with its history.
//!
//! [`VersionedHistory`] leaves the live state with the caller. When one
//! owner holds both, [`Caretaker`] saves passing the state around on every
//! call: edit through [`state_mut`](Caretaker::state_mut), then
//! [`checkpoint`](Caretaker::checkpoint).
//!
//! ```
//! use recall_history::Caretaker;
//!
//! let mut doc = Caretaker::new(String::new());
//! doc.state_mut().push_str("hello");
//! doc.checkpoint();
//! doc.state_mut().push_str(" world");
//! doc.checkpoint();
//!
//! doc.undo();
//! assert_eq!(doc.state(), "hello");
//! ```

use crate::builder::HistoryBuilder;
use crate::error::Result;
use crate::history::VersionedHistory;
use crate::version::Version;

/// Owner of a live `T` and the [`VersionedHistory`] of its checkpoints.
#[derive(Debug)]
pub struct Caretaker<T> {
    live: T,
    history: VersionedHistory<T>,
}

impl<T: Clone + 'static> Caretaker<T> {
    /// Take ownership of `initial` and seed an unbounded history with it.
    #[must_use]
    pub fn new(initial: T) -> Self {
        let history = VersionedHistory::new(&initial);
        Self {
            live: initial,
            history,
        }
    }
}

impl<T> Caretaker<T> {
    /// Build the history from `builder`, seeded with `initial`.
    ///
    /// # Errors
    ///
    /// Whatever [`HistoryBuilder::build`] reports.
    pub fn from_builder(builder: HistoryBuilder<T>, initial: T) -> Result<Self> {
        let history = builder.build(&initial)?;
        Ok(Self {
            live: initial,
            history,
        })
    }

    /// Pair an existing live value with an existing history.
    ///
    /// `live` is not checkpointed; call [`checkpoint`](Self::checkpoint) if
    /// it differs from the history's current snapshot.
    #[must_use]
    pub fn with_history(live: T, history: VersionedHistory<T>) -> Self {
        Self { live, history }
    }

    /// The live value.
    #[must_use]
    pub fn state(&self) -> &T {
        &self.live
    }

    /// Mutable access to the live value. Edits are not recorded until the
    /// next checkpoint.
    pub fn state_mut(&mut self) -> &mut T {
        &mut self.live
    }

    /// Save the live value.
    pub fn checkpoint(&mut self) -> Version {
        self.history.save(&self.live)
    }

    /// Save the live value under `tag`.
    pub fn checkpoint_tagged(&mut self, tag: impl Into<String>) -> Version {
        self.history.save_tagged(&self.live, tag)
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.live)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.live)
    }

    pub fn restore(&mut self, version: Version) -> bool {
        self.history.restore(version, &mut self.live)
    }

    pub fn restore_tag(&mut self, tag: &str) -> bool {
        self.history.restore_tag(tag, &mut self.live)
    }

    /// The underlying history, for queries.
    #[must_use]
    pub fn history(&self) -> &VersionedHistory<T> {
        &self.history
    }

    /// Split back into the live value and its history.
    #[must_use]
    pub fn into_inner(self) -> (T, VersionedHistory<T>) {
        (self.live, self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HistoryError;

    #[derive(Debug, Clone, PartialEq)]
    struct Form {
        name: String,
        age: u32,
    }

    fn form() -> Form {
        Form {
            name: "Ada".into(),
            age: 36,
        }
    }

    #[test]
    fn checkpoint_undo_redo() {
        let mut ct = Caretaker::new(form());
        ct.state_mut().age = 37;
        ct.checkpoint();
        ct.state_mut().name = "Grace".into();
        ct.checkpoint();

        assert!(ct.undo());
        assert_eq!(ct.state().name, "Ada");
        assert_eq!(ct.state().age, 37);
        assert!(ct.undo());
        assert_eq!(ct.state(), &form());
        assert!(!ct.undo());

        assert!(ct.redo());
        assert!(ct.redo());
        assert_eq!(ct.state().name, "Grace");
    }

    #[test]
    fn uncommitted_edits_are_overwritten_by_undo() {
        let mut ct = Caretaker::new(1);
        *ct.state_mut() = 2;
        ct.checkpoint();
        *ct.state_mut() = 99;
        assert!(ct.undo());
        assert_eq!(*ct.state(), 1);
    }

    #[test]
    fn tagged_checkpoints() {
        let mut ct = Caretaker::new(0);
        *ct.state_mut() = 5;
        let v = ct.checkpoint_tagged("five");
        *ct.state_mut() = 6;
        ct.checkpoint();

        assert!(ct.restore_tag("five"));
        assert_eq!(*ct.state(), 5);
        assert_eq!(ct.history().current_version(), v);
        assert!(ct.restore(Version::FIRST));
        assert_eq!(*ct.state(), 0);
    }

    #[test]
    fn from_builder_with_dedup() {
        let mut ct = Caretaker::from_builder(HistoryBuilder::cloneable().dedup(), form()).unwrap();
        let v = ct.checkpoint();
        assert_eq!(v, Version::FIRST);
        assert_eq!(ct.history().retained(), 1);
    }

    #[test]
    fn from_builder_propagates_errors() {
        let err = Caretaker::from_builder(HistoryBuilder::new(), form()).unwrap_err();
        assert!(matches!(err, HistoryError::MissingCloner));
    }

    #[test]
    fn into_inner_and_with_history() {
        let mut ct = Caretaker::new(vec![1]);
        ct.state_mut().push(2);
        ct.checkpoint();

        let (live, history) = ct.into_inner();
        assert_eq!(live, vec![1, 2]);
        let mut ct = Caretaker::with_history(live, history);
        assert!(ct.undo());
        assert_eq!(ct.state(), &vec![1]);
    }
}
