#![forbid(unsafe_code)]

//! Property tests for [`VersionedHistory`] invariants.
//!
//! Validates, under random save/undo/redo/restore/clear sequences:
//! - Retained versions are strictly increasing and never reused.
//! - The cursor always points at a retained snapshot.
//! - Capacity is never exceeded.
//! - A save always clears redo history.
//! - Undo/redo/restore agree with a simple reference model.

use std::collections::HashSet;

use proptest::prelude::*;

use recall_history::{HistoryBuilder, Version, VersionedHistory};

// ============================================================================
// Strategy helpers
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    Save(i32),
    Undo,
    Redo,
    /// Restore to the n-th most recently issued version (may be evicted).
    Restore(usize),
    Clear(i32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => (0i32..8).prop_map(Op::Save),
        2 => Just(Op::Undo),
        2 => Just(Op::Redo),
        1 => (0usize..16).prop_map(Op::Restore),
        1 => (0i32..8).prop_map(Op::Clear),
    ]
}

fn ops_strategy(max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 1..=max_len)
}

/// Straightforward Vec-based model of the buffer rules.
#[derive(Debug)]
struct Model {
    entries: Vec<(u64, i32)>,
    cursor: usize,
    next: u64,
    capacity: usize,
    dedup: bool,
}

impl Model {
    fn new(initial: i32, capacity: usize, dedup: bool) -> Self {
        Self {
            entries: vec![(1, initial)],
            cursor: 0,
            next: 2,
            capacity,
            dedup,
        }
    }

    fn save(&mut self, v: i32) -> u64 {
        if self.dedup && self.entries[self.cursor].1 == v {
            return self.entries[self.cursor].0;
        }
        self.entries.truncate(self.cursor + 1);
        let version = self.next;
        self.next += 1;
        self.entries.push((version, v));
        if self.capacity > 0 && self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
        version
    }

    fn undo(&mut self) -> Option<i32> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].1)
    }

    fn redo(&mut self) -> Option<i32> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].1)
    }

    fn restore(&mut self, version: u64) -> Option<i32> {
        let idx = self.entries.iter().position(|(v, _)| *v == version)?;
        self.cursor = idx;
        Some(self.entries[idx].1)
    }

    fn clear(&mut self, v: i32) -> u64 {
        let version = self.next;
        self.next += 1;
        self.entries = vec![(version, v)];
        self.cursor = 0;
        version
    }
}

fn build(capacity: usize, dedup: bool) -> VersionedHistory<i32> {
    let builder = HistoryBuilder::<i32>::cloneable().capacity(capacity);
    let builder = if dedup { builder.dedup() } else { builder };
    builder.build(&0).unwrap()
}

// ============================================================================
// Invariant 1: history matches the reference model step for step
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn matches_reference_model(
        capacity in 0usize..6,
        dedup in any::<bool>(),
        ops in ops_strategy(120)
    ) {
        let history = build(capacity, dedup);
        let mut model = Model::new(0, capacity, dedup);
        let mut issued: Vec<Version> = vec![Version::FIRST];
        let mut live = 0;

        for op in &ops {
            match op {
                Op::Save(v) => {
                    let got = history.save(v);
                    let want = model.save(*v);
                    prop_assert_eq!(got.get(), want);
                    issued.push(got);
                }
                Op::Undo => {
                    let want = model.undo();
                    prop_assert_eq!(history.undo(&mut live), want.is_some());
                    if let Some(v) = want {
                        prop_assert_eq!(live, v);
                    }
                }
                Op::Redo => {
                    let want = model.redo();
                    prop_assert_eq!(history.redo(&mut live), want.is_some());
                    if let Some(v) = want {
                        prop_assert_eq!(live, v);
                    }
                }
                Op::Restore(back) => {
                    let target = issued[issued.len() - 1 - back % issued.len()];
                    let before = live;
                    let want = model.restore(target.get());
                    prop_assert_eq!(history.restore(target, &mut live), want.is_some());
                    match want {
                        Some(v) => { prop_assert_eq!(live, v); }
                        None => { prop_assert_eq!(live, before); }
                    }
                }
                Op::Clear(v) => {
                    let got = history.clear(v);
                    prop_assert_eq!(got.get(), model.clear(*v));
                    issued.push(got);
                }
            }

            let versions: Vec<u64> = history.versions().iter().map(|v| v.get()).collect();
            let model_versions: Vec<u64> = model.entries.iter().map(|(v, _)| *v).collect();
            prop_assert_eq!(versions, model_versions, "after {:?}", op);
            prop_assert_eq!(history.cursor(), model.cursor);
            prop_assert_eq!(history.current(), model.entries[model.cursor].1);
        }
    }
}

// ============================================================================
// Invariant 2: versions are strictly increasing and never reused
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn versions_never_reused(capacity in 0usize..5, ops in ops_strategy(150)) {
        let history = build(capacity, false);
        let mut live = 0;
        let mut assigned: HashSet<Version> = HashSet::from([Version::FIRST]);
        let mut last = Version::FIRST;

        for op in &ops {
            let fresh = match op {
                Op::Save(v) => Some(history.save(v)),
                Op::Clear(v) => Some(history.clear(v)),
                Op::Undo => { history.undo(&mut live); None }
                Op::Redo => { history.redo(&mut live); None }
                Op::Restore(_) => { history.restore(Version::FIRST, &mut live); None }
            };
            if let Some(version) = fresh {
                prop_assert!(version > last, "{} not after {}", version, last);
                prop_assert!(assigned.insert(version), "{} reused", version);
                last = version;
            }

            let versions = history.versions();
            prop_assert!(versions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

// ============================================================================
// Invariant 3: capacity and cursor bounds always hold
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn capacity_and_cursor_bounds(capacity in 1usize..10, ops in ops_strategy(100)) {
        let history = build(capacity, false);
        let mut live = 0;

        for op in &ops {
            match op {
                Op::Save(v) => { history.save(v); }
                Op::Undo => { history.undo(&mut live); }
                Op::Redo => { history.redo(&mut live); }
                Op::Restore(n) => { history.restore(Version::new(*n as u64), &mut live); }
                Op::Clear(v) => { history.clear(v); }
            }
            let stats = history.stats();
            prop_assert!(stats.retained >= 1);
            prop_assert!(stats.retained <= capacity, "retained {} > {}", stats.retained, capacity);
            prop_assert!(stats.cursor < stats.retained);
            prop_assert_eq!(history.can_undo(), stats.cursor > 0);
            prop_assert_eq!(history.can_redo(), stats.cursor + 1 < stats.retained);
        }
    }
}

// ============================================================================
// Invariant 4: a non-suppressed save always clears redo
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn save_clears_redo(ops in ops_strategy(60)) {
        let history = build(0, false);
        let mut live = 0;

        for op in &ops {
            match op {
                Op::Save(v) => {
                    history.save(v);
                    prop_assert!(!history.can_redo());
                }
                Op::Undo => { history.undo(&mut live); }
                Op::Redo => { history.redo(&mut live); }
                _ => {}
            }
        }
    }
}

// ============================================================================
// Invariant 5: full undo then full redo restores the last save
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn full_undo_full_redo_round_trip(
        values in prop::collection::vec(any::<i32>(), 1..40)
    ) {
        let history = VersionedHistory::new(&i32::MIN);
        for v in &values {
            history.save(v);
        }

        let mut live = *values.last().unwrap();
        while history.undo(&mut live) {}
        prop_assert_eq!(live, i32::MIN);

        while history.redo(&mut live) {}
        prop_assert_eq!(live, *values.last().unwrap());
    }
}

// ============================================================================
// Invariant 6: consecutive duplicate saves never grow the history
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn dedup_suppresses_repeats(value in any::<i32>(), repeats in 1usize..20) {
        let history = build(0, true);
        let first = history.save(&value);
        let retained = history.retained();
        for _ in 0..repeats {
            prop_assert_eq!(history.save(&value), first);
        }
        prop_assert_eq!(history.retained(), retained);
    }
}
