#![forbid(unsafe_code)]

//! Persistent collection types for snapshot-friendly state.
//!
//! Re-exports from the [`im`] crate. These collections use hash-array-mapped
//! tries (HAMT) and relaxed-radix-balanced trees (RRB), so cloning is
//! O(log n) and shares structure. A state built from them makes the
//! history's clone callback cheap even for large values.
//!
//! ```
//! use recall_history::VersionedHistory;
//! use recall_history::persistent::HashMap;
//!
//! let mut doc: HashMap<&str, u32> = HashMap::new();
//! doc.insert("a", 1);
//! let history = VersionedHistory::new(&doc);
//!
//! doc.insert("b", 2);
//! history.save(&doc);
//!
//! history.undo(&mut doc);
//! assert!(!doc.contains_key("b"));
//! ```

pub use im::{HashMap, HashSet, OrdMap, OrdSet, Vector};
