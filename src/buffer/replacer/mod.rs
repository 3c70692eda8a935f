//! Eviction policy implementations (replacers).
//!
//! The pool ships with [`ClockReplacer`], a second-chance approximation of
//! LRU: O(1) amortized per selection, no ordering structure to maintain.

mod clock;

pub(crate) use clock::{ClockReplacer, Victim};
