pub mod array;
pub mod forest;
pub mod microset;
pub mod quick_find;
pub mod timing;
pub mod union_find;
pub mod workload;

use crate::array::{ArraySet, Halving, Naive, Recursive, TwoPass, TwoPassChecked};
use crate::microset::MicroSet;
use crate::quick_find::QuickFind;
use crate::union_find::UnionFind;

/// Smallest set size exercised by the driver.
pub const MIN_N: i64 = 2;

/// Largest set size; every structure preallocates for this capacity.
pub const MAX_N: i64 = 1 << 22;

/// Upper bound on the length of a generated operation stream.
pub const MAX_OPERATIONS: i64 = 9 * MAX_N + 1;

/// A set initialised to {0, ..., n + 1} that supports deleting interior
/// elements and querying the smallest remaining element >= i. The
/// boundary elements 0 and n + 1 are never deleted.
pub trait SuccessorDelete {
    /// Allocate capacity for universes up to {0, ..., max_n + 1}.
    fn new(max_n: i64) -> Self
    where
        Self: Sized;

    /// Display name used in progress lines and CSV rows.
    fn name(&self) -> &str;

    /// Reset to the full set {0, ..., n + 1}. Does not allocate.
    fn init(&mut self, n: i64);

    /// Remove i from the set, 1 <= i <= n.
    fn delete(&mut self, i: i64);

    /// Return the smallest live j >= i, for 0 <= i <= n + 1.
    fn successor(&mut self, i: i64) -> i64;
}

/// The evaluated structures, in the order the driver runs them. The
/// driver skips entries by position: 0 and 1 (no compression, recursive)
/// are excluded from large `query_one` runs, and 0 from everything else.
pub fn algorithms(max_n: i64) -> Vec<Box<dyn SuccessorDelete>> {
    vec![
        Box::new(ArraySet::<Naive>::new(max_n)),
        Box::new(ArraySet::<Recursive>::new(max_n)),
        Box::new(ArraySet::<TwoPass>::new(max_n)),
        Box::new(ArraySet::<TwoPassChecked>::new(max_n)),
        Box::new(ArraySet::<Halving>::new(max_n)),
        Box::new(QuickFind::new(max_n)),
        Box::new(UnionFind::new(max_n)),
        Box::new(MicroSet::<QuickFind>::new(max_n)),
        Box::new(MicroSet::<UnionFind>::new(max_n)),
        Box::new(MicroSet::<ArraySet<TwoPass>>::new(max_n)),
    ]
}
