//! Common utilities used across the crate.
//!
//! Parallelism configuration and the data-parallel primitives metrics are
//! built from: an associative sum and a comparison sort.

use std::cmp::Ordering;

use rayon::prelude::*;

// =============================================================================
// Parallelism Configuration
// =============================================================================

/// Whether parallel execution is allowed.
///
/// When `Parallel`, components may use `rayon` parallel iterators on the
/// current pool. The pool itself is owned by the caller; metrics never build
/// one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    #[default]
    Parallel,
}

impl Parallelism {
    /// Create from thread count semantics.
    ///
    /// - 0 = auto (parallel if rayon pool has multiple threads, sequential otherwise)
    /// - 1 = sequential
    /// - >1 = parallel
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    /// Returns `true` if parallel execution is allowed.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    /// Downgrade to sequential when each thread would get fewer than
    /// `min_items_per_thread` items.
    #[inline]
    pub fn correct_for_workload(self, n_items: usize, min_items_per_thread: usize) -> Self {
        match self {
            Parallelism::Sequential => Parallelism::Sequential,
            Parallelism::Parallel => {
                let threads = rayon::current_num_threads()
                    .min(n_items / min_items_per_thread.max(1));
                if threads <= 1 {
                    Parallelism::Sequential
                } else {
                    Parallelism::Parallel
                }
            }
        }
    }

    /// Sum `f(i)` over `0..n`.
    ///
    /// The parallel reduction reassociates the additions, so results may
    /// differ from the sequential sum in the last bits.
    #[inline]
    pub fn maybe_par_sum<F>(self, n: usize, f: F) -> f64
    where
        F: Fn(usize) -> f64 + Sync + Send,
    {
        if self.is_parallel() {
            (0..n).into_par_iter().map(f).sum()
        } else {
            (0..n).map(f).sum()
        }
    }

    /// Unstable sort of `items` by `compare`.
    #[inline]
    pub fn maybe_par_sort_unstable_by<T, F>(self, items: &mut [T], compare: F)
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        if self.is_parallel() {
            items.par_sort_unstable_by(compare);
        } else {
            items.sort_unstable_by(compare);
        }
    }
}
