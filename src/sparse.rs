//! Sparse mapping-based store.
//!
//! Storage layout: a logical length plus an ordered map from linear index
//! to value, holding only non-zero entries. Unstored indices read as the
//! element kind's zero, and setting an exact zero removes the entry, so
//! the entry count tracks genuinely non-zero elements.
//!
//! Complexity: `get`/`set` are `O(log nnz)`; strided scans walk the
//! ordered entry range for `[first, limit)` and skip off-stride keys, so
//! `index_of_largest`/`is_small` cost `O(entries in range)`. `visit`
//! still invokes the consumer once per addressed index (zeros included),
//! which keeps caller-side reductions representation-independent at
//! `O(range * log nnz)`. Memory is `O(nnz)`.

use std::collections::BTreeMap;

use crate::scalar::Scalar;
use crate::store::{LinearAccess, Store};

/// Mapping-keyed storage for very large, mostly-zero element sets.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseStore<N: Scalar> {
    len: usize,
    entries: BTreeMap<usize, N>,
}

impl<N: Scalar> SparseStore<N> {
    /// Logically zero-filled store; allocates nothing per element.
    pub fn zero(len: usize) -> Self {
        Self {
            len,
            entries: BTreeMap::new(),
        }
    }

    /// Number of stored (non-zero) entries.
    pub fn nonzero_count(&self) -> usize {
        self.entries.len()
    }
}

impl<N: Scalar> LinearAccess<N> for SparseStore<N> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    fn value_at(&self, index: usize) -> N {
        debug_assert!(index < self.len, "index out of bounds");
        self.entries
            .get(&index)
            .cloned()
            .unwrap_or_else(N::zero)
    }
}

impl<N: Scalar> Store<N> for SparseStore<N> {
    fn set(&mut self, index: usize, value: N) {
        debug_assert!(index < self.len, "index out of bounds");
        if value.is_zero() {
            self.entries.remove(&index);
        } else {
            self.entries.insert(index, value);
        }
    }

    /// Filling with zero clears the addressed entries; any other value is
    /// materialized per index.
    fn fill(&mut self, first: usize, limit: usize, step: usize, value: &N) {
        if value.is_zero() {
            self.entries
                .retain(|&k, _| k < first || k >= limit || (k - first) % step != 0);
        } else {
            let mut i = first;
            while i < limit {
                self.entries.insert(i, value.clone());
                i += step;
            }
        }
    }

    fn index_of_largest(&self, first: usize, limit: usize, step: usize) -> usize {
        let mut result = first;
        let mut largest = 0.0;
        for (&k, value) in self.entries.range(first..limit) {
            if (k - first) % step != 0 {
                continue;
            }
            let magnitude = value.magnitude();
            if magnitude > largest {
                largest = magnitude;
                result = k;
            }
        }
        result
    }

    fn is_small(&self, first: usize, limit: usize, step: usize, compared_to: f64) -> bool {
        // Unstored entries are zero and zero is always small.
        for (&k, value) in self.entries.range(first..limit) {
            if (k - first) % step != 0 {
                continue;
            }
            if !value.is_small(compared_to) {
                return false;
            }
        }
        true
    }

    fn reset(&mut self) {
        self.entries.clear();
    }
}
