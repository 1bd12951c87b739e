//! Dense/sparse representation facade.

use crate::dense::DenseStore;
use crate::scalar::Scalar;
use crate::sparse::SparseStore;
use crate::store::{LinearAccess, Store};
use crate::DENSE_COUNT_LIMIT;

/// Backing store that picks its physical representation once, at
/// construction: dense up to a practicality threshold, sparse beyond it.
///
/// The choice never changes afterwards, and the full [`Store`] contract is
/// identical for both representations.
#[derive(Clone, Debug, PartialEq)]
pub enum BasicStore<N: Scalar> {
    Dense(DenseStore<N>),
    Sparse(SparseStore<N>),
}

impl<N: Scalar> BasicStore<N> {
    /// Zero-filled store, dense iff `len <= dense_limit`.
    pub fn zero(len: usize, dense_limit: usize) -> Self {
        if len <= dense_limit {
            Self::Dense(DenseStore::zero(len))
        } else {
            Self::Sparse(SparseStore::zero(len))
        }
    }

    /// Zero-filled store using [`DENSE_COUNT_LIMIT`].
    pub fn zero_default(len: usize) -> Self {
        Self::zero(len, DENSE_COUNT_LIMIT)
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, Self::Sparse(_))
    }
}

impl<N: Scalar> LinearAccess<N> for BasicStore<N> {
    #[inline]
    fn len(&self) -> usize {
        match self {
            Self::Dense(store) => store.len(),
            Self::Sparse(store) => store.len(),
        }
    }

    #[inline]
    fn value_at(&self, index: usize) -> N {
        match self {
            Self::Dense(store) => store.value_at(index),
            Self::Sparse(store) => store.value_at(index),
        }
    }
}

impl<N: Scalar> Store<N> for BasicStore<N> {
    #[inline]
    fn set(&mut self, index: usize, value: N) {
        match self {
            Self::Dense(store) => store.set(index, value),
            Self::Sparse(store) => store.set(index, value),
        }
    }

    fn add(&mut self, index: usize, addend: &N) {
        match self {
            Self::Dense(store) => store.add(index, addend),
            Self::Sparse(store) => store.add(index, addend),
        }
    }

    fn fill(&mut self, first: usize, limit: usize, step: usize, value: &N) {
        match self {
            Self::Dense(store) => store.fill(first, limit, step, value),
            Self::Sparse(store) => store.fill(first, limit, step, value),
        }
    }

    fn fill_with<F: FnMut() -> N>(&mut self, first: usize, limit: usize, step: usize, supplier: F) {
        match self {
            Self::Dense(store) => store.fill_with(first, limit, step, supplier),
            Self::Sparse(store) => store.fill_with(first, limit, step, supplier),
        }
    }

    fn modify<F: Fn(&N) -> N>(&mut self, first: usize, limit: usize, step: usize, function: F) {
        match self {
            Self::Dense(store) => store.modify(first, limit, step, function),
            Self::Sparse(store) => store.modify(first, limit, step, function),
        }
    }

    fn modify_matching_left<A, F>(
        &mut self,
        first: usize,
        limit: usize,
        step: usize,
        left: &A,
        function: F,
    ) where
        A: LinearAccess<N> + ?Sized,
        F: Fn(&N, &N) -> N,
    {
        match self {
            Self::Dense(store) => store.modify_matching_left(first, limit, step, left, function),
            Self::Sparse(store) => store.modify_matching_left(first, limit, step, left, function),
        }
    }

    fn modify_matching_right<A, F>(
        &mut self,
        first: usize,
        limit: usize,
        step: usize,
        function: F,
        right: &A,
    ) where
        A: LinearAccess<N> + ?Sized,
        F: Fn(&N, &N) -> N,
    {
        match self {
            Self::Dense(store) => store.modify_matching_right(first, limit, step, function, right),
            Self::Sparse(store) => store.modify_matching_right(first, limit, step, function, right),
        }
    }

    fn visit<F: FnMut(&N)>(&self, first: usize, limit: usize, step: usize, visitor: F) {
        match self {
            Self::Dense(store) => store.visit(first, limit, step, visitor),
            Self::Sparse(store) => store.visit(first, limit, step, visitor),
        }
    }

    fn exchange(&mut self, first_a: usize, first_b: usize, step: usize, count: usize) {
        match self {
            Self::Dense(store) => store.exchange(first_a, first_b, step, count),
            Self::Sparse(store) => store.exchange(first_a, first_b, step, count),
        }
    }

    fn index_of_largest(&self, first: usize, limit: usize, step: usize) -> usize {
        match self {
            Self::Dense(store) => store.index_of_largest(first, limit, step),
            Self::Sparse(store) => store.index_of_largest(first, limit, step),
        }
    }

    fn is_small(&self, first: usize, limit: usize, step: usize, compared_to: f64) -> bool {
        match self {
            Self::Dense(store) => store.is_small(first, limit, step, compared_to),
            Self::Sparse(store) => store.is_small(first, limit, step, compared_to),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Dense(store) => store.reset(),
            Self::Sparse(store) => store.reset(),
        }
    }
}
