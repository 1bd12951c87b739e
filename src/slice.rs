//! One-dimensional strided views over a borrowed backing store.
//!
//! A slice is `(first, step, len)` over some store: element `i` of the
//! slice lives at linear index `first + i * step`. Slices never copy
//! storage: mutations through a mutable slice are visible through the
//! owning array and any later view of it. The borrow checker serializes
//! the aliases; the storage itself is shared by design.

use std::marker::PhantomData;

use crate::scalar::Scalar;
use crate::store::{LinearAccess, Store};
use crate::{Result, StoreError};

/// Read-only strided one-dimensional view.
pub struct SliceView<'a, N: Scalar, S: Store<N>> {
    store: &'a S,
    first: usize,
    step: usize,
    len: usize,
    _kind: PhantomData<N>,
}

impl<N: Scalar, S: Store<N>> Clone for SliceView<'_, N, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            first: self.first,
            step: self.step,
            len: self.len,
            _kind: PhantomData,
        }
    }
}

impl<N: Scalar, S: Store<N>> std::fmt::Debug for SliceView<'_, N, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliceView")
            .field("first", &self.first)
            .field("step", &self.step)
            .field("len", &self.len)
            .finish()
    }
}

impl<'a, N: Scalar, S: Store<N>> SliceView<'a, N, S> {
    pub(crate) fn new(store: &'a S, first: usize, step: usize, len: usize) -> Self {
        debug_assert!(step >= 1);
        debug_assert!(len == 0 || first + (len - 1) * step < store.len());
        Self {
            store,
            first,
            step,
            len,
            _kind: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Step in linear-index positions between consecutive slice elements.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Linear store index of slice element `index`.
    #[inline]
    pub fn linear_index(&self, index: usize) -> usize {
        self.first + index * self.step
    }

    pub fn get(&self, index: usize) -> N {
        assert!(index < self.len, "slice index {index} out of bounds");
        self.store.get(self.linear_index(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = N> + '_ {
        (0..self.len).map(move |i| self.store.get(self.linear_index(i)))
    }

    pub fn visit<F: FnMut(&N)>(&self, visitor: F) {
        self.store
            .visit(self.first, self.limit(), self.step, visitor);
    }

    /// Slice-local index of the element of greatest magnitude.
    pub fn index_of_largest(&self) -> usize {
        let linear = self
            .store
            .index_of_largest(self.first, self.limit(), self.step);
        (linear - self.first) / self.step
    }

    pub fn is_small(&self, compared_to: f64) -> bool {
        self.store
            .is_small(self.first, self.limit(), self.step, compared_to)
    }

    /// Sub-slice over slice-local indices `[first, limit)`.
    pub fn slice_range(&self, first: usize, limit: usize) -> Result<SliceView<'a, N, S>> {
        check_range(first, limit, self.len)?;
        Ok(SliceView::new(
            self.store,
            self.linear_index(first),
            self.step,
            limit - first,
        ))
    }

    fn limit(&self) -> usize {
        self.first + self.len * self.step
    }
}

impl<N: Scalar, S: Store<N>> LinearAccess<N> for SliceView<'_, N, S> {
    fn len(&self) -> usize {
        self.len
    }

    fn value_at(&self, index: usize) -> N {
        self.get(index)
    }
}

/// Mutable strided one-dimensional view.
pub struct SliceViewMut<'a, N: Scalar, S: Store<N>> {
    store: &'a mut S,
    first: usize,
    step: usize,
    len: usize,
    _kind: PhantomData<N>,
}

impl<N: Scalar, S: Store<N>> std::fmt::Debug for SliceViewMut<'_, N, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliceViewMut")
            .field("first", &self.first)
            .field("step", &self.step)
            .field("len", &self.len)
            .finish()
    }
}

impl<'a, N: Scalar, S: Store<N>> SliceViewMut<'a, N, S> {
    pub(crate) fn new(store: &'a mut S, first: usize, step: usize, len: usize) -> Self {
        debug_assert!(step >= 1);
        debug_assert!(len == 0 || first + (len - 1) * step < store.len());
        Self {
            store,
            first,
            step,
            len,
            _kind: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    #[inline]
    pub fn linear_index(&self, index: usize) -> usize {
        self.first + index * self.step
    }

    pub fn get(&self, index: usize) -> N {
        assert!(index < self.len, "slice index {index} out of bounds");
        self.store.get(self.linear_index(index))
    }

    pub fn set(&mut self, index: usize, value: N) {
        assert!(index < self.len, "slice index {index} out of bounds");
        let linear = self.linear_index(index);
        self.store.set(linear, value);
    }

    pub fn fill(&mut self, value: &N) {
        let limit = self.limit();
        self.store.fill(self.first, limit, self.step, value);
    }

    pub fn fill_with<F: FnMut() -> N>(&mut self, supplier: F) {
        let limit = self.limit();
        self.store.fill_with(self.first, limit, self.step, supplier);
    }

    pub fn modify<F: Fn(&N) -> N>(&mut self, function: F) {
        let limit = self.limit();
        self.store.modify(self.first, limit, self.step, function);
    }

    pub fn visit<F: FnMut(&N)>(&self, visitor: F) {
        self.store
            .visit(self.first, self.limit(), self.step, visitor);
    }

    /// Swap `count` element pairs starting at slice-local positions
    /// `first_a` and `first_b`.
    pub fn exchange(&mut self, first_a: usize, first_b: usize, count: usize) {
        assert!(count == 0 || first_a + count <= self.len, "exchange range out of bounds");
        assert!(count == 0 || first_b + count <= self.len, "exchange range out of bounds");
        let a = self.linear_index(first_a);
        let b = self.linear_index(first_b);
        self.store.exchange(a, b, self.step, count);
    }

    pub fn index_of_largest(&self) -> usize {
        let linear = self
            .store
            .index_of_largest(self.first, self.limit(), self.step);
        (linear - self.first) / self.step
    }

    pub fn is_small(&self, compared_to: f64) -> bool {
        self.store
            .is_small(self.first, self.limit(), self.step, compared_to)
    }

    /// Reborrow as a read-only slice.
    pub fn as_view(&self) -> SliceView<'_, N, S> {
        SliceView::new(self.store, self.first, self.step, self.len)
    }

    /// Mutable sub-slice over slice-local indices `[first, limit)`.
    pub fn slice_range_mut(&mut self, first: usize, limit: usize) -> Result<SliceViewMut<'_, N, S>> {
        check_range(first, limit, self.len)?;
        let linear = self.linear_index(first);
        Ok(SliceViewMut::new(
            self.store,
            linear,
            self.step,
            limit - first,
        ))
    }

    fn limit(&self) -> usize {
        self.first + self.len * self.step
    }
}

impl<N: Scalar, S: Store<N>> LinearAccess<N> for SliceViewMut<'_, N, S> {
    fn len(&self) -> usize {
        self.len
    }

    fn value_at(&self, index: usize) -> N {
        self.get(index)
    }
}

fn check_range(first: usize, limit: usize, len: usize) -> Result<()> {
    if first > limit || limit > len {
        return Err(StoreError::IndexOutOfBounds {
            index: limit,
            count: len,
        });
    }
    Ok(())
}
