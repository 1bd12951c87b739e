//! N-dimensional array view over a linear backing store.

use std::fmt;
use std::marker::PhantomData;

use crate::basic::BasicStore;
use crate::layout;
use crate::scalar::Scalar;
use crate::slice::{SliceView, SliceViewMut};
use crate::store::{LinearAccess, Store};
use crate::{Result, StoreError};

/// N-dimensional array: an immutable shape over a linear backing store.
///
/// Every multi-dimensional operation translates coordinates through
/// [`layout`] and delegates to the store, so the behavior is identical for
/// dense, off-heap, and sparse representations. The shape is fixed at
/// construction; no operation reallocates or reshapes the store.
///
/// Coordinate-taking methods check against the shape and panic on a
/// violation; the `try_get`/`try_set` pair returns the error instead.
/// Linear-index methods check against the element count.
pub struct ArrayNd<N: Scalar, S: Store<N> = BasicStore<N>> {
    store: S,
    shape: Box<[usize]>,
    count: usize,
    _kind: PhantomData<N>,
}

impl<N: Scalar, S: Store<N>> ArrayNd<N, S> {
    /// Wrap a store with a shape. Fails if the flattened element count of
    /// the shape overflows or exceeds the store's capacity.
    pub fn wrap(store: S, shape: &[usize]) -> Result<Self> {
        let count = layout::validate(shape)?;
        if count > store.len() {
            return Err(StoreError::InsufficientCapacity {
                count,
                capacity: store.len(),
            });
        }
        Ok(Self {
            store,
            shape: shape.into(),
            count,
            _kind: PhantomData,
        })
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total element count (product of the shape's extents).
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Extent of one dimension, or 1 beyond the rank.
    #[inline]
    pub fn count_in(&self, dimension: usize) -> usize {
        layout::count_in(&self.shape, dimension)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Checked linear index of a coordinate; panics on rank or bounds
    /// violations.
    pub fn index_of(&self, coordinate: &[usize]) -> usize {
        assert_eq!(
            coordinate.len(),
            self.shape.len(),
            "wrong number of indices"
        );
        let mut index = 0;
        let mut stride = 1;
        for (d, &c) in coordinate.iter().enumerate() {
            assert!(
                c < self.shape[d],
                "index {} out of bounds for dim {}",
                c,
                self.shape[d]
            );
            index += c * stride;
            stride *= self.shape[d];
        }
        index
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    pub fn get(&self, coordinate: &[usize]) -> N {
        self.store.get(self.index_of(coordinate))
    }

    pub fn get_at(&self, index: usize) -> N {
        assert!(index < self.count, "index {index} out of bounds");
        self.store.get(index)
    }

    pub fn set(&mut self, coordinate: &[usize], value: N) {
        let index = self.index_of(coordinate);
        self.store.set(index, value);
    }

    pub fn set_at(&mut self, index: usize, value: N) {
        assert!(index < self.count, "index {index} out of bounds");
        self.store.set(index, value);
    }

    pub fn add(&mut self, coordinate: &[usize], addend: &N) {
        let index = self.index_of(coordinate);
        self.store.add(index, addend);
    }

    pub fn add_at(&mut self, index: usize, addend: &N) {
        assert!(index < self.count, "index {index} out of bounds");
        self.store.add(index, addend);
    }

    /// Element converted to a 64-bit float.
    pub fn value_as_f64(&self, coordinate: &[usize]) -> f64 {
        self.get(coordinate).to_f64()
    }

    /// Non-panicking element read.
    pub fn try_get(&self, coordinate: &[usize]) -> Result<N> {
        let index = layout::index_checked(&self.shape, coordinate)?;
        Ok(self.store.get(index))
    }

    /// Non-panicking element write.
    pub fn try_set(&mut self, coordinate: &[usize], value: N) -> Result<()> {
        let index = layout::index_checked(&self.shape, coordinate)?;
        self.store.set(index, value);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Fill
    // ------------------------------------------------------------------

    pub fn fill_all(&mut self, value: &N) {
        self.store.fill(0, self.count, 1, value);
    }

    pub fn fill_all_with<F: FnMut() -> N>(&mut self, supplier: F) {
        self.store.fill_with(0, self.count, 1, supplier);
    }

    pub fn fill_one(&mut self, index: usize, value: &N) {
        self.set_at(index, value.clone());
    }

    pub fn fill_one_with<F: FnOnce() -> N>(&mut self, index: usize, supplier: F) {
        self.set_at(index, supplier());
    }

    pub fn fill_range(&mut self, first: usize, limit: usize, value: &N) {
        self.store.fill(first, limit, 1, value);
    }

    /// Fix all but one dimension at `first` and fill the remaining axis
    /// from `first[dimension]` to its extent.
    pub fn fill_set(&mut self, first: &[usize], dimension: usize, value: &N) -> Result<()> {
        let (start, limit, step) = self.axis_range(first, dimension)?;
        self.store.fill(start, limit, step, value);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Modify
    // ------------------------------------------------------------------

    pub fn modify_all<F: Fn(&N) -> N>(&mut self, function: F) {
        self.store.modify(0, self.count, 1, function);
    }

    pub fn modify_one<F: Fn(&N) -> N>(&mut self, index: usize, function: F) {
        assert!(index < self.count, "index {index} out of bounds");
        self.store.modify(index, index + 1, 1, function);
    }

    pub fn modify_range<F: Fn(&N) -> N>(&mut self, first: usize, limit: usize, function: F) {
        self.store.modify(first, limit, 1, function);
    }

    /// Axis variant of `modify_all`; see [`ArrayNd::fill_set`].
    pub fn modify_set<F: Fn(&N) -> N>(
        &mut self,
        first: &[usize],
        dimension: usize,
        function: F,
    ) -> Result<()> {
        let (start, limit, step) = self.axis_range(first, dimension)?;
        self.store.modify(start, limit, step, function);
        Ok(())
    }

    /// `self[i] = function(left[i], self[i])` over the whole index space.
    pub fn modify_matching_left<A, F>(&mut self, left: &A, function: F) -> Result<()>
    where
        A: LinearAccess<N> + ?Sized,
        F: Fn(&N, &N) -> N,
    {
        self.check_matching_count(left.len())?;
        self.store
            .modify_matching_left(0, self.count, 1, left, function);
        Ok(())
    }

    /// `self[i] = function(self[i], right[i])` over the whole index space.
    pub fn modify_matching_right<A, F>(&mut self, function: F, right: &A) -> Result<()>
    where
        A: LinearAccess<N> + ?Sized,
        F: Fn(&N, &N) -> N,
    {
        self.check_matching_count(right.len())?;
        self.store
            .modify_matching_right(0, self.count, 1, function, right);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Visit
    // ------------------------------------------------------------------

    pub fn visit_all<F: FnMut(&N)>(&self, visitor: F) {
        self.store.visit(0, self.count, 1, visitor);
    }

    pub fn visit_one<F: FnMut(&N)>(&self, index: usize, visitor: F) {
        assert!(index < self.count, "index {index} out of bounds");
        self.store.visit(index, index + 1, 1, visitor);
    }

    pub fn visit_range<F: FnMut(&N)>(&self, first: usize, limit: usize, visitor: F) {
        self.store.visit(first, limit, 1, visitor);
    }

    /// Axis variant of `visit_all`; see [`ArrayNd::fill_set`].
    pub fn visit_set<F: FnMut(&N)>(
        &self,
        first: &[usize],
        dimension: usize,
        visitor: F,
    ) -> Result<()> {
        let (start, limit, step) = self.axis_range(first, dimension)?;
        self.store.visit(start, limit, step, visitor);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Linear index of the element of greatest magnitude; ties resolve to
    /// the lowest index.
    pub fn index_of_largest(&self) -> usize {
        self.store.index_of_largest(0, self.count, 1)
    }

    pub fn index_of_largest_in_range(&self, first: usize, limit: usize) -> usize {
        self.store.index_of_largest(first, limit, 1)
    }

    pub fn is_absolute(&self, coordinate: &[usize]) -> bool {
        self.get(coordinate).is_absolute()
    }

    pub fn is_small(&self, coordinate: &[usize], compared_to: f64) -> bool {
        self.get(coordinate).is_small(compared_to)
    }

    /// Zero-fill the whole array.
    pub fn reset(&mut self) {
        self.store.reset();
    }

    // ------------------------------------------------------------------
    // Slicing
    // ------------------------------------------------------------------

    /// Strided one-dimensional view along `dimension`, beginning at
    /// `first` and running to that dimension's extent. Shares storage.
    pub fn slice(&self, first: &[usize], dimension: usize) -> Result<SliceView<'_, N, S>> {
        let (start, _, step) = self.axis_range(first, dimension)?;
        let len = self.shape[dimension] - first[dimension];
        Ok(SliceView::new(&self.store, start, step, len))
    }

    /// Mutable variant of [`ArrayNd::slice`]; mutations are visible
    /// through this array once the borrow ends.
    pub fn slice_mut(&mut self, first: &[usize], dimension: usize) -> Result<SliceViewMut<'_, N, S>> {
        let (start, _, step) = self.axis_range(first, dimension)?;
        let len = self.shape[dimension] - first[dimension];
        Ok(SliceViewMut::new(&mut self.store, start, step, len))
    }

    /// Contiguous view over linear indices `[first, limit)`.
    pub fn slice_range(&self, first: usize, limit: usize) -> Result<SliceView<'_, N, S>> {
        self.check_linear_range(first, limit)?;
        Ok(SliceView::new(&self.store, first, 1, limit - first))
    }

    pub fn slice_range_mut(&mut self, first: usize, limit: usize) -> Result<SliceViewMut<'_, N, S>> {
        self.check_linear_range(first, limit)?;
        Ok(SliceViewMut::new(&mut self.store, first, 1, limit - first))
    }

    /// Flattening adaptor: the whole storage as one dimension. The store
    /// is read through a different shape, never copied, so mutation
    /// through either view is visible through the other.
    pub fn flatten(&self) -> SliceView<'_, N, S> {
        SliceView::new(&self.store, 0, 1, self.count)
    }

    pub fn flatten_mut(&mut self) -> SliceViewMut<'_, N, S> {
        SliceViewMut::new(&mut self.store, 0, 1, self.count)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// `(first, limit, step)` of the axis run fixed by `first` along
    /// `dimension`: start at the coordinate's linear index, step by the
    /// axis stride, stop at the dimension's extent.
    fn axis_range(&self, first: &[usize], dimension: usize) -> Result<(usize, usize, usize)> {
        if dimension >= self.rank() {
            return Err(StoreError::InvalidDimension {
                dimension,
                rank: self.rank(),
            });
        }
        let start = layout::index_checked(&self.shape, first)?;
        let step = layout::step(&self.shape, dimension);
        let len = self.shape[dimension] - first[dimension];
        Ok((start, start + step * len, step))
    }

    fn check_matching_count(&self, other_len: usize) -> Result<()> {
        if other_len != self.count {
            return Err(StoreError::ShapeMismatch(
                vec![other_len],
                vec![self.count],
            ));
        }
        Ok(())
    }

    fn check_linear_range(&self, first: usize, limit: usize) -> Result<()> {
        if first > limit || limit > self.count {
            return Err(StoreError::IndexOutOfBounds {
                index: limit,
                count: self.count,
            });
        }
        Ok(())
    }
}

impl<N: Scalar, S: Store<N>> LinearAccess<N> for ArrayNd<N, S> {
    fn len(&self) -> usize {
        self.count
    }

    fn value_at(&self, index: usize) -> N {
        self.store.get(index)
    }
}

/// Value equality across any two backing representations: shapes
/// element-wise equal and stores element-wise equal.
impl<N: Scalar, S1: Store<N>, S2: Store<N>> PartialEq<ArrayNd<N, S2>> for ArrayNd<N, S1> {
    fn eq(&self, other: &ArrayNd<N, S2>) -> bool {
        self.shape == other.shape
            && (0..self.count).all(|i| self.store.get(i) == other.store.get(i))
    }
}

impl<N: Scalar, S: Store<N>> fmt::Debug for ArrayNd<N, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        for (d, extent) in self.shape.iter().enumerate() {
            if d > 0 {
                write!(f, "x")?;
            }
            write!(f, "{extent}")?;
        }
        write!(f, ">")?;
        if (1..=100).contains(&self.count) {
            write!(f, " ")?;
            f.debug_list()
                .entries((0..self.count).map(|i| self.store.get(i)))
                .finish()?;
        }
        Ok(())
    }
}
