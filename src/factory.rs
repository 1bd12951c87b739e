//! Per-kind array factories.
//!
//! Factories are explicit values passed by the caller, not global
//! singletons, so construction stays testable and side-effect free.
//! Each factory resolves the element count from the requested
//! shape, selects a backing representation, populates it, and wraps it
//! with the shape.

use std::marker::PhantomData;

use num_complex::Complex64;
use num_rational::{BigRational, Rational64};

use crate::array::ArrayNd;
use crate::basic::BasicStore;
use crate::layout;
use crate::offheap::{NativeFloat, OffHeapStore};
use crate::scalar::{Quaternion, Scalar};
use crate::store::Store;
use crate::{Result, DENSE_COUNT_LIMIT};

pub type PrimitiveArray = ArrayNd<f64>;
pub type ComplexArray = ArrayNd<Complex64>;
pub type QuaternionArray = ArrayNd<Quaternion>;
pub type RationalArray = ArrayNd<Rational64>;
pub type BigArray = ArrayNd<BigRational>;
pub type OffHeap32Array = ArrayNd<f64, OffHeapStore<f32>>;
pub type OffHeap64Array = ArrayNd<f64, OffHeapStore<f64>>;

#[inline]
fn trace_enabled() -> bool {
    matches!(std::env::var("NDSTORE_TRACE"), Ok(ref v) if v == "1")
}

/// Factory for arrays of one element kind over the dense/sparse facade.
#[derive(Clone, Debug)]
pub struct ArrayFactory<N: Scalar> {
    dense_limit: usize,
    _kind: PhantomData<N>,
}

impl<N: Scalar> Default for ArrayFactory<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Scalar> ArrayFactory<N> {
    pub fn new() -> Self {
        Self::with_dense_limit(DENSE_COUNT_LIMIT)
    }

    /// Factory with a custom dense/sparse switch threshold.
    pub fn with_dense_limit(dense_limit: usize) -> Self {
        Self {
            dense_limit,
            _kind: PhantomData,
        }
    }

    /// Zero-filled array of the requested shape.
    pub fn make_zero(&self, shape: &[usize]) -> Result<ArrayNd<N>> {
        let count = layout::validate(shape)?;
        let store = BasicStore::zero(count, self.dense_limit);
        if trace_enabled() {
            eprintln!(
                "ndstore: count {} -> {} representation",
                count,
                if store.is_sparse() { "sparse" } else { "dense" }
            );
        }
        ArrayNd::wrap(store, shape)
    }

    /// Array filled with successive supplier values, in increasing linear
    /// index order.
    pub fn make_filled<F: FnMut() -> N>(&self, shape: &[usize], supplier: F) -> Result<ArrayNd<N>> {
        let mut array = self.make_zero(shape)?;
        array.fill_all_with(supplier);
        Ok(array)
    }

    /// Copy of `source`: same shape, same element values, independent of
    /// the source's backing representation. Zero elements are not
    /// materialized, so a sparse copy stays sparse.
    pub fn copy<S: Store<N>>(&self, source: &ArrayNd<N, S>) -> Result<ArrayNd<N>> {
        let mut array = self.make_zero(source.shape())?;
        for index in 0..source.count() {
            let value = source.get_at(index);
            if !value.is_zero() {
                array.set_at(index, value);
            }
        }
        Ok(array)
    }
}

/// Factory for off-heap `f64` arrays of width `W`.
#[derive(Clone, Debug, Default)]
pub struct OffHeapFactory<W: NativeFloat> {
    _width: PhantomData<W>,
}

impl<W: NativeFloat> OffHeapFactory<W> {
    pub fn new() -> Self {
        Self {
            _width: PhantomData,
        }
    }

    /// Zero-filled off-heap array. Allocation is eager and failure is
    /// fatal; see [`OffHeapStore::zero`].
    pub fn make_zero(&self, shape: &[usize]) -> Result<ArrayNd<f64, OffHeapStore<W>>> {
        let count = layout::validate(shape)?;
        ArrayNd::wrap(OffHeapStore::zero(count), shape)
    }

    pub fn make_filled<F: FnMut() -> f64>(
        &self,
        shape: &[usize],
        supplier: F,
    ) -> Result<ArrayNd<f64, OffHeapStore<W>>> {
        let count = layout::validate(shape)?;
        ArrayNd::wrap(OffHeapStore::filled_with(count, supplier), shape)
    }

    pub fn copy<S: Store<f64>>(
        &self,
        source: &ArrayNd<f64, S>,
    ) -> Result<ArrayNd<f64, OffHeapStore<W>>> {
        let mut index = 0;
        self.make_filled(source.shape(), || {
            let value = source.get_at(index);
            index += 1;
            value
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LinearAccess;

    #[test]
    fn test_make_zero_shapes_and_values() {
        let factory = ArrayFactory::<f64>::new();
        let array = factory.make_zero(&[3, 4]).unwrap();
        assert_eq!(array.shape(), &[3, 4]);
        assert_eq!(array.count(), 12);
        array.visit_all(|v| assert_eq!(*v, 0.0));
        assert!(!array.store().is_sparse());
    }

    #[test]
    fn test_threshold_selects_sparse() {
        let factory = ArrayFactory::<f64>::with_dense_limit(10);
        assert!(!factory.make_zero(&[2, 5]).unwrap().store().is_sparse());
        assert!(factory.make_zero(&[2, 6]).unwrap().store().is_sparse());
    }

    #[test]
    fn test_make_filled_supplier_order() {
        let factory = ArrayFactory::<f64>::new();
        let mut next = 0.0;
        let array = factory
            .make_filled(&[2, 2], || {
                next += 1.0;
                next
            })
            .unwrap();
        assert_eq!(array.get_at(0), 1.0);
        assert_eq!(array.get_at(3), 4.0);
    }

    #[test]
    fn test_copy_reproduces_shape_and_values() {
        let factory = ArrayFactory::<f64>::new();
        let mut source = factory.make_zero(&[2, 3]).unwrap();
        source.set(&[1, 2], 5.0);
        let copy = factory.copy(&source).unwrap();
        assert_eq!(copy, source);
        // The copy owns its storage.
        let mut copy = copy;
        copy.set(&[0, 0], 1.0);
        assert_eq!(source.get(&[0, 0]), 0.0);
    }

    #[test]
    fn test_copy_from_sparse_source() {
        let sparse_factory = ArrayFactory::<f64>::with_dense_limit(2);
        let mut source = sparse_factory.make_zero(&[2, 3]).unwrap();
        assert!(source.store().is_sparse());
        source.set(&[1, 1], 8.0);
        let dense_copy = ArrayFactory::<f64>::new().copy(&source).unwrap();
        assert!(!dense_copy.store().is_sparse());
        assert_eq!(dense_copy, source);
    }

    #[test]
    fn test_copy_keeps_sparse_sparse() {
        let factory = ArrayFactory::<f64>::with_dense_limit(2);
        let mut source = factory.make_zero(&[100]).unwrap();
        source.set(&[42], 1.0);
        let copy = factory.copy(&source).unwrap();
        match copy.store() {
            BasicStore::Sparse(store) => assert_eq!(store.nonzero_count(), 1),
            BasicStore::Dense(_) => panic!("expected sparse copy"),
        }
    }

    #[test]
    fn test_off_heap_factory_both_widths() {
        let mut next = 0.0;
        let supplier = || {
            next += 0.5;
            next
        };
        let array32 = OffHeapFactory::<f32>::new()
            .make_filled(&[2, 2], supplier)
            .unwrap();
        assert_eq!(array32.get(&[0, 0]), 0.5);
        assert_eq!(array32.get(&[1, 1]), 2.0);

        let array64 = OffHeapFactory::<f64>::new().make_zero(&[2, 2]).unwrap();
        assert_eq!(array64.store().len(), 4);
        array64.visit_all(|v| assert_eq!(*v, 0.0));
    }

    #[test]
    fn test_off_heap_copy_from_basic() {
        let factory = ArrayFactory::<f64>::new();
        let mut source = factory.make_zero(&[2, 2]).unwrap();
        source.set(&[1, 0], 3.0);
        let off_heap = OffHeapFactory::<f64>::new().copy(&source).unwrap();
        assert_eq!(off_heap, source);
    }

    #[test]
    fn test_basic_copy_from_off_heap() {
        let off_heap = OffHeapFactory::<f32>::new()
            .make_filled(&[3], || 1.5)
            .unwrap();
        let copy = ArrayFactory::<f64>::new().copy(&off_heap).unwrap();
        assert_eq!(copy, off_heap);
    }

    #[test]
    fn test_factories_for_every_kind() {
        assert_eq!(
            ArrayFactory::<Complex64>::new()
                .make_zero(&[2])
                .unwrap()
                .count(),
            2
        );
        assert_eq!(
            ArrayFactory::<Quaternion>::new()
                .make_zero(&[2])
                .unwrap()
                .count(),
            2
        );
        assert_eq!(
            ArrayFactory::<Rational64>::new()
                .make_zero(&[2])
                .unwrap()
                .count(),
            2
        );
        assert_eq!(
            ArrayFactory::<BigRational>::new()
                .make_zero(&[2])
                .unwrap()
                .count(),
            2
        );
    }

    #[test]
    fn test_count_overflow_detected() {
        let factory = ArrayFactory::<f64>::new();
        assert!(factory.make_zero(&[usize::MAX, 4]).is_err());
    }
}
