//! Cross-representation contract tests: every backing store must expose
//! identical indexing, filling, modifying, and visiting semantics.

use approx::assert_relative_eq;
use ndstore::{
    layout, ArrayFactory, ArrayNd, LinearAccess, OffHeapFactory, OffHeapStore, Scalar, Store,
};

/// Run one scenario against dense, sparse, off-heap 32-bit, and off-heap
/// 64-bit arrays of the same shape.
fn for_each_representation(shape: &[usize], scenario: impl Fn(&mut dyn DynArray)) {
    let mut dense = ArrayFactory::<f64>::new().make_zero(shape).unwrap();
    let mut sparse = ArrayFactory::<f64>::with_dense_limit(0)
        .make_zero(shape)
        .unwrap();
    assert!(sparse.store().is_sparse());
    let mut native32 = OffHeapFactory::<f32>::new().make_zero(shape).unwrap();
    let mut native64 = OffHeapFactory::<f64>::new().make_zero(shape).unwrap();

    scenario(&mut dense);
    scenario(&mut sparse);
    scenario(&mut native32);
    scenario(&mut native64);
}

/// Object-safe subset of the array surface, enough for shared scenarios.
trait DynArray {
    fn set(&mut self, coordinate: &[usize], value: f64);
    fn get(&self, coordinate: &[usize]) -> f64;
    fn get_at(&self, index: usize) -> f64;
    fn fill_all(&mut self, value: f64);
    fn fill_set(&mut self, first: &[usize], dimension: usize, value: f64);
    fn sum(&self) -> f64;
    fn index_of_largest(&self) -> usize;
    fn exchange(&mut self, first_a: usize, first_b: usize, step: usize, count: usize);
    fn reset(&mut self);
    fn shape(&self) -> Vec<usize>;
}

impl<S: Store<f64>> DynArray for ArrayNd<f64, S> {
    fn set(&mut self, coordinate: &[usize], value: f64) {
        ArrayNd::set(self, coordinate, value);
    }

    fn get(&self, coordinate: &[usize]) -> f64 {
        ArrayNd::get(self, coordinate)
    }

    fn get_at(&self, index: usize) -> f64 {
        ArrayNd::get_at(self, index)
    }

    fn fill_all(&mut self, value: f64) {
        ArrayNd::fill_all(self, &value);
    }

    fn fill_set(&mut self, first: &[usize], dimension: usize, value: f64) {
        ArrayNd::fill_set(self, first, dimension, &value).unwrap();
    }

    fn sum(&self) -> f64 {
        let mut total = 0.0;
        self.visit_all(|v| total += v);
        total
    }

    fn index_of_largest(&self) -> usize {
        ArrayNd::index_of_largest(self)
    }

    fn exchange(&mut self, first_a: usize, first_b: usize, step: usize, count: usize) {
        self.store_mut().exchange(first_a, first_b, step, count);
    }

    fn reset(&mut self) {
        ArrayNd::reset(self);
    }

    fn shape(&self) -> Vec<usize> {
        ArrayNd::shape(self).to_vec()
    }
}

#[test]
fn test_fill_all_then_visit_observes_value_everywhere() {
    for_each_representation(&[3, 4], |array| {
        array.fill_all(2.5);
        for index in 0..12 {
            assert_eq!(array.get_at(index), 2.5);
        }
        assert_relative_eq!(array.sum(), 30.0);
    });
}

#[test]
fn test_set_get_by_coordinate_matches_linear_index() {
    for_each_representation(&[2, 3], |array| {
        array.fill_all(0.0);
        array.set(&[1, 2], 5.0);
        assert_eq!(array.get(&[1, 2]), 5.0);
        assert_eq!(layout::index_of(&array.shape(), &[1, 2]), 5);
        assert_eq!(array.get_at(5), 5.0);
    });
}

#[test]
fn test_fill_set_fills_axis_tail_only() {
    for_each_representation(&[2, 3], |array| {
        array.fill_set(&[0, 1], 1, 9.0);
        assert_eq!(array.get(&[0, 0]), 0.0);
        assert_eq!(array.get(&[0, 1]), 9.0);
        assert_eq!(array.get(&[0, 2]), 9.0);
        for c in 0..3 {
            assert_eq!(array.get(&[1, c]), 0.0);
        }
    });
}

#[test]
fn test_index_of_largest_magnitude_with_ties() {
    for_each_representation(&[6], |array| {
        array.set(&[1], -7.0);
        array.set(&[4], 7.0);
        // Tie on magnitude: lowest index wins.
        assert_eq!(array.index_of_largest(), 1);
        array.set(&[5], 8.0);
        assert_eq!(array.index_of_largest(), 5);
    });
}

#[test]
fn test_exchange_twice_is_identity() {
    for_each_representation(&[8], |array| {
        for i in 0..8 {
            array.set(&[i], i as f64);
        }
        array.exchange(0, 4, 2, 2);
        assert_eq!(array.get_at(0), 4.0);
        assert_eq!(array.get_at(2), 6.0);
        array.exchange(0, 4, 2, 2);
        for i in 0..8 {
            assert_eq!(array.get_at(i), i as f64);
        }
    });
}

#[test]
fn test_reset_zeroes_every_representation() {
    for_each_representation(&[2, 2], |array| {
        array.fill_all(3.0);
        array.reset();
        for index in 0..4 {
            assert_eq!(array.get_at(index), 0.0);
        }
    });
}

#[test]
fn test_off_heap_round_trip_precision_per_width() {
    let shape = [4, 4];
    let mut next32 = 0.0;
    let narrow = OffHeapFactory::<f32>::new()
        .make_filled(&shape, || {
            next32 += 0.125; // exactly representable at both widths
            next32
        })
        .unwrap();
    let mut next64 = 0.0;
    let wide = OffHeapFactory::<f64>::new()
        .make_filled(&shape, || {
            next64 += 0.125;
            next64
        })
        .unwrap();
    for index in 0..16 {
        assert_eq!(narrow.get_at(index), 0.125 * (index + 1) as f64);
        assert_eq!(wide.get_at(index), 0.125 * (index + 1) as f64);
    }
}

#[test]
fn test_slice_mutation_visible_through_array() {
    let mut array = ArrayFactory::<f64>::new().make_zero(&[2, 3]).unwrap();
    {
        let mut column = array.slice_mut(&[0, 1], 0).unwrap();
        assert_eq!(column.len(), 2);
        assert_eq!(column.step(), 1);
        column.set(1, 6.0);
    }
    assert_eq!(array.get(&[1, 1]), 6.0);

    let mut row = array.slice_mut(&[1, 0], 1).unwrap();
    assert_eq!(row.step(), 2);
    row.fill(&4.0);
    drop(row);
    assert_eq!(array.get(&[1, 0]), 4.0);
    assert_eq!(array.get(&[1, 2]), 4.0);
    assert_eq!(array.get(&[0, 0]), 0.0);
}

#[test]
fn test_flattening_adaptor_aliases_storage() {
    let mut array = ArrayFactory::<f64>::new().make_zero(&[2, 2, 2]).unwrap();
    array.flatten_mut().set(7, 1.0);
    assert_eq!(array.get(&[1, 1, 1]), 1.0);
    assert_eq!(array.flatten().len(), 8);
}

#[test]
fn test_copy_across_representations_preserves_equality() {
    let mut source = OffHeapFactory::<f64>::new().make_zero(&[3, 2]).unwrap();
    source.set(&[2, 1], 2.5);
    source.set(&[0, 0], -1.0);

    let basic = ArrayFactory::<f64>::new().copy(&source).unwrap();
    assert_eq!(basic, source);

    let sparse = ArrayFactory::<f64>::with_dense_limit(0).copy(&basic).unwrap();
    assert!(sparse.store().is_sparse());
    assert_eq!(sparse, source);

    let back: ArrayNd<f64, OffHeapStore<f32>> =
        OffHeapFactory::<f32>::new().copy(&sparse).unwrap();
    assert_eq!(back, source);
}

#[test]
fn test_visitor_reduction_over_strided_set() {
    let mut array = ArrayFactory::<f64>::new().make_zero(&[3, 3]).unwrap();
    let mut next = 0.0;
    array.fill_all_with(|| {
        next += 1.0;
        next
    });
    // Middle column of the 3x3: coordinates [0..3, 1].
    let mut column_sum = 0.0;
    array.visit_set(&[0, 1], 0, |v| column_sum += v).unwrap();
    assert_relative_eq!(column_sum, 4.0 + 5.0 + 6.0);
}

#[test]
fn test_is_small_respects_magnitude_scale() {
    let mut array = ArrayFactory::<f64>::new().make_zero(&[4]).unwrap();
    array.fill_all(&1e-20);
    assert!(array.flatten().is_small(1.0));
    array.set(&[2], 0.5);
    assert!(!array.flatten().is_small(1.0));
}

#[test]
fn test_complex_magnitude_drives_largest() {
    use num_complex::Complex64;
    let factory = ArrayFactory::<Complex64>::new();
    let mut array = factory.make_zero(&[3]).unwrap();
    array.set(&[0], Complex64::new(2.0, 0.0));
    array.set(&[1], Complex64::new(3.0, 4.0));
    array.set(&[2], Complex64::new(0.0, 4.5));
    assert_eq!(array.index_of_largest(), 1);
    assert_eq!(array.get(&[1]).magnitude(), 5.0);
}

#[test]
fn test_linear_access_interoperates_across_stores() {
    let mut left = OffHeapFactory::<f64>::new().make_zero(&[4]).unwrap();
    left.fill_all(&10.0);
    let mut target = ArrayFactory::<f64>::new().make_zero(&[4]).unwrap();
    target.fill_all(&4.0);
    target.modify_matching_left(&left, |l, v| l - v).unwrap();
    for i in 0..4 {
        assert_eq!(target.get_at(i), 6.0);
    }
    assert_eq!(LinearAccess::<f64>::len(&left), 4);
}
