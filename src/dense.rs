//! Heap-allocated dense store.

use crate::scalar::Scalar;
use crate::store::{LinearAccess, Store};

/// Contiguous heap storage of `len` elements.
///
/// The length is fixed at construction; arrays built on top of it are not
/// resizable. Contiguous (`step == 1`) bulk operations run directly over
/// the underlying slice.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseStore<N: Scalar> {
    data: Vec<N>,
}

impl<N: Scalar> DenseStore<N> {
    /// Zero-filled store of the given length.
    pub fn zero(len: usize) -> Self {
        Self {
            data: vec![N::zero(); len],
        }
    }

    /// Store filled with successive supplier values.
    pub fn filled_with<F: FnMut() -> N>(len: usize, mut supplier: F) -> Self {
        let mut data = Vec::with_capacity(len);
        for _ in 0..len {
            data.push(supplier());
        }
        Self { data }
    }

    /// Take ownership of existing element data.
    pub fn from_vec(data: Vec<N>) -> Self {
        Self { data }
    }

    #[inline]
    pub fn as_slice(&self) -> &[N] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [N] {
        &mut self.data
    }
}

impl<N: Scalar> LinearAccess<N> for DenseStore<N> {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn value_at(&self, index: usize) -> N {
        self.data[index].clone()
    }
}

impl<N: Scalar> Store<N> for DenseStore<N> {
    #[inline]
    fn set(&mut self, index: usize, value: N) {
        self.data[index] = value;
    }

    fn fill(&mut self, first: usize, limit: usize, step: usize, value: &N) {
        if step == 1 {
            self.data[first..limit].fill(value.clone());
        } else {
            let mut i = first;
            while i < limit {
                self.data[i] = value.clone();
                i += step;
            }
        }
    }

    fn fill_with<F: FnMut() -> N>(
        &mut self,
        first: usize,
        limit: usize,
        step: usize,
        mut supplier: F,
    ) {
        if step == 1 {
            for slot in &mut self.data[first..limit] {
                *slot = supplier();
            }
        } else {
            let mut i = first;
            while i < limit {
                self.data[i] = supplier();
                i += step;
            }
        }
    }

    fn modify<F: Fn(&N) -> N>(&mut self, first: usize, limit: usize, step: usize, function: F) {
        if step == 1 {
            for slot in &mut self.data[first..limit] {
                *slot = function(slot);
            }
        } else {
            let mut i = first;
            while i < limit {
                let value = function(&self.data[i]);
                self.data[i] = value;
                i += step;
            }
        }
    }

    fn visit<F: FnMut(&N)>(&self, first: usize, limit: usize, step: usize, mut visitor: F) {
        if step == 1 {
            for value in &self.data[first..limit] {
                visitor(value);
            }
        } else {
            let mut i = first;
            while i < limit {
                visitor(&self.data[i]);
                i += step;
            }
        }
    }

    fn exchange(&mut self, first_a: usize, first_b: usize, step: usize, count: usize) {
        let mut a = first_a;
        let mut b = first_b;
        for _ in 0..count {
            self.data.swap(a, b);
            a += step;
            b += step;
        }
    }

    fn index_of_largest(&self, first: usize, limit: usize, step: usize) -> usize {
        let mut result = first;
        let mut largest = 0.0;
        let mut i = first;
        while i < limit {
            let magnitude = self.data[i].magnitude();
            if magnitude > largest {
                largest = magnitude;
                result = i;
            }
            i += step;
        }
        result
    }
}
