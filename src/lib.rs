//! Storage core for N-dimensional numeric arrays.
//!
//! This crate provides a uniform abstraction for one-, two-, and
//! N-dimensional arrays of numbers over interchangeable physical
//! representations:
//!
//! - [`DenseStore`]: heap-allocated contiguous storage
//! - [`OffHeapStore`]: manually managed native memory, in 32-bit or 64-bit
//!   float width
//! - [`SparseStore`]: mapping-based storage for very large, mostly-zero
//!   arrays
//! - [`BasicStore`]: a facade that picks dense or sparse once, at
//!   construction, based on the element count
//!
//! All of them expose the same linear get/set/fill/modify/visit contract
//! through the [`Store`] trait, so consumers never depend on which
//! representation is in use.
//!
//! # Core Types
//!
//! - [`ArrayNd`]: the user-facing N-dimensional view combining a backing
//!   store with a shape
//! - [`SliceView`] / [`SliceViewMut`]: strided one-dimensional views sharing
//!   storage with their source array
//! - [`Scalar`]: the element-kind capability implemented by `f64`,
//!   [`Complex64`](num_complex::Complex64), [`Quaternion`],
//!   [`Rational64`](num_rational::Rational64), and
//!   [`BigRational`](num_rational::BigRational)
//! - [`ArrayFactory`] / [`OffHeapFactory`]: per-kind factories producing
//!   zero-filled, supplier-filled, or copied arrays of a requested shape
//!
//! # Index convention
//!
//! The first declared dimension varies fastest: the stride of dimension 0
//! is 1, and each dimension's stride equals the product of the extents of
//! all lower-numbered dimensions. See [`layout`] for the pure mapping
//! functions.
//!
//! # Example
//!
//! ```rust
//! use ndstore::{layout, ArrayFactory};
//!
//! let factory = ArrayFactory::<f64>::new();
//! let mut array = factory.make_zero(&[2, 3]).unwrap();
//!
//! array.set(&[1, 2], 5.0);
//! assert_eq!(array.get(&[1, 2]), 5.0);
//! assert_eq!(layout::index_of(array.shape(), &[1, 2]), 5);
//! assert_eq!(array.get_at(5), 5.0);
//! ```
//!
//! # Concurrency
//!
//! No operation is internally synchronized; callers must serialize
//! concurrent mutations to the same store. Concurrent reads of a
//! never-mutated array are safe.

mod array;
mod basic;
mod dense;
mod factory;
pub mod layout;
mod offheap;
mod scalar;
mod slice;
mod sparse;
mod store;

// ============================================================================
// Element kinds
// ============================================================================
pub use scalar::{Quaternion, Scalar};

// ============================================================================
// Backing stores
// ============================================================================
pub use basic::BasicStore;
pub use dense::DenseStore;
pub use offheap::{NativeFloat, OffHeapStore};
pub use sparse::SparseStore;
pub use store::{LinearAccess, Store};

// ============================================================================
// Views
// ============================================================================
pub use array::ArrayNd;
pub use slice::{SliceView, SliceViewMut};

// ============================================================================
// Factories
// ============================================================================
pub use factory::{
    ArrayFactory, BigArray, ComplexArray, OffHeap32Array, OffHeap64Array, OffHeapFactory,
    PrimitiveArray, QuaternionArray, RationalArray,
};

// ============================================================================
// Constants
// ============================================================================

/// Element-count limit above which [`BasicStore`] switches to the sparse
/// representation.
///
/// Dense storage of this many `f64` elements occupies 128 MiB. The value is
/// a tuning choice, not an observable contract; factories accept an
/// override via [`ArrayFactory::with_dense_limit`].
pub const DENSE_COUNT_LIMIT: usize = 1 << 24;

// ============================================================================
// Error types
// ============================================================================

/// Errors raised at the checked public boundaries of the crate.
///
/// Out-of-range linear access below the view boundary is a caller contract
/// violation handled by debug assertions, not by this enum.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Coordinate rank does not match the array rank.
    #[error("rank mismatch: {0} vs {1}")]
    RankMismatch(usize, usize),

    /// Two operands expected to share a shape do not.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Invalid dimension index for the given array rank.
    #[error("invalid dimension {dimension} for rank {rank}")]
    InvalidDimension { dimension: usize, rank: usize },

    /// Element count of the shape overflows the index space.
    #[error("element count overflow for shape {0:?}")]
    CountOverflow(Vec<usize>),

    /// Coordinate outside the declared shape.
    #[error("coordinate {coordinate:?} out of bounds for shape {shape:?}")]
    CoordinateOutOfBounds {
        coordinate: Vec<usize>,
        shape: Vec<usize>,
    },

    /// Linear index or range outside the valid element domain.
    #[error("index {index} out of bounds for count {count}")]
    IndexOutOfBounds { index: usize, count: usize },

    /// Backing store too small for the requested shape.
    #[error("store capacity {capacity} insufficient for element count {count}")]
    InsufficientCapacity { count: usize, capacity: usize },
}

/// Result type for store and array operations.
pub type Result<T> = std::result::Result<T, StoreError>;
