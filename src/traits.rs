//! Core traits for adaptive estimators
//!
//! Estimators implement the base [`AdaptiveEstimator`] trait: serve an estimate
//! for a key, learn from the observed value, and expose their weights for
//! snapshot and restore.

use core::fmt::Debug;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "std")]
use std::vec::Vec;

/// Three-level ragged weight table
///
/// Each second- and third-level sequence may have a different length,
/// reflecting the order in which cells were first requested.
pub type Weights = Vec<Vec<Vec<f64>>>;

/// A cell address in the weight table
///
/// `(i, j, k)` from the most to the least significant category. Components are
/// non-negative by construction; signed triples go through [`TryFrom`] and are
/// rejected with [`EstimatorError::InvalidIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Index {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

impl Index {
    /// Create an index from its three components
    pub const fn new(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k }
    }

    /// Components as an array, most significant first
    pub const fn to_array(self) -> [usize; 3] {
        [self.i, self.j, self.k]
    }

    fn from_signed(components: [i64; 3]) -> Result<Self, EstimatorError> {
        let mut out = [0usize; 3];
        for (position, (&value, slot)) in components.iter().zip(out.iter_mut()).enumerate() {
            *slot = usize::try_from(value)
                .map_err(|_| EstimatorError::InvalidIndex { position, value })?;
        }
        Ok(Self::new(out[0], out[1], out[2]))
    }
}

impl core::fmt::Display for Index {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.i, self.j, self.k)
    }
}

impl From<[usize; 3]> for Index {
    fn from(value: [usize; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<(usize, usize, usize)> for Index {
    fn from((i, j, k): (usize, usize, usize)) -> Self {
        Self::new(i, j, k)
    }
}

impl TryFrom<[i64; 3]> for Index {
    type Error = EstimatorError;

    fn try_from(value: [i64; 3]) -> Result<Self, Self::Error> {
        Self::from_signed(value)
    }
}

impl TryFrom<(i64, i64, i64)> for Index {
    type Error = EstimatorError;

    fn try_from((i, j, k): (i64, i64, i64)) -> Result<Self, Self::Error> {
        Self::from_signed([i, j, k])
    }
}

impl TryFrom<[i32; 3]> for Index {
    type Error = EstimatorError;

    fn try_from(value: [i32; 3]) -> Result<Self, Self::Error> {
        Self::from_signed(value.map(i64::from))
    }
}

/// Error raised by estimator operations
///
/// A failed call never modifies the weight table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimatorError {
    /// An index component was negative
    InvalidIndex {
        /// Component position, 0 for `i` through 2 for `k`
        position: usize,
        value: i64,
    },
    /// The cell has not been materialized by a prior estimate
    OutOfBounds { index: Index },
}

impl core::fmt::Display for EstimatorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EstimatorError::InvalidIndex { position, value } => {
                write!(f, "invalid index: component {} is negative ({})", position, value)
            }
            EstimatorError::OutOfBounds { index } => {
                write!(f, "index out of bounds: {} has not been estimated yet", index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EstimatorError {}

/// Core trait for lookup-and-adapt estimators
pub trait AdaptiveEstimator: Clone + Debug {
    /// Serve the estimate for `index`, materializing the cell if needed
    fn estimate(&mut self, index: Index) -> f64;

    /// Blend an observed value into an existing cell
    ///
    /// Returns [`EstimatorError::OutOfBounds`] if the cell was never estimated.
    fn update_with_estimation(&mut self, index: Index, estimation: f64)
        -> Result<(), EstimatorError>;

    /// Blend factor applied by [`update_with_estimation`](Self::update_with_estimation)
    fn learning_rate(&self) -> f64;

    /// Deep copy of the current weights
    fn weights(&self) -> Weights;

    /// Replace all weights with a copy of `weights`
    fn set_weights(&mut self, weights: &[Vec<Vec<f64>>]);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Serve the estimate, then learn from `estimation`
    ///
    /// Returns the value served before the update, or the update's error if
    /// the estimator did not materialize the cell on read.
    fn observe(&mut self, index: Index, estimation: f64) -> Result<f64, EstimatorError> {
        let served = self.estimate(index);
        self.update_with_estimation(index, estimation)?;
        Ok(served)
    }
}
