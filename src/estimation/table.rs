//! Three-level lookup table with EMA updates
//!
//! Cells are addressed by an [`Index`] triple and created on first read with
//! the configured default value. Growth is prefix-filling: asking for
//! `(i, j, k)` makes sure every level has at least `i + 1`, `j + 1` and
//! `k + 1` entries along that path, and nothing more.

use crate::estimation::{ema_blend, EstimatorConfig};
use crate::traits::{AdaptiveEstimator, EstimatorError, Index, Weights};
use tracing::{debug, trace};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Lookup-and-adapt estimator over three categorical dimensions
///
/// Serves an estimate per `(i, j, k)` key and moves it toward observed values
/// with an exponential moving average:
///
/// `new = (1 - learning_rate) * current + learning_rate * observed`
///
/// The table grows lazily and never shrinks on its own. Callers own the mapping
/// from category values to indices and should keep the index space dense.
///
/// # Example
///
/// ```
/// use simple_estimator::estimation::SimpleEstimator;
///
/// let mut estimator = SimpleEstimator::new(10.0, 0.4);
///
/// assert_eq!(estimator.estimate([2, 2, 2]), 10.0);
/// estimator.update_with_estimation([2, 2, 2], 13.2).unwrap();
/// assert!((estimator.estimate([2, 2, 2]) - 11.28).abs() < 1e-9);
/// ```
///
/// # Snapshot and restore
///
/// ```
/// use simple_estimator::estimation::SimpleEstimator;
///
/// let mut trained = SimpleEstimator::new(10.0, 0.4);
/// trained.estimate([0, 1, 2]);
/// trained.update_with_estimation([0, 1, 2], 20.0).unwrap();
///
/// let mut restored = SimpleEstimator::new(10.0, 0.4);
/// restored.set_weights(&trained.weights());
/// assert_eq!(restored.estimate([0, 1, 2]), trained.estimate([0, 1, 2]));
/// ```
#[derive(Clone, Debug)]
pub struct SimpleEstimator {
    /// Value for newly materialized cells
    default_value: f64,
    /// EMA blend factor
    learning_rate: f64,
    /// Ragged table, `weights[i][j][k]`
    weights: Weights,
}

impl Default for SimpleEstimator {
    fn default() -> Self {
        Self::from_config(&EstimatorConfig::default())
    }
}

impl SimpleEstimator {
    /// Create an empty estimator
    ///
    /// The learning rate is not validated; values within 0.01..=0.49 are
    /// recommended.
    pub fn new(default_value: f64, learning_rate: f64) -> Self {
        Self {
            default_value,
            learning_rate,
            weights: Vec::new(),
        }
    }

    /// Create an empty estimator from a configuration
    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self::new(config.default_value, config.learning_rate)
    }

    /// Configuration this estimator was built with
    pub fn config(&self) -> EstimatorConfig {
        EstimatorConfig::new(self.default_value, self.learning_rate)
    }

    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Get the estimate for `index`, creating the cell if it does not exist
    ///
    /// A new cell holds the default value. Existing cells are never
    /// overwritten by this call.
    ///
    /// # Panics
    ///
    /// Panics if a component is `usize::MAX`, or if growing the table to
    /// reach `index` exceeds the allocator's capacity.
    pub fn estimate(&mut self, index: impl Into<Index>) -> f64 {
        *self.cell_mut(index.into())
    }

    /// Move the cell at `index` toward `estimation`
    ///
    /// The cell must have been created by a prior [`estimate`](Self::estimate);
    /// otherwise [`EstimatorError::OutOfBounds`] is returned and nothing changes.
    pub fn update_with_estimation(
        &mut self,
        index: impl Into<Index>,
        estimation: f64,
    ) -> Result<(), EstimatorError> {
        let index = index.into();
        let learning_rate = self.learning_rate;

        let Some(cell) = self
            .weights
            .get_mut(index.i)
            .and_then(|second| second.get_mut(index.j))
            .and_then(|third| third.get_mut(index.k))
        else {
            debug!(%index, "update rejected, cell not materialized");
            return Err(EstimatorError::OutOfBounds { index });
        };

        let previous = *cell;
        *cell = ema_blend(previous, estimation, learning_rate);
        trace!(%index, previous, estimation, updated = *cell, "ema update");
        Ok(())
    }

    /// Serve the estimate for `index`, then learn from `estimation`
    ///
    /// Returns the value served before the update. Unlike
    /// [`update_with_estimation`](Self::update_with_estimation) this never
    /// fails, since the read creates the cell first.
    ///
    /// # Panics
    ///
    /// Same conditions as [`estimate`](Self::estimate).
    pub fn observe(&mut self, index: impl Into<Index>, estimation: f64) -> f64 {
        let learning_rate = self.learning_rate;
        let cell = self.cell_mut(index.into());
        let served = *cell;
        *cell = ema_blend(served, estimation, learning_rate);
        served
    }

    /// Read a cell without growing the table
    pub fn get(&self, index: impl Into<Index>) -> Option<f64> {
        let index = index.into();
        self.weights
            .get(index.i)
            .and_then(|second| second.get(index.j))
            .and_then(|third| third.get(index.k))
            .copied()
    }

    /// Whether the cell at `index` has been materialized
    pub fn contains(&self, index: impl Into<Index>) -> bool {
        self.get(index).is_some()
    }

    /// Deep copy of the weight table
    ///
    /// The copy shares nothing with the estimator; mutating either side leaves
    /// the other untouched.
    pub fn weights(&self) -> Weights {
        self.weights.clone()
    }

    /// Replace the weight table with a deep copy of `weights`
    ///
    /// Any ragged shape is accepted as-is.
    pub fn set_weights(&mut self, weights: &[Vec<Vec<f64>>]) {
        self.set_weights_from(weights.to_vec());
    }

    /// Replace the weight table, taking ownership of `weights`
    pub fn set_weights_from(&mut self, weights: Weights) {
        debug!(
            first_level = weights.len(),
            cells = count_cells(&weights),
            "restoring weights"
        );
        self.weights = weights;
    }

    /// Drop every cell, keeping the configuration
    pub fn clear(&mut self) {
        self.weights = Vec::new();
    }

    /// Number of materialized cells
    pub fn cell_count(&self) -> usize {
        count_cells(&self.weights)
    }

    /// Number of entries at the first level, materialized or not
    pub fn first_level_len(&self) -> usize {
        self.weights.len()
    }

    /// Check if no cell has been materialized
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Approximate memory usage in bytes, counting allocated capacity
    pub fn size_bytes(&self) -> usize {
        use core::mem::size_of;

        let mut total = size_of::<Self>() + self.weights.capacity() * size_of::<Vec<Vec<f64>>>();
        for second in &self.weights {
            total += second.capacity() * size_of::<Vec<f64>>();
            for third in second {
                total += third.capacity() * size_of::<f64>();
            }
        }
        total
    }

    fn cell_mut(&mut self, index: Index) -> &mut f64 {
        let default_value = self.default_value;

        if self.weights.len() <= index.i {
            let to = required_len(index.i);
            debug!(from = self.weights.len(), to, "growing first level");
            self.weights.resize_with(to, Vec::new);
        }

        let second = &mut self.weights[index.i];
        if second.len() <= index.j {
            let to = required_len(index.j);
            debug!(i = index.i, from = second.len(), to, "growing second level");
            second.resize_with(to, Vec::new);
        }

        let third = &mut second[index.j];
        if third.len() <= index.k {
            let to = required_len(index.k);
            debug!(i = index.i, j = index.j, from = third.len(), to, "growing third level");
            third.resize(to, default_value);
        }

        &mut third[index.k]
    }
}

/// Length a level needs to hold `position`
fn required_len(position: usize) -> usize {
    match position.checked_add(1) {
        Some(len) => len,
        None => panic!("index component {} cannot be materialized", position),
    }
}

fn count_cells(weights: &[Vec<Vec<f64>>]) -> usize {
    weights
        .iter()
        .flat_map(|second| second.iter())
        .map(|third| third.len())
        .sum()
}

impl AdaptiveEstimator for SimpleEstimator {
    fn estimate(&mut self, index: Index) -> f64 {
        SimpleEstimator::estimate(self, index)
    }

    fn update_with_estimation(
        &mut self,
        index: Index,
        estimation: f64,
    ) -> Result<(), EstimatorError> {
        SimpleEstimator::update_with_estimation(self, index, estimation)
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn weights(&self) -> Weights {
        SimpleEstimator::weights(self)
    }

    fn set_weights(&mut self, weights: &[Vec<Vec<f64>>]) {
        SimpleEstimator::set_weights(self, weights)
    }

    fn size_bytes(&self) -> usize {
        SimpleEstimator::size_bytes(self)
    }

    fn observe(&mut self, index: Index, estimation: f64) -> Result<f64, EstimatorError> {
        Ok(SimpleEstimator::observe(self, index, estimation))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SimpleEstimator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("SimpleEstimator", 3)?;
        state.serialize_field("default_value", &self.default_value)?;
        state.serialize_field("learning_rate", &self.learning_rate)?;
        state.serialize_field("weights", &self.weights)?;
        state.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SimpleEstimator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct EstimatorData {
            default_value: f64,
            learning_rate: f64,
            #[serde(default)]
            weights: Vec<Vec<Vec<f64>>>,
        }

        let data = EstimatorData::deserialize(deserializer)?;
        Ok(SimpleEstimator {
            default_value: data.default_value,
            learning_rate: data.learning_rate,
            weights: data.weights,
        })
    }
}
