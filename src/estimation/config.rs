//! Estimator configuration

/// Construction parameters for a [`SimpleEstimator`](super::SimpleEstimator)
///
/// # Example
///
/// ```
/// use simple_estimator::estimation::{EstimatorConfig, SimpleEstimator};
///
/// let config = EstimatorConfig::default().with_learning_rate(0.25);
/// let estimator = SimpleEstimator::from_config(&config);
///
/// assert_eq!(estimator.default_value(), 1.0);
/// assert_eq!(estimator.learning_rate(), 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EstimatorConfig {
    /// Value assigned to every newly materialized cell
    pub default_value: f64,
    /// EMA blend factor, recommended within 0.01..=0.49
    pub learning_rate: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            default_value: 1.0,
            learning_rate: 0.1,
        }
    }
}

impl EstimatorConfig {
    pub fn new(default_value: f64, learning_rate: f64) -> Self {
        Self {
            default_value,
            learning_rate,
        }
    }

    pub fn with_default_value(mut self, default_value: f64) -> Self {
        self.default_value = default_value;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Whether the learning rate lies in the recommended range
    pub fn has_recommended_learning_rate(&self) -> bool {
        super::is_recommended_learning_rate(self.learning_rate)
    }
}
