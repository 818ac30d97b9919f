//! Lookup-and-adapt estimation over categorical keys
//!
//! This module provides an estimator keyed by three categorical dimensions.
//! Each cell starts at a default value and is nudged toward observed values
//! with an exponential moving average (EMA).
//!
//! # Algorithms
//!
//! - [`SimpleEstimator`]: lazily grown three-level table with EMA updates
//!
//! # Example
//!
//! ```
//! use simple_estimator::estimation::SimpleEstimator;
//! use simple_estimator::traits::{AdaptiveEstimator, Index};
//!
//! // keyword 2, country 0, language 1
//! let key = Index::new(2, 0, 1);
//! let mut estimator = SimpleEstimator::new(1.0, 0.1);
//!
//! let served = estimator.estimate(key);
//! assert_eq!(served, 1.0);
//!
//! estimator.update_with_estimation(key, 3.0).unwrap();
//! println!("next estimate: {}", estimator.estimate(key));
//! ```

mod config;
mod table;

pub use config::EstimatorConfig;
pub use table::SimpleEstimator;

use crate::math;
use core::ops::RangeInclusive;

/// Learning rates that keep the EMA both responsive and stable
///
/// Values outside this range are accepted but not recommended.
pub const RECOMMENDED_LEARNING_RATE: RangeInclusive<f64> = 0.01..=0.49;

/// Check whether a learning rate falls in [`RECOMMENDED_LEARNING_RATE`]
pub fn is_recommended_learning_rate(learning_rate: f64) -> bool {
    RECOMMENDED_LEARNING_RATE.contains(&learning_rate)
}

/// One EMA step: `(1 - learning_rate) * current + learning_rate * observed`
#[inline]
pub fn ema_blend(current: f64, observed: f64, learning_rate: f64) -> f64 {
    (1.0 - learning_rate) * current + learning_rate * observed
}

/// Fraction of the initial error left after `steps` updates toward a fixed target
///
/// Each update shrinks the distance to the target by `1 - learning_rate`.
pub fn residual_after(learning_rate: f64, steps: u32) -> f64 {
    let steps = i32::try_from(steps).unwrap_or(i32::MAX);
    math::powi(1.0 - learning_rate, steps)
}

/// Number of updates toward a fixed target needed for the residual error to
/// drop to `tolerance` (as a fraction of the initial error)
///
/// Returns `None` if `learning_rate` or `tolerance` lies outside `(0, 1)`, or
/// if the step count does not fit in a `u32`.
pub fn steps_to_converge(learning_rate: f64, tolerance: f64) -> Option<u32> {
    if !(learning_rate > 0.0 && learning_rate < 1.0) || !(tolerance > 0.0 && tolerance < 1.0) {
        return None;
    }
    // (1 - lr)^n <= tol  =>  n >= ln(tol) / ln(1 - lr)
    let steps = math::ceil(math::ln(tolerance) / math::ln(1.0 - learning_rate));
    if steps.is_finite() && steps <= f64::from(u32::MAX) {
        Some(steps as u32)
    } else {
        None
    }
}
