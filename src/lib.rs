//! # Simple Estimator
//!
//! Lookup-and-adapt estimation for Rust.
//!
//! A [`SimpleEstimator`] serves a numeric estimate for a key made of three
//! categorical dimensions and learns from observed values with an exponential
//! moving average. Cells are created lazily the first time a key is read.
//!
//! ## Features
//!
//! - **Lazy ragged table**: only the keys you touch take memory
//! - **EMA updates**: `new = (1 - lr) * old + lr * observed`
//! - **Snapshot/restore**: deep-copied weights for persistence by the caller
//! - **no_std**: works with `alloc` only
//!
//! ## Quick Start
//!
//! ```rust
//! use simple_estimator::prelude::*;
//!
//! // keyword, country, language
//! let key = Index::new(3, 1, 0);
//! let mut estimator = SimpleEstimator::new(10.0, 0.4);
//!
//! let served = estimator.estimate(key);
//! assert_eq!(served, 10.0);
//!
//! // Observed the true value, learn from it
//! estimator.update_with_estimation(key, 13.2).unwrap();
//! assert!(estimator.estimate(key) > served);
//! ```
//!
//! ## Persisting Weights
//!
//! The estimator performs no I/O. Take a snapshot with
//! [`weights`](SimpleEstimator::weights) and encode it however you like:
//!
//! ```rust
//! use simple_estimator::SimpleEstimator;
//!
//! let mut estimator = SimpleEstimator::new(1.0, 0.1);
//! estimator.estimate([0, 0, 0]);
//! let snapshot = estimator.weights();
//!
//! let mut restored = SimpleEstimator::new(1.0, 0.1);
//! restored.set_weights(&snapshot);
//! assert_eq!(restored.weights(), snapshot);
//! ```
//!
//! ## Feature Flags
//!
//! - `estimation` (default): the [`SimpleEstimator`] family
//! - `std` (default): Standard library support
//! - `serde`: Enable serialization
//! - `full`: Enable everything

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Core traits always available
pub mod traits;

#[cfg(feature = "estimation")]
mod math;

#[cfg(feature = "estimation")]
#[cfg_attr(docsrs, doc(cfg(feature = "estimation")))]
pub mod estimation;

pub mod prelude {
    pub use crate::traits::*;

    #[cfg(feature = "estimation")]
    pub use crate::estimation::{EstimatorConfig, SimpleEstimator};
}

#[cfg(feature = "estimation")]
pub use estimation::{EstimatorConfig, SimpleEstimator};

pub use traits::{AdaptiveEstimator, EstimatorError, Index, Weights};
