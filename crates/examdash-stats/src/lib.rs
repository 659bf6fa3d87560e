//! Statistical utilities for the exam dashboard.
//!
//! This crate provides the small numeric core the dashboard is built on:
//!
//! - **Descriptive statistics**: arithmetic mean and a five-number style summary
//! - **Percentiles**: nearest-rank quartiles
//! - **Binning**: adaptive (Freedman–Diaconis style) bin width selection
//! - **Histogram generation**: contiguous bins with midpoint labels, plus nearest-label
//!   lookup used to place markers on a bar chart
//!
//! Empty input never panics: statistics over zero values yield `f64::NAN`, and a
//! histogram over zero values is a single empty bin.
//!
//! # Modules
//!
//! - [`descriptive`]: Mean and summary statistics
//! - [`percentiles`]: Nearest-rank percentile and quartile computation
//! - [`binning`]: Adaptive bin width
//! - [`histogram`]: Histogram construction and label lookup
//!
//! # Examples
//!
//! ## Computing the mean
//!
//! ```
//! use examdash_stats::descriptive;
//!
//! assert_eq!(descriptive::mean(&[1.0, 2.0, 3.0]), 2.0);
//! assert!(descriptive::mean(&[]).is_nan());
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use examdash_stats::histogram::{BinningStrategy, Histogram};
//!
//! // Small samples collapse into a single bin spanning the data range
//! let values = [10.0, 20.0, 20.0];
//! let histogram = Histogram::new(values, BinningStrategy::Adaptive);
//! assert_eq!(histogram.bins.len(), 1);
//! assert_eq!(histogram.total_count(), 3);
//! ```

pub mod binning;
pub mod descriptive;
pub mod histogram;
pub mod percentiles;
