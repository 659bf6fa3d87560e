//! Adaptive bin width selection.
//!
//! The width follows a Freedman–Diaconis style rule, `2 * IQR / cbrt(n)`, computed from
//! nearest-rank quartiles. Two guards keep the result usable on exam data, where
//! scores are coarse and often concentrated on a handful of values:
//!
//! - an interquartile range of zero is replaced by `1`
//! - the width never drops below [`MIN_BIN_WIDTH`]
//!
//! # Examples
//!
//! ```
//! use examdash_stats::binning::{MIN_BIN_WIDTH, adaptive_bin_width};
//!
//! // Constant data has IQR 0, which is treated as 1
//! let width = adaptive_bin_width(&[5.0; 8]);
//! assert_eq!(width, 1.0);
//!
//! assert!(adaptive_bin_width(&[1.0, 1.0, 1.0, 1.1]) >= MIN_BIN_WIDTH);
//! ```

use crate::percentiles;

/// Lower bound for the adaptive bin width.
pub const MIN_BIN_WIDTH: f64 = 0.5;

/// Upper bound for the number of bins of a histogram. Past this count the bins are
/// widened instead.
pub const MAX_BINS: usize = 100;

/// Computes the adaptive bin width for unsorted values.
///
/// Returns `max(0.5, 2 * iqr / cbrt(n))` with `iqr = q3 - q1` (or `1` if zero).
/// Non-finite values are ignored. For empty input the quartiles are NaN and the floor
/// value `0.5` is returned.
#[must_use]
pub fn adaptive_bin_width(values: &[f64]) -> f64 {
    let mut sorted = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .collect::<Vec<_>>();
    sorted.sort_by(f64::total_cmp);
    adaptive_bin_width_sorted(&sorted)
}

/// Like [`adaptive_bin_width`], but skips the sort.
///
/// # Panics
///
/// Panics if `sorted_values` is not sorted in ascending order.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn adaptive_bin_width_sorted(sorted_values: &[f64]) -> f64 {
    let (q1, q3) = percentiles::quartiles_sorted(sorted_values);
    let mut iqr = q3 - q1;
    if iqr == 0.0 {
        iqr = 1.0;
    }
    let width = 2.0 * iqr / (sorted_values.len() as f64).cbrt();
    // f64::max ignores a NaN operand, so empty input lands on the floor
    f64::max(MIN_BIN_WIDTH, width)
}
