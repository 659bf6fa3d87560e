/// Returns the nearest-rank value at fraction `p` (0.0 to 1.0) of sorted data.
///
/// The element at index `floor(p * (n - 1))` is returned; no interpolation is
/// performed. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use examdash_stats::percentiles::nearest_rank;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(nearest_rank(&values, 0.5), 3.0);
/// assert_eq!(nearest_rank(&values, 0.25), 2.0);
/// assert_eq!(nearest_rank(&values, 1.0), 5.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn nearest_rank(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let last = sorted_values.len() - 1;
    let idx = (p * last as f64).floor() as usize;
    sorted_values[idx.min(last)]
}

/// Computes the first and third quartiles of unsorted values.
///
/// Sorts the finite values of the input and picks the elements at
/// `floor(0.25 * (n - 1))` and `floor(0.75 * (n - 1))`. Returns `(NAN, NAN)` when no
/// finite value remains.
///
/// # Examples
///
/// ```
/// use examdash_stats::percentiles::quartiles;
///
/// // n = 3 picks indices 0 and 1
/// assert_eq!(quartiles(&[30.0, 10.0, 20.0]), (10.0, 20.0));
/// ```
#[must_use]
pub fn quartiles(values: &[f64]) -> (f64, f64) {
    let mut sorted = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .collect::<Vec<_>>();
    sorted.sort_by(f64::total_cmp);
    quartiles_sorted(&sorted)
}

/// Like [`quartiles`], but skips the sort.
///
/// # Panics
///
/// Panics if `sorted_values` is not sorted in ascending order.
#[must_use]
pub fn quartiles_sorted(sorted_values: &[f64]) -> (f64, f64) {
    assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );
    (
        nearest_rank(sorted_values, 0.25),
        nearest_rank(sorted_values, 0.75),
    )
}
