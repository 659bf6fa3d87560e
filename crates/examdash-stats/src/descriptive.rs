use crate::percentiles;

/// Computes the arithmetic mean of `values`.
///
/// Returns `f64::NAN` when `values` is empty, so callers that must still produce a
/// chart (e.g. a question nobody answered) get a well-defined sentinel instead of
/// an error.
///
/// # Examples
///
/// ```
/// # use examdash_stats::descriptive::mean;
/// assert_eq!(mean(&[2.0, 1.0]), 1.5);
/// assert!(mean(&[]).is_nan());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Summary statistics for a sample of scores.
///
/// Quartiles and the median use the nearest-rank method, matching the quartiles fed to
/// the adaptive bin width.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of values in the sample.
    pub count: usize,
    /// The minimum value.
    pub min: f64,
    /// The maximum value.
    pub max: f64,
    /// The arithmetic mean.
    pub mean: f64,
    /// First quartile (nearest rank).
    pub q1: f64,
    /// Median (nearest rank).
    pub median: f64,
    /// Third quartile (nearest rank).
    pub q3: f64,
}

impl Summary {
    /// Computes summary statistics from unsorted values.
    ///
    /// Non-finite values (missing scores) are dropped first.
    ///
    /// # Returns
    ///
    /// * `Some(Summary)` - if the sample contains at least one finite value
    /// * `None` - otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// # use examdash_stats::descriptive::Summary;
    /// let summary = Summary::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(summary.min, 1.0);
    /// assert_eq!(summary.max, 5.0);
    /// assert_eq!(summary.median, 3.0);
    /// assert_eq!((summary.q1, summary.q3), (2.0, 4.0));
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes summary statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        Some(Self {
            count: sorted_values.len(),
            min,
            max,
            mean: mean(sorted_values),
            q1: percentiles::nearest_rank(sorted_values, 0.25),
            median: percentiles::nearest_rank(sorted_values, 0.5),
            q3: percentiles::nearest_rank(sorted_values, 0.75),
        })
    }
}
