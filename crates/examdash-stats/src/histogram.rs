use std::ops::Range;

use crate::binning;

/// How a sample is divided into bins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BinningStrategy {
    /// Bin width chosen by [`binning::adaptive_bin_width`], then stretched so that the
    /// bins exactly span `[min, max]` of the sample. At most [`binning::MAX_BINS`] bins
    /// are produced.
    #[default]
    Adaptive,
    /// `bins` unit-width bins starting at zero. Values are assigned to `floor(value)`,
    /// clamped into the available bins.
    Fixed {
        /// Number of bins, clamped to `1..=`[`binning::MAX_BINS`].
        bins: usize,
    },
}

/// A histogram representation of a sample's distribution.
///
/// Bins are contiguous, non-overlapping and all share [`Histogram::width`]. The sum of
/// the bin counts always equals the number of finite values the histogram was built
/// from.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// The bins, ordered by their start edge.
    pub bins: Vec<HistogramBin>,
    /// The width shared by every bin.
    pub width: f64,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    ///
    /// The last bin additionally holds values equal to its end.
    pub range: Range<f64>,
    /// The number of values assigned to this bin.
    pub count: u64,
}

impl HistogramBin {
    /// Returns the midpoint of the bin.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        f64::midpoint(self.range.start, self.range.end)
    }

    /// Returns the display label of the bin: its midpoint with one decimal place.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{:.1}", self.label_value())
    }

    /// Returns the numeric value of [`Self::label`].
    #[must_use]
    pub fn label_value(&self) -> f64 {
        (self.midpoint() * 10.0).round() / 10.0
    }
}

impl Histogram {
    /// Creates a histogram from unsorted values.
    ///
    /// Non-finite values (missing scores) are dropped before binning.
    ///
    /// # Examples
    ///
    /// ```
    /// # use examdash_stats::histogram::{BinningStrategy, Histogram};
    /// let values = [1.0, f64::NAN, 2.0, 2.5, 7.0];
    /// let histogram = Histogram::new(values, BinningStrategy::Adaptive);
    /// assert_eq!(histogram.total_count(), 4);
    /// assert_eq!(histogram.bins.first().unwrap().range.start, 1.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I, strategy: BinningStrategy) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, strategy)
    }

    /// Creates a histogram from pre-sorted finite values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], strategy: BinningStrategy) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        match strategy {
            BinningStrategy::Adaptive => Self::adaptive(sorted_values),
            BinningStrategy::Fixed { bins } => {
                Self::fixed(sorted_values, bins.clamp(1, binning::MAX_BINS))
            }
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    fn adaptive(sorted_values: &[f64]) -> Self {
        let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
            return Self {
                bins: vec![HistogramBin {
                    range: 0.0..1.0,
                    count: 0,
                }],
                width: 1.0,
            };
        };

        let suggested_width = binning::adaptive_bin_width_sorted(sorted_values);
        let num_bins =
            (((max - min) / suggested_width).ceil() as usize).clamp(1, binning::MAX_BINS);

        // Stretch the width so the bins span the data range exactly
        let span = if max - min == 0.0 { 1.0 } else { max - min };
        let width = span / num_bins as f64;

        let mut bins = (0..num_bins)
            .map(|i| HistogramBin {
                range: min + (i as f64) * width..min + ((i + 1) as f64) * width,
                count: 0,
            })
            .collect::<Vec<_>>();

        for &val in sorted_values {
            // Clamp absorbs rounding at the maximum value
            let idx = ((val - min) / width).floor().max(0.0) as usize;
            bins[idx.min(num_bins - 1)].count += 1;
        }

        Self { bins, width }
    }

    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    fn fixed(sorted_values: &[f64], num_bins: usize) -> Self {
        let mut bins = (0..num_bins)
            .map(|i| HistogramBin {
                range: i as f64..(i + 1) as f64,
                count: 0,
            })
            .collect::<Vec<_>>();

        for &val in sorted_values {
            let idx = val.floor().max(0.0) as usize;
            bins[idx.min(num_bins - 1)].count += 1;
        }

        Self { bins, width: 1.0 }
    }

    /// Returns the total number of values counted in the histogram.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Returns the start edge of every bin.
    pub fn edges(&self) -> impl Iterator<Item = f64> + '_ {
        self.bins.iter().map(|bin| bin.range.start)
    }

    /// Returns the display labels of every bin.
    pub fn labels(&self) -> impl Iterator<Item = String> + '_ {
        self.bins.iter().map(HistogramBin::label)
    }

    /// Returns the numeric label values of every bin, in bin order.
    #[must_use]
    pub fn label_values(&self) -> Vec<f64> {
        self.bins.iter().map(HistogramBin::label_value).collect()
    }

    /// Returns the index of the bin whose label is nearest to `value`.
    ///
    /// See [`closest_bin_index`].
    #[must_use]
    pub fn closest_bin(&self, value: f64) -> Option<usize> {
        closest_bin_index(value, &self.label_values())
    }
}

/// Returns the index of the label numerically nearest to `value`.
///
/// Labels are scanned linearly and ties resolve to the first occurrence. Returns
/// `None` if `labels` is empty or `value` is not finite.
///
/// Labels are rounded for display, so markers (mean, selected student) are placed by
/// nearest label rather than by recomputing the bin arithmetically.
///
/// # Examples
///
/// ```
/// use examdash_stats::histogram::closest_bin_index;
///
/// let labels = [1.5, 4.5, 7.5];
/// assert_eq!(closest_bin_index(5.9, &labels), Some(1));
/// // 3.0 is equidistant from 1.5 and 4.5: first wins
/// assert_eq!(closest_bin_index(3.0, &labels), Some(0));
/// assert_eq!(closest_bin_index(3.0, &[]), None);
/// ```
#[must_use]
pub fn closest_bin_index(value: f64, labels: &[f64]) -> Option<usize> {
    if !value.is_finite() {
        return None;
    }
    let mut labels = labels.iter().enumerate();
    let (mut best_idx, first) = labels.next()?;
    let mut best_dist = (first - value).abs();
    for (idx, label) in labels {
        let dist = (label - value).abs();
        if dist < best_dist {
            best_idx = idx;
            best_dist = dist;
        }
    }
    Some(best_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_contiguous(histogram: &Histogram) {
        for pair in histogram.bins.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
            assert!(pair[0].range.start < pair[1].range.start);
            let step = pair[1].range.start - pair[0].range.start;
            assert!((step - histogram.width).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_is_single_degenerate_bin() {
        let histogram = Histogram::new([], BinningStrategy::Adaptive);
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.width, 1.0);
        assert_eq!(histogram.bins[0].count, 0);
    }

    #[test]
    fn test_only_missing_values_is_empty() {
        let histogram = Histogram::new([f64::NAN, f64::NAN], BinningStrategy::Adaptive);
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.total_count(), 0);
    }

    #[test]
    fn test_three_values_split_in_two_bins() {
        // width 2 * 10 / cbrt(3) ~ 13.87 -> ceil(20 / 13.87) = 2 bins of width 10
        let histogram = Histogram::new([10.0, 20.0, 30.0], BinningStrategy::Adaptive);
        assert_eq!(histogram.bins.len(), 2);
        assert_eq!(histogram.width, 10.0);
        assert_eq!(histogram.edges().collect::<Vec<_>>(), vec![10.0, 20.0]);
        assert_eq!(
            histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_small_sample_collapses_to_one_bin() {
        // width ~ 13.87 covers the whole range of 10
        let histogram = Histogram::new([10.0, 20.0, 20.0], BinningStrategy::Adaptive);
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.width, 10.0);
        assert_eq!(histogram.bins[0].range, 10.0..20.0);
        assert_eq!(histogram.bins[0].count, 3);
        assert_eq!(histogram.bins[0].label(), "15.0");
    }

    #[test]
    fn test_constant_sample() {
        let histogram = Histogram::new([4.0; 10], BinningStrategy::Adaptive);
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.width, 1.0);
        assert_eq!(histogram.bins[0].count, 10);
        assert_eq!(histogram.bins[0].label_value(), 4.5);
    }

    #[test]
    fn test_counts_sum_to_sample_size() {
        let values = (0..200)
            .map(|i| f64::from((i * 37) % 101) * 0.31)
            .collect::<Vec<_>>();
        let histogram = Histogram::new(values.iter().copied(), BinningStrategy::Adaptive);
        assert_eq!(histogram.total_count(), values.len() as u64);
        assert_contiguous(&histogram);
        // Maximum value is clamped into the last bin
        assert!(histogram.bins.last().unwrap().count > 0);
    }

    #[test]
    fn test_bins_span_data_range() {
        let values = [0.5, 3.25, 9.0, 12.0, 14.75, 31.5];
        let histogram = Histogram::new(values, BinningStrategy::Adaptive);
        let first = histogram.bins.first().unwrap();
        let last = histogram.bins.last().unwrap();
        assert_eq!(first.range.start, 0.5);
        assert!((last.range.end - 31.5).abs() < 1e-9);
        assert_contiguous(&histogram);
    }

    #[test]
    fn test_fixed_bins() {
        let values = [0.0, 0.5, 3.0, 15.9, 16.0, 40.0, -1.0];
        let histogram = Histogram::new(values, BinningStrategy::Fixed { bins: 16 });
        assert_eq!(histogram.bins.len(), 16);
        assert_eq!(histogram.width, 1.0);
        assert_eq!(histogram.bins[0].count, 3);
        assert_eq!(histogram.bins[3].count, 1);
        assert_eq!(histogram.bins[15].count, 3);
        assert_eq!(histogram.total_count(), 7);
        assert_contiguous(&histogram);
    }

    #[test]
    fn test_outlier_caps_bin_count() {
        let histogram = Histogram::new([0.0, 1.0, 2.0, 1e30], BinningStrategy::Adaptive);
        assert_eq!(histogram.bins.len(), binning::MAX_BINS);
        assert_eq!(histogram.total_count(), 4);
        assert_eq!(histogram.bins[0].count, 3);
        assert_eq!(histogram.bins.last().unwrap().count, 1);

        let mut values = (0..200).map(|i| f64::from(i % 33)).collect::<Vec<_>>();
        values.push(3e6);
        let histogram = Histogram::new(values, BinningStrategy::Adaptive);
        assert_eq!(histogram.bins.len(), binning::MAX_BINS);
        assert_eq!(histogram.total_count(), 201);
        assert_contiguous(&histogram);
    }

    #[test]
    fn test_fixed_bins_are_capped() {
        let histogram = Histogram::new([5.0], BinningStrategy::Fixed { bins: usize::MAX });
        assert_eq!(histogram.bins.len(), binning::MAX_BINS);
        assert_eq!(histogram.total_count(), 1);
    }

    #[test]
    fn test_fixed_zero_bins_is_one_bin() {
        let histogram = Histogram::new([1.0, 2.0], BinningStrategy::Fixed { bins: 0 });
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.total_count(), 2);
    }

    #[test]
    fn test_labels_are_rounded_midpoints() {
        let histogram = Histogram::new([0.0, 1.0, 10.0], BinningStrategy::Adaptive);
        for (label, value) in histogram.labels().zip(histogram.label_values()) {
            assert_eq!(label, format!("{value:.1}"));
        }
    }

    #[test]
    fn test_closest_bin_index_is_idempotent() {
        let labels = [2.5, 7.5, 12.5, 17.5];
        for value in [-3.0, 0.0, 5.0, 9.9, 12.5, 40.0] {
            let first = closest_bin_index(value, &labels);
            assert_eq!(first, closest_bin_index(value, &labels));
            assert!(first.is_some());
        }
    }

    #[test]
    fn test_closest_bin_index_extremes() {
        let labels = [2.5, 7.5, 12.5];
        assert_eq!(closest_bin_index(-10.0, &labels), Some(0));
        assert_eq!(closest_bin_index(100.0, &labels), Some(2));
        assert_eq!(closest_bin_index(f64::NAN, &labels), None);
    }

    #[test]
    fn test_closest_bin_matches_histogram() {
        let histogram = Histogram::new([10.0, 20.0, 30.0], BinningStrategy::Adaptive);
        assert_eq!(histogram.closest_bin(20.0), Some(0));
        assert_eq!(histogram.closest_bin(29.0), Some(1));
    }
}
