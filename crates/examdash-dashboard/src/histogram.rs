use examdash_dataset::{Dataset, Metric};
use examdash_stats::{
    descriptive,
    histogram::{BinningStrategy, Histogram},
};

/// Distribution of one summary metric across the dataset.
///
/// Holds everything the histogram chart needs that does not depend on the selected
/// student: the bins, the sample mean and the bin the mean marker sits on.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramModel {
    pub metric: Metric,
    pub histogram: Histogram,
    /// Number of students with a value for the metric.
    pub sample_size: usize,
    /// Mean of the metric; NaN when no student has a value.
    pub mean: f64,
    /// Bin nearest to the mean, by label.
    pub mean_bin: Option<usize>,
}

impl HistogramModel {
    /// Builds the histogram of `metric`, skipping students without a value.
    #[must_use]
    pub fn build(dataset: &Dataset, metric: Metric, strategy: BinningStrategy) -> Self {
        let values = dataset.metric_values(metric).flatten().collect::<Vec<_>>();
        let histogram = Histogram::new(values.iter().copied(), strategy);
        let mean = descriptive::mean(&values);
        let mean_bin = histogram.closest_bin(mean);
        tracing::debug!(
            "{metric} histogram: {} values in {} bins of width {:.3}",
            values.len(),
            histogram.bins.len(),
            histogram.width
        );
        Self {
            metric,
            histogram,
            sample_size: values.len(),
            mean,
            mean_bin,
        }
    }

    /// Returns the bin a marker for `value` is drawn on.
    #[must_use]
    pub fn locate(&self, value: f64) -> Option<usize> {
        self.histogram.closest_bin(value)
    }

    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.histogram.labels().collect()
    }

    #[must_use]
    pub fn counts(&self) -> Vec<u64> {
        self.histogram.bins.iter().map(|bin| bin.count).collect()
    }
}
