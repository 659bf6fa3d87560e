use examdash_dashboard::histogram::HistogramModel;
use examdash_dataset::{Dataset, Metric};
use examdash_stats::{descriptive::Summary, histogram::BinningStrategy};
use serde::Serialize;

use crate::{command::DatasetArg, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SummaryArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct DatasetSummary {
    students: usize,
    duplicate_ids: usize,
    metrics: Vec<MetricSummary>,
}

#[derive(Debug, Serialize)]
struct MetricSummary {
    metric: String,
    count: usize,
    min: Option<f64>,
    q1: Option<f64>,
    median: Option<f64>,
    mean: Option<f64>,
    q3: Option<f64>,
    max: Option<f64>,
    bin_width: f64,
    bins: Vec<BinSummary>,
}

#[derive(Debug, Serialize)]
struct BinSummary {
    label: String,
    start: f64,
    end: f64,
    count: u64,
}

impl MetricSummary {
    fn new(model: &HistogramModel, summary: Option<&Summary>) -> Self {
        let field = |f: fn(&Summary) -> f64| summary.map(f);
        Self {
            metric: model.metric.to_string(),
            count: model.sample_size,
            min: field(|s| s.min),
            q1: field(|s| s.q1),
            median: field(|s| s.median),
            mean: field(|s| s.mean),
            q3: field(|s| s.q3),
            max: field(|s| s.max),
            bin_width: model.histogram.width,
            bins: model
                .histogram
                .bins
                .iter()
                .map(|bin| BinSummary {
                    label: bin.label(),
                    start: bin.range.start,
                    end: bin.range.end,
                    count: bin.count,
                })
                .collect(),
        }
    }
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let SummaryArg { dataset, json } = arg;

    let config = util::read_config_file(dataset.config.as_deref())?;
    let records = util::read_results_file(&dataset.results_file, &config)?;
    let summary = summarize(&records, |metric| config.binning.strategy(metric));

    if *json {
        util::Output::save_json(&summary, None)?;
    } else {
        print_table(&summary);
    }
    Ok(())
}

fn summarize<F>(dataset: &Dataset, strategy: F) -> DatasetSummary
where
    F: Fn(Metric) -> BinningStrategy,
{
    let metrics = Metric::ALL
        .iter()
        .map(|&metric| {
            let model = HistogramModel::build(dataset, metric, strategy(metric));
            let summary = Summary::new(dataset.metric_values(metric).flatten());
            MetricSummary::new(&model, summary.as_ref())
        })
        .collect();
    DatasetSummary {
        students: dataset.len(),
        duplicate_ids: dataset.duplicate_count(),
        metrics,
    }
}

fn print_table(summary: &DatasetSummary) {
    println!("{} studenti", summary.students);
    if summary.duplicate_ids > 0 {
        println!("{} duplicate identifiers", summary.duplicate_ids);
    }
    let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_owned(), |v| format!("{v:.2}"));
    for metric in &summary.metrics {
        println!();
        println!("{} ({} values)", metric.metric, metric.count);
        println!(
            "  Min {:>8}  Q1 {:>8}  Median {:>8}  Mean {:>8}  Q3 {:>8}  Max {:>8}",
            fmt(metric.min),
            fmt(metric.q1),
            fmt(metric.median),
            fmt(metric.mean),
            fmt(metric.q3),
            fmt(metric.max),
        );
        println!("  {} bins of width {:.3}", metric.bins.len(), metric.bin_width);
        for bin in &metric.bins {
            println!("  {:>6}  {:>4}", bin.label, bin.count);
        }
    }
}

#[cfg(test)]
mod tests {
    use examdash_dataset::StudentRecord;

    use super::*;

    #[test]
    fn test_summarize() {
        let dataset = Dataset::new(
            [("A", Some(10.0)), ("B", Some(20.0)), ("C", Some(30.0)), ("A", None)]
                .into_iter()
                .map(|(id, total)| StudentRecord {
                    total,
                    ..StudentRecord::new(id)
                })
                .collect(),
        );
        let summary = summarize(&dataset, |_| BinningStrategy::Adaptive);
        assert_eq!(summary.students, 4);
        assert_eq!(summary.duplicate_ids, 1);

        let total = &summary.metrics[0];
        assert_eq!(total.metric, "Total");
        assert_eq!(total.count, 3);
        assert_eq!(total.median, Some(20.0));
        assert_eq!(total.bins.iter().map(|b| b.count).sum::<u64>(), 3);

        let mod1 = &summary.metrics[1];
        assert_eq!(mod1.count, 0);
        assert_eq!(mod1.mean, None);
    }
}
