use std::path::PathBuf;

use chrono::{DateTime, Utc};
use examdash_dashboard::{
    chart::ChartSet,
    config::HighlightStyle,
    dashboard::Dashboard,
    state::{DashboardState, Event},
};
use examdash_dataset::{Metric, Module};
use serde::Serialize;

use crate::{command::DatasetArg, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ExportArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    /// Student to highlight
    #[arg(long)]
    student: Option<String>,
    /// Summary metric for the histogram (total, mod1, mod2)
    #[arg(long)]
    metric: Option<Metric>,
    /// Module for the question charts (mod1, mod2)
    #[arg(long)]
    module: Option<Module>,
    /// Histogram highlight style, overriding the configuration (marker, annotation)
    #[arg(long)]
    highlight: Option<HighlightStyle>,
    /// Output file path (stdout if not specified)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ChartExport {
    generated_at: DateTime<Utc>,
    source: String,
    student_count: usize,
    status: String,
    charts: ChartSet,
}

pub(crate) fn run(arg: &ExportArg) -> anyhow::Result<()> {
    let ExportArg {
        dataset,
        student,
        metric,
        module,
        highlight,
        output,
    } = arg;

    let mut config = util::read_config_file(dataset.config.as_deref())?;
    if let Some(highlight) = highlight {
        config.highlight = *highlight;
    }
    let records = util::read_results_file(&dataset.results_file, &config)?;
    let dashboard = Dashboard::new(records, config);

    let mut events = vec![];
    events.extend(metric.map(Event::SelectMetric));
    events.extend(module.map(Event::SelectModule));
    events.extend(student.clone().map(Event::Search));
    let state = events
        .into_iter()
        .fold(DashboardState::default(), |state, event| {
            dashboard.apply(state, event)
        });

    let export = build_export(&dashboard, &state, &dataset.results_file.display().to_string());
    tracing::info!("{}", export.status);
    util::Output::save_json(&export, output.clone())?;
    Ok(())
}

fn build_export(dashboard: &Dashboard, state: &DashboardState, source: &str) -> ChartExport {
    let view = dashboard.render(state);
    let adapter = dashboard.config().highlight.adapter();
    ChartExport {
        generated_at: Utc::now(),
        source: source.to_owned(),
        student_count: view.student_count,
        status: view.status.clone(),
        charts: ChartSet::new(&view, adapter),
    }
}

#[cfg(test)]
mod tests {
    use examdash_dashboard::config::DashboardConfig;
    use examdash_dataset::{Dataset, StudentRecord};

    use super::*;

    fn dashboard(highlight: HighlightStyle) -> Dashboard {
        let records = [("A1", 10.0), ("B2", 20.0), ("C3", 30.0)]
            .into_iter()
            .map(|(id, total)| StudentRecord {
                total: Some(total),
                ..StudentRecord::new(id)
            })
            .collect();
        let config = DashboardConfig {
            highlight,
            jitter_seed: Some(5),
            ..DashboardConfig::default()
        };
        Dashboard::new(Dataset::new(records), config)
    }

    #[test]
    fn test_export_with_annotation() {
        let dashboard = dashboard(HighlightStyle::Annotation);
        let state = dashboard.apply(DashboardState::default(), Event::Search("C3".to_owned()));
        let export = build_export(&dashboard, &state, "results.csv");
        assert_eq!(export.status, "Matricola C3 | Total: 30");
        assert_eq!(export.charts.histogram.annotations.len(), 1);
        assert_eq!(export.charts.scatters.len(), 2);

        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["student_count"], 3);
        assert!(json["generated_at"].is_string());
        assert_eq!(json["charts"]["histogram"]["annotations"][0]["label"], "C3: 30");
    }

    #[test]
    fn test_export_without_student() {
        let dashboard = dashboard(HighlightStyle::Marker);
        let export = build_export(&dashboard, &DashboardState::default(), "results.csv");
        assert_eq!(export.status, "no matricola selected");
        assert!(export.charts.histogram.annotations.is_empty());
        assert_eq!(export.charts.histogram.series.len(), 2);
    }
}
