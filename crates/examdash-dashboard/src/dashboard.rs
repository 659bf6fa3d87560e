use examdash_dataset::{Dataset, Metric, Module};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::{
    config::{BackgroundPolicy, DashboardConfig},
    histogram::HistogramModel,
    scatter::{ScatterModel, ScatterPoint},
    state::{DashboardState, Event, Selection},
    view::{BinMarker, DashboardView, HistogramView, ScatterView, StudentPanel, format_score},
};

/// The dataset together with every chart model derived from it.
///
/// Models are built once at construction. Rendering only reads them, so the scatter jitter
/// stays put while the selection changes.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    config: DashboardConfig,
    histograms: Vec<HistogramModel>,
    scatters: Vec<Vec<ScatterModel>>,
}

impl Dashboard {
    #[must_use]
    pub fn new(dataset: Dataset, config: DashboardConfig) -> Self {
        let seed = config.jitter_seed.unwrap_or_else(|| rand::rng().random());
        tracing::debug!("Jitter seed {seed}");
        let mut rng = Pcg32::seed_from_u64(seed);

        let histograms = Metric::ALL
            .iter()
            .map(|&metric| {
                HistogramModel::build(&dataset, metric, config.binning.strategy(metric))
            })
            .collect();
        let scatters = Module::ALL
            .iter()
            .map(|&module| {
                config
                    .groups
                    .iter()
                    .map(|group| ScatterModel::build(&dataset, module, group, &mut rng))
                    .collect()
            })
            .collect();

        Self {
            dataset,
            config,
            histograms,
            scatters,
        }
    }

    /// A dashboard over no students, shown when the results cannot be loaded.
    #[must_use]
    pub fn empty(config: DashboardConfig) -> Self {
        Self::new(Dataset::default(), config)
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn histogram(&self, metric: Metric) -> &HistogramModel {
        &self.histograms[metric.index()]
    }

    #[must_use]
    pub fn scatters(&self, module: Module) -> &[ScatterModel] {
        &self.scatters[module.index()]
    }

    /// Applies `event` against this dashboard's identifier index.
    #[must_use]
    pub fn apply(&self, state: DashboardState, event: Event) -> DashboardState {
        state.apply(self.dataset.index(), event)
    }

    /// Returns the status line for `state`.
    #[must_use]
    pub fn status_text(&self, state: &DashboardState) -> String {
        match &state.selection {
            Selection::Selected(id) => match self.dataset.exact_match(id) {
                Some(record) => format!(
                    "Matricola {id} | {}: {}",
                    state.metric,
                    format_score(record.metric(state.metric))
                ),
                None => format!("matricola {id} not found"),
            },
            Selection::Unselected => match &state.search_miss {
                Some(term) => format!("matricola {term} not found"),
                None => "no matricola selected".to_owned(),
            },
        }
    }

    /// Computes every view from scratch for `state`.
    #[must_use]
    pub fn render(&self, state: &DashboardState) -> DashboardView {
        let selected = state
            .selection
            .id()
            .and_then(|id| self.dataset.exact_match(id));

        DashboardView {
            student_count: self.dataset.len(),
            metric: state.metric,
            module: state.module,
            histogram: self.histogram_view(state.metric, state.selection.id()),
            scatters: self
                .scatters(state.module)
                .iter()
                .map(|model| self.scatter_view(model, state.selection.id()))
                .collect(),
            status: self.status_text(state),
            student: selected.map(|record| StudentPanel {
                id: record.id.clone(),
                scores: Metric::ALL.map(|metric| (metric, record.metric(metric))),
            }),
        }
    }

    fn histogram_view(&self, metric: Metric, selected: Option<&str>) -> HistogramView {
        let model = self.histogram(metric);
        let marker = selected
            .and_then(|id| self.dataset.exact_match(id))
            .and_then(|record| {
                let value = record.metric(metric)?;
                let index = model.locate(value)?;
                Some(BinMarker {
                    index,
                    value,
                    label: format!("{}: {value}", record.id),
                })
            });
        HistogramView {
            title: format!("{metric} distribution ({} students)", model.sample_size),
            labels: model.labels(),
            counts: model.counts(),
            mean: (!model.mean.is_nan()).then_some(model.mean),
            mean_bin: model.mean_bin,
            selected: marker,
        }
    }

    fn scatter_view(&self, model: &ScatterModel, selected: Option<&str>) -> ScatterView {
        let coords = |points: Vec<&ScatterPoint>| {
            points.into_iter().map(|p| (p.x, p.y)).collect::<Vec<_>>()
        };
        let (background, selected) = match selected {
            None => (model.points.iter().map(|p| (p.x, p.y)).collect(), vec![]),
            Some(id) => {
                let (mine, others) = model.partition(id);
                let background = match self.config.background {
                    BackgroundPolicy::Dim => coords(others),
                    BackgroundPolicy::Hide => vec![],
                };
                (background, coords(mine))
            }
        };
        ScatterView {
            title: format!("{} ({})", model.group.name, model.module),
            x_range: model.group.x_range(),
            y_range: model.group.y_range,
            questions: model.group.questions.clone(),
            background,
            selected,
            means: model.means.iter().map(|m| (m.question, m.y)).collect(),
            mean_segments: model.mean_segments().collect(),
        }
    }
}
