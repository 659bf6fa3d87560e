use examdash_dataset::{Metric, Module, lookup::StudentIndex};

/// The student currently highlighted across all charts.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_more::IsVariant)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(String),
}

impl Selection {
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Unselected => None,
            Self::Selected(id) => Some(id),
        }
    }
}

/// User interactions that drive the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The search input changed to the given text.
    Search(String),
    /// A suggestion was chosen from the result list.
    Pick(String),
    Clear,
    SelectMetric(Metric),
    SelectModule(Module),
}

/// Everything the views depend on besides the dataset.
///
/// State changes only through [`DashboardState::apply`]; views are then rendered from the
/// new state as a whole.
///
/// # Examples
///
/// ```
/// use examdash_dashboard::state::{DashboardState, Event, Selection};
/// use examdash_dataset::lookup::StudentIndex;
///
/// let index = StudentIndex::new(["12345", "67890"]);
/// let state = DashboardState::default()
///     .apply(&index, Event::Search("1234".to_owned()))
///     .apply(&index, Event::Search("12345".to_owned()));
/// assert_eq!(state.selection, Selection::Selected("12345".to_owned()));
///
/// let state = state.apply(&index, Event::Clear);
/// assert_eq!(state, DashboardState::default());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub selection: Selection,
    /// Last search term that matched no student, shown in the status line.
    pub search_miss: Option<String>,
    /// Summary metric shown on the histogram.
    pub metric: Metric,
    /// Module whose questions are shown on the scatter plots.
    pub module: Module,
}

impl DashboardState {
    /// Returns the state after `event`.
    ///
    /// A search selects the student whose identifier equals the trimmed term and clears the
    /// selection otherwise. A pick selects its identifier without consulting the index.
    #[must_use]
    pub fn apply(self, index: &StudentIndex, event: Event) -> Self {
        match event {
            Event::Search(term) => {
                let term = term.trim();
                if index.contains(term) {
                    tracing::debug!("Search selected {term}");
                    self.select(term)
                } else {
                    Self {
                        selection: Selection::Unselected,
                        search_miss: (!term.is_empty()).then(|| term.to_owned()),
                        ..self
                    }
                }
            }
            Event::Pick(id) => self.select(id.trim()),
            Event::Clear => Self {
                selection: Selection::Unselected,
                search_miss: None,
                ..self
            },
            Event::SelectMetric(metric) => Self { metric, ..self },
            Event::SelectModule(module) => Self { module, ..self },
        }
    }

    fn select(self, id: &str) -> Self {
        Self {
            selection: Selection::Selected(id.to_owned()),
            search_miss: None,
            ..self
        }
    }
}
