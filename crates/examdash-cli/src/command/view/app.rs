use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use examdash_dashboard::{
    dashboard::Dashboard,
    state::{DashboardState, Event as DashboardEvent},
    view::DashboardView,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Spacing},
    style::{Color, Style},
    text::Text,
};

use crate::{
    command::view::widgets::{
        HistogramChart, MetricTabs, QuestionScatter, SearchPanel, StudentInfo,
    },
    tui::App,
};

#[derive(Debug)]
pub struct DashboardApp {
    dashboard: Dashboard,
    state: DashboardState,
    view: DashboardView,
    input: String,
    suggestions: Vec<String>,
    cursor: Option<usize>,
    should_exit: bool,
}

impl DashboardApp {
    pub fn new(dashboard: Dashboard) -> Self {
        let state = DashboardState::default();
        let view = dashboard.render(&state);
        Self {
            dashboard,
            state,
            view,
            input: String::new(),
            suggestions: vec![],
            cursor: None,
            should_exit: false,
        }
    }

    fn dispatch(&mut self, event: DashboardEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = self.dashboard.apply(state, event);
        self.view = self.dashboard.render(&self.state);
    }

    fn set_input(&mut self, input: String) {
        self.input = input;
        self.suggestions = self
            .dashboard
            .dataset()
            .index()
            .search(&self.input)
            .iter()
            .map(|id| (*id).to_owned())
            .collect();
        self.cursor = None;
        self.dispatch(DashboardEvent::Search(self.input.clone()));
    }

    fn pick(&mut self, id: String) {
        self.input.clone_from(&id);
        self.suggestions.clear();
        self.cursor = None;
        self.dispatch(DashboardEvent::Pick(id));
    }

    fn is_clear(&self) -> bool {
        self.input.is_empty() && self.state.selection.is_unselected()
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('c') {
                self.should_exit = true;
            }
            return;
        }
        match key.code {
            KeyCode::Esc if self.is_clear() => self.should_exit = true,
            KeyCode::Esc => {
                self.input.clear();
                self.suggestions.clear();
                self.cursor = None;
                self.dispatch(DashboardEvent::Clear);
            }
            KeyCode::Tab => self.dispatch(DashboardEvent::SelectMetric(self.state.metric.next())),
            KeyCode::BackTab => {
                self.dispatch(DashboardEvent::SelectModule(self.state.module.next()));
            }
            KeyCode::Up if !self.suggestions.is_empty() => {
                let last = self.suggestions.len() - 1;
                self.cursor = Some(match self.cursor {
                    Some(0) | None => last,
                    Some(i) => i - 1,
                });
            }
            KeyCode::Down if !self.suggestions.is_empty() => {
                self.cursor = Some(match self.cursor {
                    Some(i) if i + 1 < self.suggestions.len() => i + 1,
                    _ => 0,
                });
            }
            KeyCode::Enter => {
                if let Some(id) = self.cursor.map(|i| self.suggestions[i].clone()) {
                    self.pick(id);
                }
            }
            KeyCode::Backspace => {
                let mut input = self.input.clone();
                input.pop();
                self.set_input(input);
            }
            KeyCode::Char(c) => {
                let mut input = self.input.clone();
                input.push(c);
                self.set_input(input);
            }
            _ => {}
        }
    }
}

impl App for DashboardApp {
    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(key) = event.as_key_event() {
            self.handle_key(key);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let view = &self.view;

        let [tabs_area, main_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let [left_area, right_area] =
            Layout::horizontal([Constraint::Length(34), Constraint::Fill(1)])
                .spacing(Spacing::Overlap(1))
                .areas(main_area);

        let [search_pane, student_pane] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(7)])
                .spacing(Spacing::Overlap(1))
                .areas(left_area);

        let [histogram_pane, scatter_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)])
                .spacing(Spacing::Overlap(1))
                .areas(right_area);

        frame.render_widget(
            MetricTabs {
                metric: view.metric,
                module: view.module,
                student_count: view.student_count,
            },
            tabs_area,
        );
        frame.render_widget(
            SearchPanel {
                input: &self.input,
                suggestions: &self.suggestions,
                cursor: self.cursor,
                status: &view.status,
            },
            search_pane,
        );
        frame.render_widget(
            StudentInfo {
                student: view.student.as_ref(),
            },
            student_pane,
        );
        frame.render_widget(
            HistogramChart {
                view: &view.histogram,
            },
            histogram_pane,
        );

        let scatter_panes = Layout::horizontal(view.scatters.iter().map(|_| Constraint::Fill(1)))
            .spacing(Spacing::Overlap(1))
            .split(scatter_area);
        for (scatter, pane) in view.scatters.iter().zip(scatter_panes.iter()) {
            frame.render_widget(QuestionScatter { view: scatter }, *pane);
        }

        let help_text = Text::from(
            "Type: Search | ↑/↓ Enter: Pick | Tab: Metric | Shift-Tab: Module | Esc: Clear/Quit",
        )
        .style(Style::default().fg(Color::DarkGray))
        .centered();
        frame.render_widget(help_text, help_area);
    }
}
