use examdash_dashboard::view::{HistogramView, ScatterView, StudentPanel, format_score};
use examdash_dataset::{Metric, Module};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::{Marker, merge::MergeStrategy},
    text::Line,
    widgets::{
        Axis, Bar, BarChart, Block, Chart, Dataset, GraphType, List, ListItem, ListState,
        Paragraph, StatefulWidget, Tabs, Widget,
    },
};

const STUDENTS: Color = Color::Cyan;
const MEAN: Color = Color::Green;
const SELECTED: Color = Color::LightRed;

fn highlight() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Returns integer axis bounds one step outside the questions and one label per step.
///
/// ratatui spreads labels evenly across the bounds, so each label lands on its question.
#[expect(clippy::cast_precision_loss)]
fn question_axis(questions: &[usize]) -> ([f64; 2], Vec<String>) {
    let first = questions.iter().min().copied().unwrap_or_default();
    let last = questions.iter().max().copied().unwrap_or_default();
    let (lo, hi) = (first.saturating_sub(1), last + 1);
    let labels = (lo..=hi)
        .map(|q| {
            if questions.contains(&q) {
                q.to_string()
            } else {
                String::new()
            }
        })
        .collect();
    ([lo as f64, hi as f64], labels)
}

pub(super) struct MetricTabs {
    pub metric: Metric,
    pub module: Module,
    pub student_count: usize,
}

impl Widget for MetricTabs {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered()
            .title("Exam results")
            .title_bottom(
                Line::raw(format!("{} studenti", self.student_count)).right_aligned(),
            );

        let [metric_area, module_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
                .areas(block.inner(area));

        let metrics = Tabs::new(Metric::ALL.map(|m| m.to_string()))
            .select(self.metric.index())
            .highlight_style(highlight());
        let modules = Tabs::new(Module::ALL.map(|m| m.to_string()))
            .select(self.module.index())
            .highlight_style(highlight());

        Widget::render(block, area, buf);
        Widget::render(metrics, metric_area, buf);
        Widget::render(modules, module_area, buf);
    }
}

pub(super) struct SearchPanel<'a> {
    pub input: &'a str,
    pub suggestions: &'a [String],
    pub cursor: Option<usize>,
    pub status: &'a str,
}

impl Widget for SearchPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered()
            .title("Matricola")
            .merge_borders(MergeStrategy::Exact);

        let [input_area, list_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .areas(block.inner(area));

        let input = Paragraph::new(format!("> {}_", self.input));
        let list = List::new(
            self.suggestions
                .iter()
                .map(|id| ListItem::new(id.as_str()))
                .collect::<Vec<_>>(),
        )
        .highlight_style(highlight())
        .highlight_symbol(">> ");
        let mut list_state = ListState::default();
        list_state.select(self.cursor);
        let status = Paragraph::new(self.status).style(Style::default().fg(Color::Gray));

        Widget::render(block, area, buf);
        Widget::render(input, input_area, buf);
        StatefulWidget::render(list, list_area, buf, &mut list_state);
        Widget::render(status, status_area, buf);
    }
}

pub(super) struct StudentInfo<'a> {
    pub student: Option<&'a StudentPanel>,
}

impl Widget for StudentInfo<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered()
            .title("Student")
            .merge_borders(MergeStrategy::Exact);

        let text = match self.student {
            Some(student) => {
                let mut lines = vec![Line::styled(
                    format!("Matricola {}", student.id),
                    Style::default().fg(SELECTED),
                )];
                lines.extend(student.scores.iter().map(|(metric, score)| {
                    Line::raw(format!("  {metric:<9} {:>6}", format_score(*score)))
                }));
                lines
            }
            None => vec![Line::styled("-", Style::default().fg(Color::DarkGray))],
        };

        Widget::render(Paragraph::new(text).block(block), area, buf);
    }
}

pub(super) struct HistogramChart<'a> {
    pub view: &'a HistogramView,
}

impl Widget for HistogramChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let view = self.view;
        let mut block = Block::bordered()
            .title(view.title.as_str())
            .merge_borders(MergeStrategy::Exact);
        if let Some(marker) = &view.selected {
            block = block.title(
                Line::styled(marker.label.as_str(), Style::default().fg(SELECTED)).right_aligned(),
            );
        }
        if let Some(mean) = view.mean {
            block = block.title_bottom(
                Line::styled(format!("mean {mean:.2}"), Style::default().fg(MEAN)).right_aligned(),
            );
        }

        let selected = view.selected.as_ref().map(|marker| marker.index);
        let bars = view
            .labels
            .iter()
            .zip(&view.counts)
            .enumerate()
            .map(|(i, (label, &count))| {
                let color = if Some(i) == selected {
                    SELECTED
                } else if Some(i) == view.mean_bin {
                    MEAN
                } else {
                    STUDENTS
                };
                Bar::with_label(label.as_str(), count)
                    .text_value(count.to_string())
                    .style(Style::default().fg(color))
            })
            .collect::<Vec<_>>();

        let inner = block.inner(area);
        let bar_count = u16::try_from(bars.len()).unwrap_or(u16::MAX).max(1);
        let bar_width = (inner.width / bar_count).saturating_sub(1).max(1);

        let chart = BarChart::new(bars)
            .block(block)
            .bar_width(bar_width)
            .bar_gap(1);
        Widget::render(chart, area, buf);
    }
}

pub(super) struct QuestionScatter<'a> {
    pub view: &'a ScatterView,
}

impl Widget for QuestionScatter<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let view = self.view;

        let mut datasets = vec![
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(STUDENTS))
                .data(&view.background),
        ];
        datasets.extend(view.mean_segments.iter().map(|segment| {
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(MEAN))
                .data(segment)
        }));
        datasets.push(
            Dataset::default()
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(SELECTED))
                .data(&view.selected),
        );

        let (x_bounds, x_labels) = question_axis(&view.questions);
        let x_axis = Axis::default()
            .title("Question")
            .bounds(x_bounds)
            .labels(x_labels);
        let y_axis = Axis::default()
            .title("Score")
            .bounds(view.y_range)
            .labels([
                format!("{:.1}", view.y_range[0]),
                format!("{:.1}", view.y_range[1]),
            ]);

        let chart = Chart::new(datasets)
            .block(
                Block::bordered()
                    .merge_borders(MergeStrategy::Exact)
                    .title(view.title.as_str()),
            )
            .x_axis(x_axis)
            .y_axis(y_axis);

        Widget::render(chart, area, buf);
    }
}
