//! Declarative chart descriptors for an external plotting component.
//!
//! A [`ChartSpec`] lists category labels or points, styled series and axis ranges. Nothing
//! here draws; descriptors are serialized and handed to whatever renders them.
//!
//! How the selected student is marked on the histogram is up to a [`HighlightAdapter`]:
//! [`MarkerSeries`] adds a secondary series with one non-null entry, [`Annotation`] adds a
//! vertical line annotation. Scatter charts are the same for both.

use serde::Serialize;

use crate::{
    config::HighlightStyle,
    view::{BinMarker, DashboardView, HistogramView, ScatterView},
};

pub const COLOR_STUDENTS: &str = "rgba(125,211,252,0.45)";
pub const COLOR_STUDENTS_BORDER: &str = "rgba(125,211,252,0.9)";
pub const COLOR_MEAN: &str = "#34d399";
pub const COLOR_SELECTED: &str = "#f87171";
pub const COLOR_POINT_BORDER: &str = "#ffffff";
pub const COLOR_GRID: &str = "#1f1f27";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Scatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Bar,
    Line,
    Scatter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Category labels; empty for scatter charts.
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    pub annotations: Vec<LineAnnotation>,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

impl ChartSpec {
    #[must_use]
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub data: SeriesData,
    pub style: SeriesStyle,
    /// Series are drawn in ascending order; higher values end up on top.
    pub z_order: u8,
}

/// Series values: one per category label, or free points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    Values(Vec<Option<f64>>),
    Points(Vec<Point>),
}

impl SeriesData {
    /// Number of entries that are drawn.
    #[must_use]
    pub fn present_count(&self) -> usize {
        match self {
            Self::Values(values) => values.iter().flatten().count(),
            Self::Points(points) => points.iter().filter(|p| p.x.is_some()).count(),
        }
    }
}

/// A point; a point without coordinates breaks a line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Point {
    const BREAK: Self = Self { x: None, y: None };

    fn new((x, y): (f64, f64)) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStyle {
    pub color: &'static str,
    pub border_color: Option<&'static str>,
    pub border_width: f64,
    pub point_radius: f64,
}

/// A vertical line across the chart at a category position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineAnnotation {
    /// Category index the line is drawn at.
    pub x: f64,
    pub label: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub begin_at_zero: bool,
    pub step: Option<f64>,
    pub grid_color: Option<&'static str>,
}

/// Turns views into chart descriptors, choosing how the selected histogram bin is marked.
pub trait HighlightAdapter {
    /// Marks `marker` on a histogram chart whose bars hold `counts`.
    fn mark_bin(&self, chart: &mut ChartSpec, marker: &BinMarker, counts: &[u64]);

    fn histogram(&self, view: &HistogramView) -> ChartSpec {
        let mut chart = histogram_chart(view);
        if let Some(marker) = &view.selected {
            self.mark_bin(&mut chart, marker, &view.counts);
        }
        chart
    }

    fn scatter(&self, view: &ScatterView) -> ChartSpec {
        scatter_chart(view)
    }
}

/// Marks the selected bin with a secondary line series holding a single point.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerSeries;

impl HighlightAdapter for MarkerSeries {
    fn mark_bin(&self, chart: &mut ChartSpec, marker: &BinMarker, counts: &[u64]) {
        chart.series.push(Series {
            name: marker.label.clone(),
            kind: SeriesKind::Line,
            data: SeriesData::Values(single_value(counts, marker.index)),
            style: SeriesStyle {
                color: COLOR_SELECTED,
                border_color: Some(COLOR_POINT_BORDER),
                border_width: 2.0,
                point_radius: 12.0,
            },
            z_order: 2,
        });
    }
}

/// Marks the selected bin with a labelled vertical line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Annotation;

impl HighlightAdapter for Annotation {
    #[expect(clippy::cast_precision_loss)]
    fn mark_bin(&self, chart: &mut ChartSpec, marker: &BinMarker, _counts: &[u64]) {
        chart.annotations.push(LineAnnotation {
            x: marker.index as f64,
            label: marker.label.clone(),
            color: COLOR_SELECTED,
        });
    }
}

impl HighlightStyle {
    #[must_use]
    pub fn adapter(self) -> &'static dyn HighlightAdapter {
        match self {
            Self::Marker => &MarkerSeries,
            Self::Annotation => &Annotation,
        }
    }
}

/// Descriptors for every chart of one dashboard view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub histogram: ChartSpec,
    pub scatters: Vec<ChartSpec>,
}

impl ChartSet {
    #[must_use]
    pub fn new(view: &DashboardView, adapter: &dyn HighlightAdapter) -> Self {
        Self {
            histogram: adapter.histogram(&view.histogram),
            scatters: view.scatters.iter().map(|s| adapter.scatter(s)).collect(),
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn single_value(counts: &[u64], index: usize) -> Vec<Option<f64>> {
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| (i == index).then_some(count as f64))
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn histogram_chart(view: &HistogramView) -> ChartSpec {
    let mut series = vec![Series {
        name: "Students".to_owned(),
        kind: SeriesKind::Bar,
        data: SeriesData::Values(view.counts.iter().map(|&c| Some(c as f64)).collect()),
        style: SeriesStyle {
            color: COLOR_STUDENTS,
            border_color: Some(COLOR_STUDENTS_BORDER),
            border_width: 1.0,
            point_radius: 0.0,
        },
        z_order: 0,
    }];
    if let Some(index) = view.mean_bin {
        series.push(Series {
            name: "Mean".to_owned(),
            kind: SeriesKind::Line,
            data: SeriesData::Values(single_value(&view.counts, index)),
            style: SeriesStyle {
                color: COLOR_MEAN,
                border_color: None,
                border_width: 0.0,
                point_radius: 8.0,
            },
            z_order: 1,
        });
    }
    ChartSpec {
        kind: ChartKind::Bar,
        title: view.title.clone(),
        labels: view.labels.clone(),
        series,
        annotations: vec![],
        x_axis: Axis::default(),
        y_axis: Axis {
            begin_at_zero: true,
            ..Axis::default()
        },
    }
}

fn scatter_chart(view: &ScatterView) -> ChartSpec {
    let points = |coords: &[(f64, f64)]| -> Vec<Point> {
        coords.iter().copied().map(Point::new).collect()
    };
    let mean_line = view
        .mean_segments
        .iter()
        .flat_map(|&[start, end]| [Point::new(start), Point::new(end), Point::BREAK])
        .collect();

    let series = vec![
        Series {
            name: "Students".to_owned(),
            kind: SeriesKind::Scatter,
            data: SeriesData::Points(points(&view.background)),
            style: SeriesStyle {
                color: COLOR_STUDENTS,
                border_color: Some(COLOR_STUDENTS_BORDER),
                border_width: 1.0,
                point_radius: 3.0,
            },
            z_order: 0,
        },
        Series {
            name: "Mean".to_owned(),
            kind: SeriesKind::Line,
            data: SeriesData::Points(mean_line),
            style: SeriesStyle {
                color: COLOR_MEAN,
                border_color: Some(COLOR_MEAN),
                border_width: 3.0,
                point_radius: 0.0,
            },
            z_order: 1,
        },
        Series {
            name: "Selected".to_owned(),
            kind: SeriesKind::Scatter,
            data: SeriesData::Points(points(&view.selected)),
            style: SeriesStyle {
                color: COLOR_SELECTED,
                border_color: Some(COLOR_POINT_BORDER),
                border_width: 1.0,
                point_radius: 6.0,
            },
            z_order: 2,
        },
    ];

    let [x_min, x_max] = view.x_range;
    let [y_min, y_max] = view.y_range;
    ChartSpec {
        kind: ChartKind::Scatter,
        title: view.title.clone(),
        labels: vec![],
        series,
        annotations: vec![],
        x_axis: Axis {
            min: Some(x_min),
            max: Some(x_max),
            begin_at_zero: false,
            step: Some(1.0),
            grid_color: None,
        },
        y_axis: Axis {
            min: Some(y_min),
            max: Some(y_max),
            begin_at_zero: false,
            step: Some(1.0),
            grid_color: Some(COLOR_GRID),
        },
    }
}
