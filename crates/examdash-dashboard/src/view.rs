//! Render-ready snapshots of the dashboard.
//!
//! Views are plain data computed from a [`DashboardState`](crate::state::DashboardState);
//! two equal states always produce equal views.

use examdash_dataset::{Metric, Module};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub student_count: usize,
    pub metric: Metric,
    pub module: Module,
    pub histogram: HistogramView,
    /// One per question group.
    pub scatters: Vec<ScatterView>,
    pub status: String,
    pub student: Option<StudentPanel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramView {
    pub title: String,
    /// Bin midpoints, one decimal place.
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
    /// Mean of the metric; `None` when no student has a value.
    pub mean: Option<f64>,
    pub mean_bin: Option<usize>,
    /// Bin of the selected student's value.
    pub selected: Option<BinMarker>,
}

/// A marker placed on one histogram bin.
#[derive(Debug, Clone, PartialEq)]
pub struct BinMarker {
    pub index: usize,
    /// The student's raw value, which may differ from the bin label.
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterView {
    pub title: String,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub questions: Vec<usize>,
    /// Points drawn first: everyone when nothing is selected, otherwise the other students
    /// (or nobody, depending on the background policy).
    pub background: Vec<(f64, f64)>,
    /// Points of the selected student, drawn above the background.
    pub selected: Vec<(f64, f64)>,
    /// Per-question mean, `None` for unanswered questions.
    pub means: Vec<(usize, Option<f64>)>,
    pub mean_segments: Vec<[(f64, f64); 2]>,
}

/// Summary results of the selected student.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentPanel {
    pub id: String,
    pub scores: [(Metric, Option<f64>); 3],
}

/// Formats a score for display, `n/a` when missing.
#[must_use]
pub fn format_score(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_owned(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(Some(27.5)), "27.5");
        assert_eq!(format_score(Some(28.0)), "28");
        assert_eq!(format_score(None), "n/a");
    }
}
