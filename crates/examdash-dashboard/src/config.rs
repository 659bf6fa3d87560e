use examdash_dataset::{Metric, schema::ColumnSchema};
use examdash_stats::histogram::BinningStrategy;
use serde::{Deserialize, Serialize};

use crate::scatter::QuestionGroup;

/// Dashboard settings, usually read from a JSON file.
///
/// Every field is optional in the file; missing fields take the defaults below.
///
/// # Examples
///
/// ```
/// use examdash_dashboard::config::{Binning, DashboardConfig};
///
/// let config: DashboardConfig = serde_json::from_str(r#"{ "binning": "fixed" }"#).unwrap();
/// assert_eq!(config.binning, Binning::Fixed);
/// assert_eq!(config.groups.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Column layout of the results file.
    pub columns: ColumnSchema,
    /// Histogram binning.
    pub binning: Binning,
    /// Question groups, one scatter plot each.
    pub groups: Vec<QuestionGroup>,
    /// Seed for the scatter jitter; random when absent.
    pub jitter_seed: Option<u64>,
    /// How the selected student is marked on the histogram.
    pub highlight: HighlightStyle,
    /// What happens to the other students' points while one is selected.
    pub background: BackgroundPolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            columns: ColumnSchema::default(),
            binning: Binning::default(),
            groups: vec![QuestionGroup::open(), QuestionGroup::true_false()],
            jitter_seed: None,
            highlight: HighlightStyle::default(),
            background: BackgroundPolicy::default(),
        }
    }
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Binning {
    /// Data-driven bin width.
    #[default]
    Adaptive,
    /// One bin per score point up to the metric's maximum score.
    Fixed,
}

impl Binning {
    #[must_use]
    pub fn strategy(self, metric: Metric) -> BinningStrategy {
        match self {
            Self::Adaptive => BinningStrategy::Adaptive,
            Self::Fixed => BinningStrategy::Fixed {
                bins: metric.max_score(),
            },
        }
    }
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum HighlightStyle {
    /// A secondary line series with a single non-null point on the selected bin.
    #[default]
    Marker,
    /// A vertical annotation line at the selected bin.
    Annotation,
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundPolicy {
    /// Keep the other students' points, drawn beneath the selected ones.
    #[default]
    Dim,
    /// Hide the other students' points entirely.
    Hide,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config: DashboardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_fixed_bins_follow_metric_scale() {
        assert_eq!(
            Binning::Fixed.strategy(Metric::Total),
            BinningStrategy::Fixed { bins: 32 }
        );
        assert_eq!(
            Binning::Fixed.strategy(Metric::Mod2),
            BinningStrategy::Fixed { bins: 16 }
        );
        assert_eq!(
            Binning::Adaptive.strategy(Metric::Mod1),
            BinningStrategy::Adaptive
        );
    }

    #[test]
    fn test_parse_styles() {
        assert_eq!(
            "annotation".parse::<HighlightStyle>().unwrap(),
            HighlightStyle::Annotation
        );
        assert_eq!("hide".parse::<BackgroundPolicy>().unwrap(), BackgroundPolicy::Hide);
    }

    #[test]
    fn test_nested_columns() {
        let config: DashboardConfig = serde_json::from_str(
            r#"{ "columns": { "id": "Matricola" }, "jitter_seed": 7, "background": "hide" }"#,
        )
        .unwrap();
        assert_eq!(config.columns.id, "Matricola");
        assert_eq!(config.columns.total, "Total");
        assert_eq!(config.jitter_seed, Some(7));
        assert_eq!(config.background, BackgroundPolicy::Hide);
    }
}
