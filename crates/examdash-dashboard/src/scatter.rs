use examdash_dataset::{Dataset, Module};
use examdash_stats::descriptive;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum horizontal offset applied to a point for visual de-overlap.
pub const JITTER: f64 = 0.075;

/// Half the length of the horizontal mean segment drawn across each question.
pub const MEAN_HALF_WIDTH: f64 = 0.4;

/// Horizontal padding between the outermost questions and the axis bounds.
pub const X_PADDING: f64 = 0.6;

/// A set of questions charted together.
///
/// Open questions score 0 to 2 and true/false questions 0 to 1, so each group carries its
/// own vertical range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionGroup {
    pub name: String,
    /// 1-based question numbers.
    pub questions: Vec<usize>,
    pub y_range: [f64; 2],
}

impl QuestionGroup {
    #[must_use]
    pub fn open() -> Self {
        Self {
            name: "Open questions".to_owned(),
            questions: vec![1, 2, 3, 4],
            y_range: [-0.1, 2.1],
        }
    }

    #[must_use]
    pub fn true_false() -> Self {
        Self {
            name: "True/false questions".to_owned(),
            questions: (5..=12).collect(),
            y_range: [-0.3, 1.1],
        }
    }

    /// Returns the horizontal axis bounds, padded around the first and last question.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn x_range(&self) -> [f64; 2] {
        let min = self.questions.iter().min().copied().unwrap_or(0);
        let max = self.questions.iter().max().copied().unwrap_or(0);
        [min as f64 - X_PADDING, max as f64 + X_PADDING]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub question: usize,
    /// Question number plus jitter.
    pub x: f64,
    pub y: f64,
    pub student_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanPoint {
    pub question: usize,
    /// `None` when no student answered the question.
    pub y: Option<f64>,
}

/// Per-question scores of one module for one question group.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterModel {
    pub module: Module,
    pub group: QuestionGroup,
    /// Points ordered by question, then by student in dataset order.
    pub points: Vec<ScatterPoint>,
    /// One entry per question of the group, in group order.
    pub means: Vec<MeanPoint>,
}

impl ScatterModel {
    /// Builds the scatter of `group` for `module`, drawing jitter from `rng`.
    ///
    /// Missing scores produce no point and are left out of the question mean.
    pub fn build<R>(dataset: &Dataset, module: Module, group: &QuestionGroup, rng: &mut R) -> Self
    where
        R: Rng,
    {
        let mut points = vec![];
        let mut means = Vec::with_capacity(group.questions.len());
        for &question in &group.questions {
            let mut scores = vec![];
            for record in dataset.iter() {
                let Some(y) = record.questions(module).get(question) else {
                    continue;
                };
                #[expect(clippy::cast_precision_loss)]
                let x = question as f64 + rng.random_range(-JITTER..=JITTER);
                points.push(ScatterPoint {
                    question,
                    x,
                    y,
                    student_id: record.id.clone(),
                });
                scores.push(y);
            }
            let mean = descriptive::mean(&scores);
            means.push(MeanPoint {
                question,
                y: (!mean.is_nan()).then_some(mean),
            });
        }
        Self {
            module,
            group: group.clone(),
            points,
            means,
        }
    }

    #[must_use]
    pub fn mean_of(&self, question: usize) -> Option<f64> {
        self.means
            .iter()
            .find(|m| m.question == question)
            .and_then(|m| m.y)
    }

    /// Returns the horizontal mean segment of every answered question.
    #[expect(clippy::cast_precision_loss)]
    pub fn mean_segments(&self) -> impl Iterator<Item = [(f64, f64); 2]> + '_ {
        self.means.iter().filter_map(|m| {
            let y = m.y?;
            let x = m.question as f64;
            Some([(x - MEAN_HALF_WIDTH, y), (x + MEAN_HALF_WIDTH, y)])
        })
    }

    /// Splits the points into those of `student_id` and all others, keeping order.
    #[must_use]
    pub fn partition(&self, student_id: &str) -> (Vec<&ScatterPoint>, Vec<&ScatterPoint>) {
        self.points.iter().partition(|p| p.student_id == student_id)
    }
}

#[cfg(test)]
mod tests {
    use examdash_dataset::{QUESTION_COUNT, StudentRecord};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    fn student(id: &str, first: Option<f64>) -> StudentRecord {
        let mut record = StudentRecord::new(id);
        record.mod1_questions.0[0] = first;
        record.mod1_questions.0[1] = Some(2.0);
        record
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            student("A", Some(2.0)),
            student("B", Some(1.0)),
            student("C", None),
        ])
    }

    #[test]
    fn test_missing_scores_excluded_from_mean() {
        let mut rng = Pcg32::seed_from_u64(1);
        let model = ScatterModel::build(&dataset(), Module::Mod1, &QuestionGroup::open(), &mut rng);
        assert_eq!(model.mean_of(1), Some(1.5));
        assert_eq!(model.mean_of(2), Some(2.0));
        assert_eq!(model.points.iter().filter(|p| p.question == 1).count(), 2);
    }

    #[test]
    fn test_one_mean_per_question() {
        let mut rng = Pcg32::seed_from_u64(1);
        let group = QuestionGroup::true_false();
        let model = ScatterModel::build(&dataset(), Module::Mod1, &group, &mut rng);
        assert_eq!(model.means.len(), group.questions.len());
        assert!(model.means.iter().all(|m| m.y.is_none()));
        assert!(model.points.is_empty());
        assert_eq!(model.mean_segments().count(), 0);
    }

    #[test]
    fn test_jitter_is_bounded_and_seeded() {
        let group = QuestionGroup {
            name: "all".to_owned(),
            questions: (1..=QUESTION_COUNT).collect(),
            y_range: [0.0, 2.0],
        };
        let build = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            ScatterModel::build(&dataset(), Module::Mod1, &group, &mut rng)
        };
        let model = build(42);
        for point in &model.points {
            #[expect(clippy::cast_precision_loss)]
            let offset = point.x - point.question as f64;
            assert!(offset.abs() <= JITTER + 1e-12, "offset {offset}");
        }
        assert_eq!(model, build(42));
        assert_ne!(model.points, build(43).points);
    }

    #[test]
    fn test_partition_by_student() {
        let mut rng = Pcg32::seed_from_u64(3);
        let model = ScatterModel::build(&dataset(), Module::Mod1, &QuestionGroup::open(), &mut rng);
        let (selected, others) = model.partition("B");
        assert_eq!(selected.len(), 2);
        assert_eq!(others.len(), 3);
        assert!(selected.iter().all(|p| p.student_id == "B"));
    }

    #[test]
    fn test_other_module_is_independent() {
        let mut rng = Pcg32::seed_from_u64(3);
        let model = ScatterModel::build(&dataset(), Module::Mod2, &QuestionGroup::open(), &mut rng);
        assert!(model.points.is_empty());
    }

    #[test]
    fn test_axis_ranges() {
        let close = |[a, b]: [f64; 2], [c, d]: [f64; 2]| {
            (a - c).abs() < 1e-12 && (b - d).abs() < 1e-12
        };
        assert!(close(QuestionGroup::open().x_range(), [0.4, 4.6]));
        assert!(close(QuestionGroup::true_false().x_range(), [4.4, 12.6]));
    }

    #[test]
    fn test_mean_segments() {
        let mut rng = Pcg32::seed_from_u64(1);
        let model = ScatterModel::build(&dataset(), Module::Mod1, &QuestionGroup::open(), &mut rng);
        let segments = model.mean_segments().collect::<Vec<_>>();
        assert_eq!(segments.len(), 2);
        let [(x0, y0), (x1, y1)] = segments[0];
        assert!((x0 - 0.6).abs() < 1e-12 && (x1 - 1.4).abs() < 1e-12);
        assert_eq!((y0, y1), (1.5, 1.5));
    }
}
