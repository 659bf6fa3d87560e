/// Number of scored questions in each exam module.
pub const QUESTION_COUNT: usize = 12;

/// Summary result a histogram can be drawn for.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::FromStr,
)]
pub enum Metric {
    /// Overall exam result.
    #[default]
    #[display("Total")]
    Total,
    /// Result of the first module.
    #[display("Module 1")]
    Mod1,
    /// Result of the second module.
    #[display("Module 2")]
    Mod2,
}

impl Metric {
    pub const ALL: [Self; 3] = [Self::Total, Self::Mod1, Self::Mod2];

    /// Returns the next metric in tab order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Total => Self::Mod1,
            Self::Mod1 => Self::Mod2,
            Self::Mod2 => Self::Total,
        }
    }

    /// Returns the position of the metric in [`Self::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Total => 0,
            Self::Mod1 => 1,
            Self::Mod2 => 2,
        }
    }

    /// Upper bound of the score scale, used as the bin count for fixed-width histograms.
    #[must_use]
    pub fn max_score(self) -> usize {
        match self {
            Self::Total => 32,
            Self::Mod1 | Self::Mod2 => 16,
        }
    }
}

/// Exam module whose per-question scores are plotted.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::FromStr,
)]
pub enum Module {
    #[default]
    #[display("Module 1")]
    Mod1,
    #[display("Module 2")]
    Mod2,
}

impl Module {
    pub const ALL: [Self; 2] = [Self::Mod1, Self::Mod2];

    /// Returns the other module.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Mod1 => Self::Mod2,
            Self::Mod2 => Self::Mod1,
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Mod1 => 0,
            Self::Mod2 => 1,
        }
    }

    /// Short key used in column names (`mod1`, `mod2`).
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Mod1 => "mod1",
            Self::Mod2 => "mod2",
        }
    }
}

/// Per-question scores of one module, indexed by 1-based question number.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct QuestionScores(pub [Option<f64>; QUESTION_COUNT]);

impl QuestionScores {
    /// Returns the score of `question` (1-based), or `None` if missing or out of range.
    #[must_use]
    pub fn get(&self, question: usize) -> Option<f64> {
        let idx = question.checked_sub(1)?;
        self.0.get(idx).copied().flatten()
    }

    /// Returns an iterator of `(question, score)` pairs, including missing scores.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<f64>)> + '_ {
        self.0.iter().enumerate().map(|(i, score)| (i + 1, *score))
    }
}

/// One row of the results file.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    /// Student identifier (matricola), trimmed.
    pub id: String,
    pub total: Option<f64>,
    pub mod1: Option<f64>,
    pub mod2: Option<f64>,
    pub mod1_questions: QuestionScores,
    pub mod2_questions: QuestionScores,
}

impl StudentRecord {
    /// Creates a record with every score missing.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into().trim().to_owned(),
            total: None,
            mod1: None,
            mod2: None,
            mod1_questions: QuestionScores::default(),
            mod2_questions: QuestionScores::default(),
        }
    }

    #[must_use]
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Total => self.total,
            Metric::Mod1 => self.mod1,
            Metric::Mod2 => self.mod2,
        }
    }

    pub fn metric_mut(&mut self, metric: Metric) -> &mut Option<f64> {
        match metric {
            Metric::Total => &mut self.total,
            Metric::Mod1 => &mut self.mod1,
            Metric::Mod2 => &mut self.mod2,
        }
    }

    #[must_use]
    pub fn questions(&self, module: Module) -> &QuestionScores {
        match module {
            Module::Mod1 => &self.mod1_questions,
            Module::Mod2 => &self.mod2_questions,
        }
    }

    pub fn questions_mut(&mut self, module: Module) -> &mut QuestionScores {
        match module {
            Module::Mod1 => &mut self.mod1_questions,
            Module::Mod2 => &mut self.mod2_questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_parses_case_insensitively() {
        assert_eq!("total".parse::<Metric>().unwrap(), Metric::Total);
        assert_eq!("mod2".parse::<Metric>().unwrap(), Metric::Mod2);
        assert!("mod3".parse::<Metric>().is_err());
    }

    #[test]
    fn test_metric_cycle() {
        let mut metric = Metric::default();
        for expected in [Metric::Mod1, Metric::Mod2, Metric::Total] {
            metric = metric.next();
            assert_eq!(metric, expected);
        }
    }

    #[test]
    fn test_question_scores_are_one_based() {
        let mut scores = QuestionScores::default();
        scores.0[0] = Some(2.0);
        assert_eq!(scores.get(1), Some(2.0));
        assert_eq!(scores.get(0), None);
        assert_eq!(scores.get(QUESTION_COUNT + 1), None);
        assert_eq!(scores.iter().next(), Some((1, Some(2.0))));
    }

    #[test]
    fn test_record_id_is_trimmed() {
        let record = StudentRecord::new("  12345\t");
        assert_eq!(record.id, "12345");
        assert_eq!(record.metric(Metric::Total), None);
    }
}
