use serde::{Deserialize, Serialize};

use crate::{Metric, Module};

/// Column layout of the results file.
///
/// Every field has a default matching the exam export this tool was written for, so a
/// configuration file only needs to name the columns that differ.
///
/// # Examples
///
/// ```
/// use examdash_dataset::{Module, schema::ColumnSchema};
///
/// let schema = ColumnSchema::default();
/// assert_eq!(schema.question_column(Module::Mod2, 7), "Voto 7_mod2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    /// Student identifier column.
    pub id: String,
    /// Overall result column.
    pub total: String,
    /// First module result column.
    pub mod1: String,
    /// Second module result column.
    pub mod2: String,
    /// Per-question column name; `{n}` is replaced by the question number and
    /// `{module}` by the module key (`mod1`, `mod2`).
    pub question_pattern: String,
    /// Field delimiter. Must be an ASCII character.
    pub delimiter: char,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            id: "ID number".to_owned(),
            total: "Total".to_owned(),
            mod1: "Results_mod1".to_owned(),
            mod2: "Results_mod2".to_owned(),
            question_pattern: "Voto {n}_{module}".to_owned(),
            delimiter: ',',
        }
    }
}

impl ColumnSchema {
    #[must_use]
    pub fn metric_column(&self, metric: Metric) -> &str {
        match metric {
            Metric::Total => &self.total,
            Metric::Mod1 => &self.mod1,
            Metric::Mod2 => &self.mod2,
        }
    }

    /// Returns the column holding `question` (1-based) of `module`.
    #[must_use]
    pub fn question_column(&self, module: Module, question: usize) -> String {
        self.question_pattern
            .replace("{n}", &question.to_string())
            .replace("{module}", module.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let schema: ColumnSchema =
            serde_json::from_str(r#"{ "id": "Matricola", "delimiter": ";" }"#).unwrap();
        assert_eq!(schema.id, "Matricola");
        assert_eq!(schema.delimiter, ';');
        assert_eq!(schema.total, "Total");
        assert_eq!(schema.metric_column(Metric::Mod1), "Results_mod1");
    }

    #[test]
    fn test_custom_question_pattern() {
        let schema = ColumnSchema {
            question_pattern: "Q{n} ({module})".to_owned(),
            ..ColumnSchema::default()
        };
        assert_eq!(schema.question_column(Module::Mod1, 12), "Q12 (mod1)");
    }
}
