use crate::{Metric, StudentRecord, lookup::StudentIndex};

/// The loaded results, in input order.
///
/// Identifiers are expected to be unique but this is not enforced: duplicates are kept
/// and reported by [`Dataset::duplicate_count`].
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<StudentRecord>,
    index: StudentIndex,
}

impl Dataset {
    #[must_use]
    pub fn new(records: Vec<StudentRecord>) -> Self {
        let index = StudentIndex::new(records.iter().map(|r| r.id.as_str()));
        Self { records, index }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> + '_ {
        self.records.iter()
    }

    #[must_use]
    pub fn index(&self) -> &StudentIndex {
        &self.index
    }

    /// Looks up a record by identifier. See [`StudentIndex::exact_match`].
    #[must_use]
    pub fn exact_match(&self, id: &str) -> Option<&StudentRecord> {
        self.index.exact_match(id).map(|idx| &self.records[idx])
    }

    /// Values of `metric` for every student, missing ones included, in input order.
    pub fn metric_values(&self, metric: Metric) -> impl Iterator<Item = Option<f64>> + '_ {
        self.records.iter().map(move |r| r.metric(metric))
    }

    /// Number of records whose identifier already appeared earlier in the dataset.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.records.len() - self.index.unique_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, total: Option<f64>) -> StudentRecord {
        StudentRecord {
            total,
            ..StudentRecord::new(id)
        }
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.duplicate_count(), 0);
        assert!(dataset.exact_match("x").is_none());
    }

    #[test]
    fn test_metric_values_keep_missing() {
        let dataset = Dataset::new(vec![record("a", Some(1.0)), record("b", None)]);
        let values = dataset.metric_values(Metric::Total).collect::<Vec<_>>();
        assert_eq!(values, vec![Some(1.0), None]);
    }

    #[test]
    fn test_duplicates_are_counted_and_first_wins() {
        let dataset = Dataset::new(vec![
            record("a", Some(1.0)),
            record("b", Some(2.0)),
            record("a", Some(3.0)),
        ]);
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.duplicate_count(), 1);
        assert_eq!(dataset.exact_match("a").unwrap().total, Some(1.0));
    }
}
