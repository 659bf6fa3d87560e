use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use csv::StringRecord;

use crate::{Dataset, Metric, Module, QUESTION_COUNT, StudentRecord, schema::ColumnSchema};

/// Failure to turn the results file into a [`Dataset`].
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("cannot open results file {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("malformed results file: {source}")]
    Csv { source: csv::Error },
    #[display("missing required column '{column}'")]
    MissingColumn { column: String },
    #[display("delimiter '{delimiter}' is not an ASCII character")]
    InvalidDelimiter { delimiter: char },
}

/// Reads the results file at `path`.
pub fn load_csv<P>(path: P, schema: &ColumnSchema) -> Result<Dataset, LoadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    tracing::info!("Loading results from {}", path.display());
    read_csv(BufReader::new(file), schema)
}

/// Reads results from any CSV source.
///
/// The header row is required. Records missing an identifier are skipped, and numeric
/// cells that are empty or unparseable become missing scores. Rows the CSV reader
/// rejects are skipped with a warning rather than failing the whole load.
pub fn read_csv<R>(reader: R, schema: &ColumnSchema) -> Result<Dataset, LoadError>
where
    R: io::Read,
{
    let delimiter = u8::try_from(schema.delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(LoadError::InvalidDelimiter {
            delimiter: schema.delimiter,
        })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Csv { source })?
        .clone();
    let columns = ColumnIndices::resolve(&headers, schema)?;

    let mut records = vec![];
    for (row, result) in reader.records().enumerate() {
        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("Skipping row {}: {err}", row + 2);
                continue;
            }
        };
        match columns.parse(&raw) {
            Some(record) => records.push(record),
            None => tracing::debug!("Skipping row {} without identifier", row + 2),
        }
    }

    let dataset = Dataset::new(records);
    tracing::info!("Loaded {} students", dataset.len());
    let duplicates = dataset.duplicate_count();
    if duplicates > 0 {
        tracing::warn!("{duplicates} rows repeat an earlier identifier; lookups use the first");
    }
    Ok(dataset)
}

#[derive(Debug)]
struct ColumnIndices {
    id: usize,
    metrics: [Option<usize>; 3],
    questions: [[Option<usize>; QUESTION_COUNT]; 2],
}

impl ColumnIndices {
    fn resolve(headers: &StringRecord, schema: &ColumnSchema) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let id = find(&schema.id).ok_or_else(|| LoadError::MissingColumn {
            column: schema.id.clone(),
        })?;

        let metrics = Metric::ALL.map(|metric| find(schema.metric_column(metric)));
        if metrics.iter().all(Option::is_none) {
            return Err(LoadError::MissingColumn {
                column: schema.total.clone(),
            });
        }
        for (metric, column) in Metric::ALL.iter().zip(&metrics) {
            if column.is_none() {
                tracing::warn!(
                    "Column '{}' not found; {metric} results treated as missing",
                    schema.metric_column(*metric)
                );
            }
        }

        let questions = Module::ALL.map(|module| {
            let columns: [Option<usize>; QUESTION_COUNT] =
                std::array::from_fn(|i| find(&schema.question_column(module, i + 1)));
            let missing = columns.iter().filter(|c| c.is_none()).count();
            if missing > 0 {
                tracing::warn!(
                    "{missing} question columns not found for {module}; scores treated as missing"
                );
            }
            columns
        });

        Ok(Self {
            id,
            metrics,
            questions,
        })
    }

    fn parse(&self, raw: &StringRecord) -> Option<StudentRecord> {
        let id = raw.get(self.id).map(str::trim).filter(|id| !id.is_empty())?;
        let score = |column: Option<usize>| column.and_then(|c| raw.get(c)).and_then(parse_score);

        let mut record = StudentRecord::new(id);
        for metric in Metric::ALL {
            *record.metric_mut(metric) = score(self.metrics[metric.index()]);
        }
        for module in Module::ALL {
            let columns = &self.questions[module.index()];
            record.questions_mut(module).0 = columns.map(score);
        }
        Some(record)
    }
}

/// Parses a numeric cell; empty, non-numeric and non-finite cells are missing.
fn parse_score(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> String {
        let mut columns = vec![
            "ID number".to_owned(),
            "Results_mod1".to_owned(),
            "Results_mod2".to_owned(),
            "Total".to_owned(),
        ];
        for module in ["mod1", "mod2"] {
            for n in 1..=QUESTION_COUNT {
                columns.push(format!("Voto {n}_{module}"));
            }
        }
        columns.join(",")
    }

    fn row(id: &str, scores: &str) -> String {
        let questions = vec![scores; QUESTION_COUNT * 2].join(",");
        format!("{id},8,9.5,17.5,{questions}")
    }

    #[test]
    fn test_full_row() {
        let csv = format!("{}\n{}\n", header(), row("1001", "1"));
        let dataset = read_csv(csv.as_bytes(), &ColumnSchema::default()).unwrap();
        let record = dataset.exact_match("1001").unwrap();
        assert_eq!(record.mod1, Some(8.0));
        assert_eq!(record.mod2, Some(9.5));
        assert_eq!(record.total, Some(17.5));
        assert_eq!(record.mod1_questions.get(12), Some(1.0));
        assert_eq!(record.mod2_questions.get(1), Some(1.0));
    }

    #[test]
    fn test_unparseable_numbers_are_missing() {
        let csv = format!("{}\n{}\n", header(), row("1002", "abc"));
        let dataset = read_csv(csv.as_bytes(), &ColumnSchema::default()).unwrap();
        let record = dataset.exact_match("1002").unwrap();
        assert!(record.mod1_questions.iter().all(|(_, s)| s.is_none()));
        assert_eq!(record.total, Some(17.5));
    }

    #[test]
    fn test_short_rows_and_blank_ids() {
        let csv = format!("{}\n1003,5\n,1,2,3\n\n", header());
        let dataset = read_csv(csv.as_bytes(), &ColumnSchema::default()).unwrap();
        assert_eq!(dataset.len(), 1);
        let record = dataset.exact_match("1003").unwrap();
        assert_eq!(record.mod1, Some(5.0));
        assert_eq!(record.total, None);
    }

    #[test]
    fn test_missing_id_column() {
        let err = read_csv("Total\n3\n".as_bytes(), &ColumnSchema::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { ref column } if column == "ID number"));
    }

    #[test]
    fn test_missing_all_metric_columns() {
        let err = read_csv("ID number,Other\n1,2\n".as_bytes(), &ColumnSchema::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { ref column } if column == "Total"));
    }

    #[test]
    fn test_semicolon_delimiter() {
        let schema = ColumnSchema {
            delimiter: ';',
            ..ColumnSchema::default()
        };
        let dataset = read_csv("ID number;Total\n42;30\n".as_bytes(), &schema).unwrap();
        assert_eq!(dataset.exact_match("42").unwrap().total, Some(30.0));
    }

    #[test]
    fn test_non_ascii_delimiter() {
        let schema = ColumnSchema {
            delimiter: '§',
            ..ColumnSchema::default()
        };
        let err = read_csv("".as_bytes(), &schema).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDelimiter { delimiter: '§' }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_csv("/nonexistent/results.csv", &ColumnSchema::default()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/results.csv"));
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score(" 2 "), Some(2.0));
        assert_eq!(parse_score("1.5"), Some(1.5));
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("inf"), None);
        assert_eq!(parse_score("NaN"), None);
    }
}
