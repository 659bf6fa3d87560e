//! Student records and their source file.
//!
//! This crate owns the in-memory dataset the dashboard is computed from:
//!
//! 1. **Schema** ([`schema::ColumnSchema`]): which CSV columns hold the identifier, the
//!    summary results and the per-question scores
//! 2. **Loading** ([`loader::load_csv`]): reads the delimited file into a [`Dataset`],
//!    treating unparseable numbers as missing scores
//! 3. **Lookup** ([`lookup::StudentIndex`]): exact and substring search over student
//!    identifiers
//!
//! Records are immutable once loaded; every derived view borrows the dataset read-only.
//!
//! # Examples
//!
//! ```
//! use examdash_dataset::{Metric, loader, schema::ColumnSchema};
//!
//! let csv = "ID number,Total\n 123456 ,27.5\n654321,n/a\n";
//! let dataset = loader::read_csv(csv.as_bytes(), &ColumnSchema::default()).unwrap();
//!
//! assert_eq!(dataset.len(), 2);
//! let record = dataset.exact_match("123456").unwrap();
//! assert_eq!(record.metric(Metric::Total), Some(27.5));
//! assert_eq!(dataset.exact_match("654321").unwrap().metric(Metric::Total), None);
//! ```

pub use self::{
    dataset::Dataset,
    record::{Metric, Module, QUESTION_COUNT, QuestionScores, StudentRecord},
};

mod dataset;
pub mod loader;
pub mod lookup;
mod record;
pub mod schema;
