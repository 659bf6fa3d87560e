//! Exam results dashboard core.
//!
//! Builds the chart models for a loaded [`Dataset`](examdash_dataset::Dataset) and keeps
//! one student highlighted across all of them:
//!
//! - [`histogram`]: distribution of a summary metric with its mean marker
//! - [`scatter`]: jittered per-question scores and question means for each question group
//! - [`state`]: the selection state machine driven by search input and suggestion picks
//! - [`dashboard`]: renders [`view`] snapshots from a state
//! - [`chart`]: declarative chart descriptors for an external plotting component
//!
//! # Examples
//!
//! ```
//! use examdash_dashboard::{
//!     config::DashboardConfig,
//!     dashboard::Dashboard,
//!     state::{DashboardState, Event},
//! };
//! use examdash_dataset::{Dataset, StudentRecord};
//!
//! let records = ["12345", "67890"]
//!     .into_iter()
//!     .zip([18.0, 27.0])
//!     .map(|(id, total)| StudentRecord { total: Some(total), ..StudentRecord::new(id) })
//!     .collect();
//! let dashboard = Dashboard::new(Dataset::new(records), DashboardConfig::default());
//!
//! let state = dashboard.apply(DashboardState::default(), Event::Search("67890".to_owned()));
//! let view = dashboard.render(&state);
//! assert_eq!(view.status, "Matricola 67890 | Total: 27");
//! assert!(view.histogram.selected.is_some());
//! ```

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod histogram;
pub mod scatter;
pub mod state;
pub mod view;
