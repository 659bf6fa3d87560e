use std::{io, path::PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{export::ExportArg, search::SearchArg, summary::SummaryArg, view::ViewArg};

mod export;
mod search;
mod summary;
mod view;

/// Results file read when no subcommand is given.
const DEFAULT_RESULTS_FILE: &str = "data/PBS_mod1_mod2.csv";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Browse the results dashboard interactively
    View(#[clap(flatten)] ViewArg),
    /// Print summary statistics and histogram shape per metric
    Summary(#[clap(flatten)] SummaryArg),
    /// Look up students by identifier
    Search(#[clap(flatten)] SearchArg),
    /// Write chart descriptors as JSON
    Export(#[clap(flatten)] ExportArg),
}

/// Results file and optional configuration shared by every subcommand.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DatasetArg {
    /// Results CSV file
    results_file: PathBuf,
    /// Dashboard configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Default for DatasetArg {
    fn default() -> Self {
        Self {
            results_file: PathBuf::from(DEFAULT_RESULTS_FILE),
            config: None,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args.mode.unwrap_or(Mode::View(ViewArg::default()));

    // log lines would tear the alternate screen
    let default_filter = match mode {
        Mode::View(_) => "examdash=warn",
        _ => "examdash=info",
    };
    init_tracing(default_filter);

    match mode {
        Mode::View(arg) => view::run(&arg)?,
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::Search(arg) => search::run(&arg)?,
        Mode::Export(arg) => export::run(&arg)?,
    }
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_export() {
        let args = CommandArgs::try_parse_from([
            "examdash",
            "export",
            "results.csv",
            "--student",
            "12345",
            "--metric",
            "mod1",
        ])
        .unwrap();
        assert!(matches!(args.mode, Some(Mode::Export(_))));
    }

    #[test]
    fn test_no_subcommand() {
        let args = CommandArgs::try_parse_from(["examdash"]).unwrap();
        assert!(args.mode.is_none());
    }
}
