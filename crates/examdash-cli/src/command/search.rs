use examdash_dashboard::{
    dashboard::Dashboard,
    state::{DashboardState, Event},
};

use crate::{command::DatasetArg, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SearchArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    /// Identifier or part of one (at least 3 characters for suggestions)
    term: String,
}

pub(crate) fn run(arg: &SearchArg) -> anyhow::Result<()> {
    let SearchArg { dataset, term } = arg;

    let config = util::read_config_file(dataset.config.as_deref())?;
    let records = util::read_results_file(&dataset.results_file, &config)?;
    let dashboard = Dashboard::new(records, config);

    for line in search_lines(&dashboard, term) {
        println!("{line}");
    }
    Ok(())
}

/// Suggestions, one per line, followed by the status the term leads to.
fn search_lines(dashboard: &Dashboard, term: &str) -> Vec<String> {
    let mut lines = dashboard
        .dataset()
        .index()
        .search(term)
        .iter()
        .map(|id| (*id).to_owned())
        .collect::<Vec<_>>();
    let state = dashboard.apply(DashboardState::default(), Event::Search(term.to_owned()));
    lines.push(dashboard.status_text(&state));
    lines
}

#[cfg(test)]
mod tests {
    use examdash_dashboard::config::DashboardConfig;
    use examdash_dataset::{Dataset, StudentRecord};

    use super::*;

    fn dashboard() -> Dashboard {
        let records = ["100234", "200234", "300111"]
            .into_iter()
            .map(|id| StudentRecord {
                total: Some(24.0),
                ..StudentRecord::new(id)
            })
            .collect();
        Dashboard::new(Dataset::new(records), DashboardConfig::default())
    }

    #[test]
    fn test_partial_term() {
        assert_eq!(
            search_lines(&dashboard(), "0234"),
            ["100234", "200234", "matricola 0234 not found"]
        );
    }

    #[test]
    fn test_exact_term() {
        assert_eq!(
            search_lines(&dashboard(), "300111"),
            ["300111", "Matricola 300111 | Total: 24"]
        );
    }

    #[test]
    fn test_short_term() {
        assert_eq!(search_lines(&dashboard(), "30"), ["matricola 30 not found"]);
    }
}
