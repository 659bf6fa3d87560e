use crate::{command::DatasetArg, tui::Tui, util};

use self::app::DashboardApp;

mod app;
mod widgets;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ViewArg {
    #[clap(flatten)]
    dataset: DatasetArg,
}

pub(crate) fn run(arg: &ViewArg) -> anyhow::Result<()> {
    let ViewArg { dataset } = arg;

    let config = util::read_config_file(dataset.config.as_deref())?;
    let dashboard = util::open_dashboard(&dataset.results_file, config);

    let mut app = DashboardApp::new(dashboard);
    Tui::new().run(&mut app)?;
    Ok(())
}
