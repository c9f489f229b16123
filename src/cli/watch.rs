use std::time::Duration;

use clap::Parser;

use crate::{
    cli::{dashboard::DashboardArgs, storage::StorageArgs},
    prelude::*,
};

#[derive(Parser)]
pub struct WatchArgs {
    #[clap(long = "interval-secs", env = "REFRESH_INTERVAL_SECS", default_value = "300")]
    pub interval_secs: u64,

    #[clap(long)]
    pub week: bool,

    #[clap(flatten)]
    pub dashboard: DashboardArgs,
}

#[instrument(skip_all, fields(interval_secs = args.interval_secs))]
pub async fn watch(args: WatchArgs, storage: &StorageArgs) -> Result {
    ensure!(args.interval_secs != 0, "the refresh interval must be positive");
    let mut dashboard = args.dashboard.build(storage, args.week)?;
    info!(region = %dashboard.region(), "press Enter to refresh, Ctrl+C to stop");
    dashboard.watch(Duration::from_secs(args.interval_secs)).await
}
