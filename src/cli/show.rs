use clap::Parser;

use crate::{
    cli::{dashboard::DashboardArgs, storage::StorageArgs},
    prelude::*,
};

#[derive(Parser)]
pub struct ShowArgs {
    /// Also print the week of prices, one point per hour.
    #[clap(long)]
    pub week: bool,

    #[clap(flatten)]
    pub dashboard: DashboardArgs,
}

#[instrument(skip_all)]
pub async fn show(args: ShowArgs, storage: &StorageArgs) -> Result {
    let mut dashboard = args.dashboard.build(storage, args.week)?;
    debug!(region = %dashboard.region(), "showing…");
    dashboard.show().await;
    Ok(())
}
