mod api;
mod dashboard;
mod prefs;
mod show;
mod storage;
mod watch;

use clap::{Parser, Subcommand};

pub use self::{prefs::prefs, show::show, watch::watch};
use crate::cli::{prefs::PrefsArgs, show::ShowArgs, storage::StorageArgs, watch::WatchArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub storage: StorageArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the current prices, forecast, and history once.
    #[clap(name = "show")]
    Show(Box<ShowArgs>),

    /// Keep the dashboard fresh: refresh periodically and on Enter.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),

    /// Store the default region and language.
    #[clap(name = "prefs")]
    Prefs(PrefsArgs),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::region::Region;

    #[test]
    fn test_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_show() -> crate::prelude::Result {
        let args = Args::try_parse_from(["elpris", "show", "--region", "dk2", "--pricing", "flat"])?;
        let Command::Show(show) = args.command else {
            panic!("expected `show`");
        };
        assert_eq!(show.dashboard.region, Some(Region::Dk2));
        assert_eq!(show.dashboard.api.fuel_facility_number, 27);
        Ok(())
    }
}
