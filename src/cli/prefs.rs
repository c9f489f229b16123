use clap::Parser;

use crate::{
    cli::storage::StorageArgs,
    i18n::Language,
    preferences::Preferences,
    prelude::*,
    region::Region,
};

#[derive(Parser)]
pub struct PrefsArgs {
    #[clap(long)]
    pub region: Option<Region>,

    #[clap(long)]
    pub language: Option<Language>,

    /// Forget all the stored preferences.
    #[clap(long, conflicts_with_all = ["region", "language"])]
    pub reset: bool,
}

#[instrument(skip_all)]
pub fn prefs(args: &PrefsArgs, storage: &StorageArgs) -> Result {
    let path = &storage.preferences_path;
    let preferences = if args.reset {
        Preferences::default()
    } else {
        Preferences::read_from(path).merge(args.region, args.language)
    };
    preferences
        .write_to(path)
        .with_context(|| format!("failed to store the preferences in `{}`", path.display()))?;
    info!(region = ?preferences.region, language = ?preferences.language, "stored");
    Ok(())
}
