use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
pub struct StorageArgs {
    #[clap(long = "cache-path", env = "CACHE_PATH", default_value = "cache.toml")]
    pub cache_path: PathBuf,

    #[clap(long = "preferences-path", env = "PREFERENCES_PATH", default_value = "preferences.toml")]
    pub preferences_path: PathBuf,
}
