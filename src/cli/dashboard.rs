use std::path::PathBuf;

use clap::Parser;

use crate::{
    cache::Cache,
    cli::{api::ApiArgs, storage::StorageArgs},
    dashboard::Dashboard,
    i18n::Language,
    ingestion::Ingestion,
    preferences::Preferences,
    prelude::*,
    region::Region,
    tariff::{Pricing, Tariffs},
};

#[derive(Parser)]
pub struct DashboardArgs {
    /// Price area, overrides the stored preference.
    #[clap(long, env = "ELPRIS_REGION")]
    pub region: Option<Region>,

    /// Interface language, overrides the stored preference and the locale.
    #[clap(long, env = "ELPRIS_LANGUAGE")]
    pub language: Option<Language>,

    #[clap(long, env = "ELPRIS_PRICING", value_enum, default_value_t = Pricing::default())]
    pub pricing: Pricing,

    /// TOML file overriding the built-in VAT, fees, and distribution tariffs.
    #[clap(long = "tariffs-path", env = "TARIFFS_PATH")]
    pub tariffs_path: Option<PathBuf>,

    #[clap(flatten)]
    pub api: ApiArgs,
}

impl DashboardArgs {
    pub fn build(self, storage: &StorageArgs, show_week: bool) -> Result<Dashboard> {
        let preferences = Preferences::read_from(&storage.preferences_path);
        let region = self.region.or(preferences.region).unwrap_or_default();
        let language = self.language.or(preferences.language).unwrap_or_else(Language::detect);
        info!(%region, ?language, pricing = ?self.pricing, "configured");

        let tariffs = match &self.tariffs_path {
            Some(path) => Tariffs::read_from(path)
                .with_context(|| format!("failed to load the tariffs from `{}`", path.display()))?,
            None => Tariffs::default(),
        };
        let client = self.api.new_client()?;
        let ingestion = Ingestion::builder()
            .api(self.api.energi_data(client.clone()))
            .pricing(self.pricing.into_strategy(tariffs))
            .build();
        Ok(Dashboard::builder()
            .region(region)
            .language(language)
            .ingestion(ingestion)
            .fuel(self.api.fuel(client.clone()))
            .utilities(self.api.utilities(client))
            .cache(Cache::new(storage.cache_path.clone()))
            .show_week(show_week)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, Utc};

    use super::*;
    use crate::snapshot::Snapshot;

    fn storage(directory: &tempfile::TempDir) -> StorageArgs {
        StorageArgs {
            cache_path: directory.path().join("cache.toml"),
            preferences_path: directory.path().join("preferences.toml"),
        }
    }

    #[test]
    fn test_stored_region_is_honored_with_stale_cache() -> Result {
        let directory = tempfile::tempdir()?;
        let storage = storage(&directory);
        Preferences { region: Some(Region::Dk2), language: Some(Language::Da) }
            .write_to(&storage.preferences_path)?;
        let now = Utc::now();
        let cached = Snapshot { region: Region::Dk2, ..Snapshot::default() };
        Cache::new(storage.cache_path.clone()).store(&cached, now - Cache::FRESHNESS - TimeDelta::minutes(1));

        let args = DashboardArgs::try_parse_from(["elpris"])?;
        let mut dashboard = DashboardArgs { region: None, ..args }.build(&storage, false)?;
        assert_eq!(dashboard.region(), Region::Dk2);
        assert!(!dashboard.restore(now));
        Ok(())
    }

    #[test]
    fn test_region_argument_overrides_preferences() -> Result {
        let directory = tempfile::tempdir()?;
        let storage = storage(&directory);
        Preferences { region: Some(Region::Dk2), language: None }.write_to(&storage.preferences_path)?;

        let args = DashboardArgs::try_parse_from(["elpris", "--region", "dk1"])?;
        assert_eq!(args.build(&storage, false)?.region(), Region::Dk1);
        Ok(())
    }

    #[test]
    fn test_missing_tariffs_file_is_an_error() -> Result {
        let directory = tempfile::tempdir()?;
        let storage = storage(&directory);
        let tariffs_path = directory.path().join("missing.toml");
        let args = DashboardArgs::try_parse_from(["elpris", "--tariffs-path", tariffs_path.to_str().unwrap()])?;
        assert!(args.build(&storage, false).is_err());
        Ok(())
    }
}
