use std::{fmt::Debug, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{i18n::Language, prelude::*, region::Region};

/// User choices that outlive the cache.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl Preferences {
    /// Read the preferences, treating a missing or broken file as empty.
    #[instrument(name = "Reading the preferences…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Self {
        let path = path.as_ref();
        if !path.is_file() {
            return Self::default();
        }
        let result: Result<Self> = fs::read(path)
            .context("failed to read the file")
            .and_then(|contents| toml::from_slice(&contents).context("failed to parse"));
        result.unwrap_or_else(|error| {
            warn!("ignoring the preferences: {error:#}");
            Self::default()
        })
    }

    #[instrument(skip(self), name = "Writing the preferences…")]
    pub fn write_to<P: AsRef<Path> + Debug>(&self, path: P) -> Result {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string(self)?)?;
        Ok(())
    }

    /// Combine with newer choices, keeping the current ones where nothing new is given.
    #[must_use]
    pub fn merge(self, region: Option<Region>, language: Option<Language>) -> Self {
        Self { region: region.or(self.region), language: language.or(self.language) }
    }
}
