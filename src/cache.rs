use std::{fs, path::PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{prelude::*, snapshot::Snapshot};

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    timestamp: DateTime<Utc>,
    snapshot: Snapshot,
}

/// Last snapshot on disk, for quick restarts.
pub struct Cache {
    path: PathBuf,
}

impl Cache {
    pub const FRESHNESS: TimeDelta = TimeDelta::minutes(5);

    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Return the cached snapshot if it is still fresh.
    #[instrument(skip_all, fields(path = ?self.path))]
    pub fn load(&self, now: DateTime<Utc>) -> Option<Snapshot> {
        if !self.path.is_file() {
            debug!("no cache yet");
            return None;
        }
        match self.read() {
            Ok(entry) if now - entry.timestamp < Self::FRESHNESS => {
                info!(timestamp = %entry.timestamp, "using the cache");
                Some(entry.snapshot)
            }
            Ok(entry) => {
                info!(timestamp = %entry.timestamp, "the cache is stale");
                None
            }
            Err(error) => {
                warn!("failed to read the cache: {error:#}");
                None
            }
        }
    }

    /// Persist the snapshot, logging but otherwise ignoring any failure.
    #[instrument(skip_all, fields(path = ?self.path))]
    pub fn store(&self, snapshot: &Snapshot, now: DateTime<Utc>) {
        let entry = CacheEntry { timestamp: now, snapshot: snapshot.clone() };
        match self.write(&entry) {
            Ok(()) => debug!("stored"),
            Err(error) => warn!("failed to write the cache: {error:#}"),
        }
    }

    fn read(&self) -> Result<CacheEntry> {
        let contents = fs::read(&self.path).context("failed to read the file")?;
        toml::from_slice(&contents).context("failed to parse the cache")
    }

    fn write(&self, entry: &CacheEntry) -> Result {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("failed to create the directory")?;
        }
        fs::write(&self.path, toml::to_string(entry)?).context("failed to write the file")?;
        Ok(())
    }
}
