//! Persistence for package config and progress
//!
//! Two documents live in the injected state store: the active config under
//! `package-config` and its progress map under `package-progress`. They are
//! written and cleared together; progress must never reference a package id
//! the active config does not contain.

use anyhow::Result;
use chrono::{SecondsFormat, Utc};

use super::model::{PackageConfig, PackageProgress, PackageStats};
use crate::storage::{StateStore, get_json, set_json};

/// Store key for the active package config
pub const CONFIG_KEY: &str = "package-config";

/// Store key for the package progress map
pub const PROGRESS_KEY: &str = "package-progress";

/// Access to the persisted package state
pub struct PackageStore<'a> {
    store: &'a dyn StateStore,
}

impl<'a> PackageStore<'a> {
    /// Wrap a state store
    pub fn new(store: &'a dyn StateStore) -> Self {
        Self { store }
    }

    /// Load the active config, if one exists
    ///
    /// Malformed stored state reads as "no config".
    pub fn load_config(&self) -> Option<PackageConfig> {
        get_json(self.store, CONFIG_KEY)
    }

    /// Load the progress map, empty if absent or malformed
    pub fn load_progress(&self) -> PackageProgress {
        get_json(self.store, PROGRESS_KEY).unwrap_or_default()
    }

    /// Install a freshly generated config, replacing the previous one
    ///
    /// Progress is re-initialized to zero for every package of the new
    /// config; nothing from the old run survives. Returns the new progress.
    pub fn replace(&self, config: &PackageConfig) -> Result<PackageProgress> {
        let progress = config.initial_progress();

        set_json(self.store, CONFIG_KEY, config)?;
        set_json(self.store, PROGRESS_KEY, &progress)?;

        Ok(progress)
    }

    /// Record a completed quiz run for a package
    ///
    /// Overwrites the package's stats with this run's numbers; repeating a
    /// package replaces the previous attempt rather than accumulating. An
    /// id that is not part of the active config is ignored, since writing
    /// it would leave progress pointing at a package that does not exist.
    /// Returns the updated progress map, or `None` if nothing was written.
    pub fn record_completion(
        &self,
        package_id: &str,
        correct: usize,
        total: usize,
    ) -> Result<Option<PackageProgress>> {
        let Some(config) = self.load_config() else {
            tracing::warn!("Ignoring completion for '{}': no active config", package_id);
            return Ok(None);
        };
        if !config.contains(package_id) {
            tracing::warn!("Ignoring completion for unknown package '{}'", package_id);
            return Ok(None);
        }

        let mut progress = self.load_progress();
        progress.insert(
            package_id.to_string(),
            PackageStats {
                completed: total,
                correct,
                last_attempt: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        );

        set_json(self.store, PROGRESS_KEY, &progress)?;
        Ok(Some(progress))
    }

    /// Clear the config and its progress together
    ///
    /// Progress goes first: a config without progress entries reads as
    /// all-zero stats, while progress without a config would be orphaned.
    pub fn reset(&self) -> Result<()> {
        self.store.remove(PROGRESS_KEY)?;
        self.store.remove(CONFIG_KEY)?;
        Ok(())
    }
}
