//! Configuration management for Dojo

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Persisted application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name of a built-in theme
    pub theme: String,

    /// Full palette override; wins over `theme` when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<Theme>,

    /// Swipe animation speed multiplier; 0.0 disables animation
    pub animation_speed: f32,

    /// Corpus file to load instead of the installed one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corpus_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Tokyo Night".to_string(),
            custom_theme: None,
            animation_speed: 1.0,
            corpus_path: None,
        }
    }
}

impl Config {
    /// Load the saved configuration, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "dojo").context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "dojo").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the directory holding persisted learner state
    pub fn state_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("state"))
    }

    /// Get the path of the installed corpus file
    pub fn installed_corpus_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("corpus.jsonl"))
    }

    /// Get the active theme
    ///
    /// A custom theme wins over the named preset; an unknown name falls
    /// back to the default palette.
    pub fn active_theme(&self) -> Theme {
        if let Some(custom) = &self.custom_theme {
            return custom.clone();
        }
        Theme::by_name(&self.theme).unwrap_or_default()
    }
}
