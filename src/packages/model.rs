//! Data model for practice packages
//!
//! A package config is one generation run: the seed, the partitioning
//! parameters, and the resulting packages. Progress is a parallel map from
//! package id to attempt stats, persisted separately so a re-run only
//! touches one small document.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::corpus::Question;

/// Id of the package holding every question
pub const ALL_PACKAGE_ID: &str = "pkg-all";

/// A named slice of the shuffled question pool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// `pkg-all` or `pkg-<n>` with n starting at 1
    pub id: String,
    /// Display name, including the question range
    pub name: String,
    /// Questions in play order
    pub questions: Vec<Question>,
    /// Question count, recorded at generation time
    pub total_questions: usize,
}

/// One generation run and its packages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageConfig {
    /// Seed the shuffle was derived from
    pub seed: String,
    /// Requested chunk size
    pub questions_per_package: usize,
    /// Pool size at generation time
    pub total_questions: usize,
    /// RFC 3339 creation timestamp
    pub created_at: String,
    /// All packages, `pkg-all` first
    pub packages: Vec<Package>,
}

impl PackageConfig {
    /// Find a package by id
    pub fn find(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    /// Whether a package id belongs to this config
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Zeroed progress entries for every package in this config
    pub fn initial_progress(&self) -> PackageProgress {
        self.packages.iter().map(|p| (p.id.clone(), PackageStats::default())).collect()
    }
}

/// Attempt stats for a single package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageStats {
    /// Questions answered in the last completed run
    pub completed: usize,
    /// Correct answers in the last completed run
    pub correct: usize,
    /// RFC 3339 timestamp of the last completed run, or empty if never run
    pub last_attempt: String,
}

impl PackageStats {
    /// Whether this package has ever been completed
    pub fn attempted(&self) -> bool {
        !self.last_attempt.is_empty()
    }

    /// Completed percentage of `total`, rounded to the nearest whole number
    pub fn percent(&self, total: usize) -> u32 {
        if total == 0 {
            return 0;
        }
        ((self.completed as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Progress for all packages of the current config, keyed by package id
pub type PackageProgress = HashMap<String, PackageStats>;

/// Stats for a package id, or the zero record if it was never written
pub fn stats_for(progress: &PackageProgress, id: &str) -> PackageStats {
    progress.get(id).cloned().unwrap_or_default()
}
