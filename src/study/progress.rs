//! Learner progress across study modes
//!
//! One persisted document tracks which topics are mastered or queued for
//! review, the daily study streak, and per-mode score tallies. Mastered and
//! review are mutually exclusive sets: marking a topic one way removes it
//! from the other.

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::storage::{StateStore, get_json, set_json};

/// Store key for the study progress document
pub const STUDY_PROGRESS_KEY: &str = "study-progress";

/// Date format used in `lastStudyDate`
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Correct/total tally for a scored mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreStats {
    pub correct: usize,
    pub total: usize,
}

/// Known/learning tally for swipe review
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageStats {
    pub known: usize,
    pub learning: usize,
}

/// Per-mode statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeStats {
    pub flashcards: ScoreStats,
    pub quiz: ScoreStats,
    pub triage: TriageStats,
}

/// The learner's cross-mode progress
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyProgress {
    /// Topics marked as known, in the order they were mastered
    pub mastered_topics: Vec<String>,
    /// Topics queued for another look
    pub review_topics: Vec<String>,
    /// Consecutive days with study activity
    pub study_streak: u32,
    /// Date of the most recent activity (`YYYY-MM-DD`, UTC)
    pub last_study_date: String,
    /// Per-mode tallies
    pub mode_stats: ModeStats,
}

impl Default for StudyProgress {
    fn default() -> Self {
        Self {
            mastered_topics: Vec::new(),
            review_topics: Vec::new(),
            study_streak: 0,
            last_study_date: chrono::Utc::now().date_naive().format(DATE_FORMAT).to_string(),
            mode_stats: ModeStats::default(),
        }
    }
}

impl StudyProgress {
    /// Load from the store; absent or malformed state yields the default
    pub fn load(store: &dyn StateStore) -> Self {
        get_json(store, STUDY_PROGRESS_KEY).unwrap_or_default()
    }

    /// Persist to the store
    pub fn save(&self, store: &dyn StateStore) -> Result<()> {
        set_json(store, STUDY_PROGRESS_KEY, self)
    }

    /// Mark a topic as mastered, removing it from the review queue
    pub fn master(&mut self, name: &str) {
        if !self.mastered_topics.iter().any(|t| t == name) {
            self.mastered_topics.push(name.to_string());
        }
        self.review_topics.retain(|t| t != name);
        self.touch_streak(chrono::Utc::now().date_naive());
    }

    /// Queue a topic for review, removing it from the mastered set
    pub fn mark_review(&mut self, name: &str) {
        if !self.review_topics.iter().any(|t| t == name) {
            self.review_topics.push(name.to_string());
        }
        self.mastered_topics.retain(|t| t != name);
        self.touch_streak(chrono::Utc::now().date_naive());
    }

    /// Whether a topic is in the mastered set
    pub fn is_mastered(&self, name: &str) -> bool {
        self.mastered_topics.iter().any(|t| t == name)
    }

    /// Whether a topic is queued for review
    pub fn needs_review(&self, name: &str) -> bool {
        self.review_topics.iter().any(|t| t == name)
    }

    /// Record a completed generated-quiz run (last run wins)
    pub fn record_quiz_score(&mut self, correct: usize, total: usize) {
        self.mode_stats.quiz = ScoreStats { correct, total };
        self.touch_streak(chrono::Utc::now().date_naive());
    }

    /// Record a finished swipe-review session (last session wins)
    pub fn record_triage_session(&mut self, known: usize, learning: usize) {
        self.mode_stats.triage = TriageStats { known, learning };
        self.touch_streak(chrono::Utc::now().date_naive());
    }

    /// Record a single flashcard mark (accumulates)
    pub fn record_flashcard_mark(&mut self, known: bool) {
        self.mode_stats.flashcards.total += 1;
        if known {
            self.mode_stats.flashcards.correct += 1;
        }
        self.touch_streak(chrono::Utc::now().date_naive());
    }

    /// Update the streak for activity on `today`
    ///
    /// Day-after activity extends the streak, repeat activity on the same
    /// day leaves it alone, and anything else restarts at 1. Date math
    /// handles month and year boundaries.
    fn touch_streak(&mut self, today: NaiveDate) {
        let last = NaiveDate::parse_from_str(&self.last_study_date, DATE_FORMAT).ok();

        match last {
            Some(date) if date == today && self.study_streak > 0 => {}
            Some(date) if (today - date).num_days() == 1 => self.study_streak += 1,
            _ => self.study_streak = 1,
        }

        self.last_study_date = today.format(DATE_FORMAT).to_string();
    }
}
