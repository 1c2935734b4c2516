//! Cross-mode learner progress

pub mod progress;

pub use progress::{ModeStats, ScoreStats, StudyProgress, TriageStats};
