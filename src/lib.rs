//! Dojo - a terminal study hall for system design topics
//!
//! Dojo drills a topic corpus through flashcards, swipe review, short
//! quizzes, and seeded practice packages whose shuffle order reproduces
//! exactly from a recorded seed.

pub mod app;
pub mod config;
pub mod corpus;
pub mod packages;
pub mod quiz;
pub mod storage;
pub mod study;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
