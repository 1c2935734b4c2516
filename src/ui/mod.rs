//! UI rendering components

pub mod browser;
pub mod flashcards;
pub mod layout;
pub mod menu;
pub mod packages;
pub mod quiz;
pub mod triage;

use ratatui::Frame;

use crate::app::state::{AppState, Screen};
use crate::config::Config;
use crate::corpus::Corpus;
use crate::study::StudyProgress;

/// Main draw function
pub fn draw(
    frame: &mut Frame,
    state: &mut AppState,
    config: &Config,
    corpus: &Corpus,
    study: &StudyProgress,
) {
    let theme = config.active_theme();

    match state.screen {
        Screen::Menu => menu::draw(frame, state, corpus, study, &theme),
        Screen::Browser => browser::draw(frame, state, corpus, study, &theme),
        Screen::Flashcards => flashcards::draw(frame, state, corpus, study, &theme),
        Screen::Triage => triage::draw(frame, state, corpus, &theme),
        Screen::Packages => packages::draw(frame, state, corpus, &theme),
        Screen::Quiz => quiz::draw(frame, state, &theme),
    }
}
