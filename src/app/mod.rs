//! Application state and event handling

pub mod input;
pub mod state;
pub mod swipe;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Config;
use crate::corpus::Corpus;
use crate::packages::{PackageProgress, PackageStore, extract_pool, generate, validate_size};
use crate::quiz::{QuizPhase, QuizSession, short};
use crate::storage::{FileStore, StateStore};
use crate::study::StudyProgress;
use crate::ui;
use input::{Action, key_with_modifier_to_action};
use state::{AppState, FlashcardState, MenuItem, Screen, TriageState};
use swipe::{SwipeRelease, SwipeVerdict};

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Loaded topic corpus
    corpus: Corpus,

    /// Persistent key-value state on disk
    store: FileStore,

    /// Study progress, loaded once and saved after every change
    study: StudyProgress,

    /// Current application state
    state: AppState,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, corpus: Corpus) -> Result<Self> {
        let store = FileStore::new(Config::state_dir()?);
        let study = StudyProgress::load(&store);
        let terminal = Self::setup_terminal()?;

        let mut app =
            Self { config, corpus, store, study, state: AppState::default(), terminal };
        app.reload_packages();
        Ok(app)
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let mut last_frame = Instant::now();
        loop {
            // Advance card animations
            let now = Instant::now();
            let dt = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;
            if self.state.screen == Screen::Triage && self.state.triage.gesture.tick(dt) {
                self.finish_triage_card()?;
            }

            // Draw UI
            self.terminal.draw(|frame| {
                ui::draw(frame, &mut self.state, &self.config, &self.corpus, &self.study);
            })?;

            // Handle events
            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match self.handle_key(key) {
                            Ok(true) => break, // Exit requested
                            Ok(false) => {}    // Continue
                            Err(e) => {
                                tracing::error!("Error handling key: {}", e);
                            }
                        }
                    }
                    Event::Mouse(mouse) => {
                        if let Err(e) = self.handle_mouse(mouse) {
                            tracing::error!("Error handling mouse event: {}", e);
                        }
                    }
                    _ => {}
                }
            }
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match self.state.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Browser => self.handle_browser_key(key),
            Screen::Flashcards => self.handle_flashcards_key(key),
            Screen::Triage => self.handle_triage_key(key),
            Screen::Packages => self.handle_packages_key(key),
            Screen::Quiz => self.handle_quiz_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key_with_modifier_to_action(key.code, key.modifiers) {
            Some(Action::Down) => self.state.menu.select_next(),
            Some(Action::Up) => self.state.menu.select_prev(),
            Some(Action::Select) => self.open_menu_item(self.state.menu.current()),
            Some(Action::Back) | Some(Action::Quit) => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    /// Enter the selected mode, dealing fresh decks where needed
    fn open_menu_item(&mut self, item: MenuItem) {
        match item {
            MenuItem::Browser => self.state.screen = Screen::Browser,
            MenuItem::Flashcards => {
                self.state.flashcards = FlashcardState::deal(self.corpus.len());
                self.state.screen = Screen::Flashcards;
            }
            MenuItem::Triage => {
                self.state.triage =
                    TriageState::deal(self.corpus.len(), self.config.animation_speed);
                self.state.screen = Screen::Triage;
            }
            MenuItem::ShortQuiz => {
                let questions = short::build(&self.corpus);
                self.state.quiz = Some(QuizSession::standalone("Short Quiz", questions));
                self.state.screen = Screen::Quiz;
            }
            MenuItem::Packages => {
                self.reload_packages();
                if self.state.packages.config.is_none() {
                    self.state.packages.open_setup();
                }
                self.state.screen = Screen::Packages;
            }
        }
    }

    fn handle_browser_key(&mut self, key: KeyEvent) -> Result<bool> {
        self.state.browser.message = None;

        // Search mode swallows everything except its own controls
        if self.state.browser.search.active {
            match key.code {
                KeyCode::Esc => {
                    self.state.browser.search.active = false;
                    self.state.browser.search.query.clear();
                }
                KeyCode::Enter => self.state.browser.search.active = false,
                KeyCode::Backspace => {
                    self.state.browser.search.query.pop();
                }
                KeyCode::Char(c) => self.state.browser.search.query.push(c),
                _ => {}
            }
            let filtered_len = self.state.browser.filtered(&self.corpus).len();
            self.state.browser.clamp_selection(filtered_len);
            self.state.browser.ensure_selection_visible();
            return Ok(false);
        }

        let filtered_len = self.state.browser.filtered(&self.corpus).len();
        let page = self.state.browser.visible_height.max(1);
        match key_with_modifier_to_action(key.code, key.modifiers) {
            Some(Action::Down) => {
                if self.state.browser.selected + 1 < filtered_len {
                    self.state.browser.selected += 1;
                }
            }
            Some(Action::Up) => {
                self.state.browser.selected = self.state.browser.selected.saturating_sub(1);
            }
            Some(Action::Top) => self.state.browser.selected = 0,
            Some(Action::Bottom) => {
                self.state.browser.selected = filtered_len.saturating_sub(1);
            }
            Some(Action::PageDown) => {
                self.state.browser.selected =
                    (self.state.browser.selected + page).min(filtered_len.saturating_sub(1));
            }
            Some(Action::PageUp) => {
                self.state.browser.selected = self.state.browser.selected.saturating_sub(page);
            }
            Some(Action::HalfPageDown) => {
                self.state.browser.selected =
                    (self.state.browser.selected + page / 2).min(filtered_len.saturating_sub(1));
            }
            Some(Action::HalfPageUp) => {
                self.state.browser.selected =
                    self.state.browser.selected.saturating_sub(page / 2);
            }
            Some(Action::Select) | Some(Action::Flip) => {
                self.state.browser.show_detail = !self.state.browser.show_detail;
            }
            Some(Action::Search) => {
                self.state.browser.search.active = true;
                self.state.browser.search.query.clear();
            }
            Some(Action::CycleCategory) => {
                let categories = self.corpus.categories();
                self.state.browser.cycle_category(&categories);
            }
            Some(Action::CycleDepth) => self.state.browser.cycle_depth(),
            Some(Action::CopyName) => self.copy_selected_topic(),
            Some(Action::Back) => {
                if self.state.browser.show_detail {
                    self.state.browser.show_detail = false;
                } else {
                    self.state.screen = Screen::Menu;
                }
            }
            Some(Action::Quit) => return Ok(true),
            _ => {}
        }
        self.state.browser.ensure_selection_visible();
        Ok(false)
    }

    /// Copy the selected topic's name to the system clipboard
    fn copy_selected_topic(&mut self) {
        let filtered = self.state.browser.filtered(&self.corpus);
        let Some(&topic_index) = filtered.get(self.state.browser.selected) else {
            return;
        };
        let name = self.corpus.topics[topic_index].name.clone();
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(name.clone()))
        {
            Ok(()) => self.state.browser.message = Some(format!("Copied \"{name}\"")),
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {}", e);
                self.state.browser.message = Some("Clipboard unavailable".to_string());
            }
        }
    }

    fn handle_flashcards_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key_with_modifier_to_action(key.code, key.modifiers) {
            Some(Action::Flip) | Some(Action::Select) => self.state.flashcards.flip(),
            Some(Action::Right) | Some(Action::Down) => self.state.flashcards.advance(),
            Some(Action::Left) | Some(Action::Up) => self.state.flashcards.retreat(),
            Some(Action::ToggleShuffle) => self.state.flashcards.toggle_shuffle(),
            Some(Action::MarkKnown) => self.mark_flashcard(true)?,
            Some(Action::MarkReview) => self.mark_flashcard(false)?,
            Some(Action::Back) => self.state.screen = Screen::Menu,
            Some(Action::Quit) => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    /// Rate the current flashcard and move on to the next one
    fn mark_flashcard(&mut self, known: bool) -> Result<()> {
        let Some(topic_index) = self.state.flashcards.current_topic() else {
            return Ok(());
        };
        let name = self.corpus.topics[topic_index].name.clone();
        if known {
            self.study.master(&name);
        } else {
            self.study.mark_review(&name);
        }
        self.study.record_flashcard_mark(known);
        self.study.save(&self.store)?;
        self.state.flashcards.advance();
        Ok(())
    }

    fn handle_triage_key(&mut self, key: KeyEvent) -> Result<bool> {
        if self.state.triage.complete {
            match key_with_modifier_to_action(key.code, key.modifiers) {
                Some(Action::Select) => self.state.triage.restart(),
                Some(Action::Back) => self.state.screen = Screen::Menu,
                Some(Action::Quit) => return Ok(true),
                _ => {}
            }
            return Ok(false);
        }

        // A card mid-drag or mid-flight takes no keyboard verdicts; otherwise
        // a held arrow key would rate the same card twice.
        let busy =
            self.state.triage.gesture.is_dragging() || self.state.triage.gesture.is_animating();
        match key_with_modifier_to_action(key.code, key.modifiers) {
            Some(Action::Right) | Some(Action::MarkKnown) if !busy => {
                self.triage_verdict(SwipeVerdict::Know)?;
            }
            Some(Action::Left) | Some(Action::MarkReview) if !busy => {
                self.triage_verdict(SwipeVerdict::Review)?;
            }
            Some(Action::Flip) | Some(Action::Select) if !busy => {
                self.state.triage.flipped = !self.state.triage.flipped;
            }
            Some(Action::Back) => self.state.screen = Screen::Menu,
            Some(Action::Quit) => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    /// Rate the current card from the keyboard: record first, then fling
    fn triage_verdict(&mut self, verdict: SwipeVerdict) -> Result<()> {
        self.record_swipe(verdict)?;
        self.state.triage.gesture.fling(verdict);
        Ok(())
    }

    /// Record a verdict for the card on screen
    fn record_swipe(&mut self, verdict: SwipeVerdict) -> Result<()> {
        let Some(topic_index) = self.state.triage.current_topic() else {
            return Ok(());
        };
        let name = self.corpus.topics[topic_index].name.clone();
        match verdict {
            SwipeVerdict::Know => {
                self.study.master(&name);
                self.state.triage.known += 1;
            }
            SwipeVerdict::Review => {
                self.study.mark_review(&name);
                self.state.triage.learning += 1;
            }
        }
        self.study.save(&self.store)?;
        Ok(())
    }

    /// A fling animation finished: bring up the next card
    fn finish_triage_card(&mut self) -> Result<()> {
        if self.state.triage.advance_card() {
            self.study
                .record_triage_session(self.state.triage.known, self.state.triage.learning);
            self.study.save(&self.store)?;
        }
        Ok(())
    }

    /// Mouse input drives the swipe gesture on the triage screen
    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.state.screen != Screen::Triage || self.state.triage.complete {
            return Ok(());
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.state.triage.gesture.press(mouse.column);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.state.triage.gesture.drag(mouse.column);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                match self.state.triage.gesture.release() {
                    Some(SwipeRelease::Committed(verdict)) => self.record_swipe(verdict)?,
                    Some(SwipeRelease::Tap) => {
                        self.state.triage.flipped = !self.state.triage.flipped;
                    }
                    Some(SwipeRelease::SpringBack) | None => {}
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_packages_key(&mut self, key: KeyEvent) -> Result<bool> {
        if self.state.packages.confirm_reset {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.state.packages.confirm_reset = false;
                    self.reset_packages()?;
                }
                KeyCode::Char('n') | KeyCode::Esc => self.state.packages.confirm_reset = false,
                _ => {}
            }
            return Ok(false);
        }

        if self.state.packages.setup {
            return self.handle_setup_key(key);
        }

        match key_with_modifier_to_action(key.code, key.modifiers) {
            Some(Action::Down) => self.state.packages.select_next(),
            Some(Action::Up) => self.state.packages.select_prev(),
            Some(Action::Select) => self.start_package_quiz(),
            Some(Action::Back) => self.state.screen = Screen::Menu,
            Some(Action::Quit) => return Ok(true),
            _ => match key.code {
                KeyCode::Char('n') => self.state.packages.open_setup(),
                KeyCode::Char('x') => self.state.packages.confirm_reset = true,
                _ => {}
            },
        }
        Ok(false)
    }

    /// Keys for the package setup form: digits, backspace, confirm
    fn handle_setup_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Esc => {
                // Without a config there is no summary to fall back to
                if self.state.packages.config.is_some() {
                    self.state.packages.setup = false;
                } else {
                    self.state.screen = Screen::Menu;
                }
            }
            KeyCode::Enter => self.generate_packages()?,
            KeyCode::Backspace => {
                self.state.packages.size_input.pop();
                self.state.packages.error = None;
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.state.packages.size_input.push(c);
                self.state.packages.error = None;
            }
            KeyCode::Char('q') => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    /// Validate the setup input and generate a fresh package config
    fn generate_packages(&mut self) -> Result<()> {
        let pool = extract_pool(&self.corpus);
        let size = match validate_size(&self.state.packages.size_input, pool.len()) {
            Ok(size) => size,
            Err(e) => {
                self.state.packages.error = Some(e.to_string());
                return Ok(());
            }
        };

        let config = generate(&pool, size);
        let progress = PackageStore::new(&self.store).replace(&config)?;
        tracing::info!("Generated {} packages from seed '{}'", config.packages.len(), config.seed);

        self.state.packages.config = Some(config);
        self.state.packages.progress = progress;
        self.state.packages.setup = false;
        self.state.packages.selected = 0;
        Ok(())
    }

    /// Clear the active config and return to the setup form
    fn reset_packages(&mut self) -> Result<()> {
        PackageStore::new(&self.store).reset()?;
        self.state.packages.config = None;
        self.state.packages.progress = PackageProgress::default();
        self.state.packages.open_setup();
        Ok(())
    }

    /// Pull the persisted config and progress into the packages screen
    fn reload_packages(&mut self) {
        let store = PackageStore::new(&self.store);
        self.state.packages.config = store.load_config();
        self.state.packages.progress = store.load_progress();
        let count = self.state.packages.package_count();
        if self.state.packages.selected >= count {
            self.state.packages.selected = count.saturating_sub(1);
        }
    }

    /// Start a quiz over the selected package
    fn start_package_quiz(&mut self) {
        let Some(config) = &self.state.packages.config else {
            return;
        };
        let Some(package) = config.packages.get(self.state.packages.selected) else {
            return;
        };
        if package.questions.is_empty() {
            return;
        }
        self.state.quiz = Some(QuizSession::for_package(
            package.id.clone(),
            package.name.clone(),
            package.questions.clone(),
        ));
        self.state.screen = Screen::Quiz;
    }

    fn handle_quiz_key(&mut self, key: KeyEvent) -> Result<bool> {
        let Some(session) = self.state.quiz.as_mut() else {
            self.state.screen = Screen::Menu;
            return Ok(false);
        };

        match session.phase() {
            QuizPhase::Answering => match key_with_modifier_to_action(key.code, key.modifiers) {
                Some(Action::Down) => session.select_next(),
                Some(Action::Up) => session.select_prev(),
                Some(Action::Select) => session.confirm(),
                Some(Action::Back) => self.leave_quiz(),
                Some(Action::Quit) => return Ok(true),
                _ => {}
            },
            QuizPhase::Feedback => match key_with_modifier_to_action(key.code, key.modifiers) {
                Some(Action::Select) => {
                    if session.advance() {
                        self.record_quiz_completion()?;
                    }
                }
                Some(Action::Back) => self.leave_quiz(),
                Some(Action::Quit) => return Ok(true),
                _ => {}
            },
            QuizPhase::Complete => match key_with_modifier_to_action(key.code, key.modifiers) {
                Some(Action::Select) | Some(Action::Back) => self.leave_quiz(),
                Some(Action::Quit) => return Ok(true),
                _ => {}
            },
        }
        Ok(false)
    }

    /// Persist a finished run; called once, on the completion transition
    fn record_quiz_completion(&mut self) -> Result<()> {
        let Some(session) = &self.state.quiz else {
            return Ok(());
        };
        if let Some(progress) = record_quiz_outcome(session, &mut self.study, &self.store)? {
            self.state.packages.progress = progress;
        }
        Ok(())
    }

    /// Drop the session and return to wherever the quiz was started from
    fn leave_quiz(&mut self) {
        let from_package =
            self.state.quiz.as_ref().is_some_and(|s| s.package_id().is_some());
        self.state.quiz = None;
        if from_package {
            self.reload_packages();
            self.state.screen = Screen::Packages;
        } else {
            self.state.screen = Screen::Menu;
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Route a finished run to its ledger
///
/// A package run credits the package record; only the standalone generated
/// quiz counts toward the quiz mode stats. Returns the refreshed package
/// progress when one was written.
fn record_quiz_outcome(
    session: &QuizSession,
    study: &mut StudyProgress,
    store: &dyn StateStore,
) -> Result<Option<PackageProgress>> {
    let score = session.score();
    let total = session.total();

    match session.package_id() {
        Some(id) => PackageStore::new(store).record_completion(id, score, total),
        None => {
            study.record_quiz_score(score, total);
            study.save(store)?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::corpus::Question;
    use crate::packages::{generate_with_seed, stats_for};
    use crate::storage::MemoryStore;
    use crate::study::ScoreStats;

    fn create_test_questions(count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| Question {
                question: format!("Question {}", i),
                options: vec!["a".into(), "b".into()],
                answer: "a".into(),
                explanation: None,
                topic_name: None,
                topic_category: None,
            })
            .collect()
    }

    fn complete_run(session: &mut QuizSession) {
        while session.phase() != QuizPhase::Complete {
            session.confirm();
            session.advance();
        }
    }

    #[test]
    fn package_run_credits_the_package_record_only() {
        let store = MemoryStore::new();
        let config = generate_with_seed(&create_test_questions(4), 2, "test-seed");
        PackageStore::new(&store).replace(&config).unwrap();

        let package = &config.packages[1];
        let mut session = QuizSession::for_package(
            package.id.clone(),
            package.name.clone(),
            package.questions.clone(),
        );
        complete_run(&mut session);

        let mut study = StudyProgress::default();
        let updated = record_quiz_outcome(&session, &mut study, &store).unwrap();

        let progress = updated.unwrap();
        assert_eq!(stats_for(&progress, &package.id).completed, 2);
        assert_eq!(stats_for(&progress, &package.id).correct, 2);
        assert_eq!(study.mode_stats.quiz, ScoreStats::default());
        assert_eq!(StudyProgress::load(&store).mode_stats.quiz, ScoreStats::default());
    }

    #[test]
    fn standalone_run_lands_in_the_quiz_mode_stats() {
        let store = MemoryStore::new();
        let mut session = QuizSession::standalone("Topic Quiz", create_test_questions(2));
        complete_run(&mut session);

        let mut study = StudyProgress::default();
        let updated = record_quiz_outcome(&session, &mut study, &store).unwrap();

        assert!(updated.is_none());
        assert_eq!(study.mode_stats.quiz, ScoreStats { correct: 2, total: 2 });
        assert_eq!(
            StudyProgress::load(&store).mode_stats.quiz,
            ScoreStats { correct: 2, total: 2 }
        );
    }
}
