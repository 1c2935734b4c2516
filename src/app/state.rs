//! Application state definitions

use rand::seq::SliceRandom;

use crate::corpus::{Corpus, Depth, Topic};
use crate::packages::{PackageConfig, PackageProgress};
use crate::quiz::QuizSession;

use super::swipe::SwipeGesture;

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Menu,
    Browser,
    Flashcards,
    Triage,
    Packages,
    Quiz,
}

/// Entries on the menu screen, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Browser,
    Flashcards,
    Triage,
    ShortQuiz,
    Packages,
}

impl MenuItem {
    pub const ALL: [MenuItem; 5] = [
        MenuItem::Browser,
        MenuItem::Flashcards,
        MenuItem::Triage,
        MenuItem::ShortQuiz,
        MenuItem::Packages,
    ];

    /// Display title
    pub fn title(self) -> &'static str {
        match self {
            MenuItem::Browser => "All Topics",
            MenuItem::Flashcards => "Flashcards",
            MenuItem::Triage => "Swipe Review",
            MenuItem::ShortQuiz => "Short Quiz",
            MenuItem::Packages => "Practice Packages",
        }
    }

    /// One-line description shown under the title
    pub fn blurb(self) -> &'static str {
        match self {
            MenuItem::Browser => "Browse and search every topic with full descriptions",
            MenuItem::Flashcards => "Flip cards and mark topics as known or needing review",
            MenuItem::Triage => "Swipe cards left or right to rate your knowledge",
            MenuItem::ShortQuiz => "Quick quiz with questions generated from the corpus",
            MenuItem::Packages => "Seeded question packages with tracked progress",
        }
    }
}

/// State for the menu screen
#[derive(Debug, Clone, Default)]
pub struct MenuState {
    /// Index into [`MenuItem::ALL`]
    pub selected: usize,
}

impl MenuState {
    /// Move the selection down, stopping at the last entry
    pub fn select_next(&mut self) {
        if self.selected + 1 < MenuItem::ALL.len() {
            self.selected += 1;
        }
    }

    /// Move the selection up, stopping at the first entry
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// The highlighted entry
    pub fn current(&self) -> MenuItem {
        MenuItem::ALL[self.selected.min(MenuItem::ALL.len() - 1)]
    }
}

/// State for search mode
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Whether search input is active
    pub active: bool,
    /// Current search query
    pub query: String,
}

/// State for the topic browser
#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    /// Selected row in the filtered list
    pub selected: usize,
    /// Scroll offset for long lists
    pub scroll_offset: usize,
    /// Visible height in rows (updated on render)
    pub visible_height: usize,
    /// Whether the detail pane for the selected topic is open
    pub show_detail: bool,
    /// Incremental search over topic name and problem text
    pub search: SearchState,
    /// Restrict the list to one category
    pub category_filter: Option<String>,
    /// Restrict the list to one knowledge depth
    pub depth_filter: Option<Depth>,
    /// Transient footer note (cleared on the next key)
    pub message: Option<String>,
}

impl BrowserState {
    /// Indices of topics passing the active filters, in corpus order
    pub fn filtered(&self, corpus: &Corpus) -> Vec<usize> {
        let needle = self.search.query.to_lowercase();
        corpus
            .topics
            .iter()
            .enumerate()
            .filter(|(_, topic)| self.matches(topic, &needle))
            .map(|(index, _)| index)
            .collect()
    }

    fn matches(&self, topic: &Topic, needle: &str) -> bool {
        if !needle.is_empty()
            && !topic.name.to_lowercase().contains(needle)
            && !topic.problem_solved.to_lowercase().contains(needle)
        {
            return false;
        }
        if self.category_filter.as_ref().is_some_and(|c| *c != topic.category) {
            return false;
        }
        if self.depth_filter.is_some_and(|d| d != topic.knowledge_depth) {
            return false;
        }
        true
    }

    /// Cycle the category filter through every category and back to off
    pub fn cycle_category(&mut self, categories: &[String]) {
        self.category_filter = match self.category_filter.take() {
            None => categories.first().cloned(),
            Some(current) => categories
                .iter()
                .position(|c| *c == current)
                .and_then(|i| categories.get(i + 1))
                .cloned(),
        };
        self.selected = 0;
        self.scroll_offset = 0;
    }

    /// Cycle the depth filter through every depth and back to off
    pub fn cycle_depth(&mut self) {
        self.depth_filter = match self.depth_filter {
            None => Some(Depth::Beginner),
            Some(Depth::Beginner) => Some(Depth::Intermediate),
            Some(Depth::Intermediate) => Some(Depth::Advanced),
            Some(Depth::Advanced) => None,
        };
        self.selected = 0;
        self.scroll_offset = 0;
    }

    /// Ensure the selected row is visible by adjusting scroll offset
    pub fn ensure_selection_visible(&mut self) {
        // Don't scroll past the selection (top)
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        }
        // Don't let selection go below visible area (bottom)
        let visible = self.visible_height.saturating_sub(2);
        if visible > 0 && self.selected >= self.scroll_offset + visible {
            self.scroll_offset = self.selected.saturating_sub(visible) + 1;
        }
    }

    /// Clamp the selection into the filtered list
    pub fn clamp_selection(&mut self, filtered_len: usize) {
        if filtered_len == 0 {
            self.selected = 0;
        } else if self.selected >= filtered_len {
            self.selected = filtered_len - 1;
        }
    }
}

/// State for the flashcard deck
#[derive(Debug, Clone, Default)]
pub struct FlashcardState {
    /// Topic indices in deal order
    pub order: Vec<usize>,
    /// Position within `order`
    pub current: usize,
    /// Whether the back of the card is showing
    pub flipped: bool,
    /// Whether the deck is shuffled or in corpus order
    pub shuffled: bool,
}

impl FlashcardState {
    /// Deal a shuffled deck over `count` topics
    pub fn deal(count: usize) -> Self {
        let mut order: Vec<usize> = (0..count).collect();
        order.shuffle(&mut rand::rng());
        Self { order, current: 0, flipped: false, shuffled: true }
    }

    /// Index of the topic on the current card
    pub fn current_topic(&self) -> Option<usize> {
        self.order.get(self.current).copied()
    }

    /// Advance to the next card, wrapping at the end
    pub fn advance(&mut self) {
        if !self.order.is_empty() {
            self.current = (self.current + 1) % self.order.len();
            self.flipped = false;
        }
    }

    /// Go back one card, wrapping at the start
    pub fn retreat(&mut self) {
        if !self.order.is_empty() {
            self.current = (self.current + self.order.len() - 1) % self.order.len();
            self.flipped = false;
        }
    }

    /// Show the other side of the card
    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Switch between shuffled and corpus order, rewinding the deck
    pub fn toggle_shuffle(&mut self) {
        self.shuffled = !self.shuffled;
        if self.shuffled {
            self.order.shuffle(&mut rand::rng());
        } else {
            self.order.sort_unstable();
        }
        self.current = 0;
        self.flipped = false;
    }
}

/// State for the swipe-review deck
#[derive(Debug, Clone, Default)]
pub struct TriageState {
    /// Topic indices in deal order
    pub deck: Vec<usize>,
    /// Position within `deck`
    pub current: usize,
    /// Whether the back of the card is showing
    pub flipped: bool,
    /// Cards rated "know it" this session
    pub known: usize,
    /// Cards rated "need review" this session
    pub learning: usize,
    /// Every card has been rated
    pub complete: bool,
    /// Drag and fling state for the card on screen
    pub gesture: SwipeGesture,
}

impl TriageState {
    /// Deal a shuffled deck over `count` topics
    pub fn deal(count: usize, animation_speed: f32) -> Self {
        let mut deck: Vec<usize> = (0..count).collect();
        deck.shuffle(&mut rand::rng());
        let complete = deck.is_empty();
        Self {
            deck,
            current: 0,
            flipped: false,
            known: 0,
            learning: 0,
            complete,
            gesture: SwipeGesture::new(animation_speed),
        }
    }

    /// Index of the topic on the current card
    pub fn current_topic(&self) -> Option<usize> {
        if self.complete {
            return None;
        }
        self.deck.get(self.current).copied()
    }

    /// Cards left after the current one
    pub fn remaining(&self) -> usize {
        self.deck.len().saturating_sub(self.current + 1)
    }

    /// Move to the next card, or finish the session
    ///
    /// Returns `true` when this call completed the session.
    pub fn advance_card(&mut self) -> bool {
        if self.current + 1 >= self.deck.len() {
            self.complete = true;
            return true;
        }
        self.current += 1;
        self.flipped = false;
        false
    }

    /// Start over with a reshuffled deck and zeroed tallies
    pub fn restart(&mut self) {
        self.deck.shuffle(&mut rand::rng());
        self.current = 0;
        self.flipped = false;
        self.known = 0;
        self.learning = 0;
        self.complete = self.deck.is_empty();
    }
}

/// State for the practice packages screen
#[derive(Debug, Default)]
pub struct PackagesState {
    /// Active config loaded from the store
    pub config: Option<PackageConfig>,
    /// Progress for the active config
    pub progress: PackageProgress,
    /// Whether the setup form is open
    pub setup: bool,
    /// Questions-per-package input buffer
    pub size_input: String,
    /// Validation error shown under the input
    pub error: Option<String>,
    /// Selected row in the package list
    pub selected: usize,
    /// Whether the reset confirmation overlay is open
    pub confirm_reset: bool,
}

impl PackagesState {
    /// Open the setup form with the default size suggestion
    pub fn open_setup(&mut self) {
        self.setup = true;
        self.size_input = String::from("50");
        self.error = None;
    }

    /// Package count of the active config
    pub fn package_count(&self) -> usize {
        self.config.as_ref().map_or(0, |c| c.packages.len())
    }

    /// Move the selection down the package list
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.package_count() {
            self.selected += 1;
        }
    }

    /// Move the selection up the package list
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// Menu screen state
    pub menu: MenuState,

    /// Topic browser state
    pub browser: BrowserState,

    /// Flashcard deck state
    pub flashcards: FlashcardState,

    /// Swipe review state
    pub triage: TriageState,

    /// Practice packages state
    pub packages: PackagesState,

    /// Active quiz run, if any
    pub quiz: Option<QuizSession>,
}
