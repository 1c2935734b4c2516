//! Quiz runner
//!
//! One state machine drives both package quizzes and the generated topic
//! quiz: answer, see feedback, advance, finish. The session itself never
//! touches persistence; the app records the final tally when [`advance`]
//! reports the completion transition, which is how a run gets recorded
//! exactly once.
//!
//! [`advance`]: QuizSession::advance

use crate::corpus::Question;

/// Where the session is in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for an answer to the current question
    Answering,
    /// Showing feedback for the answered question
    Feedback,
    /// All questions done; results screen
    Complete,
}

/// A single quiz run over a fixed question list
#[derive(Debug, Clone)]
pub struct QuizSession {
    /// Display title (package name or mode name)
    title: String,
    /// Package id to credit on completion; `None` for the generated quiz
    package_id: Option<String>,
    questions: Vec<Question>,
    current: usize,
    selected: usize,
    chosen: Option<usize>,
    score: usize,
    phase: QuizPhase,
}

impl QuizSession {
    /// Start a run over a package's questions
    pub fn for_package(
        package_id: impl Into<String>,
        title: impl Into<String>,
        questions: Vec<Question>,
    ) -> Self {
        Self::new(Some(package_id.into()), title.into(), questions)
    }

    /// Start a run with no package to credit
    pub fn standalone(title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self::new(None, title.into(), questions)
    }

    fn new(package_id: Option<String>, title: String, questions: Vec<Question>) -> Self {
        // No questions means nothing to answer
        let phase = if questions.is_empty() { QuizPhase::Complete } else { QuizPhase::Answering };
        Self { title, package_id, questions, current: 0, selected: 0, chosen: None, score: 0, phase }
    }

    /// Display title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Package id to credit, if any
    pub fn package_id(&self) -> Option<&str> {
        self.package_id.as_deref()
    }

    /// Current phase
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// The question currently on screen
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// 1-based number of the current question
    pub fn question_number(&self) -> usize {
        self.current + 1
    }

    /// Total question count
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Correct answers so far
    pub fn score(&self) -> usize {
        self.score
    }

    /// Index of the highlighted option
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Index of the confirmed option, once answered
    pub fn chosen(&self) -> Option<usize> {
        self.chosen
    }

    /// Whether the confirmed answer was correct
    pub fn was_correct(&self) -> Option<bool> {
        let question = self.questions.get(self.current)?;
        let chosen = self.chosen?;
        Some(question.options.get(chosen).is_some_and(|o| question.is_correct(o)))
    }

    /// Score as a rounded percentage of the question count
    pub fn percent(&self) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        ((self.score as f64 / self.questions.len() as f64) * 100.0).round() as u32
    }

    /// Move the highlight down
    pub fn select_next(&mut self) {
        if self.phase != QuizPhase::Answering {
            return;
        }
        let option_count = self.current_question().map_or(0, |q| q.options.len());
        if self.selected + 1 < option_count {
            self.selected += 1;
        }
    }

    /// Move the highlight up
    pub fn select_prev(&mut self) {
        if self.phase == QuizPhase::Answering {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    /// Confirm the highlighted option and move to feedback
    pub fn confirm(&mut self) {
        if self.phase != QuizPhase::Answering {
            return;
        }
        let Some(question) = self.questions.get(self.current) else {
            return;
        };

        self.chosen = Some(self.selected);
        if question.options.get(self.selected).is_some_and(|o| question.is_correct(o)) {
            self.score += 1;
        }
        self.phase = QuizPhase::Feedback;
    }

    /// Leave feedback for the next question, or finish the run
    ///
    /// Returns `true` on the single transition into [`QuizPhase::Complete`];
    /// the caller records the tally then and only then.
    pub fn advance(&mut self) -> bool {
        if self.phase != QuizPhase::Feedback {
            return false;
        }

        if self.current + 1 >= self.questions.len() {
            self.phase = QuizPhase::Complete;
            return true;
        }

        self.current += 1;
        self.selected = 0;
        self.chosen = None;
        self.phase = QuizPhase::Answering;
        false
    }

    /// Feedback line for the results screen
    pub fn verdict(&self) -> &'static str {
        let pct = self.percent();
        if pct >= 80 {
            "Excellent work!"
        } else if pct >= 60 {
            "Good job!"
        } else {
            "Keep practicing!"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_questions(count: usize) -> Vec<Question> {
        (0..count)
            .map(|i| Question {
                question: format!("Question {}", i),
                options: vec!["right".into(), "wrong".into()],
                answer: "right".into(),
                explanation: None,
                topic_name: None,
                topic_category: None,
            })
            .collect()
    }

    #[test]
    fn new_session_starts_answering_first_question() {
        let session = QuizSession::for_package("pkg-1", "Package 1", create_test_questions(3));
        assert_eq!(session.phase(), QuizPhase::Answering);
        assert_eq!(session.question_number(), 1);
        assert_eq!(session.total(), 3);
        assert_eq!(session.package_id(), Some("pkg-1"));
    }

    #[test]
    fn empty_session_is_complete_immediately() {
        let session = QuizSession::standalone("Quiz", vec![]);
        assert_eq!(session.phase(), QuizPhase::Complete);
        assert_eq!(session.percent(), 0);
    }

    #[test]
    fn correct_answer_scores_a_point() {
        let mut session = QuizSession::standalone("Quiz", create_test_questions(2));
        session.confirm(); // option 0 is "right"

        assert_eq!(session.phase(), QuizPhase::Feedback);
        assert_eq!(session.score(), 1);
        assert_eq!(session.was_correct(), Some(true));
    }

    #[test]
    fn wrong_answer_scores_nothing() {
        let mut session = QuizSession::standalone("Quiz", create_test_questions(2));
        session.select_next();
        session.confirm(); // option 1 is "wrong"

        assert_eq!(session.score(), 0);
        assert_eq!(session.was_correct(), Some(false));
    }

    #[test]
    fn selection_clamps_to_option_range() {
        let mut session = QuizSession::standalone("Quiz", create_test_questions(1));
        session.select_prev();
        assert_eq!(session.selected(), 0);
        session.select_next();
        session.select_next();
        session.select_next();
        assert_eq!(session.selected(), 1);
    }

    #[test]
    fn confirm_twice_does_not_double_score() {
        let mut session = QuizSession::standalone("Quiz", create_test_questions(1));
        session.confirm();
        session.confirm();
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn advance_moves_to_next_question_and_resets_selection() {
        let mut session = QuizSession::standalone("Quiz", create_test_questions(2));
        session.select_next();
        session.confirm();

        let completed = session.advance();
        assert!(!completed);
        assert_eq!(session.phase(), QuizPhase::Answering);
        assert_eq!(session.question_number(), 2);
        assert_eq!(session.selected(), 0);
        assert_eq!(session.chosen(), None);
    }

    #[test]
    fn advance_reports_completion_exactly_once() {
        let mut session = QuizSession::standalone("Quiz", create_test_questions(1));
        session.confirm();

        assert!(session.advance());
        assert_eq!(session.phase(), QuizPhase::Complete);
        // Further advances stay complete without re-reporting
        assert!(!session.advance());
        assert!(!session.advance());
    }

    #[test]
    fn advance_during_answering_does_nothing() {
        let mut session = QuizSession::standalone("Quiz", create_test_questions(2));
        assert!(!session.advance());
        assert_eq!(session.phase(), QuizPhase::Answering);
        assert_eq!(session.question_number(), 1);
    }

    #[test]
    fn full_run_tallies_score_and_percent() {
        let mut session = QuizSession::standalone("Quiz", create_test_questions(3));

        session.confirm(); // right
        session.advance();
        session.select_next();
        session.confirm(); // wrong
        session.advance();
        session.confirm(); // right
        let completed = session.advance();

        assert!(completed);
        assert_eq!(session.score(), 2);
        assert_eq!(session.percent(), 67);
        assert_eq!(session.verdict(), "Good job!");
    }

    #[test]
    fn verdict_tiers() {
        let mut session = QuizSession::standalone("Quiz", create_test_questions(1));
        session.confirm();
        session.advance();
        assert_eq!(session.percent(), 100);
        assert_eq!(session.verdict(), "Excellent work!");

        let mut session = QuizSession::standalone("Quiz", create_test_questions(1));
        session.select_next();
        session.confirm();
        session.advance();
        assert_eq!(session.verdict(), "Keep practicing!");
    }
}
