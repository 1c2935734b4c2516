//! Generated topic quiz
//!
//! Builds a short multiple-choice round straight from the corpus: the
//! prompt is a topic's problem statement, the options are topic names with
//! the real one hidden among distractors. Unlike package generation this is
//! casual, unseeded randomness; every round is different on purpose.

use rand::rng;
use rand::seq::SliceRandom;

use crate::corpus::{Corpus, Question, Topic};

/// Questions per round, corpus permitting
pub const SHORT_QUIZ_LEN: usize = 20;

/// Wrong options per question, corpus permitting
const DISTRACTOR_COUNT: usize = 3;

/// Build a round from up to [`SHORT_QUIZ_LEN`] randomly chosen topics
pub fn build(corpus: &Corpus) -> Vec<Question> {
    build_with_rng(corpus, SHORT_QUIZ_LEN, &mut rng())
}

/// Build a round with a caller-supplied generator
pub fn build_with_rng<R: rand::Rng>(corpus: &Corpus, count: usize, rng: &mut R) -> Vec<Question> {
    let mut picks: Vec<&Topic> = corpus.topics.iter().collect();
    picks.shuffle(rng);
    picks.truncate(count);

    picks.iter().map(|topic| build_question(corpus, topic, rng)).collect()
}

fn build_question<R: rand::Rng>(corpus: &Corpus, topic: &Topic, rng: &mut R) -> Question {
    let mut distractors: Vec<&Topic> =
        corpus.topics.iter().filter(|t| t.name != topic.name).collect();
    distractors.shuffle(rng);
    distractors.truncate(DISTRACTOR_COUNT);

    let mut options: Vec<String> = distractors.iter().map(|t| t.name.clone()).collect();
    options.push(topic.name.clone());
    options.shuffle(rng);

    Question {
        question: topic.problem_solved.clone(),
        options,
        answer: topic.name.clone(),
        explanation: None,
        topic_name: Some(topic.name.clone()),
        topic_category: Some(topic.category.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Depth;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn create_test_corpus(count: usize) -> Corpus {
        let topics = (0..count)
            .map(|i| Topic {
                category: "Compute".into(),
                name: format!("Topic {}", i),
                knowledge_depth: Depth::Beginner,
                problem_solved: format!("Problem {}", i),
                scenario: String::new(),
                usage: String::new(),
                questions: Vec::new(),
            })
            .collect();
        Corpus::new(topics)
    }

    #[test]
    fn builds_up_to_the_requested_count() {
        let corpus = create_test_corpus(50);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(build_with_rng(&corpus, 20, &mut rng).len(), 20);
    }

    #[test]
    fn small_corpus_caps_the_round() {
        let corpus = create_test_corpus(5);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(build_with_rng(&corpus, 20, &mut rng).len(), 5);
    }

    #[test]
    fn empty_corpus_builds_nothing() {
        let corpus = create_test_corpus(0);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(build_with_rng(&corpus, 20, &mut rng).is_empty());
    }

    #[test]
    fn answer_is_always_among_the_options() {
        let corpus = create_test_corpus(30);
        let mut rng = StdRng::seed_from_u64(7);
        for question in build_with_rng(&corpus, 20, &mut rng) {
            assert!(question.options.contains(&question.answer));
        }
    }

    #[test]
    fn questions_have_at_most_four_options() {
        let corpus = create_test_corpus(30);
        let mut rng = StdRng::seed_from_u64(7);
        for question in build_with_rng(&corpus, 20, &mut rng) {
            assert!(question.options.len() <= 4);
            assert!(question.options.len() >= 2);
        }
    }

    #[test]
    fn options_never_repeat_within_a_question() {
        let corpus = create_test_corpus(30);
        let mut rng = StdRng::seed_from_u64(7);
        for question in build_with_rng(&corpus, 20, &mut rng) {
            let mut names = question.options.clone();
            let before = names.len();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), before);
        }
    }

    #[test]
    fn single_topic_corpus_gives_one_option() {
        let corpus = create_test_corpus(1);
        let mut rng = StdRng::seed_from_u64(7);
        let questions = build_with_rng(&corpus, 20, &mut rng);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options, vec!["Topic 0".to_string()]);
    }

    #[test]
    fn prompt_is_the_problem_statement() {
        let corpus = create_test_corpus(4);
        let mut rng = StdRng::seed_from_u64(7);
        for question in build_with_rng(&corpus, 4, &mut rng) {
            let topic = corpus.find(&question.answer).unwrap();
            assert_eq!(question.question, topic.problem_solved);
            assert_eq!(question.topic_category.as_deref(), Some("Compute"));
        }
    }
}
