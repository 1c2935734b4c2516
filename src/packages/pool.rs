//! Question pool extraction
//!
//! Flattens every topic's embedded questions into a single pool for the
//! package generator. Order is stable: topics in corpus order, questions in
//! per-topic order, so the same corpus always yields the same pool.

use crate::corpus::{Corpus, Question};

/// Collect all questions from the corpus into one pool
///
/// Each question is annotated with the owning topic's name and category
/// unless the record already carries its own. Topics without questions
/// contribute nothing; an empty corpus yields an empty pool.
pub fn extract_pool(corpus: &Corpus) -> Vec<Question> {
    let mut pool = Vec::with_capacity(corpus.question_count());

    for topic in &corpus.topics {
        for question in &topic.questions {
            let mut question = question.clone();
            if question.topic_name.is_none() {
                question.topic_name = Some(topic.name.clone());
            }
            if question.topic_category.is_none() {
                question.topic_category = Some(topic.category.clone());
            }
            pool.push(question);
        }
    }

    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Depth, Topic};
    use pretty_assertions::assert_eq;

    fn create_test_question(text: &str) -> Question {
        Question {
            question: text.into(),
            options: vec!["yes".into(), "no".into()],
            answer: "yes".into(),
            explanation: None,
            topic_name: None,
            topic_category: None,
        }
    }

    fn create_test_topic(name: &str, questions: Vec<Question>) -> Topic {
        Topic {
            category: "Networking".into(),
            name: name.into(),
            knowledge_depth: Depth::Beginner,
            problem_solved: "p".into(),
            scenario: String::new(),
            usage: String::new(),
            questions,
        }
    }

    #[test]
    fn pool_preserves_topic_then_question_order() {
        let corpus = Corpus::new(vec![
            create_test_topic("A", vec![create_test_question("a1"), create_test_question("a2")]),
            create_test_topic("B", vec![create_test_question("b1")]),
        ]);

        let pool = extract_pool(&corpus);
        let texts: Vec<&str> = pool.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(texts, vec!["a1", "a2", "b1"]);
    }

    #[test]
    fn pool_annotates_questions_with_owning_topic() {
        let corpus = Corpus::new(vec![create_test_topic("DNS", vec![create_test_question("q")])]);

        let pool = extract_pool(&corpus);
        assert_eq!(pool[0].topic_name.as_deref(), Some("DNS"));
        assert_eq!(pool[0].topic_category.as_deref(), Some("Networking"));
    }

    #[test]
    fn pool_keeps_existing_annotations() {
        let mut question = create_test_question("q");
        question.topic_name = Some("Original".into());
        let corpus = Corpus::new(vec![create_test_topic("DNS", vec![question])]);

        let pool = extract_pool(&corpus);
        assert_eq!(pool[0].topic_name.as_deref(), Some("Original"));
        // Category was absent, so it is still filled from the topic
        assert_eq!(pool[0].topic_category.as_deref(), Some("Networking"));
    }

    #[test]
    fn pool_skips_topics_without_questions() {
        let corpus = Corpus::new(vec![
            create_test_topic("Empty", vec![]),
            create_test_topic("Full", vec![create_test_question("q")]),
        ]);

        assert_eq!(extract_pool(&corpus).len(), 1);
    }

    #[test]
    fn empty_corpus_yields_empty_pool() {
        assert!(extract_pool(&Corpus::default()).is_empty());
    }
}
