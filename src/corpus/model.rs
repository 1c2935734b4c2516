//! Content model for the study corpus
//!
//! A corpus is a flat list of topics. Topics are loaded once at startup and
//! are read-only for the life of the process; all learner state lives in the
//! progress stores, keyed by topic name.

use serde::{Deserialize, Serialize};

/// How deeply the learner is expected to know a topic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Depth {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl From<u8> for Depth {
    fn from(value: u8) -> Self {
        match value {
            1 => Depth::Intermediate,
            2 => Depth::Advanced,
            // Unknown depth values degrade to the lowest tier
            _ => Depth::Beginner,
        }
    }
}

impl From<Depth> for u8 {
    fn from(depth: Depth) -> Self {
        match depth {
            Depth::Beginner => 0,
            Depth::Intermediate => 1,
            Depth::Advanced => 2,
        }
    }
}

impl Depth {
    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Depth::Beginner => "Beginner",
            Depth::Intermediate => "Intermediate",
            Depth::Advanced => "Advanced",
        }
    }

    /// All depths in ascending order, for filter cycling
    pub const ALL: [Depth; 3] = [Depth::Beginner, Depth::Intermediate, Depth::Advanced];
}

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Question text
    pub question: String,
    /// Answer options, in display order
    pub options: Vec<String>,
    /// The correct option, by value
    pub answer: String,
    /// Why the answer is correct
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Name of the topic this question came from (filled during extraction)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_name: Option<String>,
    /// Category of the topic this question came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_category: Option<String>,
}

impl Question {
    /// Check an answer by option value
    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }
}

/// A study topic
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Grouping category (e.g., "Networking")
    pub category: String,
    /// Topic name, unique within the corpus
    pub name: String,
    /// Expected knowledge depth
    #[serde(default)]
    pub knowledge_depth: Depth,
    /// What problem this topic addresses
    pub problem_solved: String,
    /// A worked scenario and its solution
    #[serde(default)]
    pub scenario: String,
    /// Step-by-step usage notes
    #[serde(default)]
    pub usage: String,
    /// Practice questions for this topic, if any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<Question>,
}

/// The loaded corpus
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// All topics, in source order
    pub topics: Vec<Topic>,
}

impl Corpus {
    /// Create a corpus from a topic list
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    /// Number of topics
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Whether the corpus has no topics
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<String> {
        let mut cats: Vec<String> = self.topics.iter().map(|t| t.category.clone()).collect();
        cats.sort();
        cats.dedup();
        cats
    }

    /// Find a topic by name
    pub fn find(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    /// Total embedded questions across all topics
    pub fn question_count(&self) -> usize {
        self.topics.iter().map(|t| t.questions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_topic(name: &str, category: &str) -> Topic {
        Topic {
            category: category.into(),
            name: name.into(),
            knowledge_depth: Depth::Beginner,
            problem_solved: format!("{} problem", name),
            scenario: String::new(),
            usage: String::new(),
            questions: Vec::new(),
        }
    }

    #[test]
    fn depth_from_u8_maps_known_values() {
        assert_eq!(Depth::from(0), Depth::Beginner);
        assert_eq!(Depth::from(1), Depth::Intermediate);
        assert_eq!(Depth::from(2), Depth::Advanced);
    }

    #[test]
    fn depth_from_u8_degrades_unknown_values() {
        assert_eq!(Depth::from(99), Depth::Beginner);
    }

    #[test]
    fn depth_roundtrips_through_serde_as_number() {
        let json = serde_json::to_string(&Depth::Advanced).unwrap();
        assert_eq!(json, "2");
        let depth: Depth = serde_json::from_str("1").unwrap();
        assert_eq!(depth, Depth::Intermediate);
    }

    #[test]
    fn question_checks_answer_by_value() {
        let q = Question {
            question: "Which layer routes packets?".into(),
            options: vec!["Layer 2".into(), "Layer 3".into()],
            answer: "Layer 3".into(),
            explanation: None,
            topic_name: None,
            topic_category: None,
        };
        assert!(q.is_correct("Layer 3"));
        assert!(!q.is_correct("Layer 2"));
    }

    #[test]
    fn topic_deserializes_from_camel_case() {
        let json = r#"{
            "category": "Networking",
            "name": "Load Balancer",
            "knowledgeDepth": 2,
            "problemSolved": "Distributes traffic",
            "scenario": "Traffic spike",
            "usage": "Create, attach targets"
        }"#;
        let topic: Topic = serde_json::from_str(json).unwrap();
        assert_eq!(topic.name, "Load Balancer");
        assert_eq!(topic.knowledge_depth, Depth::Advanced);
        assert!(topic.questions.is_empty());
    }

    #[test]
    fn corpus_categories_are_sorted_and_distinct() {
        let corpus = Corpus::new(vec![
            create_test_topic("b", "Storage"),
            create_test_topic("a", "Compute"),
            create_test_topic("c", "Storage"),
        ]);
        assert_eq!(corpus.categories(), vec!["Compute".to_string(), "Storage".to_string()]);
    }

    #[test]
    fn corpus_find_by_name() {
        let corpus = Corpus::new(vec![create_test_topic("VPC", "Networking")]);
        assert!(corpus.find("VPC").is_some());
        assert!(corpus.find("missing").is_none());
    }
}
