//! Corpus loading and import
//!
//! The corpus is a JSON Lines file: one topic object per line. `load` reads
//! and validates it; `import` validates a candidate file and installs it
//! into the data directory so the app finds it on the next start.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::model::{Corpus, Topic};
use crate::config::Config;

/// Errors that can occur when loading a corpus file
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus file does not exist
    #[error("Corpus file not found: {0:?}")]
    NotFound(PathBuf),

    /// The corpus file could not be read
    #[error("Failed to read corpus from {path:?}")]
    Read {
        /// Path that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A line is not a valid topic record
    #[error("Invalid topic on line {line}: {source}")]
    Malformed {
        /// 1-based line number
        line: usize,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A question's answer is not one of its options
    #[error("Topic '{topic}' has a question whose answer is not among its options")]
    AnswerNotInOptions {
        /// Offending topic name
        topic: String,
    },
}

/// Load a corpus from a JSON Lines file
///
/// Blank lines are skipped. Duplicate topic names are tolerated with a
/// warning since progress is keyed by name and the first match wins.
pub fn load(path: &Path) -> Result<Corpus, CorpusError> {
    if !path.exists() {
        return Err(CorpusError::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)
        .map_err(|source| CorpusError::Read { path: path.to_path_buf(), source })?;

    let mut topics = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let topic: Topic = serde_json::from_str(line)
            .map_err(|source| CorpusError::Malformed { line: idx + 1, source })?;
        validate_topic(&topic)?;
        topics.push(topic);
    }

    let mut seen = HashSet::new();
    for topic in &topics {
        if !seen.insert(topic.name.as_str()) {
            tracing::warn!("Duplicate topic name in corpus: {}", topic.name);
        }
    }

    Ok(Corpus::new(topics))
}

/// Check that every question's answer appears among its options
fn validate_topic(topic: &Topic) -> Result<(), CorpusError> {
    for question in &topic.questions {
        if !question.options.iter().any(|o| o == &question.answer) {
            return Err(CorpusError::AnswerNotInOptions { topic: topic.name.clone() });
        }
    }
    Ok(())
}

/// Validate a corpus file and install it into the data directory
///
/// Returns the installed path and the number of topics it holds.
pub fn import(source: &Path) -> Result<(PathBuf, usize)> {
    let corpus = load(source)?;

    let dest = Config::installed_corpus_path()?;
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {:?}", parent))?;
    }

    fs::copy(source, &dest)
        .with_context(|| format!("Failed to install corpus to {:?}", dest))?;

    Ok((dest, corpus.len()))
}

/// Resolve the corpus path: explicit override first, then the config entry,
/// then the installed default
pub fn resolve_path(override_path: Option<&Path>, config: &Config) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = &config.corpus_path {
        return Ok(path.clone());
    }
    Config::installed_corpus_path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_corpus(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("corpus.jsonl");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "{}", contents).unwrap();
        path
    }

    #[test]
    fn load_parses_one_topic_per_line() {
        let dir = TempDir::new().unwrap();
        let path = write_corpus(
            &dir,
            concat!(
                r#"{"category":"Compute","name":"VM","problemSolved":"Run code"}"#,
                "\n",
                r#"{"category":"Storage","name":"Blob","problemSolved":"Keep bytes"}"#,
                "\n",
            ),
        );

        let corpus = load(&path).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.topics[0].name, "VM");
        assert_eq!(corpus.topics[1].category, "Storage");
    }

    #[test]
    fn load_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_corpus(
            &dir,
            concat!(
                "\n",
                r#"{"category":"Compute","name":"VM","problemSolved":"Run code"}"#,
                "\n\n   \n",
            ),
        );

        let corpus = load(&path).unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn load_of_empty_file_gives_empty_corpus() {
        let dir = TempDir::new().unwrap();
        let path = write_corpus(&dir, "");
        let corpus = load(&path).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn load_reports_line_number_of_bad_record() {
        let dir = TempDir::new().unwrap();
        let path = write_corpus(
            &dir,
            concat!(
                r#"{"category":"Compute","name":"VM","problemSolved":"Run code"}"#,
                "\n",
                "not json\n",
            ),
        );

        let err = load(&path).unwrap_err();
        match err {
            CorpusError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let err = load(Path::new("/nonexistent/corpus.jsonl")).unwrap_err();
        assert!(matches!(err, CorpusError::NotFound(_)));
    }

    #[test]
    fn load_rejects_answer_missing_from_options() {
        let dir = TempDir::new().unwrap();
        let path = write_corpus(
            &dir,
            concat!(
                r#"{"category":"Compute","name":"VM","problemSolved":"Run code","#,
                r#""questions":[{"question":"Q?","options":["A","B"],"answer":"C"}]}"#,
                "\n",
            ),
        );

        let err = load(&path).unwrap_err();
        assert!(matches!(err, CorpusError::AnswerNotInOptions { .. }));
    }

    #[test]
    fn resolve_path_prefers_explicit_override() {
        let config = Config::default();
        let path = resolve_path(Some(Path::new("/tmp/mine.jsonl")), &config).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/mine.jsonl"));
    }

    #[test]
    fn resolve_path_uses_config_entry_when_set() {
        let config =
            Config { corpus_path: Some(PathBuf::from("/data/x.jsonl")), ..Default::default() };
        let path = resolve_path(None, &config).unwrap();
        assert_eq!(path, PathBuf::from("/data/x.jsonl"));
    }
}
