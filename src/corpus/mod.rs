//! Study corpus: topics, questions, and loading

pub mod loader;
pub mod model;

pub use loader::CorpusError;
pub use model::{Corpus, Depth, Question, Topic};
