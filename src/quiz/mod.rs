//! Quiz running and generation

pub mod session;
pub mod short;

pub use session::{QuizPhase, QuizSession};
