//! Answer generation and citation formatting

pub mod composer;
pub mod prompt;

pub use composer::AnswerComposer;
