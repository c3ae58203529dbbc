pub mod filter;
pub mod quiz;
pub mod sampling;

pub use filter::{CategoryFilter, FilterState};
pub use quiz::{OptionStatus, Question, QuizPhase, QuizSession, QuizSummary};
