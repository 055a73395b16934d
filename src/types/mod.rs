//! Shared data model for the tutoring pipeline
//!
//! Plain serde structs passed between agents and persisted in the per-user
//! memory document.

pub mod feedback;
pub mod lesson;
pub mod memory;
pub mod quiz;

// Re-export commonly used types
pub use feedback::{FeedbackDetail, FeedbackDetails, FeedbackItem, FeedbackReport, FeedbackStatus};
pub use lesson::{Difficulty, Lesson, WorkedExample};
pub use memory::{Preferences, UserMemory};
pub use quiz::{QuestionGrade, Quiz, QuizQuestion, QuizRecord, QuizResult};

/// The single topic this tutor covers
pub const DEFAULT_TOPIC: &str = "linear_equations";
