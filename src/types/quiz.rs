//! Quiz and grading result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single quiz question: the prompt shown to the user and the expression
/// the grader resolves to the expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Prompt shown to the user, e.g. "Solve for x: 2*x + 3 = 11"
    pub prompt: String,

    /// Expected expression, either an equation to solve or a literal number
    pub expected_expr: String,
}

impl QuizQuestion {
    /// Build a "Solve for x" question around an equation string
    pub fn solve_for_x(equation: &str) -> Self {
        Self {
            prompt: format!("Solve for x: {}", equation),
            expected_expr: equation.to_string(),
        }
    }
}

/// An ungraded quiz as generated from a lesson's worked example
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique quiz identifier
    pub id: Uuid,

    /// User this quiz belongs to
    pub user_id: String,

    /// Generation timestamp
    pub created_at: DateTime<Utc>,

    /// Derived questions (at most 3)
    pub questions: Vec<QuizQuestion>,
}

/// Grading outcome for one question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionGrade {
    /// Position of the question within the quiz
    pub q_index: usize,

    /// The question prompt
    pub question: String,

    /// Expected expression the grader resolved (kept so feedback can
    /// recompute the worked steps)
    pub expected_expr: String,

    /// Expected numeric solution, `None` if it could not be resolved
    pub expected: Option<f64>,

    /// The answer exactly as the user submitted it
    pub user_answer_raw: String,

    /// Parsed numeric value of the answer, `None` if unparseable
    pub user_answer_parsed: Option<f64>,

    /// Whether the answer was within tolerance
    pub correct: bool,

    /// Human-readable grading explanation
    pub explanation: String,
}

/// Graded result of a diagnostic or quiz
///
/// `score_percent` is `round(100 * correct_count / total_questions)`,
/// defined as 0 for an empty question set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub per_question: Vec<QuestionGrade>,
    pub correct_count: usize,
    pub total_questions: usize,
    pub score_percent: u32,
}

/// A quiz as stored in user memory: the generated questions plus the graded
/// answers once the user has taken it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRecord {
    pub quiz_meta: Quiz,
    pub answers: Option<QuizResult>,
}

impl QuizRecord {
    /// A freshly generated quiz with no answers yet
    pub fn ungraded(quiz: Quiz) -> Self {
        Self {
            quiz_meta: quiz,
            answers: None,
        }
    }

    /// Whether this record is still waiting to be graded
    pub fn is_pending(&self) -> bool {
        self.answers.is_none()
    }
}
