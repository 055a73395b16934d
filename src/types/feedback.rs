//! Feedback report types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-question feedback status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    Correct,
    Incorrect,
}

/// Deterministic analysis of an incorrect answer: parsed values, worked
/// steps with the fixed 3-step checklist, and one targeted hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackDetail {
    pub question: String,
    pub expected_expr: String,
    pub expected_value: Option<f64>,
    pub user_value: Option<f64>,
    pub steps: Vec<String>,
    pub hint: String,
}

/// Detail payload of a feedback item
///
/// Correct answers carry only the two numbers; incorrect answers carry the
/// full deterministic analysis. `Incorrect` must stay first: with untagged
/// serde the sparse `Correct` shape would otherwise match everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedbackDetails {
    Incorrect(FeedbackDetail),
    Correct {
        expected: Option<f64>,
        user: Option<f64>,
    },
}

/// Feedback for a single quiz question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub q_index: usize,
    pub status: FeedbackStatus,
    pub message: String,
    pub details: FeedbackDetails,

    /// Optional enrichment from the expansion hook; absent when no hook is
    /// configured or the hook failed.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub llm_expanded: Option<String>,
}

/// Full feedback report for one graded quiz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub quiz_score: u32,
    pub items: Vec<FeedbackItem>,
}
