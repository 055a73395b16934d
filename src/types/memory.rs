//! The per-user memory document
//!
//! Owned exclusively by the memory store; every agent loads the full
//! document, mutates it, and saves it back (read-modify-write, last write
//! wins). All fields default so a missing user deserializes from `{}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::feedback::FeedbackReport;
use crate::types::lesson::Lesson;
use crate::types::quiz::{QuizRecord, QuizResult};

/// User preferences carried along with the learning history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_explanation: Option<String>,
}

/// Full per-user state document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserMemory {
    /// Display name, if the user profile set one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// All diagnostic assessment results, oldest first
    pub diagnostics: Vec<QuizResult>,

    /// All planned lessons, oldest first
    pub lessons: Vec<Lesson>,

    /// All quizzes, each with its answers once graded
    pub quizzes: Vec<QuizRecord>,

    /// The most recent quiz (mirror of the tail of `quizzes`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_quiz: Option<QuizRecord>,

    /// All feedback reports, oldest first
    pub feedbacks: Vec<FeedbackReport>,

    /// The most recent feedback report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_feedback: Option<FeedbackReport>,

    /// 0-100 mastery scalar per topic
    pub topic_mastery: BTreeMap<String, u32>,

    /// User preferences
    pub preferences: Preferences,
}

impl UserMemory {
    /// Latest diagnostic result, if any
    pub fn latest_diagnostic(&self) -> Option<&QuizResult> {
        self.diagnostics.last()
    }

    /// Latest planned lesson, if any
    pub fn latest_lesson(&self) -> Option<&Lesson> {
        self.lessons.last()
    }

    /// Current mastery for a topic; absent means never scored
    pub fn mastery(&self, topic: &str) -> Option<u32> {
        self.topic_mastery.get(topic).copied()
    }
}
