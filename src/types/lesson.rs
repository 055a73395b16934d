//! Lesson and worked-example types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lesson difficulty, chosen by thresholding the latest diagnostic score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Foundational,
    Remedial,
    Practice,
}

impl Difficulty {
    /// Threshold a 0-100 diagnostic score: `<50` Foundational,
    /// `50-79` Remedial, `>=80` Practice.
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            Difficulty::Practice
        } else if score >= 50 {
            Difficulty::Remedial
        } else {
            Difficulty::Foundational
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Foundational => "Foundational",
            Difficulty::Remedial => "Remedial",
            Difficulty::Practice => "Practice",
        }
    }
}

/// An equation together with its solution and step-by-step derivation text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkedExample {
    /// Display form, e.g. "2*x + 3 = 11"
    pub equation_str: String,

    /// Numeric solution (always present for generated examples)
    pub solution: Option<f64>,

    /// Human-readable derivation steps
    pub steps: Vec<String>,
}

/// A micro-lesson tailored to the user's latest diagnostic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub difficulty: Difficulty,
    pub learning_objectives: Vec<String>,
    pub focus: String,
    pub short_explanation: String,
    pub worked_example: WorkedExample,
    pub practice_prompt: String,

    /// Diagnostic score the lesson was planned against
    pub score_prior: u32,
}
