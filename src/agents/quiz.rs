//! Quiz agent: derives a short quiz from a lesson and grades it
//!
//! Generation persists an ungraded quiz record; grading picks up the pending
//! record from the store, fills in the answers, and folds the score into the
//! topic mastery. Grading with no pending quiz is the pipeline's one hard
//! error.

use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use crate::agents::grade_question_set;
use crate::errors::{CoachError, Result};
use crate::exercise::derive_variants;
use crate::grading::DEFAULT_TOLERANCE;
use crate::mastery::update_mastery;
use crate::memory::{load_user, save_user, MemoryStore};
use crate::telemetry::{CoachEvent, TelemetryCollector};
use crate::types::{Lesson, Quiz, QuizRecord, QuizResult, DEFAULT_TOPIC};

/// Quiz generation and grading agent
pub struct QuizAgent {
    tolerance: f64,
    topic: String,
    telemetry: Option<TelemetryCollector>,
}

impl QuizAgent {
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            topic: DEFAULT_TOPIC.to_string(),
            telemetry: None,
        }
    }

    /// Override the grading tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Attach a telemetry collector
    pub fn with_telemetry(mut self, telemetry: TelemetryCollector) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Derive a quiz from the lesson's worked example and persist it
    /// ungraded under `quizzes` and `last_quiz`.
    pub fn generate_quiz(
        &self,
        store: &dyn MemoryStore,
        user_id: &str,
        lesson: &Lesson,
    ) -> Result<Quiz> {
        let questions = derive_variants(&lesson.worked_example);
        let quiz = Quiz {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
            questions,
        };

        let mut memory = load_user(store, user_id)?;
        let record = QuizRecord::ungraded(quiz.clone());
        memory.quizzes.push(record.clone());
        memory.last_quiz = Some(record);
        save_user(store, user_id, &memory)?;

        if let Some(telemetry) = &self.telemetry {
            telemetry.record(CoachEvent::QuizGenerated {
                question_count: quiz.questions.len(),
                timestamp: Instant::now(),
            });
            telemetry.record(CoachEvent::MemorySaved {
                user_id: user_id.to_string(),
                timestamp: Instant::now(),
            });
        }

        Ok(quiz)
    }

    /// Grade the pending quiz for this user.
    ///
    /// Fails with `MissingPriorState` when no quiz was generated or the last
    /// one is already graded. On success the stored record gains its
    /// answers and the topic mastery is averaged with the new score.
    pub fn grade_quiz(
        &self,
        store: &dyn MemoryStore,
        user_id: &str,
        answers: &[String],
    ) -> Result<QuizResult> {
        let mut memory = load_user(store, user_id)?;

        let pending = match &memory.last_quiz {
            Some(record) if record.is_pending() => record.clone(),
            _ => {
                return Err(CoachError::MissingPriorState {
                    user_id: user_id.to_string(),
                    what: "quiz".to_string(),
                })
            }
        };

        let result = grade_question_set(
            user_id,
            &pending.quiz_meta.questions,
            answers,
            self.tolerance,
            self.telemetry.as_ref(),
        );

        // Fill the answers on both the mirror and the history entry
        if let Some(last) = &mut memory.last_quiz {
            last.answers = Some(result.clone());
        }
        if let Some(record) = memory
            .quizzes
            .iter_mut()
            .find(|record| record.quiz_meta.id == pending.quiz_meta.id)
        {
            record.answers = Some(result.clone());
        }

        let prior = memory.mastery(&self.topic);
        let new_mastery = update_mastery(prior, result.score_percent);
        memory
            .topic_mastery
            .insert(self.topic.clone(), new_mastery);

        save_user(store, user_id, &memory)?;

        if let Some(telemetry) = &self.telemetry {
            telemetry.record(CoachEvent::MasteryUpdated {
                topic: self.topic.clone(),
                value: new_mastery,
                timestamp: Instant::now(),
            });
            telemetry.record(CoachEvent::MemorySaved {
                user_id: user_id.to_string(),
                timestamp: Instant::now(),
            });
        }

        Ok(result)
    }
}

impl Default for QuizAgent {
    fn default() -> Self {
        Self::new()
    }
}
