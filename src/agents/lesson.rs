//! Lesson agent: plans a micro-lesson from the latest diagnostic
//!
//! Difficulty and focus come from thresholding the most recent diagnostic
//! score; the worked example is freshly generated. A user with no diagnostic
//! history is planned for as if they scored 0 (Foundational) rather than
//! erroring.

use std::time::Instant;

use chrono::Utc;

use crate::errors::Result;
use crate::exercise::ExerciseGenerator;
use crate::memory::{load_user, save_user, MemoryStore};
use crate::telemetry::{CoachEvent, TelemetryCollector};
use crate::types::{Difficulty, Lesson, DEFAULT_TOPIC};

/// Micro-lesson planner
pub struct LessonAgent {
    generator: ExerciseGenerator,
    topic: String,
    telemetry: Option<TelemetryCollector>,
}

impl LessonAgent {
    /// Planner with an entropy-seeded example generator
    pub fn new() -> Self {
        Self::with_generator(ExerciseGenerator::new())
    }

    /// Planner with a deterministic example generator
    pub fn seeded(seed: u64) -> Self {
        Self::with_generator(ExerciseGenerator::seeded(seed))
    }

    /// Planner around an existing generator
    pub fn with_generator(generator: ExerciseGenerator) -> Self {
        Self {
            generator,
            topic: DEFAULT_TOPIC.to_string(),
            telemetry: None,
        }
    }

    /// Attach a telemetry collector
    pub fn with_telemetry(mut self, telemetry: TelemetryCollector) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Build a lesson from the user's latest diagnostic and persist it.
    pub fn plan(&mut self, store: &dyn MemoryStore, user_id: &str) -> Result<Lesson> {
        let mut memory = load_user(store, user_id)?;
        let score = memory
            .latest_diagnostic()
            .map(|diag| diag.score_percent)
            .unwrap_or(0);

        let difficulty = Difficulty::from_score(score);
        let focus = match difficulty {
            Difficulty::Practice => {
                "Practice solving linear equations quickly and check steps."
            }
            Difficulty::Remedial => {
                "Work on correctly isolating variables and handling negative constants."
            }
            Difficulty::Foundational => {
                "Begin with isolating the variable, move step-by-step, and verify each operation."
            }
        };

        let worked_example = self.generator.worked_example(None, None, None);

        let lesson = Lesson {
            topic: self.topic.clone(),
            created_at: Utc::now(),
            difficulty,
            learning_objectives: vec![
                "Isolate the variable x in single-variable linear equations".to_string(),
                "Perform arithmetic operations on both sides of the equation".to_string(),
                "Check solutions by substitution".to_string(),
            ],
            focus: focus.to_string(),
            short_explanation: "To solve equations like a*x + b = c, first move constants to \
                                the right side by subtracting b, then divide by a to get x. \
                                Keep each step explicit."
                .to_string(),
            worked_example,
            practice_prompt: "Solve 3 similar equations and check your steps. Try both \
                              positive and negative constants."
                .to_string(),
            score_prior: score,
        };

        memory.lessons.push(lesson.clone());
        save_user(store, user_id, &memory)?;

        if let Some(telemetry) = &self.telemetry {
            telemetry.record(CoachEvent::LessonPlanned {
                difficulty: lesson.difficulty.as_str().to_string(),
                timestamp: Instant::now(),
            });
            telemetry.record(CoachEvent::MemorySaved {
                user_id: user_id.to_string(),
                timestamp: Instant::now(),
            });
        }

        Ok(lesson)
    }
}

impl Default for LessonAgent {
    fn default() -> Self {
        Self::new()
    }
}
