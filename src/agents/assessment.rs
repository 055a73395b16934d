//! Assessment agent: the diagnostic that seeds the pipeline
//!
//! Holds a small fixed diagnostic question set, grades submitted answers,
//! and records the result plus the user's initial topic mastery.

use std::time::Instant;

use crate::agents::grade_question_set;
use crate::errors::Result;
use crate::grading::DEFAULT_TOLERANCE;
use crate::memory::{load_user, save_user, MemoryStore};
use crate::telemetry::{CoachEvent, TelemetryCollector};
use crate::types::{QuizQuestion, QuizResult, DEFAULT_TOPIC};

/// Diagnostic assessment agent
pub struct AssessmentAgent {
    questions: Vec<QuizQuestion>,
    tolerance: f64,
    topic: String,
    telemetry: Option<TelemetryCollector>,
}

impl AssessmentAgent {
    /// Agent with the standard 3-question linear-equation diagnostic
    pub fn new() -> Self {
        Self {
            questions: default_diagnostic(),
            tolerance: DEFAULT_TOLERANCE,
            topic: DEFAULT_TOPIC.to_string(),
            telemetry: None,
        }
    }

    /// Replace the diagnostic question set
    pub fn with_questions(mut self, questions: Vec<QuizQuestion>) -> Self {
        self.questions = questions;
        self
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

    /// The diagnostic question set
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Grade the diagnostic and persist the result.
    ///
    /// Sets `topic_mastery[topic]` to the raw score (initial placement);
    /// later quiz grades average into it. Missing answers grade as empty.
    pub fn run_diagnostic(
        &self,
        store: &dyn MemoryStore,
        user_id: &str,
        answers: &[String],
    ) -> Result<QuizResult> {
        let result = grade_question_set(
            user_id,
            &self.questions,
            answers,
            self.tolerance,
            self.telemetry.as_ref(),
        );

        let mut memory = load_user(store, user_id)?;
        memory.diagnostics.push(result.clone());
        memory
            .topic_mastery
            .insert(self.topic.clone(), result.score_percent);
        save_user(store, user_id, &memory)?;

        if let Some(telemetry) = &self.telemetry {
            telemetry.record(CoachEvent::MasteryUpdated {
                topic: self.topic.clone(),
                value: result.score_percent,
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

impl Default for AssessmentAgent {
    fn default() -> Self {
        Self::new()
    }
}

/// The standard linear-equation diagnostic
fn default_diagnostic() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion::solve_for_x("2*x + 3 = 11"),
        QuizQuestion::solve_for_x("5*x - 4 = 21"),
        QuizQuestion::solve_for_x("3*x + 9 = 0"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;

    #[test]
    fn test_perfect_diagnostic() {
        let store = InMemoryStore::new();
        let agent = AssessmentAgent::new();

        let answers = vec!["4".to_string(), "5".to_string(), "-3".to_string()];
        let result = agent.run_diagnostic(&store, "student_001", &answers).unwrap();

        assert_eq!(result.correct_count, 3);
        assert_eq!(result.score_percent, 100);
    }

    #[test]
    fn test_partial_diagnostic_sets_initial_mastery() {
        let store = InMemoryStore::new();
        let agent = AssessmentAgent::new();

        // Only the first answer is right
        let answers = vec!["4".to_string(), "3".to_string(), "0".to_string()];
        let result = agent.run_diagnostic(&store, "student_001", &answers).unwrap();
        assert_eq!(result.score_percent, 33);

        let memory = load_user(&store, "student_001").unwrap();
        assert_eq!(memory.diagnostics.len(), 1);
        assert_eq!(memory.mastery(DEFAULT_TOPIC), Some(33));
    }

    #[test]
    fn test_diagnostic_appends_to_history() {
        let store = InMemoryStore::new();
        let agent = AssessmentAgent::new();

        agent.run_diagnostic(&store, "student_001", &[]).unwrap();
        agent
            .run_diagnostic(&store, "student_001", &["4".to_string()])
            .unwrap();

        let memory = load_user(&store, "student_001").unwrap();
        assert_eq!(memory.diagnostics.len(), 2);
        assert_eq!(memory.latest_diagnostic().unwrap().correct_count, 1);
    }

    #[test]
    fn test_no_answers_scores_zero() {
        let store = InMemoryStore::new();
        let agent = AssessmentAgent::new();

        let result = agent.run_diagnostic(&store, "student_001", &[]).unwrap();
        assert_eq!(result.score_percent, 0);
        assert!(result.per_question.iter().all(|q| !q.correct));
    }
}
