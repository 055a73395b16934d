//! The four pipeline agents
//!
//! Each agent is a plain struct taking the memory store as an explicit
//! dependency per call. Every operation loads the full user document,
//! mutates it, and saves it back; nothing is cached across calls.

pub mod assessment;
pub mod feedback;
pub mod lesson;
pub mod quiz;

pub use assessment::AssessmentAgent;
pub use feedback::FeedbackAgent;
pub use lesson::LessonAgent;
pub use quiz::QuizAgent;

use chrono::Utc;
use std::time::Instant;

use crate::grading::{grade, score_percent};
use crate::telemetry::{CoachEvent, TelemetryCollector};
use crate::types::{QuestionGrade, QuizQuestion, QuizResult};

/// Grade a question set against the supplied answers.
///
/// Missing answers grade as empty strings; extra answers are ignored.
pub(crate) fn grade_question_set(
    user_id: &str,
    questions: &[QuizQuestion],
    answers: &[String],
    tolerance: f64,
    telemetry: Option<&TelemetryCollector>,
) -> QuizResult {
    let mut per_question = Vec::with_capacity(questions.len());
    let mut correct_count = 0;

    for (idx, question) in questions.iter().enumerate() {
        let raw = answers.get(idx).map(String::as_str).unwrap_or("");
        let graded = grade(&question.expected_expr, raw, tolerance);
        if graded.correct {
            correct_count += 1;
        }
        if let Some(telemetry) = telemetry {
            telemetry.record(CoachEvent::QuestionGraded {
                q_index: idx,
                correct: graded.correct,
                timestamp: Instant::now(),
            });
        }
        per_question.push(QuestionGrade {
            q_index: idx,
            question: question.prompt.clone(),
            expected_expr: question.expected_expr.clone(),
            expected: graded.expected,
            user_answer_raw: raw.to_string(),
            user_answer_parsed: graded.user,
            correct: graded.correct,
            explanation: graded.explanation,
        });
    }

    let total_questions = questions.len();
    QuizResult {
        user_id: user_id.to_string(),
        created_at: Utc::now(),
        score_percent: score_percent(correct_count, total_questions),
        per_question,
        correct_count,
        total_questions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::DEFAULT_TOLERANCE;

    fn questions() -> Vec<QuizQuestion> {
        vec![
            QuizQuestion::solve_for_x("2*x + 3 = 11"),
            QuizQuestion::solve_for_x("3*x + 9 = 0"),
        ]
    }

    #[test]
    fn test_grades_each_question() {
        let result = grade_question_set(
            "student_001",
            &questions(),
            &["4".to_string(), "-3".to_string()],
            DEFAULT_TOLERANCE,
            None,
        );
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.total_questions, 2);
        assert_eq!(result.score_percent, 100);
    }

    #[test]
    fn test_missing_answers_grade_as_empty() {
        let result = grade_question_set(
            "student_001",
            &questions(),
            &["4".to_string()],
            DEFAULT_TOLERANCE,
            None,
        );
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.per_question[1].user_answer_parsed, None);
        assert_eq!(result.score_percent, 50);
    }

    #[test]
    fn test_empty_question_set_scores_zero() {
        let result = grade_question_set("student_001", &[], &[], DEFAULT_TOLERANCE, None);
        assert_eq!(result.score_percent, 0);
        assert_eq!(result.total_questions, 0);
    }
}
