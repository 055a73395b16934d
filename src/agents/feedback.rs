//! Feedback agent: per-question feedback for a graded quiz
//!
//! Correct answers get a short praise item; incorrect answers get the
//! deterministic analysis, optionally enriched through the expansion hook.
//! A hook failure is recorded and swallowed; the deterministic detail always
//! stands.

use std::time::Instant;

use chrono::Utc;

use crate::errors::Result;
use crate::expansion::{ExpansionContext, ExpansionHook};
use crate::feedback::explain_mistake;
use crate::memory::{load_user, save_user, MemoryStore};
use crate::telemetry::{CoachEvent, TelemetryCollector};
use crate::types::{FeedbackDetails, FeedbackItem, FeedbackReport, FeedbackStatus, QuizResult};

/// Feedback generation agent
pub struct FeedbackAgent {
    hook: Option<Box<dyn ExpansionHook>>,
    telemetry: Option<TelemetryCollector>,
}

impl FeedbackAgent {
    /// Agent without enrichment; deterministic feedback only
    pub fn new() -> Self {
        Self {
            hook: None,
            telemetry: None,
        }
    }

    /// Attach an expansion hook for incorrect answers
    pub fn with_hook(mut self, hook: Box<dyn ExpansionHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Attach a telemetry collector
    pub fn with_telemetry(mut self, telemetry: TelemetryCollector) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Build and persist the feedback report for a graded quiz.
    pub async fn provide_feedback(
        &self,
        store: &dyn MemoryStore,
        user_id: &str,
        graded: &QuizResult,
    ) -> Result<FeedbackReport> {
        let mut items = Vec::with_capacity(graded.per_question.len());

        for question in &graded.per_question {
            if question.correct {
                items.push(FeedbackItem {
                    q_index: question.q_index,
                    status: FeedbackStatus::Correct,
                    message: "Good job — solution is correct.".to_string(),
                    details: FeedbackDetails::Correct {
                        expected: question.expected,
                        user: question.user_answer_parsed,
                    },
                    llm_expanded: None,
                });
                continue;
            }

            let detail = explain_mistake(
                &question.question,
                &question.expected_expr,
                &question.user_answer_raw,
            );

            let llm_expanded = match &self.hook {
                None => None,
                Some(hook) => {
                    let context = ExpansionContext {
                        question: question.question.clone(),
                        expected_expr: question.expected_expr.clone(),
                        user_answer: question.user_answer_raw.clone(),
                        deterministic: detail.clone(),
                    };
                    match hook.expand(&context).await {
                        Ok(text) => Some(text),
                        Err(err) => {
                            // Expansion is strictly additive; keep the
                            // deterministic detail and move on.
                            if let Some(telemetry) = &self.telemetry {
                                telemetry.record(CoachEvent::HookFailed {
                                    reason: err.to_string(),
                                    timestamp: Instant::now(),
                                });
                            }
                            None
                        }
                    }
                }
            };

            items.push(FeedbackItem {
                q_index: question.q_index,
                status: FeedbackStatus::Incorrect,
                message: "See step-by-step guidance and hint below.".to_string(),
                details: FeedbackDetails::Incorrect(detail),
                llm_expanded,
            });
        }

        let report = FeedbackReport {
            user_id: user_id.to_string(),
            created_at: Utc::now(),
            quiz_score: graded.score_percent,
            items,
        };

        let mut memory = load_user(store, user_id)?;
        memory.feedbacks.push(report.clone());
        memory.last_feedback = Some(report.clone());
        save_user(store, user_id, &memory)?;

        if let Some(telemetry) = &self.telemetry {
            telemetry.record(CoachEvent::MemorySaved {
                user_id: user_id.to_string(),
                timestamp: Instant::now(),
            });
        }

        Ok(report)
    }
}

impl Default for FeedbackAgent {
    fn default() -> Self {
        Self::new()
    }
}
