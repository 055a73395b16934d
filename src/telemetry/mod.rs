//! Pipeline telemetry
//!
//! Collects structured events as the tutoring stages run and keeps running
//! statistics for the end-of-run summary. Event names mirror the pipeline's
//! observable actions (stage started, question graded, hook failed, ...).

use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Telemetry event types
#[derive(Debug, Clone)]
pub enum CoachEvent {
    /// A pipeline stage began
    StageStarted { stage: String, timestamp: Instant },

    /// A pipeline stage finished
    StageCompleted {
        stage: String,
        duration_ms: u64,
        timestamp: Instant,
    },

    /// One question was graded
    QuestionGraded {
        q_index: usize,
        correct: bool,
        timestamp: Instant,
    },

    /// A quiz was derived from a lesson
    QuizGenerated {
        question_count: usize,
        timestamp: Instant,
    },

    /// A lesson was planned
    LessonPlanned {
        difficulty: String,
        timestamp: Instant,
    },

    /// Topic mastery was updated
    MasteryUpdated {
        topic: String,
        value: u32,
        timestamp: Instant,
    },

    /// A user memory document was saved
    MemorySaved { user_id: String, timestamp: Instant },

    /// The expansion hook failed (failure swallowed, deterministic detail kept)
    HookFailed { reason: String, timestamp: Instant },
}

/// Running telemetry statistics
#[derive(Debug, Clone, Default)]
pub struct CoachStats {
    pub stages_completed: usize,
    pub questions_graded: usize,
    pub questions_correct: usize,
    pub quizzes_generated: usize,
    pub lessons_planned: usize,
    pub mastery_updates: usize,
    pub memory_saves: usize,
    pub hook_failures: usize,
}

/// Telemetry collector shared across the pipeline
#[derive(Clone)]
pub struct TelemetryCollector {
    events: Arc<Mutex<Vec<CoachEvent>>>,
    stats: Arc<Mutex<CoachStats>>,
    start_time: Instant,
}

impl TelemetryCollector {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            stats: Arc::new(Mutex::new(CoachStats::default())),
            start_time: Instant::now(),
        }
    }

    /// Record an event
    pub fn record(&self, event: CoachEvent) {
        {
            let mut stats = self.stats.lock().unwrap();
            match &event {
                CoachEvent::StageStarted { .. } => {}
                CoachEvent::StageCompleted { .. } => stats.stages_completed += 1,
                CoachEvent::QuestionGraded { correct, .. } => {
                    stats.questions_graded += 1;
                    if *correct {
                        stats.questions_correct += 1;
                    }
                }
                CoachEvent::QuizGenerated { .. } => stats.quizzes_generated += 1,
                CoachEvent::LessonPlanned { .. } => stats.lessons_planned += 1,
                CoachEvent::MasteryUpdated { .. } => stats.mastery_updates += 1,
                CoachEvent::MemorySaved { .. } => stats.memory_saves += 1,
                CoachEvent::HookFailed { .. } => stats.hook_failures += 1,
            }
        }

        let mut events = self.events.lock().unwrap();
        events.push(event);
    }

    /// Get current statistics
    pub fn get_stats(&self) -> CoachStats {
        self.stats.lock().unwrap().clone()
    }

    /// Elapsed time since the collector was created
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    /// Total recorded event count
    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Last n events
    pub fn recent_events(&self, n: usize) -> Vec<CoachEvent> {
        let events = self.events.lock().unwrap();
        let start = events.len().saturating_sub(n);
        events[start..].to_vec()
    }

    /// Fraction of graded questions answered correctly
    pub fn grading_accuracy(&self) -> f64 {
        let stats = self.stats.lock().unwrap();
        if stats.questions_graded == 0 {
            1.0
        } else {
            stats.questions_correct as f64 / stats.questions_graded as f64
        }
    }

    /// Print the end-of-run summary
    pub fn display_summary(&self) {
        let stats = self.get_stats();
        println!("\nSession Summary");
        println!("─────────────────────────────────────");
        println!("Duration:           {:?}", self.elapsed());
        println!("Stages completed:   {}", stats.stages_completed);
        println!("Questions graded:   {}", stats.questions_graded);
        println!("Accuracy:           {:.1}%", self.grading_accuracy() * 100.0);
        println!("Mastery updates:    {}", stats.mastery_updates);
        println!("Memory saves:       {}", stats.memory_saves);
        if stats.hook_failures > 0 {
            println!("Hook failures:      {}", stats.hook_failures);
        }
        println!();
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}
