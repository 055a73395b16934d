//! Coaching pipeline runner
//!
//! Drives the five stages end to end for one user: diagnostic assessment,
//! lesson planning, quiz generation, quiz grading, and feedback. Answers are
//! simulated unless the run is interactive, so a plain `tutorbuddy` invocation
//! shows the whole adaptive loop without any typing.

use std::time::Instant;

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::DefaultEditor;

use crate::agents::{AssessmentAgent, FeedbackAgent, LessonAgent, QuizAgent};
use crate::cli::{Args, Verbosity};
use crate::config::Config;
use crate::evals::improvement_check;
use crate::expansion::OllamaExpansionHook;
use crate::memory::{load_user, JsonFileStore, StoreConfig};
use crate::solver::solve_linear;
use crate::telemetry::{CoachEvent, TelemetryCollector};
use crate::types::{FeedbackDetails, Quiz, DEFAULT_TOPIC};

/// Answers the simulated student gives on the diagnostic: one right, two
/// wrong, which lands the lesson in remedial territory.
const SIMULATED_DIAGNOSTIC_ANSWERS: [&str; 3] = ["4", "3", "0"];

/// Build the file store honoring CLI and config overrides
pub fn build_store(args: &Args, config: &Config) -> Result<JsonFileStore> {
    let storage_dir = args
        .storage_dir
        .clone()
        .or_else(|| config.storage.dir.clone());

    let store = match storage_dir {
        Some(dir) => JsonFileStore::new(StoreConfig { storage_dir: dir })?,
        None => JsonFileStore::default_config()?,
    };
    Ok(store)
}

fn stage_banner(number: usize, title: &str, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!(
            "\n{} {}",
            format!("=== Stage {}:", number).cyan().bold(),
            title.cyan().bold()
        );
    }
}

fn spinner(message: &str, verbosity: Verbosity) -> Option<ProgressBar> {
    if !verbosity.show_progress() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Some(pb)
}

/// Compute correct answers for a quiz by solving each expected expression.
/// Unsolvable questions get "0" so the run still demonstrates feedback.
fn simulated_quiz_answers(quiz: &Quiz) -> Vec<String> {
    quiz.questions
        .iter()
        .map(|question| {
            solve_linear(&question.expected_expr)
                .map(|x| format!("{}", x))
                .unwrap_or_else(|| "0".to_string())
        })
        .collect()
}

/// Prompt for one answer per quiz question
fn prompt_quiz_answers(quiz: &Quiz) -> Result<Vec<String>> {
    let mut editor = DefaultEditor::new()?;
    let mut answers = Vec::with_capacity(quiz.questions.len());
    for (i, question) in quiz.questions.iter().enumerate() {
        println!("  {}. {}", i + 1, question.prompt);
        let line = editor.readline("     x = ")?;
        answers.push(line.trim().to_string());
    }
    Ok(answers)
}

fn record_stage(telemetry: &TelemetryCollector, stage: &str, started: Instant) {
    telemetry.record(CoachEvent::StageCompleted {
        stage: stage.to_string(),
        duration_ms: started.elapsed().as_millis() as u64,
        timestamp: Instant::now(),
    });
}

/// Run the full pipeline for `args.user`
pub async fn run_demo(args: &Args, config: &Config, interactive: bool) -> Result<()> {
    let verbosity = args.verbosity();
    let store = build_store(args, config)?;
    let telemetry = TelemetryCollector::new();
    let tolerance = config.tolerance();
    let user_id = args.user.as_str();

    if verbosity != Verbosity::Quiet {
        println!("{}", "TutorBuddy - adaptive equation coach".bold());
        println!("User: {}", user_id);
    }

    // Stage 1: diagnostic assessment
    stage_banner(1, "Assessment", verbosity);
    let started = Instant::now();
    telemetry.record(CoachEvent::StageStarted {
        stage: "assessment".to_string(),
        timestamp: started,
    });
    let assessment = AssessmentAgent::new()
        .with_tolerance(tolerance)
        .with_telemetry(telemetry.clone());
    let diagnostic_answers: Vec<String> = SIMULATED_DIAGNOSTIC_ANSWERS
        .iter()
        .map(|s| s.to_string())
        .collect();
    let diagnostic = assessment.run_diagnostic(&store, user_id, &diagnostic_answers)?;
    record_stage(&telemetry, "assessment", started);
    if verbosity != Verbosity::Quiet {
        println!(
            "Diagnostic score: {}% ({}/{})",
            diagnostic.score_percent, diagnostic.correct_count, diagnostic.total_questions
        );
        if verbosity.show_events() {
            for graded in &diagnostic.per_question {
                println!("  [{}] {}", if graded.correct { "ok" } else { "x" }, graded.explanation);
            }
        }
    }

    // Stage 2: lesson planning
    stage_banner(2, "Lesson", verbosity);
    let started = Instant::now();
    telemetry.record(CoachEvent::StageStarted {
        stage: "lesson".to_string(),
        timestamp: started,
    });
    let mut lesson_agent = match args.seed {
        Some(seed) => LessonAgent::seeded(seed),
        None => LessonAgent::new(),
    }
    .with_telemetry(telemetry.clone());
    let lesson = lesson_agent.plan(&store, user_id)?;
    record_stage(&telemetry, "lesson", started);
    if verbosity != Verbosity::Quiet {
        println!("Difficulty: {}", lesson.difficulty.as_str().yellow());
        println!("Focus: {}", lesson.focus);
        println!("Worked example: {}", lesson.worked_example.equation_str);
        if verbosity.show_events() {
            for step in &lesson.worked_example.steps {
                println!("  {}", step);
            }
        }
    }

    // Stage 3: quiz generation
    stage_banner(3, "Quiz", verbosity);
    let started = Instant::now();
    telemetry.record(CoachEvent::StageStarted {
        stage: "quiz".to_string(),
        timestamp: started,
    });
    let quiz_agent = QuizAgent::new()
        .with_tolerance(tolerance)
        .with_telemetry(telemetry.clone());
    let quiz = quiz_agent.generate_quiz(&store, user_id, &lesson)?;
    record_stage(&telemetry, "quiz", started);
    if verbosity != Verbosity::Quiet && !interactive {
        for (i, question) in quiz.questions.iter().enumerate() {
            println!("  {}. {}", i + 1, question.prompt);
        }
    }

    // Stage 4: grading
    stage_banner(4, "Grading", verbosity);
    let started = Instant::now();
    telemetry.record(CoachEvent::StageStarted {
        stage: "grading".to_string(),
        timestamp: started,
    });
    let quiz_answers = if interactive {
        prompt_quiz_answers(&quiz)?
    } else {
        simulated_quiz_answers(&quiz)
    };
    let graded = quiz_agent.grade_quiz(&store, user_id, &quiz_answers)?;
    record_stage(&telemetry, "grading", started);
    if verbosity != Verbosity::Quiet {
        println!(
            "Quiz score: {}% ({}/{})",
            graded.score_percent, graded.correct_count, graded.total_questions
        );
    }

    // Stage 5: feedback
    stage_banner(5, "Feedback", verbosity);
    let started = Instant::now();
    telemetry.record(CoachEvent::StageStarted {
        stage: "feedback".to_string(),
        timestamp: started,
    });
    let mut feedback_agent = FeedbackAgent::new().with_telemetry(telemetry.clone());
    if args.expand {
        let hook = OllamaExpansionHook::with_config(&args.ollama_url(), &args.model)?;
        feedback_agent = feedback_agent.with_hook(Box::new(hook));
    }
    let pb = spinner("Building feedback...", verbosity);
    let report = feedback_agent
        .provide_feedback(&store, user_id, &graded)
        .await?;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    record_stage(&telemetry, "feedback", started);
    if verbosity != Verbosity::Quiet {
        for item in &report.items {
            let mark = match item.status {
                crate::types::FeedbackStatus::Correct => "✓".green(),
                crate::types::FeedbackStatus::Incorrect => "✗".red(),
            };
            println!("  {} Q{}: {}", mark, item.q_index + 1, item.message);
            if verbosity.show_events() {
                if let FeedbackDetails::Incorrect(detail) = &item.details {
                    for step in &detail.steps {
                        println!("      {}", step);
                    }
                    println!("      Hint: {}", detail.hint);
                }
                if let Some(expanded) = &item.llm_expanded {
                    println!("      {}", expanded);
                }
            }
        }
    }

    // Final report
    let memory = load_user(&store, user_id)?;
    let mastery = memory.mastery(DEFAULT_TOPIC).unwrap_or(0);
    let check = improvement_check(diagnostic.score_percent, graded.score_percent, 0);

    if verbosity != Verbosity::Quiet {
        println!("\n{}", "Report".bold());
        println!(
            "Mastery ({}): {}%",
            DEFAULT_TOPIC,
            mastery.to_string().yellow()
        );
        println!(
            "Improvement: {}% -> {}% (delta {:+})",
            check.pre_score, check.post_score, check.delta
        );
        if check.passed {
            println!("{}", "Improved on the diagnostic.".green());
        } else {
            println!("{}", "No improvement this run.".red());
        }
        telemetry.display_summary();
    } else {
        println!(
            "{} diagnostic={} quiz={} mastery={}",
            user_id, diagnostic.score_percent, graded.score_percent, mastery
        );
    }

    Ok(())
}

/// Print the stored memory snapshot for a user
pub fn show_memory(args: &Args, config: &Config) -> Result<()> {
    let store = build_store(args, config)?;
    let memory = load_user(&store, &args.user)?;
    println!("{}", serde_json::to_string_pretty(&memory)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::{derive_variants, ExerciseGenerator};
    use chrono::Utc;
    use uuid::Uuid;

    fn quiz_from_seed(seed: u64) -> Quiz {
        let mut generator = ExerciseGenerator::seeded(seed);
        let example = generator.worked_example(None, None, None);
        Quiz {
            id: Uuid::new_v4(),
            user_id: "student_001".to_string(),
            created_at: Utc::now(),
            questions: derive_variants(&example),
        }
    }

    #[test]
    fn test_simulated_answers_are_all_correct() {
        let quiz = quiz_from_seed(7);
        let answers = simulated_quiz_answers(&quiz);
        assert_eq!(answers.len(), quiz.questions.len());

        for (question, answer) in quiz.questions.iter().zip(&answers) {
            let expected = solve_linear(&question.expected_expr).unwrap();
            let parsed: f64 = answer.parse().unwrap();
            assert!((parsed - expected).abs() < 1e-9);
        }
    }
}
