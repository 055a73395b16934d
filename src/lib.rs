//! TutorBuddy - Adaptive Equation Coaching Pipeline
//!
//! A terminal tutoring demo for one-variable linear equations: assess a
//! student, plan a lesson at the right difficulty, quiz on variants of the
//! worked example, grade deterministically, and explain every mistake.
//!
//! # Architecture
//!
//! - **Core**: equation solver, grading, mistake analysis, exercise generation
//! - **Agents**: assessment, lesson, quiz, and feedback stages over a shared
//!   per-user memory store
//! - **Interface**: CLI pipeline runner with optional LLM hint expansion

// Core modules
pub mod errors;
pub mod types;
pub mod solver;
pub mod grading;
pub mod feedback;
pub mod exercise;
pub mod mastery;

// Re-export commonly used types
pub use errors::{CoachError, Result};

// Pipeline layer
pub mod agents;
pub mod expansion;
pub mod memory;
pub mod telemetry;

// Interface layer
pub mod cli;
pub mod config;
pub mod demo;
pub mod evals;
