//! Command-line argument parsing for TutorBuddy
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TutorBuddy - Adaptive equation coaching in the terminal
#[derive(Parser, Debug)]
#[command(name = "tutorbuddy")]
#[command(version = "0.3.0")]
#[command(about = "Assess, teach, quiz, and coach linear-equation solving", long_about = None)]
pub struct Args {
    /// User id whose memory the pipeline reads and writes
    #[arg(short, long, default_value = "student_001")]
    pub user: String,

    /// Seed for deterministic exercise generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Expand hints with a local Ollama model
    #[arg(long)]
    pub expand: bool,

    /// Ollama model used for hint expansion
    #[arg(short, long, default_value = "qwen2.5:7b-instruct")]
    pub model: String,

    /// Ollama host
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Ollama port
    #[arg(long, default_value_t = 11434)]
    pub port: u16,

    /// Directory for per-user memory files (~/.tutorbuddy/memory by default)
    #[arg(long)]
    pub storage_dir: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except final result)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full coaching pipeline (the default)
    Demo {
        /// Prompt for quiz answers instead of simulating them
        #[arg(long)]
        interactive: bool,
    },

    /// Print the stored memory snapshot for the user
    Show,

    /// Run golden-case evaluation against stored memory
    Eval {
        /// JSON file of golden cases
        #[arg(value_name = "CASES")]
        cases: PathBuf,
    },

    /// Remove the user's stored memory
    Clean,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Get Ollama base URL
    pub fn ollama_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Check if should show progress spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show per-question detail
    pub fn show_events(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            user: "student_001".to_string(),
            seed: None,
            expand: false,
            model: "test".to_string(),
            host: "localhost".to_string(),
            port: 11434,
            storage_dir: None,
            verbose: 0,
            quiet: false,
            command: None,
        }
    }

    #[test]
    fn test_verbosity_quiet() {
        let mut args = base_args();
        args.quiet = true;
        assert_eq!(args.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_normal() {
        assert_eq!(base_args().verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_verbose() {
        let mut args = base_args();
        args.verbose = 1;
        assert_eq!(args.verbosity(), Verbosity::Verbose);
    }

    #[test]
    fn test_verbosity_very_verbose() {
        let mut args = base_args();
        args.verbose = 2;
        assert_eq!(args.verbosity(), Verbosity::VeryVerbose);
    }

    #[test]
    fn test_ollama_url() {
        let mut args = base_args();
        args.port = 8080;
        assert_eq!(args.ollama_url(), "http://localhost:8080");
    }

    #[test]
    fn test_verbosity_methods() {
        assert!(!Verbosity::Quiet.show_progress());
        assert!(Verbosity::Normal.show_progress());

        assert!(!Verbosity::Normal.show_events());
        assert!(Verbosity::Verbose.show_events());
    }
}
