//! TutorBuddy - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use tutorbuddy::cli::{Args, Commands};
use tutorbuddy::config::Config;
use tutorbuddy::demo::{build_store, run_demo, show_memory};
use tutorbuddy::evals::{load_cases, run_evaluation};
use tutorbuddy::memory::MemoryStore;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load()?;

    match &args.command {
        Some(Commands::Demo { interactive }) => {
            run_demo(&args, &config, *interactive).await?;
        }
        Some(Commands::Show) => {
            show_memory(&args, &config)?;
        }
        Some(Commands::Eval { cases }) => {
            run_eval(&args, &config, cases)?;
        }
        Some(Commands::Clean) => {
            clean_memory(&args, &config)?;
        }
        Some(Commands::Config) => {
            show_config(&args, &config)?;
        }
        None => {
            // No subcommand runs the non-interactive pipeline
            run_demo(&args, &config, false).await?;
        }
    }

    Ok(())
}

fn run_eval(args: &Args, config: &Config, cases_path: &std::path::Path) -> Result<()> {
    let store = build_store(args, config)?;
    let cases = load_cases(cases_path)?;
    let results = run_evaluation(&store, &cases)?;

    let mut passed = 0;
    for result in &results {
        let mark = if result.judgement.passed {
            passed += 1;
            "PASS".green()
        } else {
            "FAIL".red()
        };
        println!(
            "{} {} (user {}): score {} - {}",
            mark,
            result.case_id,
            result.user_id,
            result.judgement.score,
            result.judgement.comment
        );
    }
    println!("\n{}/{} cases passed", passed, results.len());

    if passed < results.len() {
        std::process::exit(1);
    }
    Ok(())
}

fn clean_memory(args: &Args, config: &Config) -> Result<()> {
    let store = build_store(args, config)?;
    store.delete(&args.user)?;
    println!("Removed stored memory for {}", args.user);
    Ok(())
}

fn show_config(args: &Args, config: &Config) -> Result<()> {
    println!("{}", "TutorBuddy Configuration".bold());
    println!();
    println!("Config file: {}", Config::config_path()?.display());
    println!();
    println!("Storage:");
    let store = build_store(args, config)?;
    println!("  Memory dir: {}", store.storage_dir().display());
    println!();
    println!("Grading:");
    println!("  Tolerance: {}", config.tolerance());
    println!();
    println!("Expansion:");
    println!("  Model:    {}", args.model);
    println!("  Endpoint: {}", args.ollama_url());
    println!("  Enabled:  {}", if args.expand { "yes" } else { "no" });
    println!();
    println!("Verbosity: {}", args.verbosity().as_str());

    Ok(())
}
