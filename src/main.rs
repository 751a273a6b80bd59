//! LearnBuddy CLI entry point.

use anyhow::Result;
use clap::Parser;
use learnbuddy::cli::{commands, Cli, Commands};
use learnbuddy::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("learnbuddy={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match &cli.command {
        Commands::Parse { input, format, output } => {
            commands::run_parse(input.as_deref(), format, output.clone(), settings).await?;
        }

        Commands::Keywords { text, count } => {
            commands::run_keywords(text, *count)?;
        }

        Commands::Summarize { text, sentences } => {
            commands::run_summarize(text, *sentences)?;
        }

        Commands::Quiz { at, input, seed } => {
            commands::run_quiz(*at, input.as_deref(), *seed, settings).await?;
        }

        Commands::Assess {
            input,
            count,
            video_id,
            subjective,
            seed,
        } => {
            std::fs::create_dir_all(settings.data_dir())?;
            commands::run_assess(input.as_deref(), *count, video_id, *subjective, *seed, settings).await?;
        }

        Commands::Grade { answer, topic } => {
            commands::run_grade(answer, topic.as_deref(), settings).await?;
        }

        Commands::Simulate { script, input, seed } => {
            commands::run_simulate(script, input.as_deref(), *seed, settings).await?;
        }

        Commands::History { limit, clear } => {
            std::fs::create_dir_all(settings.data_dir())?;
            commands::run_history(*limit, *clear, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, cli.config.as_deref(), settings)?;
        }
    }

    Ok(())
}
