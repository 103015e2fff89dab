//! # Pinsry Support Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! The `pinsry` binary. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and routing to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # One question
//! pinsry ask "How do I bookmark a story?"
//!
//! # Talk to the assistant, with debug logging on stderr
//! pinsry -vv chat
//!
//! # Serve the widget API with an explicit configuration file
//! pinsry --config ./pinsry.toml serve
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Load configuration and route to the command handler
//! 4. Format and display any errors that occur
//!
use clap::Parser;
use pinsry_support::commands;
use pinsry_support::core::config;
use pinsry_support::core::error::Result;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "pinsry",
    about = "💬 Pinsry support assistant",
    long_about = "Answers questions about the Pinsry story-sharing app.\n\
                  Ask once, chat in the terminal, or serve the web widget's API.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Load this configuration file instead of searching for one.
    #[arg(long, global = true, env = "PINSRY_CONFIG")]
    config: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Ask one question and print the reply.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    /// Chat with the assistant in the terminal.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// List the reply rules in dispatch order.
    Rules(commands::rules::RulesArgs),
    /// Serve the HTTP API for the web widget.
    #[command(alias = "s")]
    Serve(commands::serve::ServeArgs),
}

/// Loads the configuration once and hands it to the selected command.
async fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Ask(args) => commands::ask::handle_ask(args, &config).await,
        Commands::Chat(args) => commands::chat::handle_chat(args, &config).await,
        Commands::Rules(args) => commands::rules::handle_rules(args),
        Commands::Serve(args) => commands::serve::handle_serve(args, &config).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Verbosity sets the level unless RUST_LOG is present.
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    // Errors are reported once here, then the process exits with status 1.
    if let Err(e) = run(cli).await {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

// --- Basic Integration Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use assert_cmd::Command;
    use clap::CommandFactory;
    use predicates::prelude::*;

    fn pinsry_cmd() -> Command {
        Command::cargo_bin("pinsry").expect("Failed to find pinsry binary for testing")
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_main_help_flag() {
        pinsry_cmd().arg("--help").assert().success();
    }

    #[test]
    fn test_main_version_flag() {
        pinsry_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
