//! # Pinsry Chat Command
//!
//! File: cli/src/commands/chat.rs
//!
//! ## Overview
//!
//! An interactive conversation on the terminal. The welcome message is shown
//! first, then every line read from stdin is submitted to one session until the
//! user quits or input ends.
//!
//! ## Commands
//!
//! - `/help`: list the commands
//! - `/topics`: categories the assistant knows, with a sample question each
//! - `/history`: the transcript so far
//! - `/quit`, `/exit` or `bye`: leave
//!
//! The loop reads through tokio's `AsyncBufRead` and writes to any `Write`, so
//! tests drive it with in-memory buffers while `handle_chat` wires it to stdin
//! and stdout. Reading input never blocks the runtime.
//!
use crate::core::config::Config;
use crate::core::error::{Result, SupportError};
use crate::render;
use crate::responder::{Category, Responder};
use crate::session::{Role, Session};
use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// Arguments for `pinsry chat`.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Fix the random source so pooled replies are reproducible.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable bold styling in the terminal.
    #[arg(long)]
    pub no_color: bool,

    /// Pause before each reply, in milliseconds. Overrides `chat.typing_delay_ms`.
    #[arg(long)]
    pub typing_delay_ms: Option<u64>,
}

/// Presentation settings for the chat loop.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub assistant_name: String,
    pub color: bool,
    pub typing_delay: Duration,
}

impl ChatOptions {
    fn from_args(args: &ChatArgs, config: &Config) -> Self {
        Self {
            assistant_name: config.assistant.name.clone(),
            color: super::use_color(config, args.no_color),
            typing_delay: Duration::from_millis(
                args.typing_delay_ms.unwrap_or(config.chat.typing_delay_ms),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChatCommand {
    Quit,
    History,
    Topics,
    Help,
    Unknown(String),
}

impl ChatCommand {
    /// `None` means the line is a message for the assistant.
    fn parse(line: &str) -> Option<Self> {
        if line.eq_ignore_ascii_case("bye") {
            return Some(ChatCommand::Quit);
        }
        if !line.starts_with('/') {
            return None;
        }
        let command = match line.to_ascii_lowercase().as_str() {
            "/quit" | "/exit" => ChatCommand::Quit,
            "/history" => ChatCommand::History,
            "/topics" => ChatCommand::Topics,
            "/help" => ChatCommand::Help,
            _ => ChatCommand::Unknown(line.to_string()),
        };
        Some(command)
    }
}

/// # Handle Chat Command (`handle_chat`)
///
/// Runs the chat loop against the process's stdin and stdout.
pub async fn handle_chat(args: ChatArgs, config: &Config) -> Result<()> {
    let options = ChatOptions::from_args(&args, config);
    let session = super::configured_session(config, Arc::new(Responder::standard()), args.seed);
    info!(session = %session.id(), "Starting chat session");

    let input = BufReader::new(tokio::io::stdin());
    run_chat(&session, input, std::io::stdout(), &options).await?;

    info!(
        session = %session.id(),
        turns = session.history().turns(),
        "Chat session ended"
    );
    Ok(())
}

/// # Run Chat Loop (`run_chat`)
///
/// Reads lines from `input` until a quit command or end of input, writing the
/// conversation to `output`. Blank lines are skipped.
pub async fn run_chat<R: AsyncBufRead + Unpin, W: Write>(
    session: &Session,
    mut input: R,
    mut output: W,
    options: &ChatOptions,
) -> Result<()> {
    let name = &options.assistant_name;
    writeln!(
        output,
        "{}: {}",
        name,
        render::to_terminal(session.welcome_message(), options.color)
    )?;
    writeln!(output, "Type /help for commands, /quit to leave.")?;

    loop {
        write!(output, "You: ")?;
        output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .await
            .context("Failed to read from input")?;
        if read == 0 {
            debug!("End of input, leaving chat");
            writeln!(output)?;
            break;
        }

        let trimmed = line.trim();
        match ChatCommand::parse(trimmed) {
            Some(ChatCommand::Quit) => {
                writeln!(output, "{}: Goodbye! Happy reading. 📚", name)?;
                break;
            }
            Some(ChatCommand::Help) => write_help(&mut output)?,
            Some(ChatCommand::Topics) => write_topics(&mut output)?,
            Some(ChatCommand::History) => write_history(&mut output, session, options)?,
            Some(ChatCommand::Unknown(command)) => {
                writeln!(
                    output,
                    "Unknown command '{}'. Type /help for the list.",
                    command
                )?;
            }
            None => {
                if trimmed.is_empty() {
                    continue;
                }
                if !options.typing_delay.is_zero() {
                    let typing = format!("{} is typing...", name);
                    write!(output, "{}", typing)?;
                    output.flush().context("Failed to flush output")?;
                    tokio::time::sleep(options.typing_delay).await;
                    write!(output, "\r{}\r", " ".repeat(typing.chars().count()))?;
                }
                match session.submit(trimmed).await {
                    Ok(reply) => writeln!(
                        output,
                        "{}: {}",
                        name,
                        render::to_terminal(&reply.text, options.color)
                    )?,
                    Err(SupportError::InvalidInput) => continue,
                    Err(e) => writeln!(output, "{}", e)?,
                }
            }
        }
    }

    output.flush().context("Failed to flush output")?;
    Ok(())
}

fn write_help(output: &mut impl Write) -> Result<()> {
    writeln!(output, "Commands:")?;
    writeln!(output, "  /topics   What I can help with")?;
    writeln!(output, "  /history  Show the conversation so far")?;
    writeln!(output, "  /help     Show this list")?;
    writeln!(output, "  /quit     Leave the chat (also /exit or bye)")?;
    Ok(())
}

fn write_topics(output: &mut impl Write) -> Result<()> {
    writeln!(output, "I can help with:")?;
    for category in Category::ALL {
        writeln!(
            output,
            "  {:<28} e.g. \"{}\"",
            category.label(),
            category.sample_question()
        )?;
    }
    Ok(())
}

fn write_history(output: &mut impl Write, session: &Session, options: &ChatOptions) -> Result<()> {
    let history = session.history();
    if history.is_empty() {
        writeln!(output, "(no messages yet)")?;
        return Ok(());
    }
    for message in history.iter() {
        let speaker = match message.role() {
            Role::User => "You",
            Role::Assistant => options.assistant_name.as_str(),
        };
        writeln!(
            output,
            "[{}] {}: {}",
            message.sent_at().format("%H:%M:%S"),
            speaker,
            render::to_terminal(message.content(), options.color)
        )?;
    }
    Ok(())
}
