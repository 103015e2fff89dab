//! # Pinsry Ask Command
//!
//! File: cli/src/commands/ask.rs
//!
//! ## Overview
//!
//! Runs a single-turn session: the words given on the command line are joined
//! into one message, submitted, and the reply is printed. Useful for scripting
//! and for checking which category a phrasing lands in.
//!
//! ## Examples
//!
//! ```bash
//! pinsry ask How do I bookmark a story?
//! pinsry ask --category "where is the notification bell"
//! pinsry ask --json --seed 7 hello
//! ```
//!
use crate::core::config::Config;
use crate::core::error::{Result, SupportError};
use crate::render;
use crate::responder::{Reply, Responder};
use anyhow::{anyhow, Context};
use clap::Parser;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info};

/// Arguments for `pinsry ask`.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question. Multiple words are joined with spaces.
    #[arg(num_args = 0..)]
    pub text: Vec<String>,

    /// Fix the random source so pooled replies are reproducible.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print `{category, kind, text}` as JSON.
    #[arg(long, conflicts_with = "category")]
    pub json: bool,

    /// Print only the matched category name (`none` for the default pool).
    #[arg(long)]
    pub category: bool,

    /// Disable bold styling in the terminal.
    #[arg(long)]
    pub no_color: bool,
}

/// Output shape of a single reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AskFormat {
    Text { color: bool },
    Json,
    Category,
}

impl AskFormat {
    fn from_args(args: &AskArgs, config: &Config) -> Self {
        if args.json {
            AskFormat::Json
        } else if args.category {
            AskFormat::Category
        } else {
            AskFormat::Text {
                color: super::use_color(config, args.no_color),
            }
        }
    }
}

/// # Handle Ask Command (`handle_ask`)
///
/// Submits the joined text to a fresh session and writes the reply to stdout.
/// Empty input is not an error: nothing is printed and the command succeeds.
pub async fn handle_ask(args: AskArgs, config: &Config) -> Result<()> {
    let format = AskFormat::from_args(&args, config);
    let text = args.text.join(" ");
    let session = super::configured_session(config, Arc::new(Responder::standard()), args.seed);

    let reply = match session.submit(&text).await {
        Ok(reply) => reply,
        Err(SupportError::InvalidInput) => {
            debug!("Empty question, nothing to answer.");
            return Ok(());
        }
        Err(e) => return Err(anyhow!(e)),
    };
    info!("Answered with {} reply", reply.kind.name());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_reply(&mut out, &reply, format)?;
    out.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn write_reply(out: &mut impl Write, reply: &Reply, format: AskFormat) -> Result<()> {
    match format {
        AskFormat::Text { color } => {
            writeln!(out, "{}", render::to_terminal(&reply.text, color))?;
        }
        AskFormat::Json => {
            let value = json!({
                "category": reply.category().map(|c| c.name()),
                "kind": reply.kind.name(),
                "text": reply.text,
            });
            let rendered =
                serde_json::to_string_pretty(&value).context("Failed to serialize reply")?;
            writeln!(out, "{}", rendered)?;
        }
        AskFormat::Category => {
            let name = reply.category().map_or("none", |c| c.name());
            writeln!(out, "{}", name)?;
        }
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::{content, Category, ReplyKind};

    fn render(reply: &Reply, format: AskFormat) -> String {
        let mut buf = Vec::new();
        write_reply(&mut buf, reply, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_output_strips_markers_without_color() {
        let reply = Reply {
            kind: ReplyKind::Matched(Category::Thanks),
            text: "**Glad** to help!".to_string(),
        };
        assert_eq!(
            render(&reply, AskFormat::Text { color: false }),
            "Glad to help!\n"
        );
    }

    #[test]
    fn test_json_output_fields() {
        let reply = Reply {
            kind: ReplyKind::Matched(Category::Bookmarks),
            text: content::BOOKMARKS.to_string(),
        };
        let out = render(&reply, AskFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["category"], "bookmarks");
        assert_eq!(value["kind"], "matched");
        assert_eq!(value["text"], content::BOOKMARKS);
    }

    #[test]
    fn test_json_output_for_default_reply_has_null_category() {
        let reply = Reply {
            kind: ReplyKind::Default,
            text: content::DEFAULTS[0].to_string(),
        };
        let value: serde_json::Value =
            serde_json::from_str(&render(&reply, AskFormat::Json)).unwrap();
        assert!(value["category"].is_null());
        assert_eq!(value["kind"], "default");
    }

    #[test]
    fn test_category_output() {
        let matched = Reply {
            kind: ReplyKind::Matched(Category::Offline),
            text: content::OFFLINE.to_string(),
        };
        assert_eq!(render(&matched, AskFormat::Category), "offline\n");
        assert_eq!(render(&Reply::apology(), AskFormat::Category), "none\n");
    }

    #[test]
    fn test_format_from_args() {
        let args = AskArgs::parse_from(["ask", "--json", "hi"]);
        assert_eq!(AskFormat::from_args(&args, &Config::default()), AskFormat::Json);

        let args = AskArgs::parse_from(["ask", "--no-color", "hi", "there"]);
        assert_eq!(args.text, vec!["hi", "there"]);
        assert_eq!(
            AskFormat::from_args(&args, &Config::default()),
            AskFormat::Text { color: false }
        );
    }
}
