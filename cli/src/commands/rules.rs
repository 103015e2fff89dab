//! # Pinsry Rules Command
//!
//! File: cli/src/commands/rules.rs
//!
//! Lists the rule table in dispatch order: position, category, pattern count
//! and reply shape. With `--json` the same data is printed as an array.
//!
use crate::core::error::Result;
use crate::responder::{Producer, Responder, Rule};
use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::io::Write;

/// Arguments for `pinsry rules`.
#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Print the table as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
struct RuleRow {
    position: usize,
    category: &'static str,
    label: &'static str,
    patterns: usize,
    replies: usize,
    sample: &'static str,
}

impl RuleRow {
    fn new(position: usize, rule: &Rule) -> Self {
        Self {
            position,
            category: rule.category.name(),
            label: rule.category.label(),
            patterns: rule.predicate.len(),
            replies: match rule.producer {
                Producer::Fixed(_) => 1,
                Producer::Pick(pool) => pool.len(),
            },
            sample: rule.category.sample_question(),
        }
    }
}

/// # Handle Rules Command (`handle_rules`)
pub fn handle_rules(args: RulesArgs) -> Result<()> {
    let responder = Responder::standard();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_rules(&mut out, &responder, args.json)?;
    out.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn write_rules(out: &mut impl Write, responder: &Responder, json: bool) -> Result<()> {
    let rows: Vec<RuleRow> = responder
        .rules()
        .enumerate()
        .map(|(i, rule)| RuleRow::new(i + 1, rule))
        .collect();

    if json {
        let rendered = serde_json::to_string_pretty(&rows).context("Failed to serialize rules")?;
        writeln!(out, "{}", rendered)?;
        return Ok(());
    }

    writeln!(out, "{:>3}  {:<15} {:>8} {:>8}  SAMPLE", "#", "CATEGORY", "PATTERNS", "REPLIES")?;
    for row in &rows {
        writeln!(
            out,
            "{:>3}  {:<15} {:>8} {:>8}  {}",
            row.position, row.category, row.patterns, row.replies, row.sample
        )?;
    }
    writeln!(
        out,
        "\nUnmatched input draws from {} default replies.",
        responder.default_pool().len()
    )?;
    Ok(())
}
