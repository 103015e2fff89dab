//! # Pinsry Support Responder
//!
//! File: cli/src/responder/mod.rs
//!
//! ## Overview
//!
//! The responder maps a user message to canned reply text. It is a pure
//! function of its input apart from the random draw made for categories with a
//! pool of candidate replies (the greeting) and for the default pool. It holds
//! no conversation state; see [`crate::session`] for that.
//!
//! ## Architecture
//!
//! - `rules`: categories, predicates, producers and the ordered standard table
//! - `content`: the reply copy, welcome message and apology
//!
//! Dispatch is strict first-match-wins over the table. `respond` returns
//! `None` when nothing matches; choosing a default reply is left to the caller
//! through `default_reply`.
//!
//! ## Examples
//!
//! ```rust
//! use pinsry_support::responder::{Category, Responder};
//!
//! let responder = Responder::standard();
//! assert_eq!(responder.classify("Can I save it for later?"), Some(Category::Bookmarks));
//! assert_eq!(responder.classify("xyzzy plugh"), None);
//! ```
//!
pub mod content;
pub mod rules;

pub use rules::{Category, Predicate, Producer, Rule, RuleSpec, RuleTable};

use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::RngCore;
use std::sync::Arc;
use tracing::trace;

lazy_static! {
    static ref STANDARD_TABLE: Arc<RuleTable> =
        Arc::new(RuleTable::standard().expect("standard rule table compiles"));
}

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Matched(Category),
    Default,
    Apology,
}

impl ReplyKind {
    pub fn name(self) -> &'static str {
        match self {
            ReplyKind::Matched(_) => "matched",
            ReplyKind::Default => "default",
            ReplyKind::Apology => "apology",
        }
    }
}

/// Resolved assistant text together with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub text: String,
}

impl Reply {
    pub fn apology() -> Self {
        Self {
            kind: ReplyKind::Apology,
            text: content::APOLOGY.to_string(),
        }
    }

    /// Category of a matched reply.
    pub fn category(&self) -> Option<Category> {
        match self.kind {
            ReplyKind::Matched(category) => Some(category),
            _ => None,
        }
    }
}

/// Rule table plus default pool.
#[derive(Debug, Clone)]
pub struct Responder {
    table: Arc<RuleTable>,
    defaults: &'static [&'static str],
}

impl Responder {
    /// Builds a responder. With an empty `defaults` pool unmatched input gets
    /// the apology.
    pub fn new(table: Arc<RuleTable>, defaults: &'static [&'static str]) -> Self {
        Self { table, defaults }
    }

    /// The production table and default pool, sharing one compiled table per process.
    pub fn standard() -> Self {
        Self::new(Arc::clone(&STANDARD_TABLE), content::DEFAULTS)
    }

    /// Case-folds the input. Whitespace is left as is.
    pub fn normalize(input: &str) -> String {
        input.to_lowercase()
    }

    /// Category of the first matching rule, without drawing a reply.
    pub fn classify(&self, input: &str) -> Option<Category> {
        let normalized = Self::normalize(input);
        self.table.first_match(&normalized).map(|rule| rule.category)
    }

    /// Reply of the first matching rule, or `None` when no rule matches.
    pub fn respond(&self, input: &str, rng: &mut dyn RngCore) -> Option<Reply> {
        let normalized = Self::normalize(input);
        let rule = self.table.first_match(&normalized)?;
        let text = match rule.producer {
            Producer::Fixed(text) => text,
            Producer::Pick(pool) => pick(pool, rng)?,
        };
        trace!(category = %rule.category, "rule matched");
        Some(Reply {
            kind: ReplyKind::Matched(rule.category),
            text: text.to_string(),
        })
    }

    /// Uniform draw from the default pool.
    pub fn default_reply(&self, rng: &mut dyn RngCore) -> Reply {
        match pick(self.defaults, rng) {
            Some(text) => Reply {
                kind: ReplyKind::Default,
                text: text.to_string(),
            },
            None => Reply::apology(),
        }
    }

    pub fn default_pool(&self) -> &'static [&'static str] {
        self.defaults
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.table.iter()
    }

    /// Every text a rule of `category` can produce.
    pub fn candidates(&self, category: Category) -> &[&'static str] {
        self.table
            .iter()
            .find(|rule| rule.category == category)
            .map(|rule| rule.producer.candidates())
            .unwrap_or(&[])
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::standard()
    }
}

fn pick(pool: &'static [&'static str], rng: &mut dyn RngCore) -> Option<&'static str> {
    pool.choose(rng).copied()
}
