//! # Rule Table
//!
//! File: cli/src/responder/rules.rs
//!
//! ## Overview
//!
//! The ordered table of categories the responder dispatches over. Each entry
//! pairs a disjunction of trigger patterns with the reply it produces. The
//! order of `STANDARD_SPECS` is the dispatch order: the first entry whose
//! predicate matches wins, so moving an entry changes which category answers
//! inputs that trigger several of them (e.g. "author" triggers both
//! `StoryCreation` and `Following`, and only the former is ever reached).
//!
//! Patterns are plain substring alternations, not word-bounded. "hi" matches
//! inside "this" and "sup" inside "support"; that behaviour is kept.
//!
use super::content;
use crate::core::error::SupportError;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// The categories of the standard table, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Greeting,
    Creator,
    StoryCreation,
    Bookmarks,
    Following,
    Notifications,
    Offline,
    Account,
    Reading,
    Search,
    Interactions,
    Features,
    Problems,
    Thanks,
    GeneralHelp,
    Navigation,
    Editing,
    Community,
    Contact,
    Privacy,
}

impl Category {
    /// Every category, in dispatch order.
    pub const ALL: [Category; 20] = [
        Category::Greeting,
        Category::Creator,
        Category::StoryCreation,
        Category::Bookmarks,
        Category::Following,
        Category::Notifications,
        Category::Offline,
        Category::Account,
        Category::Reading,
        Category::Search,
        Category::Interactions,
        Category::Features,
        Category::Problems,
        Category::Thanks,
        Category::GeneralHelp,
        Category::Navigation,
        Category::Editing,
        Category::Community,
        Category::Contact,
        Category::Privacy,
    ];

    /// Stable machine name, identical to the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            Category::Greeting => "greeting",
            Category::Creator => "creator",
            Category::StoryCreation => "story_creation",
            Category::Bookmarks => "bookmarks",
            Category::Following => "following",
            Category::Notifications => "notifications",
            Category::Offline => "offline",
            Category::Account => "account",
            Category::Reading => "reading",
            Category::Search => "search",
            Category::Interactions => "interactions",
            Category::Features => "features",
            Category::Problems => "problems",
            Category::Thanks => "thanks",
            Category::GeneralHelp => "general_help",
            Category::Navigation => "navigation",
            Category::Editing => "editing",
            Category::Community => "community",
            Category::Contact => "contact",
            Category::Privacy => "privacy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Greeting => "Greetings",
            Category::Creator => "Who made Pinsry",
            Category::StoryCreation => "Writing & publishing stories",
            Category::Bookmarks => "Bookmarks",
            Category::Following => "Following authors",
            Category::Notifications => "Notifications",
            Category::Offline => "Offline reading",
            Category::Account => "Account & settings",
            Category::Reading => "Reading experience",
            Category::Search => "Search & discovery",
            Category::Interactions => "Likes, comments & shares",
            Category::Features => "Feature overview",
            Category::Problems => "Reporting problems",
            Category::Thanks => "Thanks & feedback",
            Category::GeneralHelp => "General help",
            Category::Navigation => "Navigating the app",
            Category::Editing => "Editing & managing stories",
            Category::Community => "Community",
            Category::Contact => "Contacting the creator",
            Category::Privacy => "Privacy & safety",
        }
    }

    /// A question this category wins under the standard dispatch order.
    pub fn sample_question(self) -> &'static str {
        match self {
            Category::Greeting => "Hello!",
            Category::Creator => "Who created Pinsry?",
            Category::StoryCreation => "How do I publish my story?",
            Category::Bookmarks => "Can I save it for later?",
            Category::Following => "How do I follow someone?",
            Category::Notifications => "Where is the notification bell?",
            Category::Offline => "Can I use it offline?",
            Category::Account => "How do I change my avatar?",
            Category::Reading => "Any reading tips?",
            Category::Search => "Can I search by tag?",
            Category::Interactions => "How do likes work?",
            Category::Features => "What features does Pinsry have?",
            Category::Problems => "I found a bug",
            Category::Thanks => "Thank you!",
            Category::GeneralHelp => "Can you help me?",
            Category::Navigation => "Open the menu",
            Category::Editing => "Can I modify my title?",
            Category::Community => "Is there a discussion forum?",
            Category::Contact => "github link please",
            Category::Privacy => "I want to report harassment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a matched rule produces its reply text.
#[derive(Debug, Clone, Copy)]
pub enum Producer {
    Fixed(&'static str),
    /// Uniform draw from a non-empty list.
    Pick(&'static [&'static str]),
}

impl Producer {
    /// Every string this producer can return.
    pub fn candidates(&self) -> &[&'static str] {
        match self {
            Producer::Fixed(text) => std::slice::from_ref(text),
            Producer::Pick(pool) => pool,
        }
    }
}

/// A case-insensitive disjunction of patterns.
#[derive(Debug, Clone)]
pub struct Predicate {
    patterns: Vec<Regex>,
}

impl Predicate {
    /// Compiles each source with the `(?i)` flag.
    pub fn any(sources: &[&str]) -> Result<Self, SupportError> {
        let patterns = sources
            .iter()
            .map(|source| {
                Regex::new(&format!("(?i){source}")).map_err(|e| SupportError::Pattern {
                    pattern: (*source).to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(input))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// One (predicate, producer) pair of the table.
#[derive(Debug, Clone)]
pub struct Rule {
    pub category: Category,
    pub predicate: Predicate,
    pub producer: Producer,
}

/// Uncompiled form of a rule.
pub struct RuleSpec {
    pub category: Category,
    pub patterns: &'static [&'static str],
    pub producer: Producer,
}

/// An immutable, ordered list of rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Compiles specs in the order given.
    ///
    /// Fails on an invalid pattern, a rule with no patterns, or an empty `Pick` pool.
    pub fn compile(specs: &[RuleSpec]) -> Result<Self, SupportError> {
        let mut rules = Vec::with_capacity(specs.len());
        for spec in specs {
            if spec.patterns.is_empty() {
                return Err(SupportError::Config(format!(
                    "rule '{}' has no trigger patterns",
                    spec.category
                )));
            }
            if spec.producer.candidates().is_empty() {
                return Err(SupportError::Config(format!(
                    "rule '{}' has an empty response pool",
                    spec.category
                )));
            }
            rules.push(Rule {
                category: spec.category,
                predicate: Predicate::any(spec.patterns)?,
                producer: spec.producer,
            });
        }
        Ok(Self { rules })
    }

    pub fn standard() -> Result<Self, SupportError> {
        Self::compile(STANDARD_SPECS)
    }

    /// First rule whose predicate matches `input`.
    pub fn first_match(&self, input: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.predicate.is_match(input))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The production table. Order is the dispatch order.
pub const STANDARD_SPECS: &[RuleSpec] = &[
    RuleSpec {
        category: Category::Greeting,
        patterns: &[r"(hi|hello|hey|good\s+(morning|afternoon|evening)|greetings|sup|what's up)"],
        producer: Producer::Pick(content::GREETINGS),
    },
    // Checked early: many phrasings of "who made this".
    RuleSpec {
        category: Category::Creator,
        patterns: &[
            r"who\s+(created|made|developed|built|designed)\s+(this\s+app|pinsry|app)",
            r"who\s+(created|made|developed|built|designed)\s+(this|the)",
            r"who\s+(created|made|developed|built|designed)",
            r"creator|developer|maker|luohino|founder|author\s+of|owner\s+of",
            r"who\s+made|who\s+created|who\s+developed|who\s+built|who\s+designed",
            r"made\s+this|created\s+this|developed\s+this|built\s+this|designed\s+this",
            r"developing|creating|building|designing|contact.*developer|contact.*creator",
            r"app.*developer|app.*creator|platform.*developer|platform.*creator",
            r"behind\s+this|about\s+developer|about\s+creator|team\s+behind",
        ],
        producer: Producer::Fixed(content::CREATOR),
    },
    RuleSpec {
        category: Category::StoryCreation,
        patterns: &[r"(create|write|publish|new|post|story|writing|author|content|draft|compose)"],
        producer: Producer::Fixed(content::STORY_CREATION),
    },
    RuleSpec {
        category: Category::Bookmarks,
        patterns: &[r"(bookmark|save|favorite|favourite|read.*later|save.*for.*later|bookmark.*story|save.*story)"],
        producer: Producer::Fixed(content::BOOKMARKS),
    },
    RuleSpec {
        category: Category::Following,
        patterns: &[r"(follow|following|subscribe|connect|author|writer|user|people)"],
        producer: Producer::Fixed(content::FOLLOWING),
    },
    RuleSpec {
        category: Category::Notifications,
        patterns: &[r"(notification|alert|update|bell|reminder|notify|ping)"],
        producer: Producer::Fixed(content::NOTIFICATIONS),
    },
    RuleSpec {
        category: Category::Offline,
        patterns: &[r"(offline|download|internet|connection|wifi|data|airplane|flight|commute)"],
        producer: Producer::Fixed(content::OFFLINE),
    },
    RuleSpec {
        category: Category::Account,
        patterns: &[r"(account|settings|profile|manage|preferences|config|setup|personal|bio|avatar)"],
        producer: Producer::Fixed(content::ACCOUNT),
    },
    RuleSpec {
        category: Category::Reading,
        patterns: &[r"(read|reading|story.*read|open.*story|view.*story|story.*view)"],
        producer: Producer::Fixed(content::READING),
    },
    RuleSpec {
        category: Category::Search,
        patterns: &[r"(search|find|discover|explore|browse|look.*for)"],
        producer: Producer::Fixed(content::SEARCH),
    },
    RuleSpec {
        category: Category::Interactions,
        patterns: &[r"(like|likes|love|heart|react|interaction|comment|share)"],
        producer: Producer::Fixed(content::INTERACTIONS),
    },
    RuleSpec {
        category: Category::Features,
        patterns: &[r"how.*use|help.*with|feature|function|what.*can.*do|capabilities"],
        producer: Producer::Fixed(content::FEATURES),
    },
    RuleSpec {
        category: Category::Problems,
        patterns: &[r"problem|issue|bug|error|not.*working|broken"],
        producer: Producer::Fixed(content::PROBLEMS),
    },
    RuleSpec {
        category: Category::Thanks,
        patterns: &[r"(thank|thanks|appreciate|great|awesome|love|amazing|wonderful|perfect|excellent)"],
        producer: Producer::Fixed(content::THANKS),
    },
    // Catch-all for question words; shadows most later rules.
    RuleSpec {
        category: Category::GeneralHelp,
        patterns: &[r"(help|how|what|where|when|why|can.*you|do.*you|tell.*me)"],
        producer: Producer::Fixed(content::GENERAL_HELP),
    },
    RuleSpec {
        category: Category::Navigation,
        patterns: &[r"(navigate|navigation|menu|screen|page|where.*find|how.*get|go.*to)"],
        producer: Producer::Fixed(content::NAVIGATION),
    },
    RuleSpec {
        category: Category::Editing,
        patterns: &[r"(edit|editing|modify|update|change|revise|draft|unpublish|delete.*story)"],
        producer: Producer::Fixed(content::EDITING),
    },
    RuleSpec {
        category: Category::Community,
        patterns: &[r"(community|social|friends|connect|network|discussion|forum|chat)"],
        producer: Producer::Fixed(content::COMMUNITY),
    },
    RuleSpec {
        category: Category::Contact,
        patterns: &[r"(contact|portfolio|website|social|linkedin|github|luohino|developer.*contact|creator.*contact|email.*luohino|reach.*luohino)"],
        producer: Producer::Fixed(content::CONTACT),
    },
    RuleSpec {
        category: Category::Privacy,
        patterns: &[r"(privacy|security|safe|protect|block|report|inappropriate|harassment)"],
        producer: Producer::Fixed(content::PRIVACY),
    },
];
