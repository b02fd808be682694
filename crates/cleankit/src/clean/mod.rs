//! Line cleaning pipeline
//!
//! Reduces raw page text to retained content lines:
//! 1. Split on `\n` and trim each line
//! 2. Drop lines that don't look like prose ([`looks_like_content`])
//! 3. Drop denylisted furniture ([`is_boilerplate`])
//! 4. Drop exact duplicates, keeping first occurrence order
//! 5. Join with blank lines and bound to `max_words`
//!
//! The pipeline is pure: no I/O and no state shared between calls.

mod classify;

pub use classify::{is_boilerplate, looks_like_content};

use classify::{matches_denylist, normalize_denylist};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default furniture phrases matched by [`is_boilerplate`]
pub const DEFAULT_DENYLIST: &[&str] = &[
    "sign up",
    "newsletter",
    "all rights reserved",
    "privacy policy",
    "terms of use",
    "download the app",
    "©",
];

/// Thresholds and denylist for the cleaning pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Minimum line length in characters
    pub min_chars: usize,
    /// Minimum whitespace-delimited words per line
    pub min_words: usize,
    /// A line must contain at least one of these
    pub sentence_marks: Vec<char>,
    /// Case-insensitive substrings that mark a line as boilerplate
    pub denylist: Vec<String>,
    /// Word budget for the joined output
    pub max_words: usize,
    /// Appended after the last kept word when the budget is exceeded
    pub truncation_marker: String,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            min_chars: 50,
            min_words: 8,
            sentence_marks: vec!['.', '?', '!'],
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
            max_words: 1500,
            truncation_marker: "...".to_string(),
        }
    }
}

impl CleanConfig {
    /// Set minimum line length in characters
    pub fn min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    /// Set minimum words per line
    pub fn min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    /// Set output word budget
    pub fn max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    /// Add a phrase to the denylist; blank phrases are ignored
    pub fn deny(mut self, phrase: impl Into<String>) -> Self {
        let phrase = phrase.into();
        if !phrase.trim().is_empty() {
            self.denylist.push(phrase.to_lowercase());
        }
        self
    }
}

/// Clean raw text with the default configuration
pub fn clean(raw: &str) -> String {
    clean_with_config(raw, &CleanConfig::default())
}

/// Clean raw text with a custom configuration
pub fn clean_with_config(raw: &str, config: &CleanConfig) -> String {
    let lines = retained_lines(raw, config);
    tracing::debug!(retained = lines.len(), "Cleaned lines");

    let joined = lines.join("\n\n");
    bound_words(joined.trim(), config)
}

/// Count whitespace-delimited words, used as the token estimate
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Filter and deduplicate lines, preserving first occurrence order
fn retained_lines<'a>(raw: &'a str, config: &CleanConfig) -> Vec<&'a str> {
    let denylist = normalize_denylist(&config.denylist);
    let mut seen: HashSet<&str> = HashSet::new();
    let mut kept = Vec::new();

    for line in raw.split('\n') {
        let line = line.trim();

        if !looks_like_content(line, config) {
            continue;
        }
        if matches_denylist(line, &denylist) {
            continue;
        }
        if !seen.insert(line) {
            continue;
        }

        kept.push(line);
    }

    kept
}

/// Truncate to the word budget
///
/// Over budget, the kept words are rejoined with single spaces, so the
/// blank-line structure is lost. Within budget the text is returned as is.
fn bound_words(text: &str, config: &CleanConfig) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= config.max_words {
        return text.to_string();
    }

    let mut bounded = words[..config.max_words].join(" ");
    bounded.push_str(&config.truncation_marker);
    bounded
}
