//! Per-line checks: content heuristics and boilerplate denylist

use super::CleanConfig;

/// Check if a trimmed line looks like body prose
///
/// All three checks must hold: minimum character length, at least one
/// sentence mark, and minimum word count.
pub fn looks_like_content(line: &str, config: &CleanConfig) -> bool {
    if line.chars().count() < config.min_chars {
        return false;
    }

    if !line.contains(config.sentence_marks.as_slice()) {
        return false;
    }

    line.split_whitespace().count() >= config.min_words
}

/// Check if a line contains any denylisted furniture phrase
///
/// Matching is case-insensitive substring containment, not whole-word.
/// Blank phrases never match.
pub fn is_boilerplate(line: &str, config: &CleanConfig) -> bool {
    matches_denylist(line, &normalize_denylist(&config.denylist))
}

/// Lower-case the denylist and drop blank phrases
pub(super) fn normalize_denylist(denylist: &[String]) -> Vec<String> {
    denylist
        .iter()
        .filter(|phrase| !phrase.trim().is_empty())
        .map(|phrase| phrase.to_lowercase())
        .collect()
}

/// Match a line against phrases already passed through [`normalize_denylist`]
pub(super) fn matches_denylist(line: &str, phrases: &[String]) -> bool {
    let lower = line.to_lowercase();
    phrases.iter().any(|phrase| lower.contains(phrase.as_str()))
}
