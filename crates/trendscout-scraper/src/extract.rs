//! Keyword extraction from free text.
//!
//! Text is normalized, tokenized on whitespace, stripped of stop-words, and
//! expanded into unigrams, bigrams, and trigrams.

use std::collections::HashSet;
use std::sync::LazyLock;

use rand::seq::SliceRandom;
use regex::Regex;

/// Words that carry no search intent on stock-photo sites.
pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "in", "on", "for", "of", "with", "by", "to", "is", "are",
    "stock", "photo", "image", "images", "pictures", "download", "free", "hd",
];

const MIN_TOKEN_CHARS: usize = 2;
const MIN_TRIGRAM_CHARS: usize = 3;
const MAX_TRIGRAM_CHARS: usize = 40;

static NON_KEYWORD_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s\-&/]").expect("valid keyword charset regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

#[must_use]
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Lower-cases `text`, replaces everything except word characters,
/// whitespace, `-`, `&`, and `/` with spaces, and collapses whitespace.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let cleaned = NON_KEYWORD_CHARS.replace_all(&lowered, " ");
    WHITESPACE_RUN.replace_all(&cleaned, " ").trim().to_string()
}

/// Extracts up to `cap` distinct keyword phrases from `text`.
///
/// Phrases come out as unigrams first, then bigrams, then trigrams. When more
/// than `cap` phrases exist, a random subset of exactly `cap` is returned so
/// that repeated runs over the same page surface different phrases.
#[must_use]
pub fn extract_keywords(text: &str, cap: usize) -> Vec<String> {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return Vec::new();
    }

    let tokens: Vec<&str> = normalized
        .split(' ')
        .filter(|t| !is_stop_word(t) && t.chars().count() >= MIN_TOKEN_CHARS)
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut phrases: Vec<String> = Vec::new();
    let mut push = |phrase: String| {
        if seen.insert(phrase.clone()) {
            phrases.push(phrase);
        }
    };

    for token in &tokens {
        push((*token).to_string());
    }
    for pair in tokens.windows(2) {
        push(pair.join(" "));
    }
    for triple in tokens.windows(3) {
        let phrase = triple.join(" ");
        let len = phrase.chars().count();
        if (MIN_TRIGRAM_CHARS..=MAX_TRIGRAM_CHARS).contains(&len) {
            push(phrase);
        }
    }

    if phrases.len() > cap {
        phrases.shuffle(&mut rand::rng());
        phrases.truncate(cap);
    }
    phrases
}
