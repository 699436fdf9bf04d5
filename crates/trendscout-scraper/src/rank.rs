//! Filtering, deduplication, ranking and per-category summaries.
//!
//! Everything here is pure so the merge step can be exercised without any
//! network access.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use trendscout_core::{Category, CategorySummary, KeywordPopularity, Source, TrendRecord};

pub const MIN_KEYWORD_CHARS: usize = 3;
pub const MAX_KEYWORD_CHARS: usize = 50;
pub const DEFAULT_TOP_N: usize = 20;
const TOP_KEYWORDS_PER_CATEGORY: usize = 5;

static REPEATED_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_{2,}").expect("valid underscore regex"));

/// Dedup key: trimmed and lower-cased.
#[must_use]
pub fn normalize_keyword(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

/// Keeps keywords of 3 to 50 characters (after normalization) that contain no
/// run of underscores.
#[must_use]
pub fn is_valid_keyword(keyword: &str) -> bool {
    let normalized = normalize_keyword(keyword);
    let len = normalized.chars().count();
    (MIN_KEYWORD_CHARS..=MAX_KEYWORD_CHARS).contains(&len)
        && !REPEATED_UNDERSCORE.is_match(&normalized)
}

/// Tie-break weight when two sources report the same popularity.
#[must_use]
pub fn source_priority(source: Source) -> u8 {
    match source {
        Source::GoogleTrends => 9,
        Source::PexelsApi => 8,
        Source::UnsplashApi => 7,
        Source::UnsplashTopics => 6,
        Source::Seasonal => 4,
    }
}

fn outranks(incoming: &TrendRecord, held: &TrendRecord) -> bool {
    incoming.popularity > held.popularity
        || (incoming.popularity == held.popularity
            && source_priority(incoming.source) > source_priority(held.source))
}

/// Drops invalid keywords and collapses duplicates by normalized key.
///
/// The survivor of a duplicate group keeps the position of the group's first
/// occurrence.
#[must_use]
pub fn dedup_trends(raw: Vec<TrendRecord>) -> Vec<TrendRecord> {
    let mut kept: Vec<TrendRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in raw {
        if !is_valid_keyword(&record.keyword) {
            continue;
        }
        let key = normalize_keyword(&record.keyword);
        match index.get(&key) {
            Some(&slot) => {
                if outranks(&record, &kept[slot]) {
                    kept[slot] = record;
                }
            }
            None => {
                index.insert(key, kept.len());
                kept.push(record);
            }
        }
    }
    kept
}

/// Filters, deduplicates, and returns the `top_n` records ordered by
/// popularity, then word count, both descending.
#[must_use]
pub fn rank_trends(raw: Vec<TrendRecord>, top_n: usize) -> Vec<TrendRecord> {
    let mut ranked = dedup_trends(raw);
    ranked.sort_by(|a, b| {
        (b.popularity, b.word_count()).cmp(&(a.popularity, a.word_count()))
    });
    ranked.truncate(top_n);
    ranked
}

/// One summary per category present in `records`, highest average
/// popularity first.
#[must_use]
pub fn summarize_categories(records: &[TrendRecord]) -> Vec<CategorySummary> {
    let mut order: Vec<Category> = Vec::new();
    let mut groups: HashMap<Category, Vec<&TrendRecord>> = HashMap::new();
    for record in records {
        groups
            .entry(record.category)
            .or_insert_with(|| {
                order.push(record.category);
                Vec::new()
            })
            .push(record);
    }

    let mut summaries: Vec<CategorySummary> = order
        .into_iter()
        .filter_map(|category| {
            let mut members = groups.remove(&category)?;
            let total: u32 = members.iter().map(|r| u32::from(r.popularity)).sum();
            #[allow(clippy::cast_precision_loss)]
            let avg_popularity = f64::from(total) / members.len() as f64;
            members.sort_by(|a, b| b.popularity.cmp(&a.popularity));
            let top_keywords = members
                .iter()
                .take(TOP_KEYWORDS_PER_CATEGORY)
                .map(|r| KeywordPopularity {
                    keyword: r.keyword.clone(),
                    popularity: r.popularity,
                })
                .collect();
            Some(CategorySummary {
                name: category.display_name().to_string(),
                count: members.len(),
                avg_popularity,
                top_keywords,
            })
        })
        .collect();

    summaries.sort_by(|a, b| b.avg_popularity.total_cmp(&a.avg_popularity));
    summaries
}

#[cfg(test)]
#[path = "rank_test.rs"]
mod tests;
