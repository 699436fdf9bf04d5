//! Network-free seasonal keywords that keep every run non-empty.

use chrono::Datelike;
use rand::Rng;
use trendscout_core::{Source, TrendRecord};

use crate::categorize::categorize;

/// Topics combined with the current season name.
pub const SEASONAL_BUCKETS: [&str; 6] = [
    "business",
    "lifestyle",
    "nature",
    "technology",
    "food",
    "education",
];

const SEASONS: [&str; 4] = ["winter", "spring", "summer", "autumn"];

const MIN_POPULARITY: u8 = 70;
const MAX_POPULARITY: u8 = 88;

/// Quarterly mapping: January–March is winter, April–June spring, and so on.
///
/// `month` is 1-based; out-of-range values wrap rather than panic.
#[must_use]
pub fn season_for_month(month: u32) -> &'static str {
    let index = (month.saturating_sub(1) / 3) % 4;
    SEASONS[index as usize]
}

/// One record per bucket for the season containing `month`.
#[must_use]
pub fn seasonal_trends_for_month(month: u32) -> Vec<TrendRecord> {
    let season = season_for_month(month);
    let mut rng = rand::rng();
    SEASONAL_BUCKETS
        .iter()
        .map(|bucket| {
            let keyword = format!("{season} {bucket}");
            let category = categorize(&keyword);
            TrendRecord::new(
                keyword,
                rng.random_range(MIN_POPULARITY..=MAX_POPULARITY),
                category,
                Source::Seasonal,
            )
        })
        .collect()
}

/// Seasonal records for the current local month.
#[must_use]
pub fn seasonal_trends() -> Vec<TrendRecord> {
    seasonal_trends_for_month(chrono::Local::now().month())
}
