//! Trend source adapters.
//!
//! Each adapter wraps one external origin and yields scored, categorized
//! [`TrendRecord`]s. Adapters never abort a run: failures come back as
//! [`SourceUnavailable`] and the collector treats them as an empty
//! contribution.

#[cfg(feature = "google-trends")]
mod google_trends;
mod pexels;
mod unsplash_api;
mod unsplash_topics;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use trendscout_core::{AppConfig, Source, TrendRecord};

use crate::categorize::categorize;
use crate::error::SourceUnavailable;
use crate::fetch::HttpFetcher;
use crate::scorer::score;

#[cfg(feature = "google-trends")]
pub use google_trends::GoogleTrendsSource;
pub use pexels::PexelsSource;
pub use unsplash_api::UnsplashApiSource;
pub use unsplash_topics::UnsplashTopicsSource;

/// Whether the Google Trends adapter was compiled in.
pub const GOOGLE_TRENDS_AVAILABLE: bool = cfg!(feature = "google-trends");

/// Default per-source output cap.
pub const DEFAULT_LIMIT_TERMS: usize = 30;

/// One external origin of trend keywords.
#[async_trait]
pub trait TrendSource: Send + Sync {
    /// Name recorded in `sources_used` when this source contributes.
    fn name(&self) -> &'static str;

    /// Harvests at most `limit` records.
    ///
    /// # Errors
    ///
    /// Returns [`SourceUnavailable`] when the source produced nothing usable
    /// this round (credentials rejected, every request failed, ...).
    async fn collect(&self, limit: usize) -> Result<Vec<TrendRecord>, SourceUnavailable>;
}

/// Builds the adapters enabled by `config`, all sharing `fetcher`.
///
/// Pexels is skipped without a key; Unsplash switches from its API to topic
/// page scraping without one; Google Trends is included only when compiled
/// with the `google-trends` feature.
#[must_use]
pub fn sources_from_config(
    config: &AppConfig,
    fetcher: &Arc<HttpFetcher>,
) -> Vec<Arc<dyn TrendSource>> {
    let mut sources: Vec<Arc<dyn TrendSource>> = Vec::new();

    match &config.pexels_api_key {
        Some(key) => sources.push(Arc::new(PexelsSource::new(Arc::clone(fetcher), key))),
        None => tracing::debug!(source = "pexels_api", "PEXELS_API_KEY not set, source disabled"),
    }

    match &config.unsplash_access_key {
        Some(key) => sources.push(Arc::new(UnsplashApiSource::new(Arc::clone(fetcher), key))),
        None => {
            tracing::debug!(
                source = "unsplash",
                "UNSPLASH_ACCESS_KEY not set, scraping topic pages instead"
            );
            sources.push(Arc::new(UnsplashTopicsSource::new(Arc::clone(fetcher))));
        }
    }

    #[cfg(feature = "google-trends")]
    sources.push(Arc::new(GoogleTrendsSource::new(
        Arc::clone(fetcher),
        &config.trends_hl,
        config.trends_tz,
    )));

    sources
}

/// Scores and categorizes each keyword as coming from `source`.
pub(crate) fn build_records<I>(keywords: I, source: Source) -> Vec<TrendRecord>
where
    I: IntoIterator<Item = String>,
{
    keywords
        .into_iter()
        .map(|keyword| {
            let popularity = score(&keyword, source);
            let category = categorize(&keyword);
            TrendRecord::new(keyword, popularity, category, source)
        })
        .collect()
}

/// The seed query itself followed by a random pick of distinct harvested
/// phrases, `per_seed` in total.
pub(crate) fn seed_keywords<I>(seed: &str, harvested: I, per_seed: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let seed = seed.to_lowercase();
    let mut seen: HashSet<String> = HashSet::from([seed.clone()]);
    let mut extra: Vec<String> = harvested
        .into_iter()
        .filter(|k| seen.insert(k.clone()))
        .collect();
    extra.shuffle(&mut rand::rng());

    let mut keywords = vec![seed];
    keywords.extend(extra);
    keywords.truncate(per_seed);
    keywords
}

/// Random sample of at most `limit` items, bounding what one source feeds
/// into the merge.
pub(crate) fn sample_to_limit<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    items.shuffle(&mut rand::rng());
    items.truncate(limit);
    items
}

/// Per-seed failure bookkeeping: a source only fails as a whole when every
/// seed request failed.
#[derive(Default)]
pub(crate) struct SeedFailures {
    count: usize,
    last: Option<String>,
}

impl SeedFailures {
    pub(crate) fn record(&mut self, source: &'static str, seed: &str, error: &dyn std::fmt::Display) {
        tracing::debug!(source, seed, error = %error, "seed query failed");
        self.count += 1;
        self.last = Some(error.to_string());
    }

    pub(crate) fn into_result(
        self,
        source: &'static str,
        total: usize,
    ) -> Result<(), SourceUnavailable> {
        if total > 0 && self.count >= total {
            let last = self.last.unwrap_or_default();
            return Err(SourceUnavailable::new(
                source,
                format!("all {total} requests failed; last error: {last}"),
            ));
        }
        Ok(())
    }
}
