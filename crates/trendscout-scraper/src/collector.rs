//! Collection orchestrator.
//!
//! Runs every configured [`TrendSource`] through a bounded pool, appends the
//! seasonal fallback, and merges everything into one ranked
//! [`CollectionResult`]. A run never fails: sources that error or time out
//! simply contribute nothing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use trendscout_core::{AppConfig, CategorySummary, CollectionResult, Source, TrendRecord};

use crate::error::{FetchError, SourceUnavailable};
use crate::fetch::{FetchSettings, HttpFetcher};
use crate::rank::{rank_trends, summarize_categories};
use crate::seasonal::seasonal_trends;
use crate::sources::{sources_from_config, TrendSource};

/// Limits applied to one collection run.
#[derive(Debug, Clone)]
pub struct CollectorSettings {
    /// Per-source output cap.
    pub limit_terms: usize,
    pub top_n: usize,
    /// Global deadline for the whole source pool.
    pub collect_timeout: Duration,
    /// Timeout for a single source.
    pub source_timeout: Duration,
}

impl CollectorSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            limit_terms: config.limit_terms,
            top_n: config.top_n,
            collect_timeout: Duration::from_secs(config.collect_timeout_secs),
            source_timeout: Duration::from_secs(config.source_timeout_secs),
        }
    }
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default())
    }
}

enum SourceOutcome {
    Records(Vec<TrendRecord>),
    Unavailable(SourceUnavailable),
    TimedOut,
}

pub struct TrendCollector {
    sources: Vec<Arc<dyn TrendSource>>,
    settings: CollectorSettings,
}

impl TrendCollector {
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn TrendSource>>, settings: CollectorSettings) -> Self {
        Self { sources, settings }
    }

    /// Builds one shared [`HttpFetcher`] and every source `config` enables.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        let fetcher = Arc::new(HttpFetcher::new(&FetchSettings::from_app_config(config))?);
        let sources = sources_from_config(config, &fetcher);
        Ok(Self::new(sources, CollectorSettings::from_app_config(config)))
    }

    #[must_use]
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Runs one collection with at most `max_concurrency` sources in flight.
    ///
    /// Always returns at least the seasonal records, and `sources_used`
    /// always ends with `"seasonal"`.
    pub async fn collect(&self, max_concurrency: usize) -> CollectionResult {
        let started = Instant::now();
        let scrape_date = chrono::Utc::now();

        let (mut raw, mut sources_used) = self.run_sources(max_concurrency).await;

        let seasonal = seasonal_trends();
        tracing::debug!(source = Source::Seasonal.as_str(), count = seasonal.len(), "added seasonal fallback");
        raw.extend(seasonal);
        sources_used.push(Source::Seasonal.as_str().to_string());

        let total_raw_count = raw.len();
        let trending_searches = rank_trends(raw, self.settings.top_n);
        let popular_categories = summarize_categories(&trending_searches);
        let seasonal_trends = trending_searches
            .iter()
            .filter(|r| r.source == Source::Seasonal)
            .cloned()
            .collect();

        let duration_seconds = (started.elapsed().as_secs_f64() * 100.0).round() / 100.0;
        tracing::info!(
            sources = ?sources_used,
            total_raw_count,
            ranked = trending_searches.len(),
            duration_seconds,
            "collection finished"
        );

        CollectionResult {
            scrape_date,
            duration_seconds,
            sources_used,
            total_raw_count,
            trending_searches,
            popular_categories,
            seasonal_trends,
        }
    }

    /// Drains the source pool until it is exhausted or the global deadline
    /// passes, keeping whatever completed in time.
    async fn run_sources(&self, max_concurrency: usize) -> (Vec<TrendRecord>, Vec<String>) {
        let limit = self.settings.limit_terms;
        let source_timeout = self.settings.source_timeout;
        let deadline = tokio::time::Instant::now() + self.settings.collect_timeout;

        let outcomes = stream::iter(self.sources.iter().cloned())
            .map(|source| async move {
                let outcome =
                    match tokio::time::timeout(source_timeout, source.collect(limit)).await {
                        Ok(Ok(records)) => SourceOutcome::Records(records),
                        Ok(Err(e)) => SourceOutcome::Unavailable(e),
                        Err(_) => SourceOutcome::TimedOut,
                    };
                (source.name(), outcome)
            })
            .buffer_unordered(max_concurrency.max(1));
        let mut outcomes = std::pin::pin!(outcomes);

        let mut raw = Vec::new();
        let mut sources_used = Vec::new();
        loop {
            match tokio::time::timeout_at(deadline, outcomes.next()).await {
                Ok(Some((name, SourceOutcome::Records(records)))) => {
                    tracing::info!(source = name, count = records.len(), "source finished");
                    if !records.is_empty() {
                        sources_used.push(name.to_string());
                        raw.extend(records);
                    }
                }
                Ok(Some((name, SourceOutcome::Unavailable(e)))) => {
                    tracing::warn!(source = name, error = %e, "source unavailable");
                }
                Ok(Some((name, SourceOutcome::TimedOut))) => {
                    tracing::error!(
                        source = name,
                        timeout_secs = source_timeout.as_secs_f64(),
                        "source timed out"
                    );
                }
                Ok(None) => break,
                Err(_) => {
                    tracing::error!(
                        timeout_secs = self.settings.collect_timeout.as_secs_f64(),
                        completed = sources_used.len(),
                        "collection deadline reached, keeping completed sources"
                    );
                    break;
                }
            }
        }
        (raw, sources_used)
    }
}

/// Runs a full collection and returns only the ranked keywords.
///
/// # Errors
///
/// Returns [`FetchError::Http`] if the HTTP client cannot be constructed.
pub async fn trending_searches(config: &AppConfig) -> Result<Vec<TrendRecord>, FetchError> {
    let collector = TrendCollector::from_config(config)?;
    Ok(collector.collect(config.max_concurrency).await.trending_searches)
}

/// Runs a full collection and returns only the category summaries.
///
/// # Errors
///
/// Returns [`FetchError::Http`] if the HTTP client cannot be constructed.
pub async fn popular_categories(config: &AppConfig) -> Result<Vec<CategorySummary>, FetchError> {
    let collector = TrendCollector::from_config(config)?;
    Ok(collector.collect(config.max_concurrency).await.popular_categories)
}
