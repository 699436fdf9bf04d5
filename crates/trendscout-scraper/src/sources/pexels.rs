//! Pexels search API source.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use trendscout_core::{Source, TrendRecord};

use super::{build_records, sample_to_limit, seed_keywords, SeedFailures, TrendSource};
use crate::error::SourceUnavailable;
use crate::extract::extract_keywords;
use crate::fetch::HttpFetcher;

const NAME: &str = "pexels_api";
const DEFAULT_BASE_URL: &str = "https://api.pexels.com/v1";

/// Pexels exposes no trending endpoint, so popular seed queries stand in for
/// one and the photo alt texts supply related phrases.
const SEEDS: [&str; 9] = [
    "business",
    "technology",
    "nature",
    "people",
    "food",
    "education",
    "medical",
    "startup",
    "ai",
];
const PER_PAGE: u32 = 1;
const KEYWORDS_PER_ALT: usize = 20;
const KEYWORDS_PER_SEED: usize = 5;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    alt: Option<String>,
}

pub struct PexelsSource {
    fetcher: Arc<HttpFetcher>,
    api_key: String,
    base_url: String,
}

impl PexelsSource {
    pub fn new(fetcher: Arc<HttpFetcher>, api_key: &str) -> Self {
        Self::with_base_url(fetcher, api_key, DEFAULT_BASE_URL)
    }

    /// Points the source at a different API root (for tests with wiremock).
    pub fn with_base_url(fetcher: Arc<HttpFetcher>, api_key: &str, base_url: &str) -> Self {
        Self {
            fetcher,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn keywords_for(seed: &str, response: &SearchResponse) -> Vec<String> {
        let harvested = response
            .photos
            .iter()
            .filter_map(|photo| photo.alt.as_deref())
            .flat_map(|alt| extract_keywords(alt.trim(), KEYWORDS_PER_ALT));
        seed_keywords(seed, harvested, KEYWORDS_PER_SEED)
    }
}

#[async_trait]
impl TrendSource for PexelsSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn collect(&self, limit: usize) -> Result<Vec<TrendRecord>, SourceUnavailable> {
        let url = format!("{}/search", self.base_url);
        let headers = [("Authorization", self.api_key.clone())];
        let mut records = Vec::new();
        let mut failures = SeedFailures::default();

        for (i, seed) in SEEDS.iter().enumerate() {
            if i > 0 {
                self.fetcher.pause().await;
            }
            let query = [
                ("query", (*seed).to_string()),
                ("per_page", PER_PAGE.to_string()),
            ];
            match self
                .fetcher
                .get_json::<SearchResponse>(&url, &headers, &query)
                .await
            {
                Ok(response) => {
                    let keywords = Self::keywords_for(seed, &response);
                    records.extend(build_records(keywords, Source::PexelsApi));
                }
                Err(e) => failures.record(NAME, seed, &e),
            }
        }

        failures.into_result(NAME, SEEDS.len())?;
        tracing::debug!(source = NAME, count = records.len(), "harvested Pexels keywords");
        Ok(sample_to_limit(records, limit))
    }
}
