//! Unsplash search API source, used when an access key is configured.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use trendscout_core::{Source, TrendRecord};

use super::{build_records, sample_to_limit, seed_keywords, SeedFailures, TrendSource};
use crate::error::SourceUnavailable;
use crate::extract::extract_keywords;
use crate::fetch::HttpFetcher;

pub(super) const NAME: &str = "unsplash";
const DEFAULT_BASE_URL: &str = "https://api.unsplash.com";

const SEEDS: [&str; 9] = [
    "business",
    "technology",
    "ai",
    "people",
    "portrait",
    "education",
    "healthy food",
    "nature",
    "3d render",
];
const PER_PAGE: u32 = 5;
const KEYWORDS_PER_FIELD: usize = 30;
const KEYWORDS_PER_SEED: usize = 6;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    alt_description: Option<String>,
    description: Option<String>,
}

pub struct UnsplashApiSource {
    fetcher: Arc<HttpFetcher>,
    access_key: String,
    base_url: String,
}

impl UnsplashApiSource {
    pub fn new(fetcher: Arc<HttpFetcher>, access_key: &str) -> Self {
        Self::with_base_url(fetcher, access_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(fetcher: Arc<HttpFetcher>, access_key: &str, base_url: &str) -> Self {
        Self {
            fetcher,
            access_key: access_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn keywords_for(seed: &str, response: &SearchResponse) -> Vec<String> {
        let harvested = response.results.iter().flat_map(|result| {
            [&result.alt_description, &result.description]
                .into_iter()
                .flatten()
                .flat_map(|text| extract_keywords(text.trim(), KEYWORDS_PER_FIELD))
                .collect::<Vec<_>>()
        });
        seed_keywords(seed, harvested, KEYWORDS_PER_SEED)
    }
}

#[async_trait]
impl TrendSource for UnsplashApiSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn collect(&self, limit: usize) -> Result<Vec<TrendRecord>, SourceUnavailable> {
        let url = format!("{}/search/photos", self.base_url);
        let headers = [
            ("Accept-Version", "v1".to_string()),
            ("Authorization", format!("Client-ID {}", self.access_key)),
        ];
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
                    records.extend(build_records(keywords, Source::UnsplashApi));
                }
                Err(e) => failures.record(NAME, seed, &e),
            }
        }

        failures.into_result(NAME, SEEDS.len())?;
        tracing::debug!(source = NAME, count = records.len(), "harvested Unsplash API keywords");
        Ok(sample_to_limit(records, limit))
    }
}
