//! Unsplash topic page scraping, used when no API key is configured.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use rand::seq::SliceRandom;
use scraper::{ElementRef, Html, Selector};
use trendscout_core::{Source, TrendRecord};

use super::{build_records, sample_to_limit, TrendSource};
use crate::error::SourceUnavailable;
use crate::extract::extract_keywords;
use crate::fetch::HttpFetcher;

const NAME: &str = super::unsplash_api::NAME;
const DEFAULT_BASE_URL: &str = "https://unsplash.com";

const TOPIC_PATHS: [&str; 6] = [
    "/t/nature",
    "/t/business-work",
    "/t/people",
    "/t/wallpapers",
    "/t/technology",
    "/t/architecture-interior",
];
const KEYWORDS_PER_ELEMENT: usize = 50;
const KEYWORDS_PER_PAGE: usize = 10;

static TOPIC_ELEMENTS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"h1, h2, h3, a[title], a[href*="/s/photos/"]"#)
        .expect("valid topic selector")
});

pub struct UnsplashTopicsSource {
    fetcher: Arc<HttpFetcher>,
    base_url: String,
}

impl UnsplashTopicsSource {
    pub fn new(fetcher: Arc<HttpFetcher>) -> Self {
        Self::with_base_url(fetcher, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(fetcher: Arc<HttpFetcher>, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

/// Text of an element: the `title` attribute when present, else its text.
fn element_text(element: &ElementRef<'_>) -> String {
    element
        .value()
        .attr("title")
        .map(str::to_owned)
        .unwrap_or_else(|| element.text().collect::<String>())
}

/// Distinct keyword candidates from a topic page, in document order.
pub(crate) fn topic_candidates(document: &Html) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    for element in document.select(&TOPIC_ELEMENTS) {
        let text = element_text(&element);
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        for keyword in extract_keywords(text, KEYWORDS_PER_ELEMENT) {
            if !candidates.contains(&keyword) {
                candidates.push(keyword);
            }
        }
    }
    candidates
}

fn pick_for_page(mut candidates: Vec<String>) -> Vec<String> {
    candidates.shuffle(&mut rand::rng());
    candidates.truncate(KEYWORDS_PER_PAGE);
    candidates
}

#[async_trait]
impl TrendSource for UnsplashTopicsSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn collect(&self, limit: usize) -> Result<Vec<TrendRecord>, SourceUnavailable> {
        let mut records = Vec::new();
        let mut pages_fetched = 0usize;

        for (i, path) in TOPIC_PATHS.iter().enumerate() {
            if i > 0 {
                self.fetcher.pause().await;
            }
            let url = format!("{}{path}", self.base_url);
            let candidates = {
                let Some(document) = self.fetcher.fetch(&url).await else {
                    continue;
                };
                topic_candidates(&document)
            };
            pages_fetched += 1;
            records.extend(build_records(pick_for_page(candidates), Source::UnsplashTopics));
        }

        if pages_fetched == 0 {
            return Err(SourceUnavailable::new(
                NAME,
                format!("none of {} topic pages could be fetched", TOPIC_PATHS.len()),
            ));
        }
        tracing::debug!(
            source = NAME,
            pages = pages_fetched,
            count = records.len(),
            "harvested Unsplash topic keywords"
        );
        Ok(sample_to_limit(records, limit))
    }
}
