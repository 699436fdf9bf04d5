//! Google Trends rising related queries.
//!
//! Two calls per seed: `explore` hands out a token for the related-queries
//! widget, and `widgetdata/relatedsearches` returns the ranked lists. Both
//! bodies carry an anti-JSON-hijacking prefix that is stripped before
//! decoding.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use trendscout_core::{Source, TrendRecord};

use super::{build_records, sample_to_limit, SeedFailures, TrendSource};
use crate::error::{FetchError, SourceUnavailable};
use crate::extract::extract_keywords;
use crate::fetch::HttpFetcher;

const NAME: &str = "google_trends";
const DEFAULT_BASE_URL: &str = "https://trends.google.com/trends/api";

const SEEDS: [&str; 7] = [
    "artificial intelligence",
    "business",
    "healthy food",
    "nature",
    "education",
    "wellness",
    "3d render",
];
const TIMEFRAME: &str = "now 7-d";
const RELATED_QUERIES_WIDGET: &str = "RELATED_QUERIES";
/// `rankedList[0]` holds top queries, `rankedList[1]` rising ones.
const RISING_LIST_INDEX: usize = 1;
const RISING_PER_SEED: usize = 6;
const KEYWORDS_PER_QUERY: usize = 10;

#[derive(Debug, Deserialize)]
struct ExploreResponse {
    #[serde(default)]
    widgets: Vec<Widget>,
}

#[derive(Debug, Deserialize)]
struct Widget {
    #[serde(default)]
    id: String,
    token: Option<String>,
    request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RelatedResponse {
    default: RelatedDefault,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelatedDefault {
    #[serde(default)]
    ranked_list: Vec<RankedList>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankedList {
    #[serde(default)]
    ranked_keyword: Vec<RankedKeyword>,
}

#[derive(Debug, Deserialize)]
struct RankedKeyword {
    query: String,
}

pub struct GoogleTrendsSource {
    fetcher: Arc<HttpFetcher>,
    base_url: String,
    hl: String,
    tz: i32,
}

impl GoogleTrendsSource {
    pub fn new(fetcher: Arc<HttpFetcher>, hl: &str, tz: i32) -> Self {
        Self::with_base_url(fetcher, hl, tz, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(fetcher: Arc<HttpFetcher>, hl: &str, tz: i32, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_owned(),
            hl: hl.to_owned(),
            tz,
        }
    }

    fn locale_query(&self) -> Vec<(&'static str, String)> {
        vec![("hl", self.hl.clone()), ("tz", self.tz.to_string())]
    }

    async fn rising_queries(&self, seed: &str) -> Result<Vec<String>, FetchError> {
        let explore_url = format!("{}/explore", self.base_url);
        let explore_req = json!({
            "comparisonItem": [{ "keyword": seed, "geo": "", "time": TIMEFRAME }],
            "category": 0,
            "property": "",
        });
        let mut query = self.locale_query();
        query.push(("req", explore_req.to_string()));
        let body = self.fetcher.get_text(&explore_url, &query).await?;
        let explore: ExploreResponse = decode(&body, "Google Trends explore")?;

        let widget = explore
            .widgets
            .into_iter()
            .find(|w| w.id.starts_with(RELATED_QUERIES_WIDGET))
            .ok_or_else(|| FetchError::UnexpectedShape {
                context: format!("explore response for {seed:?} has no related-queries widget"),
            })?;
        let (Some(token), Some(request)) = (widget.token, widget.request) else {
            return Err(FetchError::UnexpectedShape {
                context: format!("related-queries widget for {seed:?} lacks token or request"),
            });
        };

        self.fetcher.pause().await;

        let related_url = format!("{}/widgetdata/relatedsearches", self.base_url);
        let mut query = self.locale_query();
        query.push(("req", request.to_string()));
        query.push(("token", token));
        let body = self.fetcher.get_text(&related_url, &query).await?;
        let related: RelatedResponse = decode(&body, "Google Trends related searches")?;
        Ok(rising_from(related))
    }
}

/// Drops everything before the first `{`, then decodes.
fn decode<T: serde::de::DeserializeOwned>(body: &str, context: &str) -> Result<T, FetchError> {
    let start = body.find('{').ok_or_else(|| FetchError::UnexpectedShape {
        context: format!("{context}: body has no JSON object"),
    })?;
    serde_json::from_str(&body[start..]).map_err(|e| FetchError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

fn rising_from(related: RelatedResponse) -> Vec<String> {
    related
        .default
        .ranked_list
        .into_iter()
        .nth(RISING_LIST_INDEX)
        .map(|list| {
            list.ranked_keyword
                .into_iter()
                .take(RISING_PER_SEED)
                .map(|k| k.query)
                .collect()
        })
        .unwrap_or_default()
}

fn keywords_from_queries(queries: &[String]) -> Vec<String> {
    queries
        .iter()
        .flat_map(|q| extract_keywords(q, KEYWORDS_PER_QUERY))
        .collect()
}

#[async_trait]
impl TrendSource for GoogleTrendsSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn collect(&self, limit: usize) -> Result<Vec<TrendRecord>, SourceUnavailable> {
        let mut records = Vec::new();
        let mut failures = SeedFailures::default();

        for (i, seed) in SEEDS.iter().enumerate() {
            if i > 0 {
                self.fetcher.pause().await;
            }
            match self.rising_queries(seed).await {
                Ok(queries) => {
                    let keywords = keywords_from_queries(&queries);
                    records.extend(build_records(keywords, Source::GoogleTrends));
                }
                Err(e) => failures.record(NAME, seed, &e),
            }
        }

        failures.into_result(NAME, SEEDS.len())?;
        tracing::debug!(source = NAME, count = records.len(), "harvested Google Trends keywords");
        Ok(sample_to_limit(records, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_strips_hijacking_prefix() {
        let body = ")]}'\n{\"widgets\":[{\"id\":\"RELATED_QUERIES\",\"token\":\"t\",\"request\":{}}]}";
        let explore: ExploreResponse = decode(body, "test").unwrap();
        assert_eq!(explore.widgets.len(), 1);
        assert_eq!(explore.widgets[0].token.as_deref(), Some("t"));
    }

    #[test]
    fn decode_without_object_is_unexpected_shape() {
        let err = decode::<ExploreResponse>(")]}'", "test").unwrap_err();
        assert!(matches!(err, FetchError::UnexpectedShape { .. }));
    }

    #[test]
    fn rising_list_is_second_and_capped() {
        let body = r#"{"default":{"rankedList":[
            {"rankedKeyword":[{"query":"top one"}]},
            {"rankedKeyword":[
                {"query":"q1"},{"query":"q2"},{"query":"q3"},{"query":"q4"},
                {"query":"q5"},{"query":"q6"},{"query":"q7"}
            ]}
        ]}}"#;
        let related: RelatedResponse = decode(body, "test").unwrap();
        let rising = rising_from(related);
        assert_eq!(rising, vec!["q1", "q2", "q3", "q4", "q5", "q6"]);
    }

    #[test]
    fn missing_rising_list_yields_nothing() {
        let related: RelatedResponse =
            decode(r#"{"default":{"rankedList":[{"rankedKeyword":[]}]}}"#, "test").unwrap();
        assert!(rising_from(related).is_empty());
    }

    #[test]
    fn rising_queries_expand_into_keywords() {
        let keywords = keywords_from_queries(&["AI Headshot Generator".to_string()]);
        assert!(keywords.contains(&"ai headshot generator".to_string()));
        assert!(keywords.contains(&"headshot".to_string()));
    }
}
