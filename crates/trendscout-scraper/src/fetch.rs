//! HTTP fetch layer shared by every source adapter.
//!
//! [`HttpFetcher::fetch`] returns a parsed document or `None`: transient
//! statuses are retried with linear backoff, and non-HTML responses, bot-guard
//! pages and structurally empty documents are rejected without parsing them
//! further. API adapters use [`HttpFetcher::get_json`] and
//! [`HttpFetcher::get_text`], which share the same client and retry policy but
//! surface a typed [`FetchError`].

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONTENT_TYPE,
    UPGRADE_INSECURE_REQUESTS,
};
use reqwest::{Client, RequestBuilder, Response};
use scraper::{Html, Selector};
use serde::de::DeserializeOwned;
use trendscout_core::AppConfig;

use crate::error::FetchError;
use crate::retry::retry_with_backoff;

/// Statuses treated as transient and retried.
pub const RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Lower-cased substrings that mark challenge pages and JS-only shells.
const BOT_GUARD_MARKERS: [&str; 4] = ["enable javascript", "cloudflare", "akamai", "cf-chl-bypass"];

/// Only this many leading characters are scanned for bot-guard markers.
const BOT_GUARD_SCAN_CHARS: usize = 2000;

static STRUCTURAL_ELEMENTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a, img, h1, h2, h3").expect("valid structural selector"));

/// Connection and retry settings for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_tries: u32,
    pub retry_base_delay: Duration,
    pub inter_request_delay: Duration,
}

impl FetchSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.http_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_tries: config.fetch_max_tries,
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
            inter_request_delay: Duration::from_millis(config.inter_request_delay_ms),
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default())
    }
}

/// One pooled HTTP client with browser-like headers.
///
/// Built once per collection run and shared by all adapters through an `Arc`.
pub struct HttpFetcher {
    client: Client,
    max_tries: u32,
    retry_base_delay: Duration,
    inter_request_delay: Duration,
}

impl HttpFetcher {
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .default_headers(browser_headers())
            .build()?;
        Ok(Self {
            client,
            max_tries: settings.max_tries,
            retry_base_delay: settings.retry_base_delay,
            inter_request_delay: settings.inter_request_delay,
        })
    }

    /// Fetches `url` and parses it as HTML, or returns `None`.
    ///
    /// Every failure is soft: it is logged and reported as "no data" so the
    /// calling adapter can move on to its next page.
    pub async fn fetch(&self, url: &str) -> Option<Html> {
        let parsed = match self.fetch_html(url).await {
            Ok(body) => parse_html(&body, url),
            Err(e) => Err(e),
        };
        match parsed {
            Ok(document) => Some(document),
            Err(e) => {
                log_fetch_failure(url, &e);
                None
            }
        }
    }

    /// Fetches `url` and returns the body once it passes the content-type and
    /// bot-guard checks.
    ///
    /// # Errors
    ///
    /// - [`FetchError::RetryableStatus`] / [`FetchError::Http`] after all
    ///   attempts are used.
    /// - [`FetchError::UnexpectedStatus`] for other non-2xx statuses.
    /// - [`FetchError::NotHtml`] when the content type is not HTML-family.
    /// - [`FetchError::BotGuard`] when a challenge marker is found.
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let response = self.send_with_retry(url, || self.client.get(url)).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_lowercase();
        if !is_html_content_type(&content_type) {
            return Err(FetchError::NotHtml {
                content_type,
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        if let Some(marker) = detect_bot_guard(&body) {
            return Err(FetchError::BotGuard {
                marker,
                url: url.to_owned(),
            });
        }
        Ok(body)
    }

    /// GETs a JSON endpoint with extra `headers` and `query` pairs.
    ///
    /// # Errors
    ///
    /// Status errors as for [`Self::fetch_html`]; [`FetchError::Deserialize`]
    /// when the body does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let response = self
            .send_with_retry(url, || {
                let mut request = self
                    .client
                    .get(url)
                    .header(ACCEPT, "application/json")
                    .query(query);
                for (name, value) in headers {
                    request = request.header(*name, value.as_str());
                }
                request
            })
            .await?;

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| FetchError::Deserialize {
            context: format!("response from {url}"),
            source: e,
        })
    }

    /// GETs `url` with `query` pairs and returns the raw body, for endpoints
    /// whose payload needs preprocessing before it can be decoded.
    ///
    /// # Errors
    ///
    /// Status and transport errors as for [`Self::fetch_html`].
    pub async fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, FetchError> {
        let response = self
            .send_with_retry(url, || self.client.get(url).query(query))
            .await?;
        Ok(response.text().await?)
    }

    /// Sleeps for the configured pause between successive requests of one
    /// source.
    pub async fn pause(&self) {
        if !self.inter_request_delay.is_zero() {
            tokio::time::sleep(self.inter_request_delay).await;
        }
    }

    async fn send_with_retry<F>(&self, url: &str, build: F) -> Result<Response, FetchError>
    where
        F: Fn() -> RequestBuilder,
    {
        retry_with_backoff(self.max_tries, self.retry_base_delay, || {
            let request = build();
            async move {
                let response = request.send().await?;
                check_status(response, url)
            }
        })
        .await
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

fn check_status(response: Response, url: &str) -> Result<Response, FetchError> {
    let status = response.status().as_u16();
    if RETRY_STATUSES.contains(&status) {
        return Err(FetchError::RetryableStatus {
            status,
            url: url.to_owned(),
        });
    }
    if !response.status().is_success() {
        return Err(FetchError::UnexpectedStatus {
            status,
            url: url.to_owned(),
        });
    }
    Ok(response)
}

/// `content_type` must already be lower-cased.
pub(crate) fn is_html_content_type(content_type: &str) -> bool {
    content_type.contains("text/html") || content_type.contains("application/xhtml+xml")
}

/// Returns the first bot-guard marker found near the top of `body`.
pub(crate) fn detect_bot_guard(body: &str) -> Option<&'static str> {
    let head: String = body.chars().take(BOT_GUARD_SCAN_CHARS).collect();
    let head = head.to_lowercase();
    BOT_GUARD_MARKERS
        .iter()
        .copied()
        .find(|marker| head.contains(marker))
}

/// Parses `body`, rejecting documents without any anchor, image, or heading.
///
/// # Errors
///
/// Returns [`FetchError::EmptyDocument`] when no structural element exists.
pub fn parse_html(body: &str, url: &str) -> Result<Html, FetchError> {
    let document = Html::parse_document(body);
    if document.select(&STRUCTURAL_ELEMENTS).next().is_none() {
        return Err(FetchError::EmptyDocument {
            url: url.to_owned(),
        });
    }
    Ok(document)
}

fn log_fetch_failure(url: &str, err: &FetchError) {
    match err {
        FetchError::NotHtml { .. } | FetchError::Http(_) => {
            tracing::debug!(url, error = %err, "fetch produced no document");
        }
        _ => tracing::info!(url, error = %err, "fetch produced no document"),
    }
}
