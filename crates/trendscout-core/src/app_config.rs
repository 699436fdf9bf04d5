/// Desktop browser user agent sent by the fetch layer unless overridden.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

#[derive(Clone)]
pub struct AppConfig {
    /// Pexels API key. `None` disables the Pexels source.
    pub pexels_api_key: Option<String>,
    /// Unsplash access key. `None` switches Unsplash to topic-page scraping.
    pub unsplash_access_key: Option<String>,
    pub log_level: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    /// Total attempts per request, including the first.
    pub fetch_max_tries: u32,
    /// Linear backoff unit: the wait after attempt `n` is `n * retry_base_delay_ms`.
    pub retry_base_delay_ms: u64,
    /// Pause between successive seed queries inside one source.
    pub inter_request_delay_ms: u64,
    pub max_concurrency: usize,
    /// Cap on records each source may contribute to a run.
    pub limit_terms: usize,
    /// Size of the ranked `trending_searches` list.
    pub top_n: usize,
    pub collect_timeout_secs: u64,
    pub source_timeout_secs: u64,
    pub trends_hl: String,
    /// Timezone offset in minutes, as Google Trends expects it.
    pub trends_tz: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pexels_api_key: None,
            unsplash_access_key: None,
            log_level: "info".to_string(),
            http_timeout_secs: 25,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_max_tries: 3,
            retry_base_delay_ms: 800,
            inter_request_delay_ms: 300,
            max_concurrency: 3,
            limit_terms: 30,
            top_n: 20,
            collect_timeout_secs: 180,
            source_timeout_secs: 60,
            trends_hl: "en-US".to_string(),
            trends_tz: 420,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "pexels_api_key",
                &self.pexels_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "unsplash_access_key",
                &self.unsplash_access_key.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("fetch_max_tries", &self.fetch_max_tries)
            .field("retry_base_delay_ms", &self.retry_base_delay_ms)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("max_concurrency", &self.max_concurrency)
            .field("limit_terms", &self.limit_terms)
            .field("top_n", &self.top_n)
            .field("collect_timeout_secs", &self.collect_timeout_secs)
            .field("source_timeout_secs", &self.source_timeout_secs)
            .field("trends_hl", &self.trends_hl)
            .field("trends_tz", &self.trends_tz)
            .finish()
    }
}
