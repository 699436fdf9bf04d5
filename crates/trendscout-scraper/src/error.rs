use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transient HTTP status {status} from {url}")]
    RetryableStatus { status: u16, url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("non-HTML content type \"{content_type}\" from {url}")]
    NotHtml { content_type: String, url: String },

    #[error("bot guard or JS shell detected at {url} (marker \"{marker}\")")]
    BotGuard { marker: &'static str, url: String },

    #[error("document at {url} has no anchors, headings, or images")]
    EmptyDocument { url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected response shape for {context}")]
    UnexpectedShape { context: String },
}

/// A source adapter could not contribute to this run.
///
/// Returned instead of panicking or propagating; the collector logs it and
/// carries on with the remaining sources.
#[derive(Debug, Error)]
#[error("source {source_name} unavailable: {reason}")]
pub struct SourceUnavailable {
    pub source_name: &'static str,
    pub reason: String,
}

impl SourceUnavailable {
    pub fn new(source_name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            source_name,
            reason: reason.into(),
        }
    }
}
