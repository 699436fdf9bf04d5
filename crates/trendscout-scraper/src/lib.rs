pub mod categorize;
pub mod collector;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod rank;
mod retry;
pub mod scorer;
pub mod seasonal;
pub mod sources;

pub use categorize::categorize;
pub use collector::{popular_categories, trending_searches, CollectorSettings, TrendCollector};
pub use error::{FetchError, SourceUnavailable};
pub use fetch::{FetchSettings, HttpFetcher};
pub use rank::{rank_trends, summarize_categories};
pub use seasonal::{seasonal_trends, seasonal_trends_for_month};
pub use sources::{sources_from_config, TrendSource, GOOGLE_TRENDS_AVAILABLE};
