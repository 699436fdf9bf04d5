//! Shared configuration and report types for trendscout.

pub mod app_config;
pub mod config;
pub mod error;
pub mod trends;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use trends::{
    Category, CategorySummary, CollectionResult, KeywordPopularity, Source, TrendRecord,
};
