//! Trend records and the collection report built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Origin of a [`TrendRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    #[serde(alias = "pytrends")]
    GoogleTrends,
    PexelsApi,
    UnsplashApi,
    UnsplashTopics,
    Seasonal,
}

impl Source {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Source::GoogleTrends => "google_trends",
            Source::PexelsApi => "pexels_api",
            Source::UnsplashApi => "unsplash_api",
            Source::UnsplashTopics => "unsplash_topics",
            Source::Seasonal => "seasonal",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topical bucket a keyword is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Business,
    Medical,
    Education,
    Food,
    Nature,
    Lifestyle,
    General,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Technology,
        Category::Business,
        Category::Medical,
        Category::Education,
        Category::Food,
        Category::Nature,
        Category::Lifestyle,
        Category::General,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Medical => "medical",
            Category::Education => "education",
            Category::Food => "food",
            Category::Nature => "nature",
            Category::Lifestyle => "lifestyle",
            Category::General => "general",
        }
    }

    /// Title-cased name used in category summaries.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Business => "Business",
            Category::Medical => "Medical",
            Category::Education => "Education",
            Category::Food => "Food",
            Category::Nature => "Nature",
            Category::Lifestyle => "Lifestyle",
            Category::General => "General",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scored, categorized keyword candidate from a single source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendRecord {
    pub keyword: String,
    /// Popularity in `[0, 100]`.
    pub popularity: u8,
    pub category: Category,
    pub source: Source,
}

impl TrendRecord {
    /// Builds a record, clamping `popularity` to 100.
    pub fn new(
        keyword: impl Into<String>,
        popularity: u8,
        category: Category,
        source: Source,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            popularity: popularity.min(100),
            category,
            source,
        }
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.keyword.split_whitespace().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordPopularity {
    pub keyword: String,
    pub popularity: u8,
}

/// Aggregated statistics for one category within the ranked result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub count: usize,
    pub avg_popularity: f64,
    /// Highest-popularity keywords in this category, at most five.
    pub top_keywords: Vec<KeywordPopularity>,
}

/// Output of one collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionResult {
    pub scrape_date: DateTime<Utc>,
    #[serde(rename = "scraping_duration")]
    pub duration_seconds: f64,
    /// Names of sources that contributed records, in completion order.
    pub sources_used: Vec<String>,
    /// Candidate count before filtering and deduplication.
    #[serde(rename = "total_keywords_found")]
    pub total_raw_count: usize,
    pub trending_searches: Vec<TrendRecord>,
    pub popular_categories: Vec<CategorySummary>,
    /// Seasonal records that made it into `trending_searches`.
    pub seasonal_trends: Vec<TrendRecord>,
}
