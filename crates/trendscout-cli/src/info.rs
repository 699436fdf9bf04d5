//! `sources` and `seasonal` commands: quick checks that need no collection run.

use trendscout_core::AppConfig;
use trendscout_scraper::{seasonal, TrendCollector, GOOGLE_TRENDS_AVAILABLE};

/// Prints which sources the current configuration enables.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub(crate) fn run_sources(config: &AppConfig) -> anyhow::Result<()> {
    let collector = TrendCollector::from_config(config)?;
    println!("Enabled sources:");
    for name in collector.source_names() {
        println!("  {name}");
    }
    println!("  seasonal (always)");

    if config.pexels_api_key.is_none() {
        println!("PEXELS_API_KEY not set: Pexels is skipped");
    }
    if config.unsplash_access_key.is_none() {
        println!("UNSPLASH_ACCESS_KEY not set: Unsplash topic pages are scraped instead");
    }
    if !GOOGLE_TRENDS_AVAILABLE {
        println!("built without the google-trends feature: Google Trends is skipped");
    }
    Ok(())
}

/// Prints the seasonal fallback for `month`, or for the current month.
pub(crate) fn run_seasonal(month: Option<u32>) {
    let records = match month {
        Some(month) => seasonal::seasonal_trends_for_month(month),
        None => seasonal::seasonal_trends(),
    };
    for record in records {
        println!(
            "{:24} | {:3}% | {}",
            record.keyword,
            record.popularity,
            record.category.as_str()
        );
    }
}
