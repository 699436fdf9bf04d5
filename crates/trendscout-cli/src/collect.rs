//! `collect` command: run every source, rank, write and summarize the report.

use std::fmt::Write as _;
use std::path::Path;

use trendscout_core::{AppConfig, CollectionResult};
use trendscout_scraper::TrendCollector;

use crate::report::{write_csv_report, write_json_report};

const SUMMARY_ROWS: usize = 15;

/// Runs one collection and writes the JSON report to `out`, plus a CSV of
/// the ranked keywords at `out` with a `.csv` extension when `csv` is set.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or a report file
/// cannot be written. Source failures never surface here.
pub(crate) async fn run_collect(config: &AppConfig, out: &Path, csv: bool) -> anyhow::Result<()> {
    let collector = TrendCollector::from_config(config)?;
    tracing::info!(sources = ?collector.source_names(), "starting trend collection");

    let result = collector.collect(config.max_concurrency).await;

    write_json_report(out, &result)?;
    tracing::info!(path = %out.display(), "wrote JSON report");
    if csv {
        let csv_path = out.with_extension("csv");
        write_csv_report(&csv_path, &result.trending_searches)?;
        tracing::info!(path = %csv_path.display(), "wrote CSV report");
    }

    print!("{}", format_summary(&result));
    Ok(())
}

pub(crate) fn format_summary(result: &CollectionResult) -> String {
    let mut text = String::new();
    let _ = writeln!(
        text,
        "Collected {} keywords from {} candidates in {:.2}s",
        result.trending_searches.len(),
        result.total_raw_count,
        result.duration_seconds
    );
    let _ = writeln!(text, "Sources used: {}", result.sources_used.join(", "));
    let _ = writeln!(text);
    let _ = writeln!(text, "Top {SUMMARY_ROWS} trending keywords:");
    for (i, record) in result.trending_searches.iter().take(SUMMARY_ROWS).enumerate() {
        let _ = writeln!(
            text,
            "{:2}. {:32} | {:3}% | {:10} | {}",
            i + 1,
            record.keyword,
            record.popularity,
            record.category.as_str(),
            record.source
        );
    }

    if !result.popular_categories.is_empty() {
        let _ = writeln!(text);
        let _ = writeln!(text, "Categories:");
        for summary in &result.popular_categories {
            let _ = writeln!(
                text,
                "  {:10} {:3} keywords, avg {:.1}",
                summary.name, summary.count, summary.avg_popularity
            );
        }
    }
    text
}
