//! Report writers for collection results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use trendscout_core::{CollectionResult, TrendRecord};

/// Writes `result` as pretty-printed JSON, replacing any existing file.
pub(crate) fn write_json_report(path: &Path, result: &CollectionResult) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create report {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result)
        .with_context(|| format!("failed to serialize report to {}", path.display()))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes one CSV row per record under a `keyword,popularity,category,source`
/// header.
pub(crate) fn write_csv_report(path: &Path, records: &[TrendRecord]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create CSV report {}", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
