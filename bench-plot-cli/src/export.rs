//! JSON export of the aggregated tables
//!
//! Writes `{platform: {region: {resolution-label: {stat: value}}}}` so other
//! tooling can consume the aggregation without re-parsing the reports.

use anyhow::{Context, Result};
use bench_report_parser::{ReportLoader, StatSample};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

type Export = BTreeMap<String, BTreeMap<String, BTreeMap<String, StatSample>>>;

/// Build the export mapping from the loader's tables
pub fn export_tables(loader: &ReportLoader) -> Export {
    loader
        .platforms()
        .into_iter()
        .filter_map(|platform| {
            loader
                .table(platform)
                .map(|table| (platform.to_string(), table.export()))
        })
        .collect()
}

/// Serialize the aggregated tables to a JSON file
pub fn write_json(loader: &ReportLoader, path: &Path) -> Result<()> {
    let export = export_tables(loader);
    let json = serde_json::to_string_pretty(&export)?;
    fs::write(path, json).with_context(|| format!("Failed to write JSON export: {:?}", path))?;
    log::info!("Aggregated tables exported to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_export_shape() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cpu_0064x.out");
        fs::write(&path, "hits tavg\n(Ocean pressure force) 940 0.022\n").unwrap();

        let mut loader = ReportLoader::new();
        loader.add_report_file("cpu", &path).unwrap();

        let export = export_tables(&loader);
        let sample = &export["cpu"]["(Ocean pressure force)"]["64x"];
        assert_eq!(sample.tavg(), Some(0.022));

        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["cpu"]["(Ocean pressure force)"]["64x"]["hits"], 940.0);
    }
}
