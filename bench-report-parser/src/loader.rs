//! Main loader API
//!
//! This module provides the primary interface for the parser library. The
//! ReportLoader struct is the entry point for ingesting report files and
//! querying the aggregated per-platform tables.

use crate::config::ParseOptions;
use crate::parser;
use crate::resolution::Resolution;
use crate::table::MetricsTable;
use crate::types::Result;
use std::collections::HashMap;
use std::path::Path;

/// The main loader struct - entry point for all report ingestion
///
/// Owns one `MetricsTable` per platform. Platforms with no ingested files
/// simply have no table; looking them up yields `None` rather than an error.
pub struct ReportLoader {
    tables: HashMap<String, MetricsTable>,
    options: ParseOptions,
}

impl ReportLoader {
    /// Create a new loader with default parse options
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a new loader with explicit parse options
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            tables: HashMap::new(),
            options,
        }
    }

    /// Ingest a single report file for a platform
    ///
    /// The resolution is derived from the filename (`cpu_0064x.out` -> `64x`).
    ///
    /// # Example
    /// ```no_run
    /// use bench_report_parser::ReportLoader;
    /// use std::path::Path;
    ///
    /// let mut loader = ReportLoader::new();
    /// loader.add_report_file("cpu", Path::new("cpu_0064x.out")).unwrap();
    /// ```
    pub fn add_report_file(&mut self, platform: &str, path: &Path) -> Result<()> {
        let resolution = Resolution::from_filename(path)?;
        let metrics = parser::parse_report_file(path, &self.options)?;

        log::info!(
            "Loaded {:?} for platform {:?} at resolution {} ({} regions)",
            path,
            platform,
            resolution,
            metrics.len()
        );

        self.tables
            .entry(platform.to_string())
            .or_default()
            .merge(resolution, metrics);
        Ok(())
    }

    /// Ingest a batch of report files for a platform
    ///
    /// Returns the number of files loaded.
    pub fn add_report_files<P: AsRef<Path>>(&mut self, platform: &str, paths: &[P]) -> Result<usize> {
        for path in paths {
            self.add_report_file(platform, path.as_ref())?;
        }
        Ok(paths.len())
    }

    /// The aggregated table for one platform
    pub fn table(&self, platform: &str) -> Option<&MetricsTable> {
        self.tables.get(platform)
    }

    /// All platforms with at least one ingested file, sorted
    pub fn platforms(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Aggregate statistics across all platforms
    pub fn stats(&self) -> LoaderStats {
        let mut stats = LoaderStats {
            num_platforms: self.tables.len(),
            num_regions: 0,
            num_samples: 0,
        };
        for table in self.tables.values() {
            let t = table.stats();
            stats.num_regions += t.num_regions;
            stats.num_samples += t.num_samples;
        }
        stats
    }
}

impl Default for ReportLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Loader statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderStats {
    /// Platforms with at least one ingested file
    pub num_platforms: usize,
    /// Clock regions summed over platforms
    pub num_regions: usize,
    /// (region, resolution) samples summed over platforms
    pub num_samples: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const REPORT: &str = "\
hits tmin tmax tavg
(Ocean pressure force) 940 0.021 0.024 0.022
";

    #[test]
    fn test_loader_creation() {
        let loader = ReportLoader::new();
        let stats = loader.stats();
        assert_eq!(stats.num_platforms, 0);
        assert_eq!(stats.num_samples, 0);
        assert!(loader.table("cpu").is_none());
    }

    #[test]
    fn test_add_report_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cpu_0064x.out");
        fs::write(&path, REPORT).unwrap();

        let mut loader = ReportLoader::new();
        loader.add_report_file("cpu", &path).unwrap();

        let table = loader.table("cpu").unwrap();
        let series = table.series("(Ocean pressure force)", "tavg");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].0.label(), "64x");
        assert_eq!(series[0].1, 0.022);
    }

    #[test]
    fn test_bad_filename_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cpu_final.out");
        fs::write(&path, REPORT).unwrap();

        let mut loader = ReportLoader::new();
        assert!(loader.add_report_file("cpu", &path).is_err());
    }

    #[test]
    fn test_platforms_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["gpu_0008x.out", "cpu_0008x.out"] {
            fs::write(dir.path().join(name), REPORT).unwrap();
        }

        let mut loader = ReportLoader::new();
        loader
            .add_report_file("gpu", &dir.path().join("gpu_0008x.out"))
            .unwrap();
        loader
            .add_report_file("cpu", &dir.path().join("cpu_0008x.out"))
            .unwrap();

        assert_eq!(loader.platforms(), vec!["cpu", "gpu"]);
    }
}
