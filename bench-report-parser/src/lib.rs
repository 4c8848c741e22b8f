//! Benchmark Report Parser Library
//!
//! A stateless, reusable library for parsing per-module timing reports from
//! ocean-model benchmark runs (FMS/MPP clock output) and aggregating them into
//! per-platform metric tables.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on extraction:
//! - Parses whitespace-delimited timing reports into region -> statistic maps
//! - Derives resolution labels (`64x`, `256x`, ...) from report filenames
//! - Inverts (platform, resolution) -> region tables into
//!   platform -> region -> resolution -> statistic
//! - Discovers report files by filename prefix or platform subdirectory
//!
//! The library does NOT:
//! - Render charts
//! - Decide colors, titles, or subplot layout
//! - Read configuration files
//!
//! All presentation is in the application layer (bench-plot-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use bench_report_parser::{discover_reports, ReportLoader};
//! use std::path::Path;
//!
//! let mut loader = ReportLoader::new();
//! for platform in ["cpu", "gpu"] {
//!     let files = discover_reports(Path::new("."), platform).unwrap();
//!     loader.add_report_files(platform, &files).unwrap();
//! }
//!
//! let table = loader.table("cpu").unwrap();
//! for (resolution, runtime) in table.normalized_series("(Ocean pressure force)", "tavg") {
//!     println!("{}: {:.4} s/step", resolution, runtime);
//! }
//! ```

// Public modules
pub mod config;
pub mod discover;
pub mod loader;
pub mod parser;
pub mod resolution;
pub mod table;
pub mod types;

// Re-export main types for convenience
pub use config::{HeaderRule, ParseOptions};
pub use discover::discover_reports;
pub use loader::{LoaderStats, ReportLoader};
pub use parser::{parse_report, parse_report_file, ReportMetrics};
pub use resolution::Resolution;
pub use table::{MetricsTable, TableStats};
pub use types::{ReportError, Result, StatSample};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: ensure we can create a loader
        let loader = ReportLoader::new();
        let stats = loader.stats();
        assert_eq!(stats.num_platforms, 0);
    }
}
