//! Core types for the benchmark report parser library
//!
//! This module defines the error type shared across the library and the
//! per-(region, resolution) statistic sample that the parser emits. The parser
//! is stateless and only extracts values - it does not aggregate across files
//! or render anything.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Result type for report parsing operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Conventional statistic column names emitted by the MPP clock report
pub const STAT_HITS: &str = "hits";
pub const STAT_TMIN: &str = "tmin";
pub const STAT_TMAX: &str = "tmax";
pub const STAT_TAVG: &str = "tavg";

/// Errors that can occur while parsing timing reports
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("No statistics header found in report: {0}")]
    MissingHeader(String),

    #[error("Malformed report line {line_no}: expected at least {expected} value columns: {line:?}")]
    MalformedLine {
        line_no: usize,
        expected: usize,
        line: String,
    },

    #[error("Invalid statistic value {token:?} on line {line_no}")]
    InvalidValue { line_no: usize, token: String },

    #[error("Cannot derive a resolution from {0:?}")]
    InvalidResolution(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Statistics recorded for one clock/region at one resolution
///
/// A thin wrapper over the statistic-name -> value map read from a single
/// report line. The statistic names come from the report header, so arbitrary
/// columns are preserved; the four conventional MPP statistics get typed
/// accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatSample {
    values: HashMap<String, f64>,
}

impl StatSample {
    /// Create an empty sample
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a statistic value, replacing any previous one
    pub fn insert(&mut self, stat: impl Into<String>, value: f64) {
        self.values.insert(stat.into(), value);
    }

    /// Look up a statistic by name
    pub fn get(&self, stat: &str) -> Option<f64> {
        self.values.get(stat).copied()
    }

    /// Number of times the clock was triggered
    pub fn hits(&self) -> Option<f64> {
        self.get(STAT_HITS)
    }

    /// Minimum per-call timing
    pub fn tmin(&self) -> Option<f64> {
        self.get(STAT_TMIN)
    }

    /// Maximum per-call timing
    pub fn tmax(&self) -> Option<f64> {
        self.get(STAT_TMAX)
    }

    /// Average per-call timing
    pub fn tavg(&self) -> Option<f64> {
        self.get(STAT_TAVG)
    }

    /// A statistic normalized by the hit count (time per step)
    ///
    /// Returns `None` when the statistic is absent or the sample has no
    /// positive hit count to divide by.
    pub fn per_call(&self, stat: &str) -> Option<f64> {
        let hits = self.hits().filter(|h| *h > 0.0)?;
        self.get(stat).map(|v| v / hits)
    }

    /// Iterate over all (statistic, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of statistics in this sample
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the sample holds no statistics
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, f64)> for StatSample {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for StatSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stats: Vec<_> = self.values.iter().collect();
        stats.sort_by(|a, b| a.0.cmp(b.0));
        let mut first = true;
        for (stat, value) in stats {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}={}", stat, value)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StatSample {
        let mut s = StatSample::new();
        s.insert(STAT_HITS, 10.0);
        s.insert(STAT_TMIN, 1.0);
        s.insert(STAT_TMAX, 3.0);
        s.insert(STAT_TAVG, 2.0);
        s
    }

    #[test]
    fn test_typed_accessors() {
        let s = sample();
        assert_eq!(s.hits(), Some(10.0));
        assert_eq!(s.tmin(), Some(1.0));
        assert_eq!(s.tmax(), Some(3.0));
        assert_eq!(s.tavg(), Some(2.0));
        assert_eq!(s.get("tstd"), None);
    }

    #[test]
    fn test_per_call_normalization() {
        let s = sample();
        assert_eq!(s.per_call(STAT_TAVG), Some(0.2));

        let mut zero_hits = StatSample::new();
        zero_hits.insert(STAT_HITS, 0.0);
        zero_hits.insert(STAT_TAVG, 2.0);
        assert_eq!(zero_hits.per_call(STAT_TAVG), None);

        let mut no_hits = StatSample::new();
        no_hits.insert(STAT_TAVG, 2.0);
        assert_eq!(no_hits.per_call(STAT_TAVG), None);
    }

    #[test]
    fn test_display_is_sorted() {
        let s = sample();
        assert_eq!(format!("{}", s), "hits=10 tavg=2 tmax=3 tmin=1");
    }
}
