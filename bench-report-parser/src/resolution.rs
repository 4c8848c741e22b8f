//! Resolution labels
//!
//! A benchmark run is identified by the problem resolution encoded in the
//! report filename, e.g. `cpu_0064x.out` for the 64x run. Labels canonicalize
//! by stripping leading zeros, and order numerically so that `8x` sorts before
//! `64x` even though it sorts after it lexically.

use crate::types::{ReportError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A problem resolution (grid scale factor or core count) for one run
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resolution {
    /// Canonical label, e.g. "64x"
    label: String,
    /// Numeric value embedded in the label
    nx: u64,
}

impl Resolution {
    /// Canonical label for axis ticks and lookups
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Numeric value used for sorting and log-scale plotting
    pub fn nx(&self) -> u64 {
        self.nx
    }

    /// Derive the resolution from a report filename
    ///
    /// The resolution token is the last `_`-separated segment of the file
    /// stem, so both `cpu_0064x.out` and a bare `0064x.out` resolve to `64x`.
    pub fn from_filename(path: &Path) -> Result<Self> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ReportError::InvalidResolution(format!("{:?}", path)))?;

        let token = stem.rsplit('_').next().unwrap_or(stem);
        token
            .parse()
            .map_err(|_| ReportError::InvalidResolution(format!("{:?}", path)))
    }
}

impl FromStr for Resolution {
    type Err = ReportError;

    /// Parse a resolution token: decimal digits with an optional trailing `x`
    ///
    /// Leading zeros are dropped from the canonical label, so `0064x` and
    /// `64x` compare equal.
    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let digits = token.strip_suffix('x').unwrap_or(token);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ReportError::InvalidResolution(token.to_string()));
        }

        let nx: u64 = digits
            .parse()
            .map_err(|_| ReportError::InvalidResolution(token.to_string()))?;

        let label = if token.ends_with('x') {
            format!("{}x", nx)
        } else {
            nx.to_string()
        };

        Ok(Self { label, nx })
    }
}

impl Ord for Resolution {
    fn cmp(&self, other: &Self) -> Ordering {
        self.nx
            .cmp(&other.nx)
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl PartialOrd for Resolution {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
