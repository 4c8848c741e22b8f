//! Per-platform metrics table
//!
//! Report files arrive keyed by (platform, resolution); plotting wants
//! platform -> region -> resolution -> statistic. This module holds the
//! inverted table for one platform and answers the series queries the
//! renderer needs.

use crate::parser::ReportMetrics;
use crate::resolution::Resolution;
use crate::types::StatSample;
use std::collections::{BTreeMap, HashMap};

/// Aggregated metrics for one platform
///
/// Maps region name -> resolution -> statistics. Resolutions are kept in a
/// `BTreeMap` so every series iterates in numeric resolution order.
#[derive(Debug, Clone, Default)]
pub struct MetricsTable {
    regions: HashMap<String, BTreeMap<Resolution, StatSample>>,
}

impl MetricsTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one file's extraction at the given resolution
    ///
    /// Duplicate (region, resolution) entries silently replace - the last
    /// file wins, matching dictionary-overwrite semantics.
    pub fn merge(&mut self, resolution: Resolution, metrics: ReportMetrics) {
        for (region, sample) in metrics {
            self.regions
                .entry(region)
                .or_default()
                .insert(resolution.clone(), sample);
        }
    }

    /// All region names, sorted
    pub fn region_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.regions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Samples for one region, in resolution order
    pub fn region(&self, region: &str) -> Option<&BTreeMap<Resolution, StatSample>> {
        self.regions.get(region)
    }

    /// One statistic across resolutions for a region, in numeric order
    pub fn series(&self, region: &str, stat: &str) -> Vec<(Resolution, f64)> {
        self.regions
            .get(region)
            .map(|samples| {
                samples
                    .iter()
                    .filter_map(|(res, sample)| sample.get(stat).map(|v| (res.clone(), v)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// One statistic normalized by hit count (time per step)
    ///
    /// Resolutions whose sample lacks a positive `hits` value are skipped.
    pub fn normalized_series(&self, region: &str, stat: &str) -> Vec<(Resolution, f64)> {
        let Some(samples) = self.regions.get(region) else {
            return Vec::new();
        };

        samples
            .iter()
            .filter_map(|(res, sample)| {
                let value = sample.per_call(stat);
                if value.is_none() && sample.get(stat).is_some() {
                    log::warn!(
                        "Skipping {:?} at {}: no positive hit count to normalize by",
                        region,
                        res
                    );
                }
                value.map(|v| (res.clone(), v))
            })
            .collect()
    }

    /// Union of all resolutions seen for any region, in numeric order
    pub fn resolutions(&self) -> Vec<Resolution> {
        let mut all: Vec<Resolution> = self
            .regions
            .values()
            .flat_map(|samples| samples.keys().cloned())
            .collect();
        all.sort();
        all.dedup();
        all
    }

    /// Table statistics
    pub fn stats(&self) -> TableStats {
        TableStats {
            num_regions: self.regions.len(),
            num_samples: self.regions.values().map(|s| s.len()).sum(),
        }
    }

    /// True if no samples were merged
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Region -> resolution-label -> statistics, for serialization
    pub fn export(&self) -> BTreeMap<String, BTreeMap<String, StatSample>> {
        self.regions
            .iter()
            .map(|(region, samples)| {
                let by_label = samples
                    .iter()
                    .map(|(res, sample)| (res.label().to_string(), sample.clone()))
                    .collect();
                (region.clone(), by_label)
            })
            .collect()
    }
}

/// Aggregate counts for one platform table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    /// Number of distinct clock regions
    pub num_regions: usize,
    /// Number of (region, resolution) samples
    pub num_samples: usize,
}
