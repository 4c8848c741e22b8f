//! Chart configuration loading and parsing
//!
//! Every section is optional; the defaults reproduce the fixed tables of the
//! MOM6 benchmark runs: six ocean-model clock regions, blue CPU vs. orange
//! GPU, and a dashed reference line at the 64-core limit.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from plot.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default = "default_platforms")]
    pub platforms: Vec<PlatformConfig>,
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,
    /// Optional per-region y-axis caps (seconds per step)
    #[serde(default)]
    pub y_limits: HashMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    /// CPU core-count threshold marked with a dashed vertical line
    #[serde(default = "default_core_limit")]
    pub core_limit: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlatformConfig {
    pub name: String,
    /// Series color as an RGB triple
    pub color: [u8; 3],
}

fn default_title() -> String {
    "Runtime per step for MOM6 modules".to_string()
}

fn default_width() -> u32 {
    1200
}

fn default_height() -> u32 {
    800
}

fn default_rows() -> usize {
    2
}

fn default_cols() -> usize {
    3
}

fn default_core_limit() -> u64 {
    64
}

fn default_platforms() -> Vec<PlatformConfig> {
    vec![
        PlatformConfig {
            name: "cpu".to_string(),
            color: [31, 119, 180],
        },
        PlatformConfig {
            name: "gpu".to_string(),
            color: [255, 127, 14],
        },
    ]
}

fn default_regions() -> Vec<String> {
    [
        "(Ocean Coriolis & mom advection)",
        "(Ocean pressure force)",
        "(Ocean vertical viscosity)",
        "(Ocean horizontal viscosity)",
        "(Ocean continuity equation)",
        "(Ocean barotropic mode stepping)",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            rows: default_rows(),
            cols: default_cols(),
            core_limit: default_core_limit(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chart: ChartConfig::default(),
            platforms: default_platforms(),
            regions: default_regions(),
            y_limits: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Color for a platform, falling back to gray for unconfigured ones
    pub fn platform_color(&self, platform: &str) -> [u8; 3] {
        self.platforms
            .iter()
            .find(|p| p.name == platform)
            .map(|p| p.color)
            .unwrap_or([128, 128, 128])
    }

    /// Platform names in configured order
    pub fn platform_names(&self) -> Vec<String> {
        self.platforms.iter().map(|p| p.name.clone()).collect()
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.chart.core_limit, 64);
        assert_eq!(config.chart.rows * config.chart.cols, 6);
        assert_eq!(config.regions.len(), 6);
        assert_eq!(config.platform_names(), vec!["cpu", "gpu"]);
    }

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            regions = ["(Ocean pressure force)"]

            [chart]
            title = "Scaling"
            core_limit = 128

            [[platforms]]
            name = "mi300"
            color = [200, 30, 30]

            [y_limits]
            "(Ocean pressure force)" = 0.06
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.chart.title, "Scaling");
        assert_eq!(config.chart.core_limit, 128);
        assert_eq!(config.platform_color("mi300"), [200, 30, 30]);
        assert_eq!(config.platform_color("unknown"), [128, 128, 128]);
        assert_eq!(config.y_limits["(Ocean pressure force)"], 0.06);
    }
}
