//! Parser configuration types
//!
//! This module defines the minimal configuration needed by the report parser.
//! File discovery, chart layout and colors are handled by the application
//! layer.

use serde::{Deserialize, Serialize};

/// How the statistics header line is located in a report file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderRule {
    /// The first line of the file is the header, unconditionally
    FirstLine,
    /// Scan for the first line whose first token is the literal `hits`
    ///
    /// This also accepts full model stdout as input, skipping any preamble
    /// before the clock summary.
    #[default]
    HitsToken,
}

/// Configuration for the report parser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Header detection rule
    #[serde(default)]
    pub header_rule: HeaderRule,

    /// Line prefixes to skip inside the statistics block
    #[serde(default = "default_sentinels")]
    pub sentinel_prefixes: Vec<String>,
}

fn default_sentinels() -> Vec<String> {
    vec!["MPP_STACK high water mark".to_string()]
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            header_rule: HeaderRule::default(),
            sentinel_prefixes: default_sentinels(),
        }
    }
}

impl ParseOptions {
    /// Create parse options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the header detection rule
    pub fn with_header_rule(mut self, rule: HeaderRule) -> Self {
        self.header_rule = rule;
        self
    }

    /// Builder method: add a sentinel line prefix to skip
    pub fn add_sentinel_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.sentinel_prefixes.push(prefix.into());
        self
    }

    /// Check if a (trimmed) line is a sentinel that should be skipped
    pub fn is_sentinel(&self, line: &str) -> bool {
        self.sentinel_prefixes
            .iter()
            .any(|prefix| line.starts_with(prefix.as_str()))
    }
}
