//! Timing report parser
//!
//! Parses a single MPP clock report into a region -> statistics mapping.
//!
//! A report looks like:
//!
//! ```text
//!                                   hits        tmin        tmax        tavg
//! Ocean Initialization                 2      1.19        1.24        1.21
//! (Ocean pressure force)             940      0.021       0.024       0.022
//! MPP_STACK high water mark = 12345
//! ```
//!
//! The header names the statistic columns. Data lines are trailing-aligned:
//! the last N whitespace-separated tokens (N = number of statistic columns)
//! are float values and everything before them, rejoined with single spaces,
//! is the clock/region name. Clock names may contain spaces, so splitting
//! happens from the right.

use crate::config::{HeaderRule, ParseOptions};
use crate::types::{ReportError, Result, StatSample};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

/// Per-file extraction result: region name -> statistics
pub type ReportMetrics = HashMap<String, StatSample>;

/// Parse a timing report from a reader
///
/// Locates the header according to `options.header_rule`, then extracts one
/// `StatSample` per data line. Blank lines and sentinel lines are skipped.
/// A data line with fewer tokens than the header demands, or with a
/// non-numeric value token, is an error.
pub fn parse_report<R: BufRead>(reader: R, options: &ParseOptions) -> Result<ReportMetrics> {
    let mut lines = reader.lines().enumerate();

    let keys = find_header(&mut lines, options)?;
    log::debug!("Report header columns: {:?}", keys);

    let mut metrics = ReportMetrics::new();

    for (idx, line) in lines {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || options.is_sentinel(trimmed) {
            continue;
        }

        let (region, sample) = parse_data_line(trimmed, &keys, line_no)?;
        if metrics.insert(region.clone(), sample).is_some() {
            log::warn!("Duplicate clock {:?} on line {}, keeping last", region, line_no);
        }
    }

    log::debug!("Extracted {} clock regions", metrics.len());
    Ok(metrics)
}

/// Parse a timing report file
pub fn parse_report_file(path: &Path, options: &ParseOptions) -> Result<ReportMetrics> {
    log::info!("Parsing timing report: {:?}", path);
    let file = std::fs::File::open(path)?;
    parse_report(std::io::BufReader::new(file), options)
}

/// Locate the header line and return the statistic column names
fn find_header<I>(lines: &mut I, options: &ParseOptions) -> Result<Vec<String>>
where
    I: Iterator<Item = (usize, std::io::Result<String>)>,
{
    match options.header_rule {
        HeaderRule::FirstLine => {
            let (_, line) = lines
                .next()
                .ok_or_else(|| ReportError::MissingHeader("empty report".to_string()))?;
            let keys: Vec<String> = line?.split_whitespace().map(String::from).collect();
            if keys.is_empty() {
                return Err(ReportError::MissingHeader(
                    "first line holds no column names".to_string(),
                ));
            }
            Ok(keys)
        }
        HeaderRule::HitsToken => {
            for (_, line) in lines {
                let line = line?;
                let mut tokens = line.split_whitespace();
                if tokens.next() == Some("hits") {
                    let mut keys = vec!["hits".to_string()];
                    keys.extend(tokens.map(String::from));
                    return Ok(keys);
                }
            }
            Err(ReportError::MissingHeader(
                "no line starting with 'hits' found".to_string(),
            ))
        }
    }
}

/// Split one data line into (region name, statistics)
///
/// The last `keys.len()` tokens are values; the leading tokens are the
/// region name.
fn parse_data_line(line: &str, keys: &[String], line_no: usize) -> Result<(String, StatSample)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.len() < keys.len() + 1 {
        return Err(ReportError::MalformedLine {
            line_no,
            expected: keys.len(),
            line: line.to_string(),
        });
    }

    let (name_tokens, value_tokens) = tokens.split_at(tokens.len() - keys.len());
    let region = name_tokens.join(" ");

    let mut sample = StatSample::new();
    for (stat, token) in keys.iter().zip(value_tokens) {
        let value: f64 = token.parse().map_err(|_| ReportError::InvalidValue {
            line_no,
            token: token.to_string(),
        })?;
        sample.insert(stat.clone(), value);
    }

    Ok((region, sample))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{STAT_HITS, STAT_TAVG};
    use std::io::Cursor;

    const REPORT: &str = "\
                              hits        tmin        tmax        tavg
Ocean Initialization             2        1.19        1.24        1.21
(Ocean pressure force)         940        0.021       0.024       0.022
(Ocean continuity equation)    940        0.030       0.038       0.034

MPP_STACK high water mark = 123456
";

    #[test]
    fn test_parse_well_formed_report() {
        let metrics = parse_report(Cursor::new(REPORT), &ParseOptions::new()).unwrap();

        assert_eq!(metrics.len(), 3);

        let pf = &metrics["(Ocean pressure force)"];
        assert_eq!(pf.hits(), Some(940.0));
        assert_eq!(pf.tmin(), Some(0.021));
        assert_eq!(pf.tmax(), Some(0.024));
        assert_eq!(pf.tavg(), Some(0.022));

        // Multi-word region names rejoin with single spaces
        assert!(metrics.contains_key("Ocean Initialization"));
    }

    #[test]
    fn test_sentinel_and_blank_lines_skipped() {
        let metrics = parse_report(Cursor::new(REPORT), &ParseOptions::new()).unwrap();
        assert!(!metrics.keys().any(|k| k.starts_with("MPP_STACK")));
    }

    #[test]
    fn test_hits_token_rule_skips_preamble() {
        let report = format!(
            "MOM6 benchmark run\nNOTE: restart files written\n\n{}",
            REPORT
        );
        let metrics = parse_report(Cursor::new(report), &ParseOptions::new()).unwrap();
        assert_eq!(metrics.len(), 3);
    }

    #[test]
    fn test_first_line_rule() {
        let options = ParseOptions::new().with_header_rule(HeaderRule::FirstLine);
        let metrics = parse_report(Cursor::new(REPORT), &options).unwrap();
        assert_eq!(metrics.len(), 3);
        assert_eq!(metrics["Ocean Initialization"].get(STAT_HITS), Some(2.0));
    }

    #[test]
    fn test_first_line_rule_requires_header() {
        let options = ParseOptions::new().with_header_rule(HeaderRule::FirstLine);
        let err = parse_report(Cursor::new(""), &options).unwrap_err();
        assert!(matches!(err, ReportError::MissingHeader(_)));
    }

    #[test]
    fn test_missing_hits_header() {
        let err = parse_report(Cursor::new("no clock summary here\n"), &ParseOptions::new())
            .unwrap_err();
        assert!(matches!(err, ReportError::MissingHeader(_)));
    }

    #[test]
    fn test_short_line_is_malformed() {
        let report = "hits tmin tmax tavg\n(Ocean pressure force) 940 0.021\n";
        let err = parse_report(Cursor::new(report), &ParseOptions::new()).unwrap_err();
        assert!(matches!(err, ReportError::MalformedLine { line_no: 2, .. }));
    }

    #[test]
    fn test_non_numeric_value() {
        let report = "hits tmin tmax tavg\n(Ocean pressure force) 940 0.021 nan? 0.022\n";
        let err = parse_report(Cursor::new(report), &ParseOptions::new()).unwrap_err();
        match err {
            ReportError::InvalidValue { token, .. } => assert_eq!(token, "nan?"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_region_keeps_last() {
        let report = "\
hits tavg
(Ocean pressure force) 940 0.022
(Ocean pressure force) 940 0.099
";
        let metrics = parse_report(Cursor::new(report), &ParseOptions::new()).unwrap();
        assert_eq!(metrics["(Ocean pressure force)"].get(STAT_TAVG), Some(0.099));
    }
}
