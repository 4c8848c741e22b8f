//! Report file discovery
//!
//! Benchmark runs drop their reports either directly in the data directory as
//! `<platform>_<resolution>.out` (e.g. `cpu_0064x.out`), or grouped in a
//! per-platform subdirectory as `<platform>/<resolution>.out`. Prefix matches
//! win; the subdirectory is only scanned when no prefixed file exists.

use crate::types::Result;
use std::path::{Path, PathBuf};

/// Report file extensions accepted in platform subdirectories
const REPORT_EXTENSIONS: &[&str] = &["out", "txt"];

/// Find the report files for one platform under `dir`
///
/// Returns paths sorted by name for deterministic processing. A platform with
/// no matching files yields an empty vector, not an error; only a missing
/// `dir` itself is an error.
pub fn discover_reports(dir: &Path, platform: &str) -> Result<Vec<PathBuf>> {
    let prefix = format!("{}_", platform);
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let starts_with_prefix = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with(&prefix))
            .unwrap_or(false);
        if starts_with_prefix {
            files.push(path);
        }
    }

    if files.is_empty() {
        files = discover_in_subdir(&dir.join(platform))?;
    }

    files.sort();
    log::debug!("Found {} report files for platform {:?}", files.len(), platform);
    Ok(files)
}

/// Scan a platform subdirectory for `.out`/`.txt` reports
fn discover_in_subdir(subdir: &Path) -> Result<Vec<PathBuf>> {
    if !subdir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(subdir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let known_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| REPORT_EXTENSIONS.contains(&e))
            .unwrap_or(false);
        if known_extension {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, "hits tavg\nclk 1 2\n").unwrap();
    }

    #[test]
    fn test_prefixed_files_found_and_sorted() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("cpu_0064x.out"));
        touch(&dir.path().join("cpu_0008x.out"));
        touch(&dir.path().join("gpu_0008x.out"));

        let files = discover_reports(dir.path(), "cpu").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["cpu_0008x.out", "cpu_0064x.out"]);
    }

    #[test]
    fn test_subdir_fallback() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("gpu");
        fs::create_dir(&sub).unwrap();
        touch(&sub.join("0008x.out"));
        touch(&sub.join("0064x.txt"));
        fs::write(sub.join("README.md"), "notes").unwrap();

        let files = discover_reports(dir.path(), "gpu").unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_prefix_match_wins_over_subdir() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("cpu_0008x.out"));
        let sub = dir.path().join("cpu");
        fs::create_dir(&sub).unwrap();
        touch(&sub.join("0064x.out"));

        let files = discover_reports(dir.path(), "cpu").unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("cpu_0008x.out"));
    }

    #[test]
    fn test_missing_platform_is_empty() {
        let dir = TempDir::new().unwrap();
        let files = discover_reports(dir.path(), "tpu").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_missing_data_dir_is_error() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("nonexistent");
        assert!(discover_reports(&gone, "cpu").is_err());
    }
}
