//! Filesystem discovery of config directories and RangeSeries files.
//!
//! The mapping core never touches the filesystem; this module walks the site
//! directory and hands it flat identifier lists.

use std::path::Path;

use anyhow::Result;
use regex::Regex;
use tracing::warn;
use walkdir::WalkDir;

pub const AUTO_CONFIG_DIR: &str = "Config_Auto";
pub const OPERATOR_CONFIG_DIR: &str = "Config_Operator";
const RANGE_SERIES_DIR: &str = "RangeSeries";

// Config directories end in a compact timestamp, or in the open-ended
// sentinel for a still-active operator config.
const CONFIG_DIR_PATTERN: &str = r"(\d{8}T\d{6}Z|-present)$";
// RangeSeries files live under year/month/day shards.
const RANGE_SERIES_PATTERN: &str = r"\d{4}/\d{2}/\d{2}/[^/]*\.rs$";

/// Config directories under `<site-dir>/<family_dir>`, sorted.
pub fn find_config_dirs(site_dir: &Path, family_dir: &str) -> Result<Vec<String>> {
    let pattern = Regex::new(CONFIG_DIR_PATTERN)?;
    Ok(find_matching(&site_dir.join(family_dir), &pattern, true))
}

/// RangeSeries data files under `<site-dir>/RangeSeries`, sorted.
pub fn find_range_series_files(site_dir: &Path) -> Result<Vec<String>> {
    let pattern = Regex::new(RANGE_SERIES_PATTERN)?;
    Ok(find_matching(&site_dir.join(RANGE_SERIES_DIR), &pattern, false))
}

fn find_matching(base_dir: &Path, pattern: &Regex, want_directories: bool) -> Vec<String> {
    let mut found = Vec::new();

    for entry in WalkDir::new(base_dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "skipping unreadable entry during discovery");
                continue;
            }
        };

        let Some(path) = entry.path().to_str() else {
            warn!(path = %entry.path().display(), "skipping non-UTF-8 path");
            continue;
        };
        if entry.file_type().is_dir() == want_directories && pattern.is_match(path) {
            found.push(path.to_string());
        }
    }

    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn finds_auto_config_directories() {
        let site = tempdir().unwrap();
        let auto = site.path().join(AUTO_CONFIG_DIR);
        fs::create_dir_all(auto.join("20230101T000000Z")).unwrap();
        fs::create_dir_all(auto.join("20230110T000000Z")).unwrap();
        fs::create_dir_all(auto.join("scratch")).unwrap();

        let found = find_config_dirs(site.path(), AUTO_CONFIG_DIR).unwrap();

        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("20230101T000000Z"));
        assert!(found[1].ends_with("20230110T000000Z"));
    }

    #[test]
    fn finds_operator_config_directories_including_open_ended() {
        let site = tempdir().unwrap();
        let operator = site.path().join(OPERATOR_CONFIG_DIR);
        fs::create_dir_all(operator.join("20230101T000000Z-20230102T000000Z")).unwrap();
        fs::create_dir_all(operator.join("20230201T000000Z-present")).unwrap();

        let found = find_config_dirs(site.path(), OPERATOR_CONFIG_DIR).unwrap();

        assert_eq!(found.len(), 2);
        assert!(found[1].ends_with("20230201T000000Z-present"));
    }

    #[test]
    fn finds_date_sharded_range_series_files() {
        let site = tempdir().unwrap();
        let series = site.path().join("RangeSeries");
        touch(&series.join("2023/01/06/site_2023_01_06_060000.rs"));
        touch(&series.join("2023/01/07/site_2023_01_07_060000.rs"));
        // Not date-sharded, not picked up.
        touch(&series.join("loose_2023_01_08_060000.rs"));
        // Wrong extension.
        touch(&series.join("2023/01/06/site_2023_01_06_060000.tmp"));

        let found = find_range_series_files(site.path()).unwrap();

        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("site_2023_01_06_060000.rs"));
    }

    #[test]
    fn missing_family_directory_yields_no_results() {
        let site = tempdir().unwrap();

        let found = find_config_dirs(site.path(), OPERATOR_CONFIG_DIR).unwrap();

        assert!(found.is_empty());
    }
}
