use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use hfrmap_core::{
    build_auto_config_intervals, build_operator_config_intervals, map_series_to_configs,
    validate_operator_configs, RecordingReporter, SystemClock,
};
use tracing::{info, warn};

use crate::discover::{
    find_config_dirs, find_range_series_files, AUTO_CONFIG_DIR, OPERATOR_CONFIG_DIR,
};
use crate::output::{write_mapping, OutputFormat};

/// Build and persist the RangeSeries to config mapping for a site
#[derive(Debug, Parser)]
pub struct MapCommand {
    /// RangeSeries files to map (omit when --all is set)
    #[arg(value_name = "RANGESERIES")]
    pub series_files: Vec<String>,

    /// Path to the site directory
    #[arg(long, value_name = "DIR")]
    pub site_dir: PathBuf,

    /// Map every RangeSeries file found under `<site-dir>/RangeSeries`
    #[arg(long)]
    pub all: bool,

    /// Output format (json, csv)
    #[arg(long, value_name = "FORMAT", default_value = "json")]
    pub output: String,

    /// Output file name, without the file ending
    #[arg(long, value_name = "NAME", default_value = "rangeseries_to_config")]
    pub output_name: String,
}

impl MapCommand {
    pub fn execute(&self) -> Result<i32> {
        let format = OutputFormat::parse(&self.output)?;
        self.validate_target_selection()?;

        let clock = SystemClock;

        let auto_configs = find_config_dirs(&self.site_dir, AUTO_CONFIG_DIR)?;
        let operator_configs = find_config_dirs(&self.site_dir, OPERATOR_CONFIG_DIR)?;
        info!(
            auto = auto_configs.len(),
            operator = operator_configs.len(),
            site_dir = %self.site_dir.display(),
            "discovered configs"
        );

        let auto_intervals = build_auto_config_intervals(&auto_configs, &clock)?;
        let operator_intervals = build_operator_config_intervals(&operator_configs, &clock)?;

        let mut reporter = RecordingReporter::default();
        validate_operator_configs(&operator_intervals, &clock, &mut reporter);
        if reporter.fatal_called {
            bail!(
                "operator config validation failed:\n{}",
                reporter.messages.join("\n")
            );
        }

        let series_files = if self.all {
            find_range_series_files(&self.site_dir)?
        } else {
            self.series_files.clone()
        };

        let mapping = map_series_to_configs(&series_files, &auto_intervals, &operator_intervals);
        if !mapping.skipped.is_empty() {
            warn!(
                count = mapping.skipped.len(),
                "RangeSeries files skipped during resolution"
            );
        }
        if mapping.unmatched > 0 {
            warn!(
                count = mapping.unmatched,
                "RangeSeries files matched no config interval"
            );
        }

        let path = write_mapping(&mapping.entries, format, &self.output_name)?;
        info!(
            entries = mapping.entries.len(),
            path = %path.display(),
            "mapping written"
        );

        Ok(0)
    }

    fn validate_target_selection(&self) -> Result<()> {
        if self.all && !self.series_files.is_empty() {
            bail!("Cannot pass individual RangeSeries files when --all is set.");
        }
        if !self.all && self.series_files.is_empty() {
            bail!("Pass individual RangeSeries files, or set --all to scan the site directory.");
        }
        Ok(())
    }
}
