//! Persistence of the finished mapping as JSON or CSV.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => bail!("Unsupported output format: {other}. Use json or csv."),
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Write `entries` to `<output_name>.<ext>` and return the written path.
pub fn write_mapping(
    entries: &BTreeMap<String, String>,
    format: OutputFormat,
    output_name: &str,
) -> Result<PathBuf> {
    let path = PathBuf::from(format!("{output_name}.{}", format.extension()));
    match format {
        OutputFormat::Json => write_json(entries, &path)?,
        OutputFormat::Csv => write_csv(entries, &path)?,
    }
    Ok(path)
}

fn write_json(entries: &BTreeMap<String, String>, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(entries).context("serializing mapping to JSON")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn write_csv(entries: &BTreeMap<String, String>, path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for (identifier, config) in entries {
        writer
            .write_record([identifier.as_str(), config.as_str()])
            .with_context(|| format!("writing row for '{identifier}'"))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}
