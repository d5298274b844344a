//! Extension-driven JSON/YAML file access shared by schemas and configs.

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
}

fn format_of(path: &Path) -> Result<Format> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => Ok(Format::Json),
        Some("yaml" | "yml") => Ok(Format::Yaml),
        _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
}

pub(crate) fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = format_of(path)?;
    debug!(path = %path.display(), ?format, "loading document");
    let reader = BufReader::new(std::fs::File::open(path)?);
    let value = match format {
        Format::Json => serde_json::from_reader(reader)?,
        Format::Yaml => serde_yaml::from_reader(reader)?,
    };
    Ok(value)
}

pub(crate) fn save<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let format = format_of(path)?;
    let writer = BufWriter::new(std::fs::File::create(path)?);
    match format {
        Format::Json => serde_json::to_writer_pretty(writer, value)?,
        Format::Yaml => serde_yaml::to_writer(writer, value)?,
    }
    Ok(())
}
