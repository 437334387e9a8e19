//! CSV export of report rows

use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Export directory used when none is configured
pub const DEFAULT_EXPORT_DIR: &str = "exported_data";

/// Seconds since the Unix epoch, embedded in export file names
pub fn unix_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Replace characters unsafe in file names with underscores
pub fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        "unnamed".to_string()
    } else {
        sanitized
    }
}

/// Writes report rows as CSV files under one directory
#[derive(Debug, Clone)]
pub struct CsvExporter {
    dir: PathBuf,
}

impl CsvExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<model name>_references_<timestamp>.csv`
    pub fn references_path(&self, model_name: &str, timestamp: i64) -> PathBuf {
        self.dir.join(format!(
            "{}_references_{}.csv",
            sanitize_file_name(model_name),
            timestamp
        ))
    }

    /// `<dir>/filtered_models_<timestamp>.csv`
    pub fn models_path(&self, timestamp: i64) -> PathBuf {
        self.dir.join(format!("filtered_models_{}.csv", timestamp))
    }

    /// Write a header row and one row per record, creating the directory if needed
    pub fn write<T: Serialize>(&self, path: &Path, rows: &[T]) -> Result<usize> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_path(path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        log::debug!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(rows.len())
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(DEFAULT_EXPORT_DIR)
    }
}
