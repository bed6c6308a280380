//! Uploaded dataset types.
//!
//! A `Dataset` wraps the records parsed from one upload together with the
//! metadata shown in the dataset list. Datasets live only for the session.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interaction::InteractionRecord;

/// Unique identifier for one uploaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetId(pub uuid::Uuid);

impl DatasetId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for DatasetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Declared format of an upload, derived from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    Json,
    Csv,
    /// Any other extension. Parses to an empty record list.
    Unsupported,
}

impl DatasetFormat {
    /// Detect the format from a file name's extension (case-insensitive).
    pub fn from_file_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Unsupported,
        }
    }
}

/// Lifecycle status of a dataset in the session list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetStatus {
    /// Loaded and validated; may be selected as the active table.
    Active,
    /// Registered, but its file read has not completed yet.
    Processing,
}

/// A named, timestamped set of interaction records uploaded by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub id: DatasetId,
    /// Display name; the upload's file stem.
    pub name: String,
    pub file_name: String,
    pub format: DatasetFormat,
    pub status: DatasetStatus,
    pub uploaded_at: DateTime<Utc>,
    pub records: Vec<InteractionRecord>,
    /// Number of records retained after validation.
    pub row_count: usize,
    /// Byte length of the raw upload.
    pub byte_len: usize,
    /// Human-readable form of `byte_len`, e.g. `"1.50 KB"`.
    pub size: String,
    /// SHA-256 (hex) of the raw upload.
    pub checksum: String,
}

/// A serialized dataset ready to be saved by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetExport {
    /// `<dataset-name>_export.json`
    pub file_name: String,
    /// Indented JSON list of every record.
    pub contents: String,
}
