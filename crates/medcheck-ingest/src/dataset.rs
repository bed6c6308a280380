//! Building `Dataset`s from uploads.

use std::path::Path;

use chrono::Utc;
use tracing::info;

use medcheck_contracts::{
    dataset::{Dataset, DatasetFormat, DatasetId, DatasetStatus},
    error::MedCheckResult,
};

use crate::{
    ingest_records,
    metadata::{checksum, format_size},
};

/// Display name for an upload: the file name without its extension.
pub fn dataset_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(file_name)
        .to_string()
}

/// A placeholder for an upload whose file read has not completed.
pub fn pending_dataset(file_name: &str) -> Dataset {
    Dataset {
        id: DatasetId::new(),
        name: dataset_name(file_name),
        file_name: file_name.to_string(),
        format: DatasetFormat::from_file_name(file_name),
        status: DatasetStatus::Processing,
        uploaded_at: Utc::now(),
        records: Vec::new(),
        row_count: 0,
        byte_len: 0,
        size: format_size(0),
        checksum: String::new(),
    }
}

/// Parse and validate an upload, returning a ready dataset.
///
/// The format is taken from the file extension. Fails with
/// `ValidationFailed` when no valid record survives.
pub fn build_dataset(file_name: &str, text: &str) -> MedCheckResult<Dataset> {
    let mut dataset = pending_dataset(file_name);
    complete_dataset(&mut dataset, text)?;
    Ok(dataset)
}

/// Fill a pending dataset from the uploaded text.
///
/// On failure `dataset` is left untouched.
pub fn complete_dataset(dataset: &mut Dataset, text: &str) -> MedCheckResult<()> {
    let records = ingest_records(text, dataset.format)?;

    dataset.row_count = records.len();
    dataset.records = records;
    dataset.byte_len = text.len();
    dataset.size = format_size(text.len());
    dataset.checksum = checksum(text.as_bytes());
    dataset.status = DatasetStatus::Active;

    info!(
        dataset = %dataset.name,
        rows = dataset.row_count,
        size = %dataset.size,
        "dataset ingested"
    );
    Ok(())
}
