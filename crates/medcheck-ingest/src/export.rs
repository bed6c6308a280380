//! Dataset export.
//!
//! An export is the dataset's full record list as indented JSON, in the same
//! shape the JSON upload path accepts, so it can be uploaded again as-is.

use medcheck_contracts::{
    dataset::{Dataset, DatasetExport},
    error::{MedCheckError, MedCheckResult},
    interaction::InteractionRecord,
};

/// Serialize records as an indented JSON list.
pub fn records_to_json(records: &[InteractionRecord]) -> MedCheckResult<String> {
    serde_json::to_string_pretty(records).map_err(|e| MedCheckError::Serialization {
        reason: format!("failed to serialize dataset records: {}", e),
    })
}

/// The download name for an exported dataset.
pub fn export_file_name(dataset_name: &str) -> String {
    format!("{}_export.json", dataset_name)
}

/// Export `dataset` as `<name>_export.json`.
pub fn export_dataset(dataset: &Dataset) -> MedCheckResult<DatasetExport> {
    Ok(DatasetExport {
        file_name: export_file_name(&dataset.name),
        contents: records_to_json(&dataset.records)?,
    })
}
