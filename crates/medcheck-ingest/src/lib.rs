//! # medcheck-ingest
//!
//! Interaction dataset ingestion and export for MEDCHECK.
//!
//! ## Overview
//!
//! An upload is parsed according to its declared format (CSV or JSON) into
//! raw rows, then filtered: a row survives only if drug1, drug2, severity and
//! description are all non-empty. If nothing survives, the whole upload is
//! rejected with "no valid drug interaction data found"; there is no partial
//! acceptance.
//!
//! ```rust,ignore
//! use medcheck_contracts::dataset::DatasetFormat;
//! use medcheck_ingest::ingest;
//!
//! let table = ingest("drug1,drug2,severity,description\nA,B,severe,x", DatasetFormat::Csv)?;
//! ```

pub mod csv;
pub mod dataset;
pub mod export;
pub mod json;
pub mod metadata;
pub mod raw;

use tracing::{debug, warn};

use medcheck_contracts::{
    dataset::DatasetFormat,
    error::{MedCheckError, MedCheckResult},
    interaction::{InteractionRecord, InteractionTable},
};

pub use dataset::{build_dataset, complete_dataset, dataset_name, pending_dataset};
pub use export::{export_dataset, export_file_name, records_to_json};
pub use metadata::{checksum, format_size};

/// Parse and validate `raw_text`, returning only the valid records.
pub fn ingest_records(raw_text: &str, format: DatasetFormat) -> MedCheckResult<Vec<InteractionRecord>> {
    let raw = match format {
        DatasetFormat::Json => json::parse_json(raw_text)?,
        DatasetFormat::Csv => csv::parse_csv(raw_text),
        DatasetFormat::Unsupported => {
            debug!("unsupported upload format; nothing to parse");
            Vec::new()
        }
    };

    let parsed = raw.len();
    let records: Vec<InteractionRecord> = raw.into_iter().filter_map(|r| r.into_record()).collect();

    debug!(?format, parsed, retained = records.len(), "upload parsed");

    if records.is_empty() {
        warn!(?format, parsed, "upload rejected: no valid records");
        return Err(MedCheckError::no_valid_data());
    }
    Ok(records)
}

/// Parse and validate `raw_text` into an uploaded interaction table.
pub fn ingest(raw_text: &str, format: DatasetFormat) -> MedCheckResult<InteractionTable> {
    ingest_records(raw_text, format).map(InteractionTable::Uploaded)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
