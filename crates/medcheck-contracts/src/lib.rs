//! # medcheck-contracts
//!
//! Shared types, findings, and error contracts for MEDCHECK.
//!
//! All crates in the workspace import from here. No matching or parsing logic
//! lives in this crate, only data definitions and error types.

pub mod dataset;
pub mod error;
pub mod interaction;
pub mod medication;
pub mod report;

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::{DatasetFormat, DatasetId};
    use error::MedCheckError;
    use interaction::{InteractionRecord, InteractionTable, Severity};
    use medication::{parse_allergy_list, MedicationEntry};

    // ── Severity ─────────────────────────────────────────────────────────────

    #[test]
    fn severity_parse_is_case_insensitive() {
        assert_eq!(Severity::parse("SEVERE"), Severity::Severe);
        assert_eq!(Severity::parse("  Moderate "), Severity::Moderate);
        assert_eq!(Severity::parse("mild"), Severity::Mild);
        assert_eq!(Severity::parse("Safe"), Severity::Safe);
    }

    #[test]
    fn severity_unrecognized_value_is_unknown() {
        assert_eq!(Severity::parse("catastrophic"), Severity::Unknown);
        assert_eq!(Severity::parse(""), Severity::Unknown);
    }

    #[test]
    fn severity_actionable_levels() {
        assert!(Severity::Severe.is_actionable());
        assert!(Severity::Moderate.is_actionable());
        assert!(!Severity::Mild.is_actionable());
        assert!(!Severity::Safe.is_actionable());
        assert!(!Severity::Unknown.is_actionable());
    }

    #[test]
    fn severity_serializes_as_lowercase_word() {
        let json = serde_json::to_string(&Severity::Moderate).unwrap();
        assert_eq!(json, "\"moderate\"");

        let decoded: Severity = serde_json::from_str("\"Severe\"").unwrap();
        assert_eq!(decoded, Severity::Severe);

        let unknown: Severity = serde_json::from_str("\"deadly\"").unwrap();
        assert_eq!(unknown, Severity::Unknown);
    }

    // ── InteractionRecord ────────────────────────────────────────────────────

    #[test]
    fn record_uses_upload_field_names_on_the_wire() {
        let record = InteractionRecord::new(
            "Aspirin",
            "Warfarin",
            Severity::Severe,
            "bleeding risk",
            "avoid",
        );
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["drug1"], "Aspirin");
        assert_eq!(value["drug2"], "Warfarin");
        assert_eq!(value["severity"], "severe");
        // Absent optional metadata is omitted, not written as null.
        assert!(value.get("mechanism").is_none());
    }

    #[test]
    fn table_defaults_to_built_in() {
        let table = InteractionTable::default();
        assert!(table.is_built_in());
        assert!(table.records().is_none());
    }

    // ── Medications & allergies ──────────────────────────────────────────────

    #[test]
    fn medication_ids_are_unique_for_duplicate_names() {
        let a = MedicationEntry::named("Aspirin");
        let b = MedicationEntry::named("Aspirin");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn allergy_list_is_trimmed_and_filtered() {
        let terms = parse_allergy_list(" penicillin, ,Sulfa ,,  latex ");
        assert_eq!(terms, vec!["penicillin", "Sulfa", "latex"]);
        assert!(parse_allergy_list("  ,  ").is_empty());
    }

    // ── DatasetFormat ────────────────────────────────────────────────────────

    #[test]
    fn format_detected_from_extension() {
        assert_eq!(DatasetFormat::from_file_name("data.json"), DatasetFormat::Json);
        assert_eq!(DatasetFormat::from_file_name("DATA.CSV"), DatasetFormat::Csv);
        assert_eq!(
            DatasetFormat::from_file_name("data.txt"),
            DatasetFormat::Unsupported
        );
        assert_eq!(
            DatasetFormat::from_file_name("no_extension"),
            DatasetFormat::Unsupported
        );
    }

    #[test]
    fn dataset_ids_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..50).map(|_| DatasetId::new().to_string()).collect();
        assert_eq!(ids.len(), 50);
    }

    // ── MedCheckError display messages ───────────────────────────────────────

    #[test]
    fn error_no_valid_data_display() {
        let msg = MedCheckError::no_valid_data().to_string();
        assert!(msg.contains("no valid drug interaction data found"));
    }

    #[test]
    fn error_dataset_not_found_display() {
        let err = MedCheckError::DatasetNotFound {
            id: "abc-123".to_string(),
        };
        assert!(err.to_string().contains("abc-123"));
    }

    #[test]
    fn error_config_error_display() {
        let err = MedCheckError::ConfigError {
            reason: "bad delay".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("bad delay"));
    }
}
