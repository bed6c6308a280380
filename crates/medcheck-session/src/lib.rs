//! # medcheck-session
//!
//! The state owner for MEDCHECK.
//!
//! [`Session`] keeps the medication list, allergy terms, uploaded datasets and
//! the active-dataset selection, and runs analysis as an explicit Tokio task
//! ([`AnalysisTask`]) that resolves with an
//! [`AnalysisReport`](medcheck_contracts::report::AnalysisReport).
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut session = Session::new(CheckerConfig::default());
//! session.add_medication(MedicationEntry::named("Aspirin"));
//! session.set_allergies("penicillin, sulfa");
//! let report = session.analyze().await?;
//! ```

pub mod session;
pub mod task;

pub use session::Session;
pub use task::{AnalysisInput, AnalysisTask};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use medcheck_contracts::{
        dataset::DatasetStatus,
        error::MedCheckError,
        interaction::{InteractionTable, Severity},
        medication::MedicationEntry,
    };
    use medcheck_engine::{AnalysisOutcome, CheckerConfig, InteractionChecker};

    use super::Session;

    // ── Helpers ───────────────────────────────────────────────────────────────

    const ASPIRIN_WARFARIN_CSV: &str =
        "drug1,drug2,severity,description\nAspirin,Warfarin,severe,bleeding risk\n";

    fn config(delay_ms: u64) -> CheckerConfig {
        CheckerConfig {
            analysis_delay_ms: delay_ms,
            ..CheckerConfig::default()
        }
    }

    fn session() -> Session {
        Session::new(config(0))
    }

    /// A checker that records how many medications each call saw.
    struct MockChecker {
        calls: Arc<AtomicUsize>,
        last_medication_count: Arc<AtomicUsize>,
    }

    impl InteractionChecker for MockChecker {
        fn analyze(
            &self,
            medications: &[MedicationEntry],
            _allergy_terms: &[String],
            _table: &InteractionTable,
        ) -> AnalysisOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.last_medication_count
                .store(medications.len(), Ordering::SeqCst);
            AnalysisOutcome::default()
        }
    }

    // ── 1. scenarios ──────────────────────────────────────────────────────────

    /// CSV upload → activate → Aspirin + Warfarin yields one severe finding.
    #[tokio::test]
    async fn test_uploaded_csv_drives_analysis() {
        let mut session = session();
        let id = session.upload("interactions.csv", ASPIRIN_WARFARIN_CSV).unwrap().id.clone();
        assert_eq!(session.dataset(&id).unwrap().row_count, 1);

        session.activate_dataset(&id).unwrap();
        session.add_medication(MedicationEntry::named("Aspirin"));
        session.add_medication(MedicationEntry::named("Warfarin"));

        let report = session.analyze().await.unwrap();
        assert_eq!(report.interactions.len(), 1);
        assert_eq!(report.interactions[0].severity, Severity::Severe);
        assert!(!report.used_built_in_table);
    }

    /// No dataset active: the built-in findings come back after the delay.
    #[tokio::test]
    async fn test_built_in_findings_after_delay() {
        let mut session = Session::new(config(20));
        session.add_medication(MedicationEntry::named("Lisinopril"));
        session.add_medication(MedicationEntry::named("Atorvastatin"));

        session.begin_analysis().unwrap();
        assert!(session.is_busy());

        let report = session.finish_analysis().await.unwrap();
        let pairs: Vec<(&str, &str, Severity)> = report
            .interactions
            .iter()
            .map(|f| (f.medication_a.as_str(), f.medication_b.as_str(), f.severity))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Warfarin", "Aspirin", Severity::Severe),
                ("Metformin", "Contrast Agent", Severity::Moderate),
            ]
        );
        assert!(!session.is_busy());
    }

    /// "penicillin" allergy + Amoxicillin → severe penicillin-class conflict.
    #[tokio::test]
    async fn test_penicillin_allergy_conflict() {
        let mut session = session();
        session.set_allergies("penicillin");
        session.add_medication(MedicationEntry::new("Amoxicillin", "500 mg", "three times daily"));

        let report = session.analyze().await.unwrap();
        let conflict = report
            .allergies
            .iter()
            .find(|c| c.allergen_class.as_deref() == Some("penicillin"))
            .expect("penicillin class conflict expected");
        assert_eq!(conflict.severity, Severity::Severe);
        assert_eq!(conflict.medication, "Amoxicillin");
    }

    /// A .txt upload is rejected and leaves the dataset list unchanged.
    #[test]
    fn test_txt_upload_rejected() {
        let mut session = session();
        session.upload("good.csv", ASPIRIN_WARFARIN_CSV).unwrap();

        let result = session.upload("data.txt", ASPIRIN_WARFARIN_CSV);
        match result {
            Err(MedCheckError::ValidationFailed { reason }) => {
                assert!(reason.contains("no valid drug interaction data found"));
            }
            other => panic!("expected ValidationFailed, got {:?}", other.map(|d| d.name.clone())),
        }
        assert_eq!(session.datasets().len(), 1);
    }

    // ── 2. dataset lifecycle ──────────────────────────────────────────────────

    #[test]
    fn test_upload_does_not_activate() {
        let mut session = session();
        let id = session.upload("a.csv", ASPIRIN_WARFARIN_CSV).unwrap().id.clone();

        assert!(!session.is_active(&id));
        assert!(session.active_table().is_built_in());
    }

    #[test]
    fn test_activating_one_dataset_deactivates_another() {
        let mut session = session();
        let first = session.upload("a.csv", ASPIRIN_WARFARIN_CSV).unwrap().id.clone();
        let second = session.upload("b.csv", ASPIRIN_WARFARIN_CSV).unwrap().id.clone();

        session.activate_dataset(&first).unwrap();
        session.activate_dataset(&second).unwrap();

        assert!(!session.is_active(&first));
        assert!(session.is_active(&second));
        assert_eq!(session.active_dataset().map(|d| d.name.as_str()), Some("b"));
    }

    #[test]
    fn test_deactivate_reverts_to_built_in() {
        let mut session = session();
        let id = session.upload("a.csv", ASPIRIN_WARFARIN_CSV).unwrap().id.clone();
        session.activate_dataset(&id).unwrap();
        assert!(!session.active_table().is_built_in());

        session.deactivate_dataset();
        assert!(session.active_table().is_built_in());
    }

    #[test]
    fn test_delete_active_dataset_deactivates_it() {
        let mut session = session();
        let id = session.upload("a.csv", ASPIRIN_WARFARIN_CSV).unwrap().id.clone();
        session.activate_dataset(&id).unwrap();

        let removed = session.delete_dataset(&id).unwrap();
        assert_eq!(removed.name, "a");
        assert!(session.datasets().is_empty());
        assert!(session.active_dataset().is_none());
        assert!(session.active_table().is_built_in());
    }

    #[test]
    fn test_missing_dataset_operations_fail() {
        let mut session = session();
        let ghost = medcheck_contracts::dataset::DatasetId::new();

        assert!(matches!(
            session.activate_dataset(&ghost),
            Err(MedCheckError::DatasetNotFound { .. })
        ));
        assert!(matches!(
            session.delete_dataset(&ghost),
            Err(MedCheckError::DatasetNotFound { .. })
        ));
        assert!(matches!(
            session.preview_dataset(&ghost),
            Err(MedCheckError::DatasetNotFound { .. })
        ));
    }

    #[test]
    fn test_preview_is_limited_to_configured_rows() {
        let mut csv = String::from("drug1,drug2,severity,description\n");
        for i in 0..12 {
            csv.push_str(&format!("DrugA{i},DrugB{i},mild,row {i}\n"));
        }

        let mut session = session();
        let id = session.upload("many.csv", &csv).unwrap().id.clone();

        let preview = session.preview_dataset(&id).unwrap();
        assert_eq!(preview.len(), 5);
        assert_eq!(preview[0].description, "row 0");
    }

    #[test]
    fn test_export_active_dataset() {
        let mut session = session();
        assert!(matches!(session.export_active(), Err(MedCheckError::NoActiveDataset)));

        let id = session.upload("interactions.csv", ASPIRIN_WARFARIN_CSV).unwrap().id.clone();
        session.activate_dataset(&id).unwrap();

        let export = session.export_active().unwrap();
        assert_eq!(export.file_name, "interactions_export.json");

        // The export uploads cleanly as a JSON dataset with the same rows.
        let reuploaded = session.upload(&export.file_name, &export.contents).unwrap();
        assert_eq!(reuploaded.row_count, 1);
        assert_eq!(reuploaded.records[0].drug_a, "Aspirin");
    }

    /// Overlapping uploads land in completion order, not registration order.
    #[test]
    fn test_overlapping_uploads_complete_in_completion_order() {
        let mut session = session();
        let first = session.register_upload("first.csv");
        let second = session.register_upload("second.csv");

        assert_eq!(session.dataset(&first).unwrap().status, DatasetStatus::Processing);
        assert!(session.activate_dataset(&first).is_err());

        session.complete_upload(&second, ASPIRIN_WARFARIN_CSV).unwrap();
        assert!(session.complete_upload(&first, "drug1\n").is_err());

        let names: Vec<&str> = session.datasets().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["second"]);
        assert_eq!(session.dataset(&second).unwrap().status, DatasetStatus::Active);
    }

    #[tokio::test]
    async fn test_upload_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("from_disk.csv");
        std::fs::write(&path, ASPIRIN_WARFARIN_CSV).unwrap();

        let mut session = session();
        let dataset = session.upload_file(&path).await.unwrap();
        assert_eq!(dataset.name, "from_disk");
        assert_eq!(dataset.file_name, "from_disk.csv");
        assert_eq!(dataset.byte_len, ASPIRIN_WARFARIN_CSV.len());
    }

    #[tokio::test]
    async fn test_upload_file_missing_path_leaves_no_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session();

        let result = session.upload_file(&dir.path().join("absent.csv")).await;
        assert!(matches!(result, Err(MedCheckError::Io { .. })));
        assert!(session.datasets().is_empty());
    }

    /// Completing an upload that is already loaded is refused and leaves the
    /// active dataset in place.
    #[test]
    fn test_complete_upload_rejects_loaded_dataset() {
        let mut session = session();
        let id = session.upload("a.csv", ASPIRIN_WARFARIN_CSV).unwrap().id.clone();
        session.activate_dataset(&id).unwrap();

        let result = session.complete_upload(&id, "garbage");
        assert!(matches!(result, Err(MedCheckError::ValidationFailed { .. })));

        assert_eq!(session.datasets().len(), 1);
        assert!(session.is_active(&id));
        assert_eq!(session.active_dataset().map(|d| d.row_count), Some(1));
    }

    /// A stray non-UTF-8 byte does not sink the whole file.
    #[tokio::test]
    async fn test_upload_file_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        let mut bytes = b"drug1,drug2,severity,description\nAspirin,Warfarin,severe,saign".to_vec();
        bytes.push(0xe9);
        bytes.extend_from_slice(b"e risk\n");
        std::fs::write(&path, &bytes).unwrap();

        let mut session = session();
        let dataset = session.upload_file(&path).await.unwrap();
        assert_eq!(dataset.row_count, 1);
        assert!(dataset.records[0].description.starts_with("saign"));
        assert!(dataset.records[0].description.ends_with("e risk"));
    }

    // ── 3. medications ────────────────────────────────────────────────────────

    #[test]
    fn test_add_and_remove_medication() {
        let mut session = session();
        let keep = session.add_medication(MedicationEntry::named("Aspirin"));
        let drop = session.add_medication(MedicationEntry::named("Aspirin"));

        let removed = session.remove_medication(&drop).unwrap();
        assert_eq!(removed.name, "Aspirin");
        assert_eq!(session.medications().len(), 1);
        assert_eq!(session.medications()[0].id, keep);
        assert!(session.remove_medication(&drop).is_none());
    }

    #[test]
    fn test_set_allergies_parses_list() {
        let mut session = session();
        session.set_allergies("penicillin, , sulfa");
        assert_eq!(session.allergy_terms(), ["penicillin", "sulfa"]);
    }

    // ── 4. analysis task ──────────────────────────────────────────────────────

    /// While a run is pending, a second start is refused.
    #[tokio::test]
    async fn test_second_analysis_rejected_while_busy() {
        let mut session = Session::new(config(50));
        session.begin_analysis().unwrap();

        assert!(matches!(session.begin_analysis(), Err(MedCheckError::AnalysisInProgress)));

        session.finish_analysis().await.unwrap();
        assert!(!session.is_busy());
        assert!(session.begin_analysis().is_ok());
    }

    #[tokio::test]
    async fn test_finish_without_pending_fails() {
        let mut session = session();
        assert!(matches!(
            session.finish_analysis().await,
            Err(MedCheckError::NoPendingAnalysis)
        ));
    }

    /// Cancelling discards the run and leaves the previous report alone.
    #[tokio::test]
    async fn test_cancel_discards_pending_run() {
        let mut session = Session::new(config(30));
        session.set_allergies("penicillin");
        session.add_medication(MedicationEntry::named("Amoxicillin"));
        session.analyze().await.unwrap();
        let previous = session.last_report().unwrap().clone();
        assert_eq!(previous.allergies.len(), 1);

        // The cancelled run would have reported no conflicts.
        session.set_allergies("");
        session.begin_analysis().unwrap();
        assert!(session.cancel_analysis());
        assert!(!session.is_busy());
        assert!(!session.cancel_analysis());

        tokio::time::sleep(std::time::Duration::from_millis(60)).await;
        let current = session.last_report().unwrap();
        assert_eq!(current.completed_at, previous.completed_at);
        assert_eq!(current.allergies, previous.allergies);
        assert_eq!(current.interactions, previous.interactions);
    }

    /// Inputs are captured when the run starts.
    #[tokio::test]
    async fn test_analysis_uses_snapshot_of_inputs() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(AtomicUsize::new(0));
        let checker = MockChecker {
            calls: Arc::clone(&calls),
            last_medication_count: Arc::clone(&seen),
        };
        let mut session = Session::with_checker(config(20), Arc::new(checker));

        session.add_medication(MedicationEntry::named("Aspirin"));
        session.begin_analysis().unwrap();
        session.add_medication(MedicationEntry::named("Warfarin"));
        session.finish_analysis().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    /// Each completed run replaces the previous report.
    #[tokio::test]
    async fn test_new_report_overwrites_previous() {
        let mut session = session();
        session.set_allergies("penicillin");
        session.add_medication(MedicationEntry::named("Amoxicillin"));
        assert_eq!(session.analyze().await.unwrap().allergies.len(), 1);

        session.set_allergies("");
        session.analyze().await.unwrap();
        assert!(session.last_report().unwrap().allergies.is_empty());
    }
}
