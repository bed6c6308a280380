//! The session: sole owner of the checker's mutable state.
//!
//! A `Session` holds the medication list, the allergy terms, the uploaded
//! datasets and which one is active, plus the latest analysis report. The
//! presentation layer drives it through discrete calls; the matching engine
//! only ever sees the snapshot handed to it.

use std::{path::Path, sync::Arc, time::Duration};

use tracing::{debug, info, warn};

use medcheck_contracts::{
    dataset::{Dataset, DatasetExport, DatasetId, DatasetStatus},
    error::{MedCheckError, MedCheckResult},
    interaction::{InteractionRecord, InteractionTable},
    medication::{parse_allergy_list, MedicationEntry, MedicationId},
    report::AnalysisReport,
};
use medcheck_engine::{CheckerConfig, InteractionChecker, Matcher};
use medcheck_ingest::{complete_dataset, export_dataset, pending_dataset};

use crate::task::{AnalysisInput, AnalysisTask};

/// State for one checker session. Nothing outlives it.
pub struct Session {
    config: CheckerConfig,
    checker: Arc<dyn InteractionChecker>,
    medications: Vec<MedicationEntry>,
    allergy_terms: Vec<String>,
    datasets: Vec<Dataset>,
    active: Option<DatasetId>,
    pending: Option<AnalysisTask>,
    last_report: Option<AnalysisReport>,
}

impl Session {
    /// Create a session that checks with a `Matcher` built from `config`.
    pub fn new(config: CheckerConfig) -> Self {
        let checker = Arc::new(Matcher::new(config.clone()));
        Self::with_checker(config, checker)
    }

    /// Create a session with a caller-supplied checker.
    pub fn with_checker(config: CheckerConfig, checker: Arc<dyn InteractionChecker>) -> Self {
        Self {
            config,
            checker,
            medications: Vec::new(),
            allergy_terms: Vec::new(),
            datasets: Vec::new(),
            active: None,
            pending: None,
            last_report: None,
        }
    }

    // ── Medications & allergies ───────────────────────────────────────────────

    /// Append a medication and return its id.
    pub fn add_medication(&mut self, entry: MedicationEntry) -> MedicationId {
        let id = entry.id.clone();
        debug!(name = %entry.name, "medication added");
        self.medications.push(entry);
        id
    }

    /// Remove a medication by id, returning it if it was present.
    pub fn remove_medication(&mut self, id: &MedicationId) -> Option<MedicationEntry> {
        let idx = self.medications.iter().position(|m| &m.id == id)?;
        Some(self.medications.remove(idx))
    }

    pub fn medications(&self) -> &[MedicationEntry] {
        &self.medications
    }

    /// Replace the allergy terms from the free-text field.
    pub fn set_allergies(&mut self, text: &str) {
        self.allergy_terms = parse_allergy_list(text);
    }

    pub fn allergy_terms(&self) -> &[String] {
        &self.allergy_terms
    }

    // ── Datasets ──────────────────────────────────────────────────────────────

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn dataset(&self, id: &DatasetId) -> MedCheckResult<&Dataset> {
        self.datasets
            .iter()
            .find(|d| &d.id == id)
            .ok_or_else(|| not_found(id))
    }

    fn position(&self, id: &DatasetId) -> MedCheckResult<usize> {
        self.datasets
            .iter()
            .position(|d| &d.id == id)
            .ok_or_else(|| not_found(id))
    }

    /// Register an upload whose contents are still being read.
    ///
    /// The placeholder appears in the list with status `Processing` until
    /// `complete_upload` fills it in or removes it.
    pub fn register_upload(&mut self, file_name: &str) -> DatasetId {
        let dataset = pending_dataset(file_name);
        let id = dataset.id.clone();
        debug!(file_name = %file_name, dataset_id = %id, "upload registered");
        self.datasets.push(dataset);
        id
    }

    /// Ingest the text read for a registered upload.
    ///
    /// On failure the placeholder is removed, so a rejected upload leaves no
    /// dataset behind. Uploads complete in whatever order they are called.
    /// Only a `Processing` placeholder can be completed.
    pub fn complete_upload(&mut self, id: &DatasetId, text: &str) -> MedCheckResult<&Dataset> {
        let idx = self.position(id)?;
        if self.datasets[idx].status != DatasetStatus::Processing {
            return Err(MedCheckError::ValidationFailed {
                reason: format!("dataset '{}' is already loaded", self.datasets[idx].name),
            });
        }

        if let Err(e) = complete_dataset(&mut self.datasets[idx], text) {
            let discarded = self.datasets.remove(idx);
            warn!(file_name = %discarded.file_name, error = %e, "upload rejected");
            return Err(e);
        }

        Ok(&self.datasets[idx])
    }

    /// Register and ingest an upload in one call.
    pub fn upload(&mut self, file_name: &str, text: &str) -> MedCheckResult<&Dataset> {
        let id = self.register_upload(file_name);
        self.complete_upload(&id, text)
    }

    /// Read `path` asynchronously and ingest it as an upload.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than failing the
    /// whole upload.
    pub async fn upload_file(&mut self, path: &Path) -> MedCheckResult<&Dataset> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let id = self.register_upload(&file_name);

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                if let Ok(idx) = self.position(&id) {
                    self.datasets.remove(idx);
                }
                return Err(MedCheckError::Io {
                    reason: format!("failed to read '{}': {}", path.display(), e),
                });
            }
        };

        let text = String::from_utf8_lossy(&bytes);
        self.complete_upload(&id, &text)
    }

    /// Make `id` the table consulted by analysis. Any previously active
    /// dataset is deactivated.
    pub fn activate_dataset(&mut self, id: &DatasetId) -> MedCheckResult<()> {
        let dataset = self.dataset(id)?;
        if dataset.status == DatasetStatus::Processing {
            return Err(MedCheckError::ValidationFailed {
                reason: format!("dataset '{}' is still processing", dataset.name),
            });
        }
        info!(dataset = %dataset.name, rows = dataset.row_count, "dataset activated");
        self.active = Some(id.clone());
        Ok(())
    }

    /// Revert to the built-in sample table.
    pub fn deactivate_dataset(&mut self) {
        if let Some(id) = self.active.take() {
            info!(dataset_id = %id, "dataset deactivated");
        }
    }

    /// Delete a dataset, deactivating it first if it is active.
    pub fn delete_dataset(&mut self, id: &DatasetId) -> MedCheckResult<Dataset> {
        let idx = self.position(id)?;
        if self.active.as_ref() == Some(id) {
            self.deactivate_dataset();
        }
        let removed = self.datasets.remove(idx);
        info!(dataset = %removed.name, "dataset deleted");
        Ok(removed)
    }

    /// The first `preview_rows` records of a dataset.
    pub fn preview_dataset(&self, id: &DatasetId) -> MedCheckResult<&[InteractionRecord]> {
        let dataset = self.dataset(id)?;
        let end = dataset.records.len().min(self.config.preview_rows);
        Ok(&dataset.records[..end])
    }

    pub fn active_dataset(&self) -> Option<&Dataset> {
        let id = self.active.as_ref()?;
        self.datasets.iter().find(|d| &d.id == id)
    }

    pub fn is_active(&self, id: &DatasetId) -> bool {
        self.active.as_ref() == Some(id)
    }

    /// The table analysis will use: the active dataset, else the built-in one.
    pub fn active_table(&self) -> InteractionTable {
        match self.active_dataset() {
            Some(dataset) => InteractionTable::Uploaded(dataset.records.clone()),
            None => InteractionTable::BuiltIn,
        }
    }

    /// Export the active dataset as `<name>_export.json`.
    pub fn export_active(&self) -> MedCheckResult<DatasetExport> {
        let dataset = self.active_dataset().ok_or(MedCheckError::NoActiveDataset)?;
        export_dataset(dataset)
    }

    // ── Analysis ──────────────────────────────────────────────────────────────

    /// True while an analysis task is pending.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Start an analysis of the current inputs.
    ///
    /// Inputs are captured now; later edits do not affect this run. Fails
    /// with `AnalysisInProgress` if a run is already pending. Must be called
    /// from within a Tokio runtime.
    pub fn begin_analysis(&mut self) -> MedCheckResult<()> {
        if self.pending.is_some() {
            return Err(MedCheckError::AnalysisInProgress);
        }

        let input = AnalysisInput {
            medications: self.medications.clone(),
            allergy_terms: self.allergy_terms.clone(),
            table: self.active_table(),
            alternatives: self.config.alternatives.clone(),
        };
        info!(
            medications = input.medications.len(),
            allergy_terms = input.allergy_terms.len(),
            built_in_table = input.table.is_built_in(),
            "analysis started"
        );

        let delay = Duration::from_millis(self.config.analysis_delay_ms);
        self.pending = Some(AnalysisTask::spawn(Arc::clone(&self.checker), input, delay));
        Ok(())
    }

    /// Wait for the pending analysis and store its report.
    ///
    /// The new report always replaces the previous one.
    pub async fn finish_analysis(&mut self) -> MedCheckResult<&AnalysisReport> {
        let task = self.pending.take().ok_or(MedCheckError::NoPendingAnalysis)?;
        let started_at = task.started_at();
        let report = task.wait().await?;

        info!(
            elapsed_ms = (report.completed_at - started_at).num_milliseconds(),
            interactions = report.interactions.len(),
            allergies = report.allergies.len(),
            alternatives = report.alternatives.len(),
            "analysis complete"
        );
        let stored = self.last_report.insert(report);
        Ok(&*stored)
    }

    /// Start an analysis and wait for it.
    pub async fn analyze(&mut self) -> MedCheckResult<&AnalysisReport> {
        self.begin_analysis()?;
        self.finish_analysis().await
    }

    /// Abort the pending analysis. The previous report is left as it was.
    ///
    /// Returns false if nothing was pending.
    pub fn cancel_analysis(&mut self) -> bool {
        match self.pending.take() {
            Some(task) => {
                task.abort();
                info!("analysis cancelled");
                true
            }
            None => false,
        }
    }

    pub fn last_report(&self) -> Option<&AnalysisReport> {
        self.last_report.as_ref()
    }
}

fn not_found(id: &DatasetId) -> MedCheckError {
    MedCheckError::DatasetNotFound { id: id.to_string() }
}
