//! The asynchronous analysis task.
//!
//! An analysis runs on a Tokio task that sleeps for the configured delay and
//! then evaluates a snapshot of the session's inputs. The handle is
//! discardable: `abort` stops the task and nothing is written back.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::debug;

use medcheck_contracts::{
    error::{MedCheckError, MedCheckResult},
    interaction::InteractionTable,
    medication::MedicationEntry,
    report::AnalysisReport,
};
use medcheck_engine::{build_report, AlternativeRule, InteractionChecker};

/// Everything one analysis run reads, captured when the run starts.
pub struct AnalysisInput {
    pub medications: Vec<MedicationEntry>,
    pub allergy_terms: Vec<String>,
    pub table: InteractionTable,
    pub alternatives: Vec<AlternativeRule>,
}

/// Handle to a pending analysis.
pub struct AnalysisTask {
    handle: JoinHandle<AnalysisReport>,
    started_at: DateTime<Utc>,
}

impl AnalysisTask {
    /// Spawn the analysis on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn(checker: Arc<dyn InteractionChecker>, input: AnalysisInput, delay: Duration) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = checker.analyze(&input.medications, &input.allergy_terms, &input.table);
            debug!(
                interactions = outcome.interactions.len(),
                allergies = outcome.allergies.len(),
                "analysis task finished"
            );
            build_report(outcome, &input.medications, &input.alternatives)
        });

        Self {
            handle,
            started_at: Utc::now(),
        }
    }

    /// When the run was spawned, before the simulated delay.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Stop the task. Its report, if any, is discarded.
    pub fn abort(self) {
        self.handle.abort();
    }

    /// Wait for the report.
    ///
    /// Returns `AnalysisAborted` if the task was cancelled or panicked.
    pub async fn wait(self) -> MedCheckResult<AnalysisReport> {
        self.handle.await.map_err(|e| MedCheckError::AnalysisAborted {
            reason: e.to_string(),
        })
    }
}
