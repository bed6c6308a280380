//! Analysis results returned to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interaction::{AllergyConflict, InteractionFinding};

/// A suggested replacement for a medication involved in a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeSuggestion {
    /// The entered medication this suggestion replaces.
    pub medication: String,
    /// The suggested drug.
    pub alternative: String,
    pub reason: String,
}

/// The full result of one analysis run.
///
/// Every run replaces the previous report wholesale; findings are never merged
/// across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub interactions: Vec<InteractionFinding>,
    pub allergies: Vec<AllergyConflict>,
    pub alternatives: Vec<AlternativeSuggestion>,
    /// True when the built-in sample table answered the interaction check.
    pub used_built_in_table: bool,
    pub completed_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// True when neither interactions nor allergy conflicts were found.
    pub fn is_clear(&self) -> bool {
        self.interactions.is_empty() && self.allergies.is_empty()
    }
}
