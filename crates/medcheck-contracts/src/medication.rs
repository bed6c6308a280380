//! Medication entries and allergy input.

use serde::{Deserialize, Serialize};

/// Opaque identifier for one medication entry.
///
/// Unique per entry, not per drug: two entries for "Aspirin" get distinct ids
/// and are matched independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MedicationId(pub uuid::Uuid);

impl MedicationId {
    /// Create a new, unique medication id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for MedicationId {
    fn default() -> Self {
        Self::new()
    }
}

/// One medication the patient is taking. All text fields are free-form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationEntry {
    pub id: MedicationId,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
}

impl MedicationEntry {
    /// Build an entry with a fresh id.
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
    ) -> Self {
        Self {
            id: MedicationId::new(),
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
        }
    }

    /// Build an entry carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, "", "")
    }
}

/// Split the free-text allergy field into individual terms.
///
/// Terms are comma-separated; each is trimmed and empty terms are dropped.
/// Case is preserved here; matching lowercases later.
pub fn parse_allergy_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}
