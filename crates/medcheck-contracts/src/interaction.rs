//! Interaction records, tables, and findings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How serious an interaction or allergy conflict is.
///
/// The known levels are ordered `Severe > Moderate > Mild > Safe`. Values that
/// arrive from an uploaded dataset and match none of them are kept as
/// `Unknown` rather than passed through as raw text.
///
/// Serialized as the lowercase word, e.g. `"severe"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Severe,
    Moderate,
    Mild,
    Safe,
    Unknown,
}

impl Severity {
    /// Parse a severity word. Case-insensitive; surrounding whitespace ignored.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "severe" => Self::Severe,
            "moderate" => Self::Moderate,
            "mild" => Self::Mild,
            "safe" => Self::Safe,
            _ => Self::Unknown,
        }
    }

    /// The lowercase wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Severe => "severe",
            Self::Moderate => "moderate",
            Self::Mild => "mild",
            Self::Safe => "safe",
            Self::Unknown => "unknown",
        }
    }

    /// True for the levels that warrant suggesting an alternative drug.
    pub fn is_actionable(&self) -> bool {
        matches!(self, Self::Severe | Self::Moderate)
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Severity> for String {
    fn from(s: Severity) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored fact pairing two drug names with a severity and guidance text.
///
/// The pair is unordered: `(drug_a, drug_b)` matches medications in either
/// assignment. Field names on the wire follow the upload format (`drug1`,
/// `drug2`), so an exported dataset can be uploaded again unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    #[serde(rename = "drug1")]
    pub drug_a: String,
    #[serde(rename = "drug2")]
    pub drug_b: String,
    pub severity: Severity,
    pub description: String,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contraindications: Option<String>,
}

impl InteractionRecord {
    /// Build a record with the required fields and no optional metadata.
    pub fn new(
        drug_a: impl Into<String>,
        drug_b: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            drug_a: drug_a.into(),
            drug_b: drug_b.into(),
            severity,
            description: description.into(),
            recommendation: recommendation.into(),
            mechanism: None,
            evidence_level: None,
            contraindications: None,
        }
    }
}

/// The table the matching engine consults.
///
/// Exactly one table is active at a time. `BuiltIn` is the default when no
/// uploaded dataset has been activated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InteractionTable {
    /// The fixed sample table shipped with the engine.
    #[default]
    BuiltIn,
    /// Records from the currently active uploaded dataset.
    Uploaded(Vec<InteractionRecord>),
}

impl InteractionTable {
    /// The uploaded records, or `None` for the built-in table.
    pub fn records(&self) -> Option<&[InteractionRecord]> {
        match self {
            Self::BuiltIn => None,
            Self::Uploaded(records) => Some(records),
        }
    }

    pub fn is_built_in(&self) -> bool {
        matches!(self, Self::BuiltIn)
    }
}

/// A pairwise interaction found between two entered medications.
///
/// Produced fresh on every analysis run. `medication_a` / `medication_b` are
/// the display names in entry order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionFinding {
    pub medication_a: String,
    pub medication_b: String,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

/// A conflict between one medication and one of the patient's allergies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllergyConflict {
    /// Display name of the medication.
    pub medication: String,
    /// The allergy term as entered.
    pub allergy: String,
    pub severity: Severity,
    pub symptoms: String,
    pub recommendation: String,
    /// Allergen class key when the known-class rule produced this finding;
    /// `None` for a direct substring match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergen_class: Option<String>,
}
