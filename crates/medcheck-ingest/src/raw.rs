//! Unvalidated records shared by the CSV and JSON parsers.
//!
//! Both parsers produce `RawRecord`s with every field as plain text. The
//! post-parse filter in `into_record` is the single place validity is decided.

use medcheck_contracts::interaction::{InteractionRecord, Severity};

/// A parsed row before validation. Missing fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub drug_a: String,
    pub drug_b: String,
    pub severity: String,
    pub description: String,
    pub recommendation: String,
    pub mechanism: String,
    pub evidence_level: String,
    pub contraindications: String,
}

fn optional(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl RawRecord {
    /// Validate and convert. Returns `None` unless drug_a, drug_b, severity
    /// and description are all non-empty after trimming.
    ///
    /// A non-empty severity outside the known levels becomes
    /// `Severity::Unknown`; the record is still kept.
    pub fn into_record(self) -> Option<InteractionRecord> {
        let required = [&self.drug_a, &self.drug_b, &self.severity, &self.description];
        if required.iter().any(|field| field.trim().is_empty()) {
            return None;
        }

        Some(InteractionRecord {
            drug_a: self.drug_a.trim().to_string(),
            drug_b: self.drug_b.trim().to_string(),
            severity: Severity::parse(&self.severity),
            description: self.description.trim().to_string(),
            recommendation: self.recommendation.trim().to_string(),
            mechanism: optional(self.mechanism),
            evidence_level: optional(self.evidence_level),
            contraindications: optional(self.contraindications),
        })
    }
}
