//! JSON dataset parser.
//!
//! Accepts a top-level list of objects. A single top-level object is read as a
//! one-element list; any other top-level value yields no records. Objects are
//! mapped leniently: missing fields become empty, numbers and booleans are
//! stringified, anything else is ignored. Validation happens afterwards.

use serde_json::{Map, Value};

use medcheck_contracts::error::{MedCheckError, MedCheckResult, NO_VALID_DATA};

use crate::raw::RawRecord;

fn text(obj: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

fn raw_from_object(obj: &Map<String, Value>) -> RawRecord {
    RawRecord {
        drug_a: text(obj, &["drug1", "drugA", "drug_a"]),
        drug_b: text(obj, &["drug2", "drugB", "drug_b"]),
        severity: text(obj, &["severity"]),
        description: text(obj, &["description"]),
        recommendation: text(obj, &["recommendation"]),
        mechanism: text(obj, &["mechanism"]),
        evidence_level: text(obj, &["evidence_level", "evidenceLevel"]),
        contraindications: text(obj, &["contraindications"]),
    }
}

/// Parse JSON text into unvalidated records.
///
/// Returns `MedCheckError::ValidationFailed` when the text is not JSON at all.
pub fn parse_json(text: &str) -> MedCheckResult<Vec<RawRecord>> {
    let value: Value = serde_json::from_str(text).map_err(|e| MedCheckError::ValidationFailed {
        reason: format!("{}: invalid JSON: {}", NO_VALID_DATA, e),
    })?;

    let records = match &value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_object)
            .map(raw_from_object)
            .collect(),
        Value::Object(obj) => vec![raw_from_object(obj)],
        _ => Vec::new(),
    };

    Ok(records)
}
