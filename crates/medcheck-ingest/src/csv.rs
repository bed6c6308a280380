//! CSV dataset parser.
//!
//! The first line is the header row. Header names are lowercased and trimmed
//! and mapped to column indices. Every following non-blank line is split on
//! commas; each value is trimmed and stripped of surrounding double quotes.
//!
//! The splitter is naive: a comma inside a quoted field still splits it.
//!
//! Column aliases, tried in order (first non-empty cell wins):
//!
//! | field             | headers                              |
//! |-------------------|--------------------------------------|
//! | drug_a            | `drug1`, `drug 1`, `drugname1`       |
//! | drug_b            | `drug2`, `drug 2`, `drugname2`       |
//! | description       | `description`, `interaction`         |
//! | recommendation    | `recommendation`, `advice`           |
//! | evidence_level    | `evidence_level`, `evidence level`   |
//!
//! A missing or empty `severity` defaults to `mild`.

use std::collections::HashMap;

use crate::raw::RawRecord;

const DRUG_A: &[&str] = &["drug1", "drug 1", "drugname1"];
const DRUG_B: &[&str] = &["drug2", "drug 2", "drugname2"];
const SEVERITY: &[&str] = &["severity"];
const DESCRIPTION: &[&str] = &["description", "interaction"];
const RECOMMENDATION: &[&str] = &["recommendation", "advice"];
const MECHANISM: &[&str] = &["mechanism"];
const EVIDENCE_LEVEL: &[&str] = &["evidence_level", "evidence level"];
const CONTRAINDICATIONS: &[&str] = &["contraindications"];

const DEFAULT_SEVERITY: &str = "mild";

fn clean(value: &str) -> String {
    value.trim().trim_matches('"').trim().to_string()
}

/// Column lookup over one data row.
struct Row<'a> {
    columns: &'a HashMap<String, usize>,
    values: Vec<String>,
}

impl Row<'_> {
    fn get(&self, aliases: &[&str]) -> String {
        aliases
            .iter()
            .filter_map(|alias| self.columns.get(*alias))
            .filter_map(|&idx| self.values.get(idx))
            .find(|v| !v.is_empty())
            .cloned()
            .unwrap_or_default()
    }
}

/// Parse CSV text into unvalidated records.
pub fn parse_csv(text: &str) -> Vec<RawRecord> {
    let mut lines = text.split('\n').map(|l| l.trim_end_matches('\r'));

    let Some(header) = lines.next() else {
        return Vec::new();
    };

    let mut columns: HashMap<String, usize> = HashMap::new();
    for (idx, name) in header.split(',').enumerate() {
        columns.entry(clean(name).to_lowercase()).or_insert(idx);
    }

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let row = Row {
                columns: &columns,
                values: line.split(',').map(clean).collect(),
            };

            let severity = row.get(SEVERITY);
            RawRecord {
                drug_a: row.get(DRUG_A),
                drug_b: row.get(DRUG_B),
                severity: if severity.is_empty() {
                    DEFAULT_SEVERITY.to_string()
                } else {
                    severity.to_lowercase()
                },
                description: row.get(DESCRIPTION),
                recommendation: row.get(RECOMMENDATION),
                mechanism: row.get(MECHANISM),
                evidence_level: row.get(EVIDENCE_LEVEL),
                contraindications: row.get(CONTRAINDICATIONS),
            }
        })
        .collect()
}
