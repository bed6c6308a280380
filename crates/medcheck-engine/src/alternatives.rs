//! Alternative-medication suggestions.
//!
//! Suggestions are offered for every medication named in a `Severe` or
//! `Moderate` interaction finding and for every medication with an allergy
//! conflict. A rule applies when its `drug` is contained in the medication
//! name. Only medications on the entered list are considered, so findings
//! from the built-in sample table never suggest replacing a drug the patient
//! is not taking. Suggestions already on the medication list are skipped.

use std::collections::HashSet;

use chrono::Utc;

use medcheck_contracts::{
    medication::MedicationEntry,
    report::{AlternativeSuggestion, AnalysisReport},
};

use crate::{
    config::AlternativeRule,
    matcher::{containment_match, normalize, AnalysisOutcome},
};

/// Collect alternatives for the medications flagged in `outcome`.
pub fn suggest_alternatives(
    outcome: &AnalysisOutcome,
    medications: &[MedicationEntry],
    rules: &[AlternativeRule],
) -> Vec<AlternativeSuggestion> {
    let mut flagged: Vec<&str> = Vec::new();
    for finding in outcome.interactions.iter().filter(|f| f.severity.is_actionable()) {
        flagged.push(&finding.medication_a);
        flagged.push(&finding.medication_b);
    }
    for conflict in &outcome.allergies {
        flagged.push(&conflict.medication);
    }

    let entered: Vec<String> = medications.iter().map(|m| normalize(&m.name)).collect();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut suggestions = Vec::new();

    for medication in flagged {
        let med_name = normalize(medication);
        if !entered.iter().any(|e| !e.is_empty() && containment_match(e, &med_name)) {
            continue;
        }
        for rule in rules.iter().filter(|r| med_name.contains(&normalize(&r.drug))) {
            for suggestion in &rule.suggestions {
                let alt_name = normalize(&suggestion.name);
                if entered.iter().any(|e| e == &alt_name) {
                    continue;
                }
                if !seen.insert((med_name.clone(), alt_name)) {
                    continue;
                }
                suggestions.push(AlternativeSuggestion {
                    medication: medication.to_string(),
                    alternative: suggestion.name.clone(),
                    reason: suggestion.reason.clone(),
                });
            }
        }
    }

    suggestions
}

/// Wrap an outcome into a timestamped report with alternatives attached.
pub fn build_report(
    outcome: AnalysisOutcome,
    medications: &[MedicationEntry],
    rules: &[AlternativeRule],
) -> AnalysisReport {
    let alternatives = suggest_alternatives(&outcome, medications, rules);
    AnalysisReport {
        interactions: outcome.interactions,
        allergies: outcome.allergies,
        alternatives,
        used_built_in_table: outcome.used_built_in_table,
        completed_at: Utc::now(),
    }
}
