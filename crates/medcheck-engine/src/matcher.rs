//! Interaction and allergy matching.
//!
//! Matching is case-insensitive containment: two names match when either is a
//! substring of the other after lowercasing and trimming. This is forgiving
//! of free-text entry ("aspirin 81mg" matches "Aspirin") at the cost of false
//! positives for short or overlapping names.
//!
//! Allergy algorithm, for each (medication, allergy term) pair:
//!
//! 1. Direct rule: containment match → one `Severe` finding.
//! 2. Class rule: for every allergen class whose key the term contains, and
//!    whose members include a substring of the medication name → one finding
//!    at the class severity.
//!
//! Both rules may fire for the same pair. Findings are not deduplicated.
//!
//! Interaction algorithm over an uploaded table: for every pair i < j in entry
//! order, the first record (table order) whose two drug names match the two
//! medication names in either assignment produces one finding.

use tracing::debug;

use medcheck_contracts::{
    interaction::{AllergyConflict, InteractionFinding, InteractionRecord, InteractionTable, Severity},
    medication::MedicationEntry,
};

use crate::{config::CheckerConfig, sample::sample_findings};

/// The two finding lists produced by one analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub interactions: Vec<InteractionFinding>,
    pub allergies: Vec<AllergyConflict>,
    /// True when the built-in sample table supplied `interactions`.
    pub used_built_in_table: bool,
}

/// A checker that turns medications, allergies and a table into findings.
///
/// Implementations must be pure: same inputs, same outcome, no side effects.
/// The session holds one behind an `Arc` so analysis can run on a task.
pub trait InteractionChecker: Send + Sync {
    fn analyze(
        &self,
        medications: &[MedicationEntry],
        allergy_terms: &[String],
        table: &InteractionTable,
    ) -> AnalysisOutcome;
}

/// Lowercase and trim a name for comparison.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Return true if either normalized string contains the other.
///
/// Both arguments must already be normalized. Equal strings match.
pub fn containment_match(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// The reference `InteractionChecker`, driven by a `CheckerConfig`.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: CheckerConfig,
}

impl Matcher {
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    /// Find every allergy conflict between `medications` and `allergy_terms`.
    pub fn match_allergies(
        &self,
        medications: &[MedicationEntry],
        allergy_terms: &[String],
    ) -> Vec<AllergyConflict> {
        let mut conflicts = Vec::new();

        for med in medications {
            let med_name = normalize(&med.name);
            if med_name.is_empty() {
                continue;
            }

            for term in allergy_terms {
                let allergy = normalize(term);
                // An empty term is a substring of every name.
                if allergy.is_empty() {
                    continue;
                }

                if containment_match(&med_name, &allergy) {
                    conflicts.push(AllergyConflict {
                        medication: med.name.clone(),
                        allergy: term.trim().to_string(),
                        severity: Severity::Severe,
                        symptoms: "Potential allergic reaction".to_string(),
                        recommendation: format!(
                            "AVOID: {} - patient has a documented allergy to {}",
                            med.name.trim(),
                            term.trim()
                        ),
                        allergen_class: None,
                    });
                }

                for class in &self.config.allergen_classes {
                    if !allergy.contains(&normalize(&class.key)) {
                        continue;
                    }
                    let member_hit = class
                        .members
                        .iter()
                        .any(|member| med_name.contains(&normalize(member)));
                    if member_hit {
                        conflicts.push(AllergyConflict {
                            medication: med.name.clone(),
                            allergy: term.trim().to_string(),
                            severity: class.severity,
                            symptoms: class.symptoms.clone(),
                            recommendation: format!(
                                "CONTRAINDICATED: {} belongs to the {} class; patient is allergic to {}",
                                med.name.trim(),
                                class.label,
                                term.trim()
                            ),
                            allergen_class: Some(class.key.clone()),
                        });
                    }
                }
            }
        }

        debug!(
            medications = medications.len(),
            allergy_terms = allergy_terms.len(),
            conflicts = conflicts.len(),
            "allergy matching complete"
        );
        conflicts
    }

    /// Find pairwise interactions among `medications` using `table`.
    ///
    /// With the built-in table the fixed sample findings are returned
    /// regardless of the medications entered.
    pub fn match_interactions(
        &self,
        medications: &[MedicationEntry],
        table: &InteractionTable,
    ) -> Vec<InteractionFinding> {
        let records = match table {
            InteractionTable::BuiltIn => {
                debug!("no dataset active; returning built-in sample findings");
                return sample_findings();
            }
            InteractionTable::Uploaded(records) => records,
        };

        let normalized: Vec<(String, String, &InteractionRecord)> = records
            .iter()
            .map(|r| (normalize(&r.drug_a), normalize(&r.drug_b), r))
            .filter(|(a, b, _)| !a.is_empty() && !b.is_empty())
            .collect();

        let mut findings = Vec::new();

        for (i, first) in medications.iter().enumerate() {
            let name_i = normalize(&first.name);
            if name_i.is_empty() {
                continue;
            }
            for second in &medications[i + 1..] {
                let name_j = normalize(&second.name);
                if name_j.is_empty() {
                    continue;
                }

                let hit = normalized.iter().find(|(a, b, _)| {
                    (containment_match(a, &name_i) && containment_match(b, &name_j))
                        || (containment_match(a, &name_j) && containment_match(b, &name_i))
                });

                if let Some((_, _, record)) = hit {
                    debug!(
                        medication_a = %first.name,
                        medication_b = %second.name,
                        severity = %record.severity,
                        "interaction matched"
                    );
                    findings.push(InteractionFinding {
                        medication_a: first.name.clone(),
                        medication_b: second.name.clone(),
                        severity: record.severity,
                        description: record.description.clone(),
                        recommendation: record.recommendation.clone(),
                    });
                }
            }
        }

        findings
    }
}

impl InteractionChecker for Matcher {
    fn analyze(
        &self,
        medications: &[MedicationEntry],
        allergy_terms: &[String],
        table: &InteractionTable,
    ) -> AnalysisOutcome {
        AnalysisOutcome {
            interactions: self.match_interactions(medications, table),
            allergies: self.match_allergies(medications, allergy_terms),
            used_built_in_table: table.is_built_in(),
        }
    }
}

/// Analyze with the default configuration.
pub fn analyze(
    medications: &[MedicationEntry],
    allergy_terms: &[String],
    table: &InteractionTable,
) -> AnalysisOutcome {
    Matcher::default().analyze(medications, allergy_terms, table)
}
