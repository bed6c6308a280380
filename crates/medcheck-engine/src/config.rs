//! Checker configuration.
//!
//! `CheckerConfig` is deserialized from TOML. Every field is optional in the
//! document; anything left out takes the built-in default, so an empty file is
//! a valid configuration.
//!
//! Example:
//! ```toml
//! analysis_delay_ms = 1500
//! preview_rows = 5
//!
//! [[allergen_classes]]
//! key = "penicillin"
//! label = "Penicillin antibiotics"
//! members = ["penicillin", "amoxicillin", "ampicillin"]
//! symptoms = "Rash, hives, angioedema, or anaphylaxis"
//! severity = "severe"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use medcheck_contracts::{
    error::{MedCheckError, MedCheckResult},
    interaction::Severity,
};

/// A family of drugs that share an allergen.
///
/// The class fires when an allergy term contains `key` and a medication name
/// contains any entry of `members`. All comparisons are lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllergenClass {
    /// Substring looked for in the patient's allergy term.
    pub key: String,
    /// Human-readable class name used in recommendations.
    pub label: String,
    /// Representative drug-name substrings belonging to the class.
    pub members: Vec<String>,
    /// Symptom description attached to findings.
    pub symptoms: String,
    pub severity: Severity,
}

/// One suggested replacement drug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub reason: String,
}

/// Alternatives offered for medications whose name contains `drug`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeRule {
    pub drug: String,
    pub suggestions: Vec<Suggestion>,
}

/// Top-level configuration for the checker and its session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Simulated latency of an analysis run, in milliseconds.
    pub analysis_delay_ms: u64,
    /// Number of records returned by a dataset preview.
    pub preview_rows: usize,
    /// Ordered allergen class table consulted by the class rule.
    pub allergen_classes: Vec<AllergenClass>,
    /// Ordered alternative-medication table.
    pub alternatives: Vec<AlternativeRule>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            analysis_delay_ms: 1500,
            preview_rows: 5,
            allergen_classes: default_allergen_classes(),
            alternatives: default_alternatives(),
        }
    }
}

impl CheckerConfig {
    /// Parse `s` as TOML and build a validated configuration.
    ///
    /// Returns `MedCheckError::ConfigError` if the TOML is malformed, does not
    /// match the expected shape, or fails validation.
    pub fn from_toml_str(s: &str) -> MedCheckResult<Self> {
        let config: CheckerConfig = toml::from_str(s).map_err(|e| MedCheckError::ConfigError {
            reason: format!("failed to parse checker TOML: {}", e),
        })?;
        config.validate()?;
        debug!(
            allergen_classes = config.allergen_classes.len(),
            alternatives = config.alternatives.len(),
            analysis_delay_ms = config.analysis_delay_ms,
            "checker configuration loaded"
        );
        Ok(config)
    }

    /// Read the file at `path` and parse it as checker configuration.
    pub fn from_file(path: &Path) -> MedCheckResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| MedCheckError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reject values the checker cannot work with.
    pub fn validate(&self) -> MedCheckResult<()> {
        if self.preview_rows == 0 {
            return Err(MedCheckError::ConfigError {
                reason: "preview_rows must be at least 1".to_string(),
            });
        }
        for class in &self.allergen_classes {
            if class.key.trim().is_empty() {
                return Err(MedCheckError::ConfigError {
                    reason: format!("allergen class '{}' has an empty key", class.label),
                });
            }
            if class.severity == Severity::Unknown {
                return Err(MedCheckError::ConfigError {
                    reason: format!("allergen class '{}' has an unrecognized severity", class.key),
                });
            }
            // An empty member would be contained in every medication name.
            if class.members.is_empty() || class.members.iter().any(|m| m.trim().is_empty()) {
                return Err(MedCheckError::ConfigError {
                    reason: format!("allergen class '{}' needs non-empty members", class.key),
                });
            }
        }
        for rule in &self.alternatives {
            if rule.drug.trim().is_empty() {
                return Err(MedCheckError::ConfigError {
                    reason: "alternative rule has an empty drug name".to_string(),
                });
            }
        }
        Ok(())
    }
}

// ── Defaults ──────────────────────────────────────────────────────────────────

fn class(
    key: &str,
    label: &str,
    members: &[&str],
    symptoms: &str,
    severity: Severity,
) -> AllergenClass {
    AllergenClass {
        key: key.to_string(),
        label: label.to_string(),
        members: members.iter().map(|m| m.to_string()).collect(),
        symptoms: symptoms.to_string(),
        severity,
    }
}

/// The allergen classes used when no configuration overrides them.
pub fn default_allergen_classes() -> Vec<AllergenClass> {
    vec![
        class(
            "penicillin",
            "Penicillin antibiotics",
            &["penicillin", "amoxicillin", "ampicillin", "piperacillin", "nafcillin", "dicloxacillin"],
            "Rash, hives, angioedema, or anaphylaxis",
            Severity::Severe,
        ),
        class(
            "cephalosporin",
            "Cephalosporin antibiotics",
            &["cephalexin", "cefazolin", "ceftriaxone", "cefuroxime", "cefdinir"],
            "Rash, hives, or anaphylaxis",
            Severity::Severe,
        ),
        class(
            "sulfa",
            "Sulfonamide antibiotics",
            &["sulfamethoxazole", "sulfasalazine", "sulfadiazine", "sulfisoxazole"],
            "Rash, fever, or Stevens-Johnson syndrome",
            Severity::Severe,
        ),
        class(
            "aspirin",
            "Aspirin and NSAIDs",
            &["aspirin", "ibuprofen", "naproxen", "diclofenac", "ketorolac"],
            "Bronchospasm, urticaria, or angioedema",
            Severity::Moderate,
        ),
        class(
            "codeine",
            "Opioid analgesics",
            &["codeine", "morphine", "hydrocodone", "oxycodone"],
            "Itching, rash, or respiratory depression",
            Severity::Moderate,
        ),
    ]
}

fn rule(drug: &str, suggestions: &[(&str, &str)]) -> AlternativeRule {
    AlternativeRule {
        drug: drug.to_string(),
        suggestions: suggestions
            .iter()
            .map(|(name, reason)| Suggestion {
                name: name.to_string(),
                reason: reason.to_string(),
            })
            .collect(),
    }
}

/// The alternative-medication table used when no configuration overrides it.
pub fn default_alternatives() -> Vec<AlternativeRule> {
    vec![
        rule(
            "warfarin",
            &[("Apixaban", "Fewer drug and dietary interactions; no routine INR monitoring")],
        ),
        rule(
            "aspirin",
            &[("Acetaminophen", "Analgesic and antipyretic without antiplatelet effect")],
        ),
        rule(
            "ibuprofen",
            &[("Acetaminophen", "Analgesic without NSAID cross-reactivity")],
        ),
        rule(
            "metformin",
            &[("Insulin", "Bridges glucose control while metformin is withheld")],
        ),
        rule(
            "contrast",
            &[("Non-contrast imaging", "Avoids iodinated contrast exposure")],
        ),
        rule(
            "amoxicillin",
            &[
                ("Azithromycin", "Macrolide antibiotic without penicillin cross-reactivity"),
                ("Doxycycline", "Tetracycline antibiotic without penicillin cross-reactivity"),
            ],
        ),
        rule(
            "penicillin",
            &[("Azithromycin", "Macrolide antibiotic without penicillin cross-reactivity")],
        ),
        rule(
            "sulfamethoxazole",
            &[("Nitrofurantoin", "Non-sulfonamide option for urinary tract infections")],
        ),
        rule(
            "codeine",
            &[("Acetaminophen", "Non-opioid analgesic for mild to moderate pain")],
        ),
    ]
}
