//! # medcheck-engine
//!
//! Interaction and allergy matching for MEDCHECK.
//!
//! ## Overview
//!
//! [`Matcher`] implements [`InteractionChecker`]: given the entered
//! medications, the patient's allergy terms, and the active
//! [`InteractionTable`](medcheck_contracts::interaction::InteractionTable), it
//! produces pairwise interaction findings and allergy conflicts. It holds no
//! state beyond its [`CheckerConfig`], so the same inputs always produce the
//! same outcome.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use medcheck_engine::{Matcher, InteractionChecker, CheckerConfig};
//!
//! let matcher = Matcher::new(CheckerConfig::from_file(Path::new("config/medcheck.toml"))?);
//! let outcome = matcher.analyze(&medications, &allergies, &table);
//! ```

pub mod alternatives;
pub mod config;
pub mod matcher;
pub mod sample;

pub use alternatives::{build_report, suggest_alternatives};
pub use config::{AllergenClass, AlternativeRule, CheckerConfig, Suggestion};
pub use matcher::{analyze, containment_match, AnalysisOutcome, InteractionChecker, Matcher};

// ── Tests ─────────────────────────────────────────────────────────────────────
