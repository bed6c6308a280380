//! The built-in sample interaction table.
//!
//! Used whenever no uploaded dataset is active. The sample findings are
//! returned as-is, whatever medications were entered; they are illustrative
//! and fictional, not a clinical reference.

use medcheck_contracts::interaction::{InteractionFinding, InteractionRecord, Severity};

/// The records behind the sample findings, in display order.
pub fn sample_records() -> Vec<InteractionRecord> {
    vec![
        InteractionRecord {
            mechanism: Some(
                "Both agents impair hemostasis through distinct pathways".to_string(),
            ),
            evidence_level: Some("established".to_string()),
            ..InteractionRecord::new(
                "Warfarin",
                "Aspirin",
                Severity::Severe,
                "Increased risk of serious bleeding when an anticoagulant is combined with an antiplatelet agent",
                "Avoid concurrent use; if clinically necessary, monitor INR weekly and watch for signs of bleeding",
            )
        },
        InteractionRecord {
            mechanism: Some(
                "Contrast-induced kidney injury impairs metformin clearance".to_string(),
            ),
            evidence_level: Some("probable".to_string()),
            ..InteractionRecord::new(
                "Metformin",
                "Contrast Agent",
                Severity::Moderate,
                "Iodinated contrast may cause acute kidney injury, raising the risk of lactic acidosis",
                "Withhold metformin 48 hours before and after contrast administration; recheck renal function before resuming",
            )
        },
    ]
}

/// The fixed findings reported when the built-in table is active.
pub fn sample_findings() -> Vec<InteractionFinding> {
    sample_records()
        .into_iter()
        .map(|r| InteractionFinding {
            medication_a: r.drug_a,
            medication_b: r.drug_b,
            severity: r.severity,
            description: r.description,
            recommendation: r.recommendation,
        })
        .collect()
}
