//! Walk-through scenarios exercising the checker end to end.
//!
//! Each scenario builds a fresh session, performs the user actions a
//! dashboard would, and prints what the user would see.

use medcheck_contracts::{error::MedCheckResult, interaction::Severity, medication::MedicationEntry};
use medcheck_engine::CheckerConfig;
use medcheck_session::Session;

use crate::render::print_report;

const SAMPLE_CSV: &str = "drug1,drug2,severity,description\nAspirin,Warfarin,severe,bleeding risk\n";

fn outcome(ok: bool) -> &'static str {
    if ok {
        "PASS"
    } else {
        "FAIL"
    }
}

/// Scenario 1: uploaded CSV dataset drives the interaction check.
pub async fn uploaded_dataset(config: &CheckerConfig) -> MedCheckResult<()> {
    println!("=== Scenario 1: Uploaded CSV dataset ===");
    println!();

    let mut session = Session::new(config.clone());
    let id = session.upload("sample.csv", SAMPLE_CSV)?.id.clone();
    session.activate_dataset(&id)?;
    println!("  Uploaded sample.csv (1 row) and activated it");

    session.add_medication(MedicationEntry::named("Aspirin"));
    session.add_medication(MedicationEntry::named("Warfarin"));
    println!("  Medications: Aspirin, Warfarin");
    println!();

    let report = session.analyze().await?;
    print_report(report);

    let ok = report.interactions.len() == 1 && report.interactions[0].severity == Severity::Severe;
    println!("  Expected one severe interaction: {}", outcome(ok));
    println!();
    Ok(())
}

/// Scenario 2: no dataset active, the built-in sample findings are shown.
pub async fn built_in_table(config: &CheckerConfig) -> MedCheckResult<()> {
    println!("=== Scenario 2: Built-in sample table ===");
    println!();

    let mut session = Session::new(config.clone());
    session.add_medication(MedicationEntry::new("Lisinopril", "10 mg", "once daily"));
    session.add_medication(MedicationEntry::new("Atorvastatin", "20 mg", "once daily"));
    println!("  Medications: Lisinopril, Atorvastatin (no dataset active)");
    println!("  Analyzing ({} ms simulated latency)...", config.analysis_delay_ms);
    println!();

    let report = session.analyze().await?;
    print_report(report);

    println!(
        "  Expected the two built-in sample findings: {}",
        outcome(report.used_built_in_table && report.interactions.len() == 2)
    );
    println!();
    Ok(())
}

/// Scenario 3: penicillin allergy flags amoxicillin.
pub async fn allergy_conflict(config: &CheckerConfig) -> MedCheckResult<()> {
    println!("=== Scenario 3: Allergen class conflict ===");
    println!();

    let mut session = Session::new(config.clone());
    session.set_allergies("penicillin");
    session.add_medication(MedicationEntry::new("Amoxicillin", "500 mg", "three times daily"));
    println!("  Allergies:   penicillin");
    println!("  Medications: Amoxicillin");
    println!();

    let report = session.analyze().await?;
    print_report(report);

    let ok = report
        .allergies
        .iter()
        .any(|c| c.severity == Severity::Severe && c.allergen_class.as_deref() == Some("penicillin"));
    println!("  Expected a severe penicillin-class conflict: {}", outcome(ok));
    println!();
    Ok(())
}

/// Scenario 4: an unsupported file is rejected and no dataset is created.
pub fn unsupported_upload(config: &CheckerConfig) -> MedCheckResult<()> {
    println!("=== Scenario 4: Unsupported upload ===");
    println!();

    let mut session = Session::new(config.clone());
    match session.upload("data.txt", SAMPLE_CSV) {
        Ok(dataset) => println!("  Unexpectedly accepted '{}'", dataset.name),
        Err(e) => println!("  Upload rejected: {}", e),
    }

    println!("  Datasets in list: {}", session.datasets().len());
    println!(
        "  Expected rejection with no new dataset: {}",
        outcome(session.datasets().is_empty())
    );
    println!();
    Ok(())
}

/// Run all four scenarios in order.
pub async fn run_all(config: &CheckerConfig) -> MedCheckResult<()> {
    uploaded_dataset(config).await?;
    built_in_table(config).await?;
    allergy_conflict(config).await?;
    unsupported_upload(config)?;
    Ok(())
}
