//! Plain-text rendering of reports and datasets.

use medcheck_contracts::{
    dataset::Dataset,
    interaction::{InteractionRecord, Severity},
    report::AnalysisReport,
};

fn badge(severity: Severity) -> &'static str {
    match severity {
        Severity::Severe => "[SEVERE]  ",
        Severity::Moderate => "[MODERATE]",
        Severity::Mild => "[MILD]    ",
        Severity::Safe => "[SAFE]    ",
        Severity::Unknown => "[UNKNOWN] ",
    }
}

pub fn print_report(report: &AnalysisReport) {
    let source = if report.used_built_in_table {
        "built-in sample table"
    } else {
        "active dataset"
    };

    println!("  Drug interactions ({}):", source);
    if report.interactions.is_empty() {
        println!("    none found");
    }
    for f in &report.interactions {
        println!("    {} {} + {}", badge(f.severity), f.medication_a, f.medication_b);
        println!("               {}", f.description);
        if !f.recommendation.is_empty() {
            println!("               -> {}", f.recommendation);
        }
    }
    println!();

    println!("  Allergy conflicts:");
    if report.allergies.is_empty() {
        println!("    none found");
    }
    for c in &report.allergies {
        println!("    {} {} (allergy: {})", badge(c.severity), c.medication, c.allergy);
        println!("               {}", c.symptoms);
        println!("               -> {}", c.recommendation);
    }
    println!();

    if !report.alternatives.is_empty() {
        println!("  Suggested alternatives:");
        for a in &report.alternatives {
            println!("    {} instead of {}: {}", a.alternative, a.medication, a.reason);
        }
        println!();
    }
}

pub fn print_dataset(dataset: &Dataset) {
    println!("  Dataset:   {}", dataset.name);
    println!("  File:      {}", dataset.file_name);
    println!("  Format:    {:?}", dataset.format);
    println!("  Rows:      {}", dataset.row_count);
    println!("  Size:      {}", dataset.size);
    println!("  SHA-256:   {}", dataset.checksum);
    println!("  Uploaded:  {}", dataset.uploaded_at.to_rfc3339());
}

pub fn print_records(records: &[InteractionRecord]) {
    for r in records {
        println!("    {} {} + {}: {}", badge(r.severity), r.drug_a, r.drug_b, r.description);
    }
}
