//! Pair enumeration and the interaction report.
//!
//! Takes the patient's selected medications, enumerates all unordered
//! pairs, and produces one finding per pair known to the interaction
//! table, with the patient-adjusted severity. Also renders the
//! exportable plain-text report.

use serde::Serialize;

use crate::interactions::{normalize_name, InteractionTable};
use crate::severity::{classify, escalate, PatientContext, Severity};

/// Delimiter line between report blocks.
const REPORT_DELIMITER: &str = "========================================";

/// One interaction result for a drug pair.
///
/// Drug names are the canonical (sorted) pair, title-cased for display.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionFinding {
    pub drug_a: String,
    pub drug_b: String,
    pub description: String,
    pub severity: Severity,
}

/// Check all unordered pairs of the selected drugs against the table.
///
/// Selected names are normalized and deduplicated first. Pairs without
/// a table entry are silently omitted — absence of data is not an
/// interaction. With fewer than two distinct drugs no lookup happens
/// and the result is empty.
pub fn check_interactions(
    table: &InteractionTable,
    selected: &[String],
    patient: &PatientContext,
) -> Vec<InteractionFinding> {
    let drugs = distinct_drugs(selected);

    let mut findings = Vec::new();
    for i in 0..drugs.len() {
        for j in (i + 1)..drugs.len() {
            let Some(description) = table.lookup(&drugs[i], &drugs[j]) else {
                continue;
            };
            let base = classify(description);
            let severity = escalate(base, description, patient);

            // Canonical order for display, independent of selection order
            let (a, b) = if drugs[i] <= drugs[j] {
                (&drugs[i], &drugs[j])
            } else {
                (&drugs[j], &drugs[i])
            };
            findings.push(InteractionFinding {
                drug_a: title_case(a),
                drug_b: title_case(b),
                description: description.to_string(),
                severity,
            });
        }
    }
    findings
}

/// Normalize a selection, dropping empties and duplicates while keeping
/// selection order.
pub fn distinct_drugs(selected: &[String]) -> Vec<String> {
    let mut drugs: Vec<String> = Vec::with_capacity(selected.len());
    for name in selected {
        let name = normalize_name(name);
        if !name.is_empty() && !drugs.contains(&name) {
            drugs.push(name);
        }
    }
    drugs
}

/// Render the exportable plain-text report: one block per finding, in
/// display order, blocks separated by a blank line.
pub fn render_report(findings: &[InteractionFinding]) -> String {
    findings
        .iter()
        .map(|f| {
            format!(
                "Interaction: {} + {}\n→ Description: {}\n→ Severity: {}\n{}",
                f.drug_a, f.drug_b, f.description, f.severity, REPORT_DELIMITER
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Title-case a normalized drug name: uppercase every letter that follows
/// a non-letter, matching how names are shown in the selector.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_is_alpha = false;
    for c in name.chars() {
        if c.is_alphabetic() && !prev_is_alpha {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_alpha = c.is_alphabetic();
    }
    out
}
