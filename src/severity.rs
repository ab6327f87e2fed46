//! Severity classification for interaction descriptions.
//!
//! Two pure functions: `classify` maps a free-text description to a
//! severity label by keyword priority, and `escalate` bumps the label
//! one step when the patient profile puts them at elevated risk.

use serde::{Deserialize, Serialize};

/// Severity of a drug interaction.
///
/// Ordering follows escalation: Mild < Moderate < Severe. `Unknown`
/// sorts lowest for display purposes and never participates in
/// escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Unknown,
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Keyword sets match the published checker. Matching is plain substring
// containment with no word boundaries; overlaps between sets are resolved
// by the Severe > Moderate > Mild priority in `classify`.
const SEVERE_KEYWORDS: &[&str] = &[
    "life-threatening",
    "fatal",
    "serious",
    "severe",
    "toxic",
    "contraindicated",
];

const MODERATE_KEYWORDS: &[&str] = &["risk", "increase", "may cause", "enhance", "interfere"];

const MILD_KEYWORDS: &[&str] = &["mild", "slight", "temporary", "low"];

/// Organ / condition keywords that mark a description as risky for
/// vulnerable patients regardless of their stated conditions.
const RISK_KEYWORDS: &[&str] = &[
    "kidney",
    "liver",
    "blood pressure",
    "heart",
    "renal",
    "diabetes",
];

/// Age above which every patient counts as at-risk.
const RISK_AGE: u32 = 65;

/// Classify an interaction description by keyword priority.
///
/// Severe keywords are checked first, then Moderate, then Mild; the
/// first matching set wins. A description matching none is `Unknown`.
pub fn classify(description: &str) -> Severity {
    let desc = description.to_lowercase();
    if contains_any(&desc, SEVERE_KEYWORDS) {
        Severity::Severe
    } else if contains_any(&desc, MODERATE_KEYWORDS) {
        Severity::Moderate
    } else if contains_any(&desc, MILD_KEYWORDS) {
        Severity::Mild
    } else {
        Severity::Unknown
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

/// Patient attributes supplied per check. Not persisted.
#[derive(Debug, Clone)]
pub struct PatientContext {
    pub age: u32,
    pub conditions: Vec<String>,
}

impl PatientContext {
    /// Construct with normalized conditions (trimmed, lowercased,
    /// empties dropped).
    pub fn new(age: u32, conditions: Vec<String>) -> Self {
        let conditions = conditions
            .into_iter()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        Self { age, conditions }
    }

    /// Parse a comma-separated condition list, as entered in the form UI.
    pub fn parse_conditions(age: u32, input: &str) -> Self {
        Self::new(age, input.split(',').map(str::to_string).collect())
    }

    /// Whether this patient is at elevated risk for the given description:
    /// over the age threshold, or the description mentions one of their
    /// conditions, or it mentions a risk organ.
    pub fn at_risk_for(&self, description: &str) -> bool {
        let desc = description.to_lowercase();
        self.age > RISK_AGE
            || self.conditions.iter().any(|c| desc.contains(c.as_str()))
            || contains_any(&desc, RISK_KEYWORDS)
    }
}

/// Escalate a classified severity one step for at-risk patients.
///
/// Moderate becomes Severe and Mild becomes Moderate; Severe and Unknown
/// are returned unchanged. Never escalates more than one step per call.
pub fn escalate(severity: Severity, description: &str, patient: &PatientContext) -> Severity {
    if !patient.at_risk_for(description) {
        return severity;
    }
    match severity {
        Severity::Moderate => Severity::Severe,
        Severity::Mild => Severity::Moderate,
        other => other,
    }
}
