//! Interaction table — the static pairwise drug-interaction dataset.
//!
//! Loaded once at startup from a CSV file and shared read-only for the
//! lifetime of the process. Keys are canonical unordered drug-name pairs,
//! so lookup is symmetric by construction.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading the interaction dataset.
///
/// All of these are fatal at startup: the checker cannot run without
/// a complete table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Cannot open interaction dataset {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed row in interaction dataset: {0}")]
    Malformed(#[from] csv::Error),
    #[error("Interaction dataset contains no rows")]
    Empty,
}

/// Raw CSV row. Column headers match the published dataset.
#[derive(Debug, Deserialize)]
struct InteractionRow {
    #[serde(rename = "Drug 1")]
    drug_a: String,
    #[serde(rename = "Drug 2")]
    drug_b: String,
    #[serde(rename = "Interaction Description")]
    description: String,
}

/// Canonical unordered pair of normalized drug names.
///
/// Construction trims, lowercases, and sorts the two names, so
/// `DrugPair::new(a, b) == DrugPair::new(b, a)` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrugPair {
    first: String,
    second: String,
}

impl DrugPair {
    pub fn new(a: &str, b: &str) -> Self {
        let a = normalize_name(a);
        let b = normalize_name(b);
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Lexicographically smaller name of the pair.
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Lexicographically larger name of the pair.
    pub fn second(&self) -> &str {
        &self.second
    }
}

/// Normalize a drug name for keying: whitespace-trimmed, lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Loaded interaction table. Immutable after construction.
pub struct InteractionTable {
    pairs: HashMap<DrugPair, String>,
    known_drugs: Vec<String>,
}

impl InteractionTable {
    /// Load the table from a CSV file with `Drug 1`, `Drug 2`,
    /// `Interaction Description` columns.
    ///
    /// Duplicate pairs resolve last-row-wins; each overwrite emits a
    /// warning so dirty datasets are visible in the logs.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let file = std::fs::File::open(path).map_err(|e| TableError::Open {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut reader = csv::Reader::from_reader(file);
        let mut pairs: HashMap<DrugPair, String> = HashMap::new();

        for row in reader.deserialize() {
            let row: InteractionRow = row?;
            let pair = DrugPair::new(&row.drug_a, &row.drug_b);
            if let Some(previous) = pairs.insert(pair.clone(), row.description) {
                tracing::warn!(
                    drug_a = pair.first(),
                    drug_b = pair.second(),
                    "Duplicate interaction pair in dataset; keeping last row \
                     (previous description {} chars)",
                    previous.len()
                );
            }
        }

        if pairs.is_empty() {
            return Err(TableError::Empty);
        }

        let known_drugs = collect_known_drugs(&pairs);

        tracing::info!(
            pairs = pairs.len(),
            drugs = known_drugs.len(),
            path = %path.display(),
            "Interaction table loaded"
        );

        Ok(Self { pairs, known_drugs })
    }

    /// Look up the interaction description for two drugs, in either order.
    pub fn lookup(&self, a: &str, b: &str) -> Option<&str> {
        self.pairs.get(&DrugPair::new(a, b)).map(String::as_str)
    }

    /// All distinct drug names in the table, sorted, for the selector.
    pub fn known_drugs(&self) -> &[String] {
        &self.known_drugs
    }

    /// Number of known interaction pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Build a small in-memory table for tests (no file I/O).
    #[cfg(test)]
    pub fn load_test() -> Self {
        Self::from_rows(&[
            (
                "aspirin",
                "warfarin",
                "May increase the risk of severe bleeding.",
            ),
            (
                "ibuprofen",
                "lisinopril",
                "May reduce the blood pressure lowering effect.",
            ),
            (
                "metformin",
                "alcohol",
                "May cause a serious condition called lactic acidosis.",
            ),
            (
                "paracetamol",
                "caffeine",
                "Mild and temporary increase in alertness.",
            ),
        ])
    }

    /// Construct directly from rows. Test helper shared by unit tests in
    /// other modules.
    #[cfg(test)]
    pub fn from_rows(rows: &[(&str, &str, &str)]) -> Self {
        let mut pairs = HashMap::new();
        for (a, b, desc) in rows {
            pairs.insert(DrugPair::new(a, b), (*desc).to_string());
        }
        let known_drugs = collect_known_drugs(&pairs);
        Self { pairs, known_drugs }
    }
}

fn collect_known_drugs(pairs: &HashMap<DrugPair, String>) -> Vec<String> {
    let mut drugs: Vec<String> = pairs
        .keys()
        .flat_map(|p| [p.first().to_string(), p.second().to_string()])
        .collect();
    drugs.sort();
    drugs.dedup();
    drugs
}
