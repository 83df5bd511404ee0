//! Labeled reference dataset used to train the classifier and audit its fairness.
//!
//! Loaded once from CSV. Only three columns are read (see [`crate::constants`]); any other
//! columns are ignored. The `is_good_match` label is derived here and nowhere else, so the
//! classifier's training target and the fairness audit always agree.

pub mod error;


pub use error::DatasetError;

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::constants::{COLUMN_MATCH_SCORE, COLUMN_SENSITIVE, COLUMN_SIMILARITY};

/// Returns `true` when a raw match score counts as a good match.
pub fn derive_label(match_score: f64, threshold: f64) -> bool {
    match_score >= threshold
}

#[derive(Debug, Clone, PartialEq)]
/// One labeled row.
pub struct ReferenceRow {
    /// Precomputed similarity between the row's resume and job description.
    pub similarity: f64,
    /// Ground-truth match score.
    pub match_score: f64,
    /// Derived label (`match_score >= threshold`).
    pub is_good_match: bool,
    /// Sensitive-attribute value.
    pub group: String,
}

/// Immutable reference table.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    rows: Vec<ReferenceRow>,
    threshold: f64,
}

impl ReferenceDataset {
    /// Loads the dataset from a CSV file with a header row.
    pub fn load(path: &Path, threshold: f64) -> Result<Self, DatasetError> {
        if !path.is_file() {
            return Err(DatasetError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file, threshold)?;

        info!(
            path = %path.display(),
            rows = dataset.len(),
            groups = dataset.group_labels().len(),
            positives = dataset.rows.iter().filter(|r| r.is_good_match).count(),
            threshold,
            "Reference dataset loaded"
        );

        Ok(dataset)
    }

    /// Parses CSV (with a header row) from any reader.
    pub fn from_reader<R: Read>(reader: R, threshold: f64) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(DatasetError::MissingColumn { name })
        };
        let similarity_idx = column(COLUMN_SIMILARITY)?;
        let score_idx = column(COLUMN_MATCH_SCORE)?;
        let group_idx = column(COLUMN_SENSITIVE)?;

        let mut rows = Vec::new();
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            // Header is line 1; report data rows by their 1-based position.
            let row = i + 1;

            let similarity = parse_float(&record, similarity_idx, row, COLUMN_SIMILARITY)?;
            let match_score = parse_float(&record, score_idx, row, COLUMN_MATCH_SCORE)?;
            let group = record.get(group_idx).unwrap_or_default().to_string();

            rows.push(ReferenceRow {
                similarity,
                match_score,
                is_good_match: derive_label(match_score, threshold),
                group,
            });
        }

        debug!(rows = rows.len(), "Parsed reference dataset records");
        Self::from_rows(rows, threshold)
    }

    /// Builds a dataset from `(similarity, match_score, group)` triples.
    pub fn from_scores<G, I>(scores: I, threshold: f64) -> Result<Self, DatasetError>
    where
        G: Into<String>,
        I: IntoIterator<Item = (f64, f64, G)>,
    {
        let rows = scores
            .into_iter()
            .map(|(similarity, match_score, group)| ReferenceRow {
                similarity,
                match_score,
                is_good_match: derive_label(match_score, threshold),
                group: group.into(),
            })
            .collect();
        Self::from_rows(rows, threshold)
    }

    fn from_rows(rows: Vec<ReferenceRow>, threshold: f64) -> Result<Self, DatasetError> {
        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(Self { rows, threshold })
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Threshold the labels were derived with.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Similarity column, in row order.
    pub fn similarities(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.similarity).collect()
    }

    /// Derived labels, in row order.
    pub fn labels(&self) -> Vec<bool> {
        self.rows.iter().map(|r| r.is_good_match).collect()
    }

    /// Sensitive-attribute column, in row order.
    pub fn groups(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.group.as_str()).collect()
    }

    /// Distinct sensitive-attribute values, sorted.
    pub fn group_labels(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|r| r.group.as_str()).collect()
    }
}

fn parse_float(
    record: &csv::StringRecord,
    idx: usize,
    row: usize,
    column: &'static str,
) -> Result<f64, DatasetError> {
    let raw = record.get(idx).unwrap_or_default();
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DatasetError::InvalidValue {
            row,
            column,
            value: raw.to_string(),
        }),
    }
}
