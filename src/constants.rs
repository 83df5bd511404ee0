//! Cross-cutting, shared constants.
//!
//! The match threshold and classifier seed are part of the training contract: the reference
//! labels and the live classifier must agree on both, so every module reads them from here.

/// Sentence-embedding model the encoder is built around.
pub const DEFAULT_MODEL_ID: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Hidden size of `all-MiniLM-L6-v2` (and the stub encoder's output size).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Token cap per document (the model was trained with 256-token inputs).
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// A reference row is a good match when its raw match score is at least this value.
pub const GOOD_MATCH_THRESHOLD: f64 = 4.0;

/// Seed for the classifier's row ordering.
pub const DEFAULT_CLASSIFIER_SEED: u64 = 42;

/// Inverse L2 regularization strength.
pub const DEFAULT_REGULARIZATION_C: f64 = 1.0;

pub const DEFAULT_DATA_PATH: &str = "./data/resume_job_match_with_gender.csv";

/// CSV column holding the precomputed similarity score.
pub const COLUMN_SIMILARITY: &str = "bert_similarity_score";
/// CSV column holding the ground-truth match score.
pub const COLUMN_MATCH_SCORE: &str = "match_score";
/// CSV column holding the sensitive attribute.
pub const COLUMN_SENSITIVE: &str = "simulated_gender";

pub const GOOD_MATCH_MESSAGE: &str = "Candidate is a good match for shortlisting!";
pub const NOT_GOOD_MATCH_MESSAGE: &str = "Candidate is not a good match for shortlisting.";

/// Placeholder identity attached to every match result.
pub const PLACEHOLDER_CANDIDATE_NAME: &str = "N/A";
pub const PLACEHOLDER_CANDIDATE_DEPARTMENT: &str = "Software";
