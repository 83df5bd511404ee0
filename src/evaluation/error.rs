use thiserror::Error;

use crate::classifier::ClassifierError;
use crate::dataset::DatasetError;
use crate::embedding::EmbeddingError;
use crate::fairness::FairnessError;

/// Startup failure of one evaluation dependency.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("encoder unavailable: {0}")]
    Encoder(#[from] EmbeddingError),

    #[error("reference dataset unavailable: {0}")]
    Dataset(#[from] DatasetError),

    #[error("classifier unavailable: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("classifier unavailable: reference dataset failed to load")]
    ClassifierNeedsDataset,
}

#[derive(Debug, Error)]
pub enum EvaluationError {
    /// A dependency failed at startup; every call reports this until restart.
    #[error("service not ready: {}", .reasons.join("; "))]
    NotReady { reasons: Vec<String> },

    #[error("similarity computation failed: {0}")]
    Similarity(#[from] EmbeddingError),

    #[error("fairness computation failed: {0}")]
    Fairness(#[from] FairnessError),
}

impl EvaluationError {
    pub fn is_not_ready(&self) -> bool {
        matches!(self, EvaluationError::NotReady { .. })
    }
}
