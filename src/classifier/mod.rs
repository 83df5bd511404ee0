//! Match classifier: similarity score -> good-match decision.
//!
//! A single-feature logistic regression, fit once on the reference dataset and never
//! mutated afterwards. [`MatchClassifier::train`] is the startup entry point.

pub mod config;
pub mod error;
pub mod logistic;


pub use config::{ClassifierConfig, DEFAULT_MAX_ITER, DEFAULT_TOLERANCE};
pub use error::ClassifierError;
pub use logistic::LogisticRegression;

use tracing::info;

use crate::dataset::ReferenceDataset;

/// Trained classifier bound to the dataset it was fit on.
#[derive(Debug, Clone)]
pub struct MatchClassifier {
    model: LogisticRegression,
    config: ClassifierConfig,
}

impl MatchClassifier {
    /// Fits on the dataset's similarity column against its derived labels.
    pub fn train(
        dataset: &ReferenceDataset,
        config: ClassifierConfig,
    ) -> Result<Self, ClassifierError> {
        let model = LogisticRegression::fit(&dataset.similarities(), &dataset.labels(), &config)?;

        info!(
            rows = dataset.len(),
            weight = model.weight(),
            intercept = model.intercept(),
            boundary = model.decision_boundary(),
            iterations = model.iterations(),
            seed = config.seed,
            "Match classifier trained"
        );

        Ok(Self { model, config })
    }

    /// Wraps an already-fitted model.
    pub fn from_model(model: LogisticRegression, config: ClassifierConfig) -> Self {
        Self { model, config }
    }

    pub fn predict(&self, similarity: f64) -> bool {
        self.model.predict(similarity)
    }

    pub fn predict_proba(&self, similarity: f64) -> f64 {
        self.model.predict_proba(similarity)
    }

    /// Predictions for every row of `dataset`, in row order.
    pub fn predict_dataset(&self, dataset: &ReferenceDataset) -> Vec<bool> {
        self.model.predict_many(&dataset.similarities())
    }

    pub fn model(&self) -> &LogisticRegression {
        &self.model
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}
