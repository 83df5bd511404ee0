//! Match-and-fairness evaluation pipeline.
//!
//! [`EvaluationContext`] owns the encoder, the trained classifier and the reference dataset;
//! it is built once at startup and only read afterwards. [`Evaluator`] wraps it together
//! with any startup failures so a half-initialized service answers "not ready" instead of
//! producing partial results.

pub mod error;
pub mod types;


pub use error::{EvaluationError, InitError};
pub use types::{MatchRequest, MatchResult};

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use crate::classifier::{ClassifierConfig, ClassifierError, MatchClassifier};
use crate::config::Config;
use crate::constants::{
    GOOD_MATCH_MESSAGE, NOT_GOOD_MATCH_MESSAGE, PLACEHOLDER_CANDIDATE_DEPARTMENT,
    PLACEHOLDER_CANDIDATE_NAME,
};
use crate::dataset::ReferenceDataset;
use crate::embedding::{EmbeddingError, EncoderConfig, SentenceEncoder};
use crate::fairness::{self, FairnessError, FairnessRatios, FairnessReport};
use crate::text::normalize_value;

/// Immutable pipeline state shared by every request.
#[derive(Debug)]
pub struct EvaluationContext {
    encoder: SentenceEncoder,
    classifier: MatchClassifier,
    dataset: ReferenceDataset,
}

impl EvaluationContext {
    pub fn new(
        encoder: SentenceEncoder,
        classifier: MatchClassifier,
        dataset: ReferenceDataset,
    ) -> Self {
        Self {
            encoder,
            classifier,
            dataset,
        }
    }

    /// Trains the classifier on `dataset` and assembles the context.
    pub fn train(
        encoder: SentenceEncoder,
        dataset: ReferenceDataset,
        classifier_config: ClassifierConfig,
    ) -> Result<Self, ClassifierError> {
        let classifier = MatchClassifier::train(&dataset, classifier_config)?;
        Ok(Self::new(encoder, classifier, dataset))
    }

    pub fn encoder(&self) -> &SentenceEncoder {
        &self.encoder
    }

    pub fn classifier(&self) -> &MatchClassifier {
        &self.classifier
    }

    pub fn dataset(&self) -> &ReferenceDataset {
        &self.dataset
    }

    /// Fairness of the classifier over the whole reference dataset.
    ///
    /// Depends only on the static dataset and classifier, so every call returns the same
    /// snapshot.
    pub fn fairness_snapshot(&self) -> Result<FairnessReport, FairnessError> {
        let predictions = self.classifier.predict_dataset(&self.dataset);
        fairness::evaluate(
            &self.dataset.labels(),
            &predictions,
            &self.dataset.groups(),
        )
    }

    /// Normalize, embed, classify, audit, assemble.
    pub fn evaluate(&self, request: &MatchRequest) -> Result<MatchResult, EvaluationError> {
        let job_description = normalize_value(&request.job_description);
        let resume = normalize_value(&request.resume);

        let similarity = f64::from(self.encoder.similarity(&job_description, &resume)?);
        let is_good_match = self.classifier.predict(similarity);

        let report = self.fairness_snapshot()?;

        debug!(
            similarity,
            is_good_match,
            job_len = job_description.len(),
            resume_len = resume.len(),
            "Match evaluated"
        );

        Ok(MatchResult {
            bert_similarity_score: similarity,
            is_good_match,
            message: match_message(is_good_match).to_string(),
            candidate_id: temp_candidate_id(),
            candidate_name: PLACEHOLDER_CANDIDATE_NAME.to_string(),
            candidate_department: PLACEHOLDER_CANDIDATE_DEPARTMENT.to_string(),
            bias_insight_message: bias_insight_message(&report.ratios),
            fairness_metrics_overall: report.ratios,
            metrics_overall: report.overall,
            fairness_metrics_by_group: report.by_group,
        })
    }
}

/// Pipeline dependency, for readiness reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Encoder,
    Dataset,
    Classifier,
}

impl Component {
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Encoder => "encoder",
            Component::Dataset => "dataset",
            Component::Classifier => "classifier",
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded startup failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentFailure {
    pub component: Component,
    pub reason: String,
}

/// Request-facing entry point: either a ready context or the startup failures.
#[derive(Debug, Clone)]
pub struct Evaluator {
    context: Option<Arc<EvaluationContext>>,
    failures: Arc<Vec<ComponentFailure>>,
    encoder_stub: Option<bool>,
}

impl Evaluator {
    pub fn ready(context: EvaluationContext) -> Self {
        let encoder_stub = Some(context.encoder.is_stub());
        Self {
            context: Some(Arc::new(context)),
            failures: Arc::new(Vec::new()),
            encoder_stub,
        }
    }

    pub fn not_ready(failures: Vec<ComponentFailure>) -> Self {
        Self {
            context: None,
            failures: Arc::new(failures),
            encoder_stub: None,
        }
    }

    /// Records the mode of an encoder that loaded even though the pipeline did not.
    pub fn with_encoder_stub(mut self, is_stub: bool) -> Self {
        if self.context.is_none() {
            self.encoder_stub = Some(is_stub);
        }
        self
    }

    pub fn is_ready(&self) -> bool {
        self.context.is_some()
    }

    /// Whether `component` initialized.
    pub fn component_ready(&self, component: Component) -> bool {
        self.is_ready() || !self.failures.iter().any(|f| f.component == component)
    }

    pub fn failures(&self) -> &[ComponentFailure] {
        &self.failures
    }

    /// `Some(true)` for the stub encoder, `None` if the encoder did not load.
    pub fn encoder_stub(&self) -> Option<bool> {
        self.encoder_stub
    }

    pub fn context(&self) -> Result<&Arc<EvaluationContext>, EvaluationError> {
        self.context.as_ref().ok_or_else(|| EvaluationError::NotReady {
            reasons: self
                .failures
                .iter()
                .map(|f| format!("{}: {}", f.component, f.reason))
                .collect(),
        })
    }

    pub fn evaluate(&self, request: &MatchRequest) -> Result<MatchResult, EvaluationError> {
        self.context()?.evaluate(request)
    }
}

/// Builds the evaluator from configuration, recording (not returning) load failures.
#[instrument(skip(config), fields(data_path = %config.data_path.display()))]
pub fn bootstrap(config: &Config) -> Evaluator {
    let mut failures = Vec::new();

    let encoder = match load_encoder(config) {
        Ok(encoder) => Some(encoder),
        Err(e) => {
            error!(error = %e, "Sentence encoder failed to load");
            failures.push(failure(Component::Encoder, InitError::from(e)));
            None
        }
    };

    let dataset = match ReferenceDataset::load(&config.data_path, config.match_threshold) {
        Ok(dataset) => Some(dataset),
        Err(e) => {
            error!(error = %e, "Reference dataset failed to load");
            failures.push(failure(Component::Dataset, InitError::from(e)));
            None
        }
    };

    let classifier = match &dataset {
        Some(dataset) => {
            let classifier_config = ClassifierConfig::default().with_seed(config.seed);
            match MatchClassifier::train(dataset, classifier_config) {
                Ok(classifier) => Some(classifier),
                Err(e) => {
                    error!(error = %e, "Match classifier failed to train");
                    failures.push(failure(Component::Classifier, InitError::from(e)));
                    None
                }
            }
        }
        None => {
            warn!("Skipping classifier training: no reference dataset");
            failures.push(failure(
                Component::Classifier,
                InitError::ClassifierNeedsDataset,
            ));
            None
        }
    };

    let encoder_stub = encoder.as_ref().map(SentenceEncoder::is_stub);

    match (encoder, classifier, dataset) {
        (Some(encoder), Some(classifier), Some(dataset)) => {
            info!(
                rows = dataset.len(),
                encoder_stub = encoder.is_stub(),
                "Evaluation pipeline ready"
            );
            Evaluator::ready(EvaluationContext::new(encoder, classifier, dataset))
        }
        _ => {
            warn!(
                failures = failures.len(),
                "Evaluation pipeline NOT ready; match requests will be rejected"
            );
            let evaluator = Evaluator::not_ready(failures);
            match encoder_stub {
                Some(is_stub) => evaluator.with_encoder_stub(is_stub),
                None => evaluator,
            }
        }
    }
}

fn load_encoder(config: &Config) -> Result<SentenceEncoder, EmbeddingError> {
    let encoder_config = match (&config.model_path, config.encoder_stub) {
        (Some(path), _) => EncoderConfig::new(path.clone()),
        (None, true) => {
            warn!("No FAIRMATCH_MODEL_PATH configured, running encoder in stub mode");
            EncoderConfig::stub()
        }
        (None, false) => {
            return Err(EmbeddingError::InvalidConfig {
                reason: "no model path configured (set FAIRMATCH_MODEL_PATH)".to_string(),
            });
        }
    };
    SentenceEncoder::load(encoder_config.with_max_seq_len(config.max_seq_len))
}

fn failure(component: Component, err: InitError) -> ComponentFailure {
    ComponentFailure {
        component,
        reason: err.to_string(),
    }
}

pub fn match_message(is_good_match: bool) -> &'static str {
    if is_good_match {
        GOOD_MATCH_MESSAGE
    } else {
        NOT_GOOD_MATCH_MESSAGE
    }
}

pub fn bias_insight_message(ratios: &FairnessRatios) -> String {
    format!(
        "Bias insights for the overall model are calculated based on the full dataset. \
         Demographic Parity Ratio: {:.3}. Equalized Odds Ratio: {:.3}. \
         Detailed per-group metrics are available.",
        ratios.demographic_parity_ratio, ratios.equalized_odds_ratio
    )
}

fn temp_candidate_id() -> String {
    format!("temp_candidate_{}", rand::random_range(1000..10000))
}
