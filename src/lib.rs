//! Fairmatch library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Evaluation core
//! - [`normalize`], [`normalize_value`] - Text cleaning
//! - [`SentenceEncoder`], [`EncoderConfig`] - Sentence embeddings and cosine similarity
//! - [`ReferenceDataset`] - Labeled reference table
//! - [`MatchClassifier`], [`LogisticRegression`] - Similarity-to-decision classifier
//! - [`fairness::evaluate`], [`FairnessReport`] - Group-fairness audit
//! - [`Evaluator`], [`EvaluationContext`], [`bootstrap`] - Request pipeline
//!
//! ## Outer layers
//! - [`ShortlistStore`], [`InMemoryShortlistStore`] - Shortlist persistence
//! - [`gateway`] - Axum router
//! - [`Config`] - Environment configuration

pub mod classifier;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod embedding;
pub mod evaluation;
pub mod fairness;
pub mod gateway;
pub mod shortlist;
pub mod text;

pub use classifier::{ClassifierConfig, ClassifierError, LogisticRegression, MatchClassifier};
pub use config::{Config, ConfigError};
pub use dataset::{DatasetError, ReferenceDataset, ReferenceRow, derive_label};
pub use embedding::{
    ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EmbeddingError, EncoderConfig, SentenceEncoder,
    cosine_similarity,
};
pub use evaluation::{
    Component, ComponentFailure, EvaluationContext, EvaluationError, Evaluator, InitError,
    MatchRequest, MatchResult, bootstrap,
};
pub use fairness::{
    ClassificationMetrics, ConfusionCounts, FairnessError, FairnessRatios, FairnessReport,
    GroupRates,
};
pub use gateway::{AppState, GatewayError, create_router_with_state};
pub use shortlist::{InMemoryShortlistStore, ShortlistError, ShortlistRecord, ShortlistRequest, ShortlistStore};
pub use text::{normalize, normalize_value};
