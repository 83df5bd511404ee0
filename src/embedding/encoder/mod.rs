//! Sentence encoder (BERT + mean pooling) that scores document pairs by cosine similarity.
//!
//! Use [`EncoderConfig::stub`] for tests/examples without model files.

/// Encoder configuration.
pub mod config;
pub(crate) mod model;

#[cfg(test)]
mod tests;

pub use config::{ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EncoderConfig};

use candle_core::Device;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::device::{device_label, select_device};
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::{cosine_similarity, l2_normalize, load_tokenizer};

use model::MeanPooledBert;

enum EncoderBackend {
    Model {
        model: MeanPooledBert,
        tokenizer: Tokenizer,
        device: Device,
    },
    Stub,
}

/// Embedding model wrapper; load once and share (`&self` inference, no interior locking).
pub struct SentenceEncoder {
    backend: EncoderBackend,
    config: EncoderConfig,
}

impl std::fmt::Debug for SentenceEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.embedding_dim())
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEncoder {
    /// Loads the encoder from a config (stub mode is supported).
    pub fn load(config: EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Sentence encoder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
            });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for sentence encoder");

        let tokenizer = load_tokenizer(&config.tokenizer_path(), config.max_seq_len).map_err(
            |e| EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            },
        )?;

        let model = MeanPooledBert::load(&config.config_path(), &config.weights_path(), &device)
            .map_err(|e| EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {}", e),
            })?;

        info!(
            model_dir = %config.model_dir.display(),
            hidden_size = model.hidden_size(),
            max_seq_len = config.max_seq_len,
            device = device_label(&device),
            "Sentence encoder loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model,
                tokenizer,
                device,
            },
            config,
        })
    }

    /// Embeds one (already normalized) document as a unit vector; empty text gives zeros.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Ok(vec![0.0; self.embedding_dim()]);
        }

        let mut embedding = match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => {
                let encoding =
                    tokenizer
                        .encode(text, true)
                        .map_err(|e| EmbeddingError::TokenizationFailed {
                            reason: e.to_string(),
                        })?;

                debug!(
                    text_len = text.len(),
                    token_count = encoding.get_ids().len(),
                    "Encoding document (transformer forward pass)"
                );

                model
                    .embed(
                        encoding.get_ids(),
                        encoding.get_type_ids(),
                        encoding.get_attention_mask(),
                        device,
                    )
                    .map_err(|e| EmbeddingError::InferenceFailed {
                        reason: format!("Transformer forward pass failed: {}", e),
                    })?
            }
            EncoderBackend::Stub => self.embed_stub(text),
        };

        l2_normalize(&mut embedding);
        Ok(embedding)
    }

    /// Cosine similarity of the two documents' embeddings.
    pub fn similarity(&self, a: &str, b: &str) -> Result<f32, EmbeddingError> {
        let left = self.embed(a)?;
        let right = self.embed(b)?;
        let score = cosine_similarity(&left, &right);

        debug!(score, "Computed document similarity");
        Ok(score)
    }

    /// Hashed word + character-trigram features; shares vocabulary the way a bag-of-words
    /// model would, so overlapping documents score higher than unrelated ones.
    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let dim = self.config.embedding_dim;
        let mut embedding = vec![0.0f32; dim];

        for word in text.split_whitespace() {
            add_hashed_feature(&mut embedding, word, 1.0);

            let padded: Vec<char> = format!("<{word}>").chars().collect();
            for gram in padded.windows(3) {
                let gram: String = gram.iter().collect();
                add_hashed_feature(&mut embedding, &gram, 0.5);
            }
        }

        embedding
    }

    /// Returns the output dimension (the model's hidden size when a model is loaded).
    pub fn embedding_dim(&self) -> usize {
        match &self.backend {
            EncoderBackend::Model { model, .. } => model.hidden_size(),
            EncoderBackend::Stub => self.config.embedding_dim,
        }
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    /// Returns `true` if a model is loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, EncoderBackend::Model { .. })
    }

    /// Device label (`"stub"` in stub mode).
    pub fn device_label(&self) -> &'static str {
        match &self.backend {
            EncoderBackend::Model { device, .. } => device_label(device),
            EncoderBackend::Stub => "stub",
        }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

fn add_hashed_feature(embedding: &mut [f32], feature: &str, weight: f32) {
    let digest = blake3::hash(feature.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest.as_bytes()[..8]);
    let hash = u64::from_le_bytes(prefix);

    let bucket = (hash % embedding.len() as u64) as usize;
    let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
    embedding[bucket] += sign * weight;
}
