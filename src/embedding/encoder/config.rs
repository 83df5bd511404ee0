use std::path::{Path, PathBuf};

use crate::embedding::error::EmbeddingError;

/// Default encoder output dimension.
pub const ENCODER_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// Default encoder max sequence length.
pub const ENCODER_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

#[derive(Debug, Clone)]
/// Configuration for [`SentenceEncoder`](super::SentenceEncoder).
pub struct EncoderConfig {
    /// Model directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    pub model_dir: PathBuf,
    /// Max tokens per document.
    pub max_seq_len: usize,
    /// Output dimension used by the stub backend (the real model reports its own).
    pub embedding_dim: usize,
    /// If true, run the deterministic stub backend (no model files required).
    pub testing_stub: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            max_seq_len: ENCODER_MAX_SEQ_LEN,
            embedding_dim: ENCODER_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

impl EncoderConfig {
    pub const CONFIG_FILE: &'static str = "config.json";
    pub const WEIGHTS_FILE: &'static str = "model.safetensors";
    pub const TOKENIZER_FILE: &'static str = "tokenizer.json";

    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; deterministic hashed-feature embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.model_dir.join(Self::CONFIG_FILE)
    }

    pub fn weights_path(&self) -> PathBuf {
        self.model_dir.join(Self::WEIGHTS_FILE)
    }

    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join(Self::TOKENIZER_FILE)
    }

    /// Checks the config; outside stub mode every model file must exist.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }

        if self.testing_stub {
            if self.embedding_dim == 0 {
                return Err(EmbeddingError::InvalidConfig {
                    reason: "embedding_dim must be greater than zero".to_string(),
                });
            }
            return Ok(());
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        }

        if !self.model_dir.is_dir() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_dir.clone(),
            });
        }

        for path in [
            self.config_path(),
            self.weights_path(),
            self.tokenizer_path(),
        ] {
            require_file(&path)?;
        }

        Ok(())
    }
}

fn require_file(path: &Path) -> Result<(), EmbeddingError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(EmbeddingError::ModelNotFound {
            path: path.to_path_buf(),
        })
    }
}
