//! Embedding + model utilities.
//!
//! - [`encoder`] provides document embeddings and pairwise similarity.

/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Sentence encoder (BERT mean pooling).
pub mod encoder;
mod error;
/// Tokenizer loading and vector helpers.
pub mod utils;

pub use encoder::{ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EncoderConfig, SentenceEncoder};
pub use error::EmbeddingError;
pub use utils::cosine_similarity;
