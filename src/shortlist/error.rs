use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ShortlistError {
    #[error("invalid shortlist record: {reason}")]
    InvalidRecord { reason: String },

    #[error("shortlist store failure: {0}")]
    Storage(String),
}
