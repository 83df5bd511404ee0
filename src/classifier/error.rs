use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ClassifierError {
    #[error("cannot fit classifier on an empty dataset")]
    Empty,

    #[error("feature/target length mismatch: {features} features, {targets} targets")]
    LengthMismatch { features: usize, targets: usize },

    #[error("non-finite feature value at row {index}")]
    NonFiniteFeature { index: usize },

    #[error("training target contains a single class (all {label})")]
    SingleClass { label: bool },

    #[error("invalid classifier configuration: {reason}")]
    InvalidConfig { reason: String },
}
