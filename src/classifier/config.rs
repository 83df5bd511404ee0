use crate::classifier::error::ClassifierError;
use crate::constants::{DEFAULT_CLASSIFIER_SEED, DEFAULT_REGULARIZATION_C};

pub const DEFAULT_MAX_ITER: usize = 100;

/// Relative gradient-norm tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Inverse regularization strength (penalty applies to weight and intercept).
    pub c: f64,
    /// Seed for the row visiting order.
    pub seed: u64,
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            c: DEFAULT_REGULARIZATION_C,
            seed: DEFAULT_CLASSIFIER_SEED,
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ClassifierConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_c(mut self, c: f64) -> Self {
        self.c = c;
        self
    }

    pub fn validate(&self) -> Result<(), ClassifierError> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(ClassifierError::InvalidConfig {
                reason: format!("c must be a positive finite number, got {}", self.c),
            });
        }
        if self.max_iter == 0 {
            return Err(ClassifierError::InvalidConfig {
                reason: "max_iter must be greater than zero".to_string(),
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ClassifierError::InvalidConfig {
                reason: format!("tolerance must be positive, got {}", self.tolerance),
            });
        }
        Ok(())
    }
}
