//! Shortlist persistence.
//!
//! The evaluation core never touches this module; the gateway writes a record when a
//! reviewer decides to keep a candidate and lists them back for the dashboard.

mod error;
mod memory;


pub use error::ShortlistError;
pub use memory::InMemoryShortlistStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Candidate a reviewer chose to keep, as submitted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistRequest {
    pub candidate_id: String,
    pub candidate_name: String,
    pub candidate_department: String,
    pub match_score: f64,
    pub shortlisted_status: bool,
    pub simulated_gender: String,
}

impl ShortlistRequest {
    /// Rejects records the dashboard cannot display.
    pub fn validate(&self) -> Result<(), ShortlistError> {
        if self.candidate_id.trim().is_empty() {
            return Err(ShortlistError::InvalidRecord {
                reason: "candidate_id must not be empty".to_string(),
            });
        }
        if !self.match_score.is_finite() {
            return Err(ShortlistError::InvalidRecord {
                reason: format!("match_score must be finite, got {}", self.match_score),
            });
        }
        Ok(())
    }
}

/// Stored shortlist entry: the submitted fields plus server-assigned id and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistRecord {
    /// Opaque id (UUID v4).
    pub id: String,

    #[serde(flatten)]
    pub candidate: ShortlistRequest,

    /// Seconds since the Unix epoch.
    pub shortlisted_at: f64,
}

#[async_trait]
/// Storage backend for shortlisted candidates.
pub trait ShortlistStore: Send + Sync {
    /// Validates and stores `request`, returning the stored record.
    async fn create(&self, request: ShortlistRequest) -> Result<ShortlistRecord, ShortlistError>;

    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<ShortlistRecord>, ShortlistError>;
}
