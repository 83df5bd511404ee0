use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{ShortlistError, ShortlistRecord, ShortlistRequest, ShortlistStore};

/// Process-local shortlist; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryShortlistStore {
    records: RwLock<Vec<ShortlistRecord>>,
}

impl InMemoryShortlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl ShortlistStore for InMemoryShortlistStore {
    async fn create(&self, request: ShortlistRequest) -> Result<ShortlistRecord, ShortlistError> {
        request.validate()?;

        let record = ShortlistRecord {
            id: Uuid::new_v4().to_string(),
            candidate: request,
            shortlisted_at: Utc::now().timestamp_micros() as f64 / 1_000_000.0,
        };

        self.records.write().push(record.clone());
        debug!(id = %record.id, candidate_id = %record.candidate.candidate_id, "Candidate shortlisted");

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ShortlistRecord>, ShortlistError> {
        Ok(self.records.read().clone())
    }
}
