use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fairness::{ClassificationMetrics, FairnessRatios};

/// Raw match request. Fields are untyped JSON so non-text input degrades to empty text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub job_description: Value,
    #[serde(default)]
    pub resume: Value,
}

impl MatchRequest {
    pub fn new(job_description: impl Into<String>, resume: impl Into<String>) -> Self {
        Self {
            job_description: Value::String(job_description.into()),
            resume: Value::String(resume.into()),
        }
    }
}

/// Outcome of one match evaluation, including the classifier's fairness snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub bert_similarity_score: f64,
    pub is_good_match: bool,
    pub message: String,
    pub candidate_id: String,
    pub candidate_name: String,
    pub candidate_department: String,
    pub bias_insight_message: String,
    pub fairness_metrics_overall: FairnessRatios,
    pub metrics_overall: ClassificationMetrics,
    pub fairness_metrics_by_group: BTreeMap<String, ClassificationMetrics>,
}
