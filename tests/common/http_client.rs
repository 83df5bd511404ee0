//! HTTP client helpers for tests.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use fairmatch::evaluation::MatchResult;
use fairmatch::gateway::FAIRMATCH_STATUS_HEADER;
use fairmatch::shortlist::{ShortlistRecord, ShortlistRequest};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ShortlistResponse {
    pub message: String,
    pub id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status {0}: {1}")]
    UnexpectedStatus(u16, String),
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    fn status_header(resp: &reqwest::Response) -> String {
        resp.headers()
            .get(FAIRMATCH_STATUS_HEADER)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string()
    }

    async fn expect_success<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<(T, String), TestClientError> {
        let header = Self::status_header(&resp);
        if resp.status().is_success() {
            Ok((resp.json().await?, header))
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;
        Ok(Self::expect_success(resp).await?.0)
    }

    /// Readiness status code and body (both 200 and 503 carry a body).
    pub async fn ready(&self) -> Result<(u16, Value), TestClientError> {
        let resp = self.client.get(self.url("/ready")).send().await?;
        let status = resp.status().as_u16();
        Ok((status, resp.json().await?))
    }

    pub async fn match_documents(
        &self,
        job_description: &str,
        resume: &str,
    ) -> Result<(MatchResult, String), TestClientError> {
        let resp = self
            .client
            .post(self.url("/match"))
            .json(&serde_json::json!({
                "job_description": job_description,
                "resume": resume,
            }))
            .send()
            .await?;
        Self::expect_success(resp).await
    }

    /// Raw `/match` call returning status, status header and JSON body.
    pub async fn match_raw(&self, body: &Value) -> Result<(u16, String, Value), TestClientError> {
        let resp = self.client.post(self.url("/match")).json(body).send().await?;
        let status = resp.status().as_u16();
        let header = Self::status_header(&resp);
        Ok((status, header, resp.json().await?))
    }

    pub async fn shortlist(
        &self,
        request: &ShortlistRequest,
    ) -> Result<ShortlistResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/shortlist_candidate"))
            .json(request)
            .send()
            .await?;
        Ok(Self::expect_success(resp).await?.0)
    }

    pub async fn shortlisted(&self) -> Result<Vec<ShortlistRecord>, TestClientError> {
        let resp = self
            .client
            .get(self.url("/get_shortlisted_candidates"))
            .send()
            .await?;
        Ok(Self::expect_success(resp).await?.0)
    }
}
