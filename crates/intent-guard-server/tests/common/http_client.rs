//! HTTP client helpers for tests.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
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

    /// Posts `{"text": text}` to `/predict`.
    pub async fn predict(&self, text: &str) -> Result<PredictResponse, TestClientError> {
        self.predict_json(serde_json::json!({ "text": text })).await
    }

    /// Posts an arbitrary JSON body to `/predict`.
    pub async fn predict_json(
        &self,
        body: serde_json::Value,
    ) -> Result<PredictResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/predict"))
            .json(&body)
            .send()
            .await?;

        match resp.status().as_u16() {
            200 => Ok(resp.json().await?),
            400 => Err(TestClientError::BadRequest(resp.text().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    /// Posts a raw body with the given content type, returning status and body text.
    pub async fn post_raw(
        &self,
        content_type: &str,
        body: &str,
    ) -> Result<(u16, String), TestClientError> {
        let resp = self
            .client
            .post(self.url("/predict"))
            .header("Content-Type", content_type)
            .body(body.to_string())
            .send()
            .await?;

        let status = resp.status().as_u16();
        Ok((status, resp.text().await?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PredictResponse {
    pub is_bullying: bool,
    pub intent_score: f32,
    pub severity: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_building() {
        let client = TestClient::new("http://127.0.0.1:5000");
        assert_eq!(client.url("/predict"), "http://127.0.0.1:5000/predict");
        assert_eq!(client.url("predict"), "http://127.0.0.1:5000/predict");
    }
}
