//! HTTP client for the text-generation inference server.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Errors from the text-generation service.
#[derive(Debug, thiserror::Error)]
pub enum TextGenError {
    /// The service could not be reached or timed out.
    #[error("Text generator unreachable: {0}")]
    Connection(String),

    /// The service answered but not with the expected payload.
    #[error("Text generator protocol error: {0}")]
    Protocol(String),
}

/// The one capability the engine consumes: seed text in, generated text out.
///
/// Output is nondeterministic and unconstrained; callers are responsible
/// for cleanup and for bounding any regeneration loop.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, seed: &str) -> Result<String, TextGenError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    text: String,
}

/// Client for the inference server's `POST /generate` endpoint.
pub struct HttpTextGenerator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTextGenerator {
    /// Default per-request timeout. Generation is slow but not minutes-slow.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

    /// Create a client targeting `base_url` (e.g. `http://localhost:9090`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, seed: &str) -> Result<String, TextGenError> {
        let url = format!("{}/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest { prompt: seed })
            .send()
            .await
            .map_err(|e| TextGenError::Connection(format!("POST {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TextGenError::Protocol(format!(
                "POST {url} returned {status}"
            )));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| TextGenError::Protocol(format!("invalid generate payload: {e}")))?;

        tracing::debug!(chars = payload.text.len(), "Text generator responded");
        Ok(payload.text)
    }
}
