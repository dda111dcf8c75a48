use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

/// Strategy interface for narrative drafting. Implementations must be
/// time-bounded; callers are never left without a result because the
/// synthesizer falls back to its template on any error.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, NarrativeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("narrative service request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("narrative service returned an unusable payload")]
    MalformedResponse,
}

const SYSTEM_PROMPT: &str =
    "You are drafting the cost-allocation section of an arbitral award. \
Write formal, neutral prose. Keep strictly to the figures provided.";

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// Generation settings are fixed: low temperature, bounded length. The
/// request timeout is wired into the underlying client, so a hung service
/// resolves to an error rather than blocking the caller.
pub struct ChatCompletionsGenerator {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl ChatCompletionsGenerator {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        model: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl NarrativeGenerator for ChatCompletionsGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, NarrativeError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "temperature": 0.2,
            "max_tokens": 600,
        });

        let mut request = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.base_url.trim_end_matches('/')
            ))
            .json(&body);

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?.error_for_status()?;
        let payload: serde_json::Value = response.json().await?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or(NarrativeError::MalformedResponse)
    }
}
