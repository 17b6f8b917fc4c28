//! OpenAI-compatible completion adapter.
//!
//! Works with Groq, OpenAI, DeepSeek and any provider using the
//! OpenAI chat completions API format. One system message and one user
//! message per call; no conversation memory.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use chat_core::ports::CompletionPort;
use chat_types::{config::ProviderConfig, ProviderError};

/// Provider that speaks the OpenAI chat completions protocol.
pub struct OpenAiCompatProvider {
    config: ProviderConfig,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;
        let base_url = config.base_url();
        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn build_request_body(&self, system_prompt: &str, user_text: &str) -> Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_text },
            ],
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        })
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout(self.config.timeout_secs.unwrap_or_default())
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl CompletionPort for OpenAiCompatProvider {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, ProviderError> {
        if !self.config.has_credential() {
            return Err(ProviderError::MissingCredential);
        }

        let body = self.build_request_body(system_prompt, user_text);
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let data: ApiResponse =
            serde_json::from_slice(&bytes).map_err(|e| ProviderError::Parse(e.to_string()))?;

        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Parse("No choices in response".to_string()))?;

        let text = choice.message.content.unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err(ProviderError::EmptyReply);
        }
        Ok(text)
    }

    fn name(&self) -> &str {
        self.config.provider.label()
    }
}

// ─── API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let provider = OpenAiCompatProvider::new(ProviderConfig::default()).unwrap();
        let body = provider.build_request_body("sys", "hola");

        assert_eq!(body["model"], "gemma2-9b-it");
        assert_eq!(body["max_tokens"], 150);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hola");
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn endpoint_uses_base_url() {
        let provider = OpenAiCompatProvider::new(ProviderConfig::default()).unwrap();
        assert_eq!(
            provider.endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let provider = OpenAiCompatProvider::new(ProviderConfig {
            api_base: Some("http://127.0.0.1:1".to_string()),
            ..Default::default()
        })
        .unwrap();
        let err = provider.complete("sys", "hola").await.unwrap_err();
        assert_eq!(err, ProviderError::MissingCredential);
    }
}
