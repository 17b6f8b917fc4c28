//! Chat backend transport over browser `fetch()` via gloo-net.

use async_trait::async_trait;
use gloo_net::http::Request;

use chat_core::ports::ChatTransport;
use chat_types::{
    api::{ChatRequest, ChatResponse},
    config::ClientConfig,
    ChatError, Result,
};

/// Posts chat turns to `{backend_url}/chat`.
pub struct HttpChatTransport {
    url: String,
}

impl HttpChatTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            url: config.chat_url(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait(?Send)]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, req: &ChatRequest) -> Result<ChatResponse> {
        let response = Request::post(&self.url)
            .header("Content-Type", "application/json")
            .json(req)
            .map_err(|e| ChatError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            log::warn!("chat backend answered HTTP {}", status);
            return Err(ChatError::Status(status));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ChatError::Serialization(e.to_string()))
    }
}
