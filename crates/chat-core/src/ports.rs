//! Port traits — the hexagonal architecture boundary.
//!
//! These traits are defined here in `chat-core` (pure Rust).
//! Implementations live in `chat-server` (reqwest provider) and
//! `chat-platform` (browser transport and timer).

use async_trait::async_trait;
use chat_types::{
    api::{ChatRequest, ChatResponse},
    ProviderError, Result,
};

// ─── Completion Port ─────────────────────────────────────────

/// The external chat-completion provider, as seen by the server.
///
/// Server handlers are spawned on a multi-threaded runtime, so this port
/// is `Send + Sync` unlike the browser-side ports below.
#[async_trait]
pub trait CompletionPort: Send + Sync {
    /// Ask the provider for a reply to `user_text` under `system_prompt`.
    /// The returned text is already trimmed and non-empty.
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> std::result::Result<String, ProviderError>;

    /// Name of this provider (for logging/debug)
    fn name(&self) -> &str;
}

// ─── Chat Transport Port ─────────────────────────────────────

/// Client-side link to the chat backend (`POST /chat`).
#[async_trait(?Send)]
pub trait ChatTransport {
    /// Send one message. Any network failure, non-2xx status or
    /// undecodable body is an error.
    async fn send(&self, req: &ChatRequest) -> Result<ChatResponse>;
}

// ─── Timer Port ──────────────────────────────────────────────

#[async_trait(?Send)]
pub trait TimerPort {
    /// Resolve after `ms` milliseconds.
    async fn sleep(&self, ms: u64);
}
