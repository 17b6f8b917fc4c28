//! Reply resolver — picks the reply source for one inbound message.
//!
//! The provider is tried once; any provider error is recovered here by
//! substituting the keyword classifier's reply. Only a blank message is
//! reported back to the caller as an error.

use std::sync::Arc;

use chat_types::{config::REPLY_SUFFIX, ChatError, ProviderError, Result};

use crate::fallback::{Category, FallbackClassifier};
use crate::ports::CompletionPort;

/// Where a reply came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Provider text with the decorative suffix
    Provider(String),
    /// Classifier text, with the provider error it replaced
    Fallback {
        text: String,
        category: Category,
        cause: ProviderError,
    },
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Provider(text) => text,
            Reply::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Reply::Provider(text) => text,
            Reply::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Reply::Fallback { .. })
    }
}

pub struct ReplyResolver {
    provider: Arc<dyn CompletionPort>,
    system_prompt: String,
    classifier: FallbackClassifier,
}

impl ReplyResolver {
    pub fn new(provider: Arc<dyn CompletionPort>, system_prompt: impl Into<String>) -> Self {
        Self {
            provider,
            system_prompt: system_prompt.into(),
            classifier: FallbackClassifier::new(),
        }
    }

    /// Resolve the reply for `message`.
    ///
    /// Fails only with [`ChatError::EmptyMessage`]; provider failures
    /// come back as [`Reply::Fallback`].
    pub async fn resolve(&self, message: &str) -> Result<Reply> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        match self.provider.complete(&self.system_prompt, message).await {
            Ok(text) => {
                log::info!("reply generated by provider {}", self.provider.name());
                Ok(Reply::Provider(format!("{}{}", text, REPLY_SUFFIX)))
            }
            Err(cause) => {
                log::warn!(
                    "provider {} failed ({}): {}; using local reply",
                    self.provider.name(),
                    cause.kind(),
                    cause
                );
                let category = self.classifier.classify(message);
                Ok(Reply::Fallback {
                    text: self.classifier.reply(message).to_string(),
                    category,
                    cause,
                })
            }
        }
    }
}
