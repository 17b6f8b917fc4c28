use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The submitted message was empty or whitespace only.
    #[error("empty message")]
    EmptyMessage,

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ChatError {
    fn from(e: serde_json::Error) -> Self {
        ChatError::Serialization(e.to_string())
    }
}

/// Failure while calling the external completion provider.
///
/// None of these reach the end user; the server substitutes a fallback reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Parse(String),

    #[error("provider returned an empty reply")]
    EmptyReply,
}

impl ProviderError {
    /// Short stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::MissingCredential => "missing_credential",
            ProviderError::Transport(_) => "transport",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::Status { .. } => "status",
            ProviderError::Parse(_) => "parse",
            ProviderError::EmptyReply => "empty_reply",
        }
    }
}
