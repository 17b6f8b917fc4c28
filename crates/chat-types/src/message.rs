use serde::{Deserialize, Serialize};

/// Id given to the greeting the client shows on start-up.
pub const WELCOME_ID: &str = "welcome";

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

/// A single entry of the client transcript.
///
/// Messages are created once, on send or on receive, and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub origin: Origin,
    pub text: String,
    /// RFC 3339 creation time
    pub timestamp: String,
}

impl Message {
    fn new(origin: Origin, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            origin,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Origin::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Origin::Assistant, text)
    }

    pub fn welcome(text: impl Into<String>) -> Self {
        Self {
            id: WELCOME_ID.to_string(),
            ..Self::assistant(text)
        }
    }

    pub fn is_user(&self) -> bool {
        self.origin == Origin::User
    }

    /// Local wall-clock time of the message as `HH:MM`.
    /// Falls back to the raw timestamp if it does not parse.
    pub fn display_time(&self) -> String {
        match chrono::DateTime::parse_from_rfc3339(&self.timestamp) {
            Ok(ts) => ts.with_timezone(&chrono::Local).format("%H:%M").to_string(),
            Err(_) => self.timestamp.clone(),
        }
    }
}
