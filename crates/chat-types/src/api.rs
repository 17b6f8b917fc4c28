//! Wire types of the HTTP API shared by the client and the server.

use serde::{Deserialize, Serialize};

/// Body of the 400 response for a blank message.
pub const EMPTY_MESSAGE_ERROR: &str = "Mensaje vacío";

/// Body of the 500 response for unexpected processing errors.
pub const INTERNAL_ERROR_MESSAGE: &str =
    "Oops, tuve un problema técnico. ¿Podés intentar de nuevo? 🤖";

/// Payload of `GET /`.
pub const STATUS_MESSAGE: &str = "Servidor ChatBot Personal funcionando";

pub const STATUS_OK: &str = "OK";

/// `POST /chat` request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// A missing field decodes as the empty string and is rejected later.
    #[serde(default)]
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `POST /chat` success body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    pub timestamp: String,
}

impl ChatResponse {
    /// Stamp `message` with the current UTC time.
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: iso_now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Generic failure notice, sent with HTTP 500.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureBody {
    pub message: String,
}

/// `GET /` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
    pub status: String,
    pub timestamp: String,
}

/// `GET /health` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Process uptime in seconds
    pub uptime: f64,
}

/// Current UTC time as an ISO-8601 string with millisecond precision.
pub fn iso_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
