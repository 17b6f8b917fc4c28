use serde::{Deserialize, Serialize};

/// Events emitted by the client turn runner.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatEvent {
    /// The greeting shown once after start-up
    Welcome { text: String },

    /// A request for this turn is in flight
    TurnStart { turn_id: u64 },

    /// The backend answered; shown after the reply delay
    ReplyReceived { turn_id: u64, text: String },

    /// The request failed; `text` is the apology to render
    TurnFailed { turn_id: u64, text: String, reason: String },

    /// The turn is over and input can be re-enabled
    TurnEnd { turn_id: u64 },
}
