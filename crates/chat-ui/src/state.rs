//! UI-level state that drives rendering.
//! Owns the session transcript; updated each frame by draining the EventBus.

use chat_core::transcript::Transcript;
use chat_types::event::ChatEvent;
use chat_types::message::Message;

pub const STATUS_READY: &str = "En línea";
pub const STATUS_THINKING: &str = "AI Assistant está procesando...";

/// State visible to UI panels
pub struct UiState {
    /// Everything shown in the message list, oldest first
    pub transcript: Transcript,
    /// Input field content
    pub input_text: String,
    /// Status line text
    pub status_text: String,
    /// A turn is outstanding; input and send are disabled
    busy: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            transcript: Transcript::new(),
            input_text: String::new(),
            status_text: STATUS_READY.to_string(),
            busy: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether the send affordance should be enabled
    pub fn can_send(&self) -> bool {
        !self.busy && !self.input_text.trim().is_empty()
    }

    /// Take the input for a new turn.
    ///
    /// Returns the trimmed text to post, or `None` (leaving everything
    /// untouched) when the input is blank or a turn is already running.
    pub fn submit(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        let text = self.input_text.trim().to_string();
        self.transcript.push(Message::user(&text));
        self.input_text.clear();
        self.busy = true;
        Some(text)
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::Welcome { text } => {
                    self.transcript.push(Message::welcome(text));
                }
                ChatEvent::TurnStart { .. } => {
                    self.busy = true;
                    self.status_text = STATUS_THINKING.to_string();
                }
                ChatEvent::ReplyReceived { text, .. } => {
                    self.transcript.push(Message::assistant(text));
                }
                ChatEvent::TurnFailed { text, reason, .. } => {
                    log::warn!("showing apology after failed turn: {}", reason);
                    self.transcript.push(Message::assistant(text));
                }
                ChatEvent::TurnEnd { .. } => {
                    self.busy = false;
                    self.status_text = STATUS_READY.to_string();
                }
            }
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
