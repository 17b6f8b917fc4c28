//! Client turn runner — one user message to one rendered reply.
//!
//! 1. Emit `TurnStart` and post the message to the backend
//! 2. On success wait the reply delay, emit `ReplyReceived`
//! 3. On failure wait the (shorter) failure delay, emit `TurnFailed`
//!    carrying the fixed apology
//! 4. Emit `TurnEnd` so the UI re-enables input
//!
//! There is no retry and no cancellation.

use std::cell::Cell;

use chat_types::{
    api::ChatRequest,
    config::{ClientConfig, APOLOGY_TEXT, WELCOME_TEXT},
    event::ChatEvent,
    ChatError,
};
use crate::event_bus::EventBus;
use crate::ports::{ChatTransport, TimerPort};

/// How a turn ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Replied(String),
    Failed(ChatError),
}

pub struct ChatClient {
    pub config: ClientConfig,
    pub event_bus: EventBus,
    turn_counter: Cell<u64>,
}

impl ChatClient {
    pub fn new(config: ClientConfig, event_bus: EventBus) -> Self {
        Self {
            config,
            event_bus,
            turn_counter: Cell::new(0),
        }
    }

    /// Run one turn for already-trimmed, non-empty `text`.
    ///
    /// Must be spawned via `wasm_bindgen_futures::spawn_local` in the browser;
    /// it takes `&self` so the UI is never blocked on a borrow.
    pub async fn run_turn(
        &self,
        text: &str,
        transport: &dyn ChatTransport,
        timer: &dyn TimerPort,
    ) -> TurnOutcome {
        let turn_id = self.turn_counter.get() + 1;
        self.turn_counter.set(turn_id);
        self.event_bus.emit(ChatEvent::TurnStart { turn_id });

        let req = ChatRequest::new(text);
        let outcome = match transport.send(&req).await {
            Ok(resp) => {
                timer.sleep(self.config.reply_delay_ms).await;
                self.event_bus.emit(ChatEvent::ReplyReceived {
                    turn_id,
                    text: resp.message.clone(),
                });
                TurnOutcome::Replied(resp.message)
            }
            Err(e) => {
                log::error!("chat turn {} failed: {}", turn_id, e);
                timer.sleep(self.config.failure_delay_ms).await;
                self.event_bus.emit(ChatEvent::TurnFailed {
                    turn_id,
                    text: APOLOGY_TEXT.to_string(),
                    reason: e.to_string(),
                });
                TurnOutcome::Failed(e)
            }
        };

        self.event_bus.emit(ChatEvent::TurnEnd { turn_id });
        outcome
    }

    /// Emit the start-up greeting after the welcome delay.
    pub async fn welcome(&self, timer: &dyn TimerPort) {
        timer.sleep(self.config.welcome_delay_ms).await;
        self.event_bus.emit(ChatEvent::Welcome {
            text: WELCOME_TEXT.to_string(),
        });
    }

    pub fn turns_started(&self) -> u64 {
        self.turn_counter.get()
    }
}
