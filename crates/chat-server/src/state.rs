use std::sync::Arc;
use std::time::{Duration, Instant};

use chat_core::resolver::ReplyResolver;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ReplyResolver>,
    pub started_at: Instant,
    /// Pause before answering `POST /chat`
    pub reply_delay: Duration,
}

impl AppState {
    pub fn new(resolver: Arc<ReplyResolver>, reply_delay: Duration) -> Self {
        Self {
            resolver,
            started_at: Instant::now(),
            reply_delay,
        }
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
