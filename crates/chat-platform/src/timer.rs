use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;

use chat_core::ports::TimerPort;

/// `setTimeout`-backed delays.
pub struct BrowserTimer;

#[async_trait(?Send)]
impl TimerPort for BrowserTimer {
    async fn sleep(&self, ms: u64) {
        let ms = u32::try_from(ms).unwrap_or(u32::MAX);
        TimeoutFuture::new(ms).await;
    }
}
