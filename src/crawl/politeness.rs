// src/crawl/politeness.rs
// =============================================================================
// The pause between two fetches.
//
// The crawl loop never calls tokio::time::sleep directly; it goes through
// the Sleeper trait. In production that is a real sleep, in tests it is a
// recorder, so we can check the delays without actually waiting for them.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Suspends the current task on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
