//! Pacing for the lyrics matcher.

use tokio::time::{sleep, Duration};

/// Extra wait served when the search service reports a rate limit.
pub const RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(5);

/// Fixed-interval pacing for sequential search attempts.
///
/// Every attempt is followed by [`Throttle::pause`]; a rate-limited
/// attempt additionally waits out [`RATE_LIMIT_COOLDOWN`] first.
#[derive(Debug, Clone)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    /// Creates a new `Throttle` with the given inter-attempt delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Wait the standard inter-attempt delay.
    pub async fn pause(&self) {
        sleep(self.delay).await;
    }

    /// Wait out a rate-limit response.
    pub async fn rate_limit_cooldown(&self) {
        sleep(RATE_LIMIT_COOLDOWN).await;
    }
}
