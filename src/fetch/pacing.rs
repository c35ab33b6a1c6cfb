// =============================================================================
// Request Pacer
// =============================================================================
//
// Alpha Vantage's free tier allows five requests per minute and reports
// violations inside 200 OK bodies, so the only reliable strategy is to space
// calls out up front rather than react to throttle notes. The pacer enforces
// a minimum gap between consecutive `wait` returns; the first call goes
// through immediately.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

pub struct RequestPacer {
    min_gap: Duration,
    last_release: Option<Instant>,
}

impl RequestPacer {
    pub fn new(min_gap: Duration) -> Self {
        Self {
            min_gap,
            last_release: None,
        }
    }

    /// Sleep until the configured gap since the previous release has passed.
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_release {
            let next = last + self.min_gap;
            let now = Instant::now();
            if next > now {
                let pause = next - now;
                debug!(pause_ms = pause.as_millis() as u64, "pacing request");
                tokio::time::sleep(pause).await;
            }
        }
        self.last_release = Some(Instant::now());
    }
}
