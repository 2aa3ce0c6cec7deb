//! Fixed-period tick source on the embassy time driver.

use button_core::TickSource;
use embassy_time::{Duration, Instant, Ticker};

/// Ticks every `period_ms`, reporting uptime in milliseconds.
pub struct LoopTicker {
    ticker: Ticker,
}

impl LoopTicker {
    #[must_use]
    pub fn every_ms(period_ms: u64) -> Self {
        Self {
            ticker: Ticker::every(Duration::from_millis(period_ms)),
        }
    }
}

impl TickSource for LoopTicker {
    async fn next_tick(&mut self) -> u64 {
        self.ticker.next().await;
        Instant::now().as_millis()
    }
}
