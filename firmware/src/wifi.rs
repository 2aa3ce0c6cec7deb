//! WiFi association and the status LED on the CYW43439.

use button_core::RetryPolicy;
use cyw43::{Control, JoinOptions};
use defmt::{info, warn};
use embassy_time::{Delay, Timer};

/// The on-board LED hangs off the radio, not the RP2040.
const LED_GPIO: u8 = 0;

/// Toggles shown when the join gives up.
const FAILURE_BLINKS: u32 = 10;
const FAILURE_BLINK_MS: u64 = 200;

/// Error type for the join sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub struct JoinError {
    pub attempts: u32,
    /// Firmware status code of the last failed attempt.
    pub status: u32,
}

/// Status LED that can be switched off by configuration.
pub struct StatusLed {
    enabled: bool,
    on: bool,
}

impl StatusLed {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled, on: false }
    }

    pub async fn set(&mut self, control: &mut Control<'_>, on: bool) {
        if self.enabled {
            control.gpio_set(LED_GPIO, on).await;
        }
        self.on = on;
    }

    pub async fn toggle(&mut self, control: &mut Control<'_>) {
        self.set(control, !self.on).await;
    }

    /// Flash out a connection failure, ending with the LED off.
    pub async fn signal_failure(&mut self, control: &mut Control<'_>) {
        for _ in 0..FAILURE_BLINKS {
            self.toggle(control).await;
            Timer::after_millis(FAILURE_BLINK_MS).await;
        }
        self.set(control, false).await;
    }
}

/// Join `ssid`, retrying per `policy`. The LED goes on once associated.
pub async fn join(
    control: &mut Control<'_>,
    led: &mut StatusLed,
    ssid: &str,
    password: &str,
    policy: RetryPolicy,
) -> Result<(), JoinError> {
    let mut delay = Delay;
    let mut attempts = policy.attempts();
    let mut status = 0;

    while let Some(attempt) = attempts.next(&mut delay).await {
        info!("Joining {} (attempt {} of {})", ssid, attempt, policy.limit());
        match control.join(ssid, JoinOptions::new(password.as_bytes())).await {
            Ok(()) => {
                info!("WiFi connected");
                led.set(control, true).await;
                return Ok(());
            }
            Err(e) => {
                warn!("Join failed with status {}", e.status);
                status = e.status;
            }
        }
    }

    led.signal_failure(control).await;
    Err(JoinError {
        attempts: attempts.made(),
        status,
    })
}
