//! Haptic driver trait and error types.

use core::future::Future;

/// Effect played when no other is configured (DRV2605 "strong click").
pub const DEFAULT_HAPTIC_EFFECT: u8 = 1;

/// Error type for haptic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HapticError {
    /// No driver fitted, or it did not answer at startup.
    Unavailable,
    /// Bus error while talking to the driver.
    Bus,
}

/// Async trait for haptic feedback drivers.
///
/// A missing driver is a normal configuration, not a fault: callers check
/// [`is_available()`](Self::is_available) and degrade to a logged no-op.
pub trait HapticDriver {
    /// Whether a driver was detected and initialized.
    fn is_available(&self) -> bool;

    /// Play a single library effect.
    fn play(&mut self, effect: u8) -> impl Future<Output = Result<(), HapticError>>;
}

/// Placeholder for boards without a haptic driver.
pub struct NoHaptic;

impl HapticDriver for NoHaptic {
    fn is_available(&self) -> bool {
        false
    }

    async fn play(&mut self, _effect: u8) -> Result<(), HapticError> {
        Err(HapticError::Unavailable)
    }
}

/// A driver that may or may not have been found at startup.
impl<H: HapticDriver> HapticDriver for Option<H> {
    fn is_available(&self) -> bool {
        self.as_ref().is_some_and(HapticDriver::is_available)
    }

    async fn play(&mut self, effect: u8) -> Result<(), HapticError> {
        match self {
            Some(driver) => driver.play(effect).await,
            None => Err(HapticError::Unavailable),
        }
    }
}
