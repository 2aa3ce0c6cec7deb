//! Bounded retry with a fixed delay between attempts.
//!
//! Used for both the WiFi join and the startup handshake. The caller owns
//! the loop, so the operation being retried can borrow whatever it needs:
//!
//! ```
//! # async fn example<D: embedded_hal_async::delay::DelayNs>(delay: &mut D) {
//! use button_core::RetryPolicy;
//!
//! let mut attempts = RetryPolicy::default().attempts();
//! while let Some(attempt) = attempts.next(delay).await {
//!     if attempt == 2 {
//!         break; // succeeded
//!     }
//! }
//! # }
//! ```

use embedded_hal_async::delay::DelayNs;

/// Maximum attempts and the fixed pause between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    /// Pause before every attempt after the first.
    pub delay_ms: u32,
}

impl RetryPolicy {
    /// 3 attempts, 2 seconds apart.
    pub const DEFAULT: Self = Self {
        max_attempts: 3,
        delay_ms: 2_000,
    };

    /// Create a new policy.
    #[must_use]
    pub const fn new(max_attempts: u32, delay_ms: u32) -> Self {
        Self {
            max_attempts,
            delay_ms,
        }
    }

    /// Start iterating attempts under this policy.
    #[must_use]
    pub const fn attempts(self) -> Attempts {
        Attempts {
            policy: self,
            attempt: 0,
        }
    }

    /// Effective attempt limit.
    #[inline]
    #[must_use]
    pub const fn limit(&self) -> u32 {
        if self.max_attempts == 0 {
            1
        } else {
            self.max_attempts
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Attempt counter produced by [`RetryPolicy::attempts()`].
#[derive(Debug, Clone)]
pub struct Attempts {
    policy: RetryPolicy,
    attempt: u32,
}

impl Attempts {
    /// Wait out the inter-attempt delay (if any) and return the 1-based
    /// number of the next attempt, or `None` once the policy is exhausted.
    pub async fn next<D: DelayNs>(&mut self, delay: &mut D) -> Option<u32> {
        if self.attempt >= self.policy.limit() {
            return None;
        }

        if self.attempt > 0 {
            debug!(
                "retrying in {} ms (attempt {} of {})",
                self.policy.delay_ms,
                self.attempt + 1,
                self.policy.limit()
            );
            delay.delay_ms(self.policy.delay_ms).await;
        }

        self.attempt += 1;
        Some(self.attempt)
    }

    /// Number of attempts started so far.
    #[must_use]
    pub fn made(&self) -> u32 {
        self.attempt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{block_on, MockDelay};

    #[test]
    fn test_default_policy() {
        assert_eq!(RetryPolicy::default(), RetryPolicy::new(3, 2_000));
    }

    #[test]
    fn test_attempts_with_delays_between() {
        let mut delay = MockDelay::new();
        let mut attempts = RetryPolicy::new(3, 500).attempts();

        assert_eq!(block_on(attempts.next(&mut delay)), Some(1));
        assert!(delay.delays_ms.is_empty());
        assert_eq!(block_on(attempts.next(&mut delay)), Some(2));
        assert_eq!(block_on(attempts.next(&mut delay)), Some(3));
        assert_eq!(block_on(attempts.next(&mut delay)), None);

        assert_eq!(delay.delays_ms, [500, 500]);
        assert_eq!(attempts.made(), 3);
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        let mut delay = MockDelay::new();
        let mut attempts = RetryPolicy::new(0, 100).attempts();

        assert_eq!(block_on(attempts.next(&mut delay)), Some(1));
        assert_eq!(block_on(attempts.next(&mut delay)), None);
        assert!(delay.delays_ms.is_empty());
    }
}
