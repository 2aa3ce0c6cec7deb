//! Debounced edge detection for an active-low push button.

/// Debounce hold applied after a release, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Stable state of the button as seen by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Input pulled high.
    #[default]
    NotPressed,
    /// Input pulled low by the switch.
    Pressed,
}

impl ButtonState {
    /// Interpret a raw pin level from active-low wiring.
    #[inline]
    #[must_use]
    pub const fn from_level(is_high: bool) -> Self {
        if is_high {
            Self::NotPressed
        } else {
            Self::Pressed
        }
    }
}

/// A discrete button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// `NotPressed -> Pressed`
    Pressed,
    /// `Pressed -> NotPressed`
    Released,
}

/// Turns raw per-tick pin levels into [`Edge`] events.
///
/// Each event is reported exactly once, on the tick where the raw level
/// first differs from the stable state. After a release the detector
/// ignores the input until the debounce hold has elapsed; the loop keeps
/// running during the hold. When the hold ends the current level is
/// compared with the stable state again, so a press that started during
/// the hold is reported on the first tick after it.
///
/// # Example
///
/// ```
/// use button_core::{Edge, EdgeDetector};
///
/// let mut detector = EdgeDetector::new(200);
/// assert_eq!(detector.update(true, 0), None);
/// assert_eq!(detector.update(false, 50), Some(Edge::Pressed));
/// assert_eq!(detector.update(false, 100), None);
/// assert_eq!(detector.update(true, 150), Some(Edge::Released));
/// ```
#[derive(Debug, Clone)]
pub struct EdgeDetector {
    state: ButtonState,
    debounce_ms: u64,
    /// End of the post-release hold, if one is active.
    hold_until: Option<u64>,
}

impl EdgeDetector {
    /// Create a detector in the `NotPressed` state.
    #[must_use]
    pub const fn new(debounce_ms: u64) -> Self {
        Self {
            state: ButtonState::NotPressed,
            debounce_ms,
            hold_until: None,
        }
    }

    /// The last stable state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Whether the post-release hold is still active at `now_ms`.
    #[must_use]
    pub fn is_holding(&self, now_ms: u64) -> bool {
        matches!(self.hold_until, Some(until) if now_ms < until)
    }

    /// Feed one raw sample taken at `now_ms`.
    ///
    /// `is_high` is the raw pin level (`true` = not pressed).
    pub fn update(&mut self, is_high: bool, now_ms: u64) -> Option<Edge> {
        if self.is_holding(now_ms) {
            return None;
        }
        self.hold_until = None;

        let raw = ButtonState::from_level(is_high);
        if raw == self.state {
            return None;
        }
        self.state = raw;

        match raw {
            ButtonState::Pressed => Some(Edge::Pressed),
            ButtonState::NotPressed => {
                self.hold_until = Some(now_ms.saturating_add(self.debounce_ms));
                Some(Edge::Released)
            }
        }
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    const TICK: u64 = 50;

    /// Feed one level per tick and collect the emitted events.
    fn run(detector: &mut EdgeDetector, levels: &[bool]) -> Vec<Option<Edge>> {
        levels
            .iter()
            .enumerate()
            .map(|(i, &level)| detector.update(level, i as u64 * TICK))
            .collect()
    }

    #[test]
    fn test_level_mapping_is_active_low() {
        assert_eq!(ButtonState::from_level(true), ButtonState::NotPressed);
        assert_eq!(ButtonState::from_level(false), ButtonState::Pressed);
    }

    #[test]
    fn test_idle_input_emits_nothing() {
        let mut detector = EdgeDetector::default();
        let events = run(&mut detector, &[true; 10]);
        assert!(events.iter().all(Option::is_none));
        assert_eq!(detector.state(), ButtonState::NotPressed);
    }

    #[test]
    fn test_steady_press_emits_once() {
        let mut detector = EdgeDetector::default();
        let events = run(&mut detector, &[true, false, false, false, false, false]);

        assert_eq!(events[1], Some(Edge::Pressed));
        assert_eq!(events.iter().flatten().count(), 1);
        assert_eq!(detector.state(), ButtonState::Pressed);
    }

    #[test]
    fn test_release_emits_once_and_starts_hold() {
        let mut detector = EdgeDetector::new(200);
        assert_eq!(detector.update(false, 0), Some(Edge::Pressed));
        assert_eq!(detector.update(true, 50), Some(Edge::Released));

        assert!(detector.is_holding(50));
        assert!(detector.is_holding(249));
        assert!(!detector.is_holding(250));
        assert_eq!(detector.update(true, 100), None);
    }

    #[test]
    fn test_bounce_inside_hold_is_ignored() {
        let mut detector = EdgeDetector::new(200);

        // true -> false -> true within 100ms, then the contact bounces low again
        assert_eq!(detector.update(true, 0), None);
        assert_eq!(detector.update(false, 50), Some(Edge::Pressed));
        assert_eq!(detector.update(true, 100), Some(Edge::Released));
        assert_eq!(detector.update(false, 150), None);
        assert_eq!(detector.update(true, 200), None);
        assert_eq!(detector.update(false, 250), None);
        assert_eq!(detector.update(true, 299), None);

        // Hold over at 300ms: idle input stays quiet
        assert_eq!(detector.update(true, 300), None);
    }

    #[test]
    fn test_press_held_through_hold_is_reported_after_it() {
        let mut detector = EdgeDetector::new(200);
        detector.update(false, 0);
        detector.update(true, 50);

        // Pressed again during the hold and kept down
        assert_eq!(detector.update(false, 100), None);
        assert_eq!(detector.update(false, 200), None);
        assert_eq!(detector.update(false, 250), Some(Edge::Pressed));
        assert_eq!(detector.update(false, 300), None);
    }

    #[test]
    fn test_zero_debounce_never_holds() {
        let mut detector = EdgeDetector::new(0);
        assert_eq!(detector.update(false, 0), Some(Edge::Pressed));
        assert_eq!(detector.update(true, 0), Some(Edge::Released));
        assert!(!detector.is_holding(0));
        assert_eq!(detector.update(false, 0), Some(Edge::Pressed));
    }

    #[test]
    fn test_hold_deadline_saturates() {
        let mut detector = EdgeDetector::new(200);
        detector.update(false, u64::MAX - 10);
        assert_eq!(detector.update(true, u64::MAX - 5), Some(Edge::Released));
        assert!(detector.is_holding(u64::MAX - 1));
    }

    #[test]
    fn test_press_release_cycles() {
        let mut detector = EdgeDetector::new(200);
        let levels = [
            true, false, false, true, true, true, true, true, false, true, true,
        ];
        let events: Vec<Edge> = run(&mut detector, &levels).into_iter().flatten().collect();

        // Press at 50, release at 150 (hold to 350), press at 400, release at 450
        assert_eq!(
            events,
            [Edge::Pressed, Edge::Released, Edge::Pressed, Edge::Released]
        );
    }
}
