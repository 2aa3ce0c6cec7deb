//! ButtonController: the cooperative control loop.

use core::future::Future;

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;
use osc_proto::{decode, MessageBuilder, ParseError, ADDR_PRESS, ADDR_RELEASE};

use crate::config::{Config, EventPayload};
use crate::dispatch::{dispatch, Command, Dispatch};
use crate::edge::{Edge, EdgeDetector};
use crate::haptic::{HapticDriver, HapticError};
use crate::retry::RetryPolicy;
use crate::transport::{
    DatagramChannel, DeviceIdentity, HandshakeError, SendError, Session, TransportError,
};

/// Source of fixed-period ticks.
///
/// Each call waits for the next tick boundary and returns its timestamp in
/// milliseconds since boot.
pub trait TickSource {
    /// Wait for the next tick and return its timestamp in milliseconds.
    fn next_tick(&mut self) -> impl Future<Output = u64>;
}

/// Settings the control loop needs from [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopSettings {
    /// Hold after an edge during which level changes are ignored.
    pub debounce_ms: u64,
    /// DRV2605 library effect played for `/haptic/play`.
    pub haptic_effect: u8,
    /// Also play the effect locally on every press.
    pub haptic_on_press: bool,
    /// Arguments carried by press and release messages.
    pub event_payload: EventPayload,
}

impl From<&Config<'_>> for LoopSettings {
    fn from(config: &Config<'_>) -> Self {
        Self {
            debounce_ms: config.debounce_ms,
            haptic_effect: config.haptic_effect,
            haptic_on_press: config.haptic_on_press,
            event_payload: config.event_payload,
        }
    }
}

/// What happened to the inbound datagram serviced in a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Inbound {
    /// A command ran.
    Handled(Command),
    /// A command was recognized but could not run; logged, no-op.
    NotHandled(Command, HapticError),
    /// Unknown address.
    Ignored,
    /// Not a decodable message; dropped.
    Malformed(ParseError),
    /// The socket reported an error while polling.
    ReceiveFailed(TransportError),
}

/// Summary of one tick, for tests and tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Outcome of the inbound poll, `None` if nothing was pending.
    pub inbound: Option<Inbound>,
    /// Debounced edge seen this tick.
    pub edge: Option<Edge>,
    /// Result of reporting `edge`, if there was one.
    pub sent: Option<Result<(), SendError>>,
}

/// Ties the button, the network session and the haptic driver together.
///
/// Each tick, in order: service at most one inbound datagram, sample the
/// button, and report any edge. A failure in one step is logged and does
/// not stop the others or later ticks.
pub struct ButtonController<C, P, H> {
    session: Session<C>,
    button: P,
    haptic: H,
    detector: EdgeDetector,
    settings: LoopSettings,
    press_count: i32,
}

impl<C, P, H> ButtonController<C, P, H>
where
    C: DatagramChannel,
    P: InputPin,
    H: HapticDriver,
{
    /// Create a new controller.
    pub fn new(channel: C, button: P, haptic: H, settings: LoopSettings) -> Self {
        Self {
            session: Session::new(channel),
            button,
            haptic,
            detector: EdgeDetector::new(settings.debounce_ms),
            settings,
            press_count: 0,
        }
    }

    /// Announce the device identity. See [`Session::handshake()`].
    pub async fn handshake<D: DelayNs>(
        &mut self,
        identity: DeviceIdentity,
        policy: RetryPolicy,
        delay: &mut D,
    ) -> Result<(), HandshakeError> {
        self.session.handshake(identity, policy, delay).await
    }

    /// Run the loop indefinitely.
    ///
    /// This method never returns under normal operation.
    pub async fn run<T: TickSource>(&mut self, ticks: &mut T) -> ! {
        loop {
            let now_ms = ticks.next_tick().await;
            let _ = self.tick(now_ms).await;
        }
    }

    /// Run one tick at `now_ms`.
    ///
    /// Returns what happened for testing purposes.
    pub async fn tick(&mut self, now_ms: u64) -> TickReport {
        let inbound = self.service_inbound().await;

        let edge = self.sample_button(now_ms);
        let sent = match edge {
            Some(edge) => Some(self.report(edge).await),
            None => None,
        };

        TickReport {
            inbound,
            edge,
            sent,
        }
    }

    async fn service_inbound(&mut self) -> Option<Inbound> {
        let outcome = match self.session.try_receive() {
            Ok(None) => return None,
            Ok(Some(datagram)) => match decode(datagram) {
                Ok(address) => dispatch(address),
                Err(e) => {
                    warn!("dropping malformed datagram: {:?}", e);
                    return Some(Inbound::Malformed(e));
                }
            },
            Err(e) => {
                warn!("receive failed: {:?}", e);
                return Some(Inbound::ReceiveFailed(e));
            }
        };

        Some(match outcome {
            Dispatch::Action(command) => self.execute(command).await,
            Dispatch::Ignored => Inbound::Ignored,
        })
    }

    async fn execute(&mut self, command: Command) -> Inbound {
        match command {
            Command::HapticPlay => match self.play_haptic().await {
                Ok(()) => Inbound::Handled(command),
                Err(e) => Inbound::NotHandled(command, e),
            },
        }
    }

    async fn play_haptic(&mut self) -> Result<(), HapticError> {
        if !self.haptic.is_available() {
            warn!("haptic driver unavailable, skipping effect");
            return Err(HapticError::Unavailable);
        }

        self.haptic
            .play(self.settings.haptic_effect)
            .await
            .inspect_err(|e| {
                warn!("haptic effect failed: {:?}", e);
            })
    }

    fn sample_button(&mut self, now_ms: u64) -> Option<Edge> {
        match self.button.is_high() {
            Ok(level) => self.detector.update(level, now_ms),
            Err(_) => {
                warn!("button read failed");
                None
            }
        }
    }

    async fn report(&mut self, edge: Edge) -> Result<(), SendError> {
        let address = match edge {
            Edge::Pressed => {
                self.press_count = self.press_count.wrapping_add(1);
                info!("button pressed (#{})", self.press_count);
                if self.settings.haptic_on_press {
                    let _ = self.play_haptic().await;
                }
                ADDR_PRESS
            }
            Edge::Released => {
                info!("button released (#{})", self.press_count);
                ADDR_RELEASE
            }
        };

        let payload = match self.settings.event_payload {
            EventPayload::Counter => Some(self.press_count),
            EventPayload::None => None,
        };

        let builder = MessageBuilder::new(address).int_opt(payload);
        let msg = builder.message()?;
        self.session.send_message(&msg).await
    }

    /// Number of presses reported so far.
    pub fn press_count(&self) -> i32 {
        self.press_count
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    /// Get a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session<C> {
        &mut self.session
    }

    /// Get a reference to the haptic driver.
    pub fn haptic(&self) -> &H {
        &self.haptic
    }

    /// Decompose the controller into its channel, button and haptic driver.
    pub fn into_parts(self) -> (C, P, H) {
        (self.session.into_inner(), self.button, self.haptic)
    }
}
