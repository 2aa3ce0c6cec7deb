//! Platform-agnostic core of the networked push button.
//!
//! This crate holds everything between the pins and the socket: debounced
//! edge detection, the OSC session over a datagram channel, inbound command
//! dispatch and the control loop that ties them together. It has no
//! platform-specific dependencies, so the same code runs on the device and
//! in host tests.
//!
//! # Overview
//!
//! - [`config`]: Startup settings from named values ([`Config`])
//! - [`edge`]: Debounced press/release detection ([`EdgeDetector`])
//! - [`transport`]: Datagram channel trait and session ([`DatagramChannel`], [`Session`])
//! - [`retry`]: Bounded fixed-delay retry ([`RetryPolicy`])
//! - [`dispatch`]: Inbound address to command mapping ([`dispatch()`])
//! - [`haptic`]: Haptic driver trait ([`HapticDriver`])
//! - [`drv2605`]: DRV2605 driver over async I2C ([`Drv2605`])
//! - [`controller`]: The control loop ([`ButtonController`])
//!
//! # Loop
//!
//! Every tick the controller services at most one inbound datagram, samples
//! the button, and sends `/button/press` or `/button/release` for each edge.
//! Nothing in a tick blocks for longer than a single send; the debounce hold
//! is a deadline tracked by the detector rather than a sleep.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log through defmt (for embedded targets)
//! - **`log`**: Log through the `log` facade
//!
//! With neither logging feature enabled, log statements compile to nothing.
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod drv2605;
pub mod edge;
pub mod haptic;
pub mod retry;
pub mod transport;

#[cfg(test)]
mod test_util;

// Re-export main types at crate root
pub use config::{Config, ConfigError, EventPayload};
pub use controller::{ButtonController, Inbound, LoopSettings, TickReport, TickSource};
pub use dispatch::{dispatch, Command, Dispatch};
pub use drv2605::{Drv2605, DRV2605_ADDR};
pub use edge::{ButtonState, Edge, EdgeDetector, DEFAULT_DEBOUNCE_MS};
pub use haptic::{HapticDriver, HapticError, NoHaptic, DEFAULT_HAPTIC_EFFECT};
pub use retry::{Attempts, RetryPolicy};
pub use transport::{
    DatagramChannel, DeviceIdentity, HandshakeError, SendError, Session, SessionEndpoint,
    TransportError,
};
