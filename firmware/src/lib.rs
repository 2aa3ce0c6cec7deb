//! WiFi OSC push button for the Raspberry Pi Pico W.
//!
//! This crate provides the board side of the button: the UDP channel, the
//! WiFi join sequence, compile-time settings and the loop ticker. The loop
//! itself lives in [`button_core`].
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico W (RP2040 + CYW43439) and:
//! 1. Joins the configured WiFi network and waits for a DHCP lease
//! 2. Announces itself to the listener with `/button/handshake <id>`
//! 3. Sends `/button/press` and `/button/release` as the button moves
//! 4. Plays a haptic effect when `/haptic/play` arrives
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | Button   | 26   | To ground, internal pull-up |
//! | I2C0 SDA | 4    | DRV2605 haptic driver (optional) |
//! | I2C0 SCL | 5    | DRV2605 haptic driver (optional) |
//! | LED      | WL_GPIO0 | On-board LED, on while WiFi is up |
//!
//! GPIO 23, 24, 25 and 29 are taken by the radio.
//!
//! # Architecture
//!
//! Three Embassy tasks: the radio runner, the network stack runner and the
//! main task, which owns the socket, the button and the haptic driver and
//! runs the control loop.
//!
//! # Modules
//!
//! - [`settings`]: Compile-time configuration ([`settings::load`])
//! - [`udp`]: UDP datagram channel ([`UdpChannel`])
//! - [`wifi`]: Join with retry and the status LED ([`StatusLed`])
//! - [`ticks`]: Loop ticker ([`LoopTicker`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)

#![no_std]

// Ensure exactly one panic handler is selected
#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

pub use button_core::{
    ButtonController, Config, ConfigError, DeviceIdentity, Drv2605, HapticDriver, LoopSettings,
    RetryPolicy,
};

pub mod settings;
pub mod ticks;
pub mod udp;
pub mod wifi;

pub use ticks::LoopTicker;
pub use udp::UdpChannel;
pub use wifi::{JoinError, StatusLed};
