//! OSC-style message encoding and decoding for the button firmware.
//!
//! This crate provides the wire format shared by the device and its listener:
//!
//! - **Types**: Message building blocks
//!   - [`Arg`] - A single typed argument (32-bit integer or string)
//!   - [`Message`] - An address plus its ordered arguments
//!
//! - **Encoding**: Turn messages into datagram payloads
//!   - [`Message::encode()`] - Encode into a caller-provided buffer
//!   - [`MessageBuilder`] - Fluent builder API
//!
//! - **Decoding**: Inspect incoming datagrams
//!   - [`decode()`] - Extract the address of an inbound message
//!
//! # Wire Format
//!
//! Every field is aligned to 4 bytes:
//!
//! ```text
//! <address>\0<pad> ,<tags>\0<pad> <arg0> <arg1> ...
//! ```
//!
//! - `address` - UTF-8, starts with `/`, null-terminated, zero-padded
//! - `tags` - one letter per argument: `i` (int32), `s` (string)
//! - int32 arguments - 4 bytes, big-endian two's complement
//! - string arguments - UTF-8, null-terminated, zero-padded
//!
//! # Examples
//!
//! ## Encoding
//!
//! ```
//! use osc_proto::{Arg, Message, ADDR_HANDSHAKE};
//!
//! let args = [Arg::Int(42)];
//! let msg = Message::new(ADDR_HANDSHAKE, &args).unwrap();
//!
//! let mut buf = [0u8; 64];
//! let len = msg.encode(&mut buf).unwrap();
//! assert_eq!(len, 28);
//! assert_eq!(&buf[20..28], b",i\0\0\x00\x00\x00\x2A");
//! ```
//!
//! ## Encoding with the Builder API
//!
//! ```
//! use osc_proto::{MessageBuilder, ADDR_RELEASE};
//!
//! let mut buf = [0u8; 64];
//! let len = MessageBuilder::new(ADDR_RELEASE)
//!     .int(7)
//!     .encode(&mut buf)
//!     .unwrap();
//! assert_eq!(len % 4, 0);
//! ```
//!
//! ## Decoding
//!
//! ```
//! use osc_proto::{decode, ADDR_HAPTIC_PLAY};
//!
//! let address = decode(b"/haptic/play\0\0\0\0,\0\0\0").unwrap();
//! assert_eq!(address, ADDR_HAPTIC_PLAY);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod builder;
pub mod decode;
pub mod encode;
pub mod types;

// Re-export types at crate root for convenience
pub use builder::MessageBuilder;
pub use decode::{decode, ParseError};
pub use encode::{padded_len, EncodeError};
pub use types::{
    Arg, Message, ADDR_HANDSHAKE, ADDR_HAPTIC_PLAY, ADDR_PRESS, ADDR_RELEASE, MAX_ARGS,
};
