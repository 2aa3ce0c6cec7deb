//! Builder pattern API for constructing messages.
//!
//! This module provides a fluent builder for messages whose argument list
//! is assembled at runtime, without the caller owning an argument array.
//!
//! # Example
//!
//! ```
//! use osc_proto::{MessageBuilder, ADDR_PRESS};
//!
//! let mut buf = [0u8; 64];
//! let len = MessageBuilder::new(ADDR_PRESS)
//!     .int(12)
//!     .string("left")
//!     .encode(&mut buf)
//!     .unwrap();
//!
//! assert_eq!(&buf[16..20], b",is\0");
//! assert_eq!(len, 32);
//! ```

use crate::encode::EncodeError;
use crate::types::{Arg, Message, MAX_ARGS};

/// Builder for messages.
///
/// Holds up to [`MAX_ARGS`] arguments. Adding more does not panic; the
/// overflow is reported as [`EncodeError::TooManyArgs`] when encoding.
#[derive(Debug, Clone)]
pub struct MessageBuilder<'a> {
    address: &'a str,
    args: heapless::Vec<Arg<'a>, MAX_ARGS>,
    overflowed: bool,
}

impl<'a> MessageBuilder<'a> {
    /// Start building a message for `address`.
    ///
    /// The address is validated when encoding.
    #[must_use]
    pub fn new(address: &'a str) -> Self {
        Self {
            address,
            args: heapless::Vec::new(),
            overflowed: false,
        }
    }

    /// Append any argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<Arg<'a>>) -> Self {
        if self.args.push(arg.into()).is_err() {
            self.overflowed = true;
        }
        self
    }

    /// Append a 32-bit integer argument.
    #[must_use]
    pub fn int(self, value: i32) -> Self {
        self.arg(Arg::Int(value))
    }

    /// Append a string argument.
    #[must_use]
    pub fn string(self, value: &'a str) -> Self {
        self.arg(Arg::Str(value))
    }

    /// Append an integer argument only when `value` is `Some`.
    #[must_use]
    pub fn int_opt(self, value: Option<i32>) -> Self {
        match value {
            Some(v) => self.int(v),
            None => self,
        }
    }

    /// The address this builder targets.
    #[must_use]
    pub fn address(&self) -> &'a str {
        self.address
    }

    /// The arguments collected so far.
    #[must_use]
    pub fn args(&self) -> &[Arg<'a>] {
        &self.args
    }

    /// Validate and borrow the collected contents as a [`Message`].
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::TooManyArgs`] if more than [`MAX_ARGS`] were
    /// added, or the validation errors of [`Message::new()`].
    pub fn message(&self) -> Result<Message<'_>, EncodeError> {
        if self.overflowed {
            return Err(EncodeError::TooManyArgs);
        }
        Message::new(self.address, &self.args)
    }

    /// Encode the message to the provided buffer.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// See [`message()`](Self::message) and [`Message::encode()`].
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        self.message()?.encode(buf)
    }

    /// Encode to a `heapless::Vec`.
    pub fn encode_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, EncodeError> {
        self.message()?.encode_to_vec()
    }
}
