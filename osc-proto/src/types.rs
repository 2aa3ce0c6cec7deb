//! Core message types: Arg and Message.

use crate::encode::EncodeError;

/// Address of the event sent when the button goes down.
pub const ADDR_PRESS: &str = "/button/press";

/// Address of the event sent when the button comes back up.
pub const ADDR_RELEASE: &str = "/button/release";

/// Address of the one-time identity announcement sent at startup.
pub const ADDR_HANDSHAKE: &str = "/button/handshake";

/// Address of the inbound command that plays a haptic effect.
pub const ADDR_HAPTIC_PLAY: &str = "/haptic/play";

/// Maximum number of arguments a [`MessageBuilder`](crate::MessageBuilder) can hold.
pub const MAX_ARGS: usize = 8;

/// A single typed message argument.
///
/// # Example
///
/// ```
/// use osc_proto::Arg;
///
/// assert_eq!(Arg::from(5).type_tag(), b'i');
/// assert_eq!(Arg::from("hi").type_tag(), b's');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Arg<'a> {
    /// 32-bit signed integer, encoded big-endian.
    Int(i32),
    /// Short UTF-8 string, encoded null-terminated and padded.
    Str(&'a str),
}

impl Arg<'_> {
    /// The type tag letter for this argument.
    #[inline]
    #[must_use]
    pub const fn type_tag(&self) -> u8 {
        match self {
            Self::Int(_) => b'i',
            Self::Str(_) => b's',
        }
    }
}

impl From<i32> for Arg<'_> {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

/// An address plus its ordered arguments.
///
/// A `Message` borrows its address and arguments and is only built long
/// enough to be encoded. Construction validates the contents, so a
/// `Message` that exists can always be encoded given a large enough buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message<'a> {
    address: &'a str,
    args: &'a [Arg<'a>],
}

impl<'a> Message<'a> {
    /// Create a message after validating its address and string arguments.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::InvalidAddress`] if the address does not start with `/`
    ///   or contains a null byte.
    /// - [`EncodeError::InvalidString`] if a string argument contains a null byte.
    pub fn new(address: &'a str, args: &'a [Arg<'a>]) -> Result<Self, EncodeError> {
        if !address.starts_with('/') || address.contains('\0') {
            return Err(EncodeError::InvalidAddress);
        }

        for arg in args {
            if let Arg::Str(s) = arg {
                if s.contains('\0') {
                    return Err(EncodeError::InvalidString);
                }
            }
        }

        Ok(Self { address, args })
    }

    /// Create a message with no arguments.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::InvalidAddress`] for an invalid address.
    pub fn without_args(address: &'a str) -> Result<Self, EncodeError> {
        Self::new(address, &[])
    }

    /// The message address.
    #[inline]
    #[must_use]
    pub fn address(&self) -> &'a str {
        self.address
    }

    /// The message arguments, in wire order.
    #[inline]
    #[must_use]
    pub fn args(&self) -> &'a [Arg<'a>] {
        self.args
    }
}
