//! Inbound message decoding.
//!
//! Only the address is extracted; the device never needs the arguments of
//! the commands it receives.

/// Error type for decoding operations.
///
/// A decode failure means "ignore this datagram"; it is never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// No null byte terminates the address.
    MissingTerminator,
    /// The address bytes are not valid UTF-8.
    InvalidUtf8,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingTerminator => write!(f, "address is not null-terminated"),
            Self::InvalidUtf8 => write!(f, "address is not valid UTF-8"),
        }
    }
}

/// Extract the address of an inbound datagram.
///
/// The address is everything before the first null byte. Padding, type tags
/// and arguments that follow are not inspected.
///
/// # Errors
///
/// - [`ParseError::MissingTerminator`] if the datagram has no null byte.
/// - [`ParseError::InvalidUtf8`] if the bytes before it are not UTF-8.
///
/// # Example
///
/// ```
/// use osc_proto::{decode, ParseError};
///
/// assert_eq!(decode(b"/haptic/play\0\0\0\0"), Ok("/haptic/play"));
/// assert_eq!(decode(b"PING_TEST"), Err(ParseError::MissingTerminator));
/// ```
pub fn decode(datagram: &[u8]) -> Result<&str, ParseError> {
    let end = datagram
        .iter()
        .position(|&b| b == 0)
        .ok_or(ParseError::MissingTerminator)?;

    core::str::from_utf8(&datagram[..end]).map_err(|_| ParseError::InvalidUtf8)
}
