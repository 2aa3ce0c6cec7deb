//! Message encoding.
//!
//! # Wire Format
//!
//! ```text
//! <address>\0<pad> ,<tags>\0<pad> <arg0> <arg1> ...
//! ```
//!
//! The address, the type-tag field and every string argument are written
//! with a null terminator and then zero-padded so that their length is a
//! multiple of 4. Integer arguments are always exactly 4 bytes.
//!
//! # Example
//!
//! ```
//! use osc_proto::{Message, ADDR_PRESS};
//!
//! let msg = Message::without_args(ADDR_PRESS).unwrap();
//! let mut buf = [0u8; 32];
//! let len = msg.encode(&mut buf).unwrap();
//!
//! assert_eq!(&buf[..len], b"/button/press\0\0\0,\0\0\0");
//! ```

use crate::types::{Arg, Message};

/// Length of a field of `len` bytes after zero-padding to a 4-byte boundary.
///
/// Lengths that are already a multiple of 4 are returned unchanged.
#[inline]
#[must_use]
pub const fn padded_len(len: usize) -> usize {
    len + (4 - len % 4) % 4
}

/// Encoded length of a null-terminated, padded string field.
#[inline]
const fn string_field_len(len: usize) -> usize {
    padded_len(len + 1)
}

/// Error type for encoding operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// The output buffer is too small to hold the encoded message.
    BufferTooSmall,
    /// The address is empty, does not start with `/`, or contains a null byte.
    InvalidAddress,
    /// A string argument contains a null byte.
    InvalidString,
    /// More arguments than the builder can hold.
    TooManyArgs,
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::InvalidAddress => write!(f, "invalid address"),
            Self::InvalidString => write!(f, "string argument contains a null byte"),
            Self::TooManyArgs => write!(f, "too many arguments"),
        }
    }
}

/// Cursor over the output buffer.
///
/// Capacity is checked once up front against [`Message::encoded_len`], so the
/// individual writes index directly.
struct EncodeBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> EncodeBuf<'a> {
    #[inline]
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    fn write(&mut self, byte: u8) {
        self.buf[self.pos] = byte;
        self.pos += 1;
    }

    #[inline]
    fn write_slice(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    /// Write the null terminator and zero padding for a field that started at `start`.
    #[inline]
    fn terminate(&mut self, start: usize) {
        let end = start + string_field_len(self.pos - start);
        self.buf[self.pos..end].fill(0);
        self.pos = end;
    }

    #[inline]
    fn write_str(&mut self, s: &str) {
        let start = self.pos;
        self.write_slice(s.as_bytes());
        self.terminate(start);
    }

    #[inline]
    fn write_i32(&mut self, value: i32) {
        self.write_slice(&value.to_be_bytes());
    }

    #[inline]
    fn finish(self) -> usize {
        self.pos
    }
}

impl Message<'_> {
    /// Exact number of bytes [`encode()`](Self::encode) will write.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        // ',' plus one tag per argument
        let tags = string_field_len(1 + self.args().len());
        let args: usize = self
            .args()
            .iter()
            .map(|arg| match arg {
                Arg::Int(_) => 4,
                Arg::Str(s) => string_field_len(s.len()),
            })
            .sum();

        string_field_len(self.address().len()) + tags + args
    }

    /// Encode the message into the provided buffer.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::BufferTooSmall`] if the buffer is not large enough.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, EncodeError> {
        if buf.len() < self.encoded_len() {
            return Err(EncodeError::BufferTooSmall);
        }

        let mut eb = EncodeBuf::new(buf);

        eb.write_str(self.address());

        let tags_start = eb.pos;
        eb.write(b',');
        for arg in self.args() {
            eb.write(arg.type_tag());
        }
        eb.terminate(tags_start);

        for arg in self.args() {
            match arg {
                Arg::Int(v) => eb.write_i32(*v),
                Arg::Str(s) => eb.write_str(s),
            }
        }

        Ok(eb.finish())
    }

    /// Encode to a `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::BufferTooSmall`] if `N` is not large enough.
    pub fn encode_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, EncodeError> {
        let mut vec = heapless::Vec::new();
        // Resize to full capacity to allow encode() to write
        vec.resize(N, 0)
            .map_err(|_| EncodeError::BufferTooSmall)?;
        let len = self.encode(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }
}
