//! Datagram channel trait and the session built on top of it.

use core::future::Future;
use core::net::{Ipv4Addr, SocketAddrV4};

use embedded_hal_async::delay::DelayNs;
use osc_proto::{Arg, EncodeError, Message, ADDR_HANDSHAKE};

use crate::retry::RetryPolicy;

/// Receive buffer capacity. Longer datagrams are truncated.
pub const RX_BUFFER_SIZE: usize = 1024;

/// Transmit buffer capacity for encoded outbound messages.
pub const TX_BUFFER_SIZE: usize = 256;

/// Error type for channel operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Generic socket I/O failure.
    Io,
    /// No route to the destination (link down, no address yet).
    NoRoute,
    /// Datagram larger than the socket buffer.
    TooLarge,
    /// Socket is not bound.
    NotBound,
}

/// Error type for sending an encoded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError {
    /// The message could not be encoded.
    Encode(EncodeError),
    /// The channel rejected the datagram.
    Transport(TransportError),
}

impl From<EncodeError> for SendError {
    fn from(err: EncodeError) -> Self {
        SendError::Encode(err)
    }
}

impl From<TransportError> for SendError {
    fn from(err: TransportError) -> Self {
        SendError::Transport(err)
    }
}

/// Error type for the startup handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandshakeError {
    /// Every attempt failed; `last` is the error of the final attempt.
    Exhausted { attempts: u32, last: SendError },
}

/// Stable device number announced in the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceIdentity(pub i32);

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self(1)
    }
}

/// Where events go and where commands arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEndpoint {
    /// Listener address and port for outbound events.
    pub destination: SocketAddrV4,
    /// Local port bound for inbound commands.
    pub listen_port: u16,
}

impl SessionEndpoint {
    /// Heuristic: same /24 as the local address.
    ///
    /// Only used for a startup diagnostic; the netmask is not consulted.
    #[must_use]
    pub fn likely_same_subnet(&self, local: Ipv4Addr) -> bool {
        local.octets()[..3] == self.destination.ip().octets()[..3]
    }
}

/// Async trait for duplex datagram channels.
///
/// This trait abstracts the socket so the session and control loop can run
/// against a UDP socket on the device or a mock on the host.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait DatagramChannel {
    /// Send one datagram to the configured destination.
    ///
    /// Fire-and-forget: success means the datagram was handed to the stack.
    fn send(&mut self, payload: &[u8]) -> impl Future<Output = Result<(), TransportError>>;

    /// Copy a pending datagram into `buf` without waiting.
    ///
    /// Returns `Ok(None)` immediately when nothing is pending. Datagrams longer
    /// than `buf` may be truncated or dropped.
    fn try_recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError>;
}

/// Owns the channel plus its transmit and receive buffers.
///
/// Sends are single attempts. Only [`handshake()`](Self::handshake) retries.
pub struct Session<C> {
    channel: C,
    rx: [u8; RX_BUFFER_SIZE],
    tx: [u8; TX_BUFFER_SIZE],
}

impl<C: DatagramChannel> Session<C> {
    /// Create a new session over `channel`.
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            rx: [0; RX_BUFFER_SIZE],
            tx: [0; TX_BUFFER_SIZE],
        }
    }

    /// Send raw bytes once. Failures are logged and returned, never retried.
    pub async fn send_best_effort(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        send_once(&mut self.channel, payload).await
    }

    /// Encode `msg` into the transmit buffer and send it once.
    pub async fn send_message(&mut self, msg: &Message<'_>) -> Result<(), SendError> {
        let len = msg.encode(&mut self.tx).inspect_err(|e| {
            warn!("encode failed for {}: {:?}", msg.address(), e);
        })?;

        send_once(&mut self.channel, &self.tx[..len]).await?;
        trace!("sent {} ({} bytes)", msg.address(), len);
        Ok(())
    }

    /// Poll for one inbound datagram without blocking.
    pub fn try_receive(&mut self) -> Result<Option<&[u8]>, TransportError> {
        match self.channel.try_recv(&mut self.rx)? {
            Some(len) => Ok(Some(&self.rx[..len.min(RX_BUFFER_SIZE)])),
            None => Ok(None),
        }
    }

    /// Announce `identity` to the listener, retrying per `policy`.
    ///
    /// Stops at the first successful send. Failure is not fatal to the
    /// caller; the control loop runs either way.
    pub async fn handshake<D: DelayNs>(
        &mut self,
        identity: DeviceIdentity,
        policy: RetryPolicy,
        delay: &mut D,
    ) -> Result<(), HandshakeError> {
        let args = [Arg::Int(identity.0)];
        let msg = Message::new(ADDR_HANDSHAKE, &args).map_err(|e| HandshakeError::Exhausted {
            attempts: 0,
            last: SendError::Encode(e),
        })?;

        let mut attempts = policy.attempts();
        let mut last = SendError::Transport(TransportError::Io);

        while let Some(attempt) = attempts.next(delay).await {
            match self.send_message(&msg).await {
                Ok(()) => {
                    info!("handshake sent (device {}, attempt {})", identity.0, attempt);
                    return Ok(());
                }
                Err(e) => {
                    warn!("handshake attempt {} of {} failed", attempt, policy.limit());
                    last = e;
                }
            }
        }

        Err(HandshakeError::Exhausted {
            attempts: attempts.made(),
            last,
        })
    }

    /// Get a reference to the channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Get a mutable reference to the channel.
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Decompose the session into its channel.
    pub fn into_inner(self) -> C {
        self.channel
    }
}

/// One send attempt, logging failures.
///
/// Borrows only the channel, so `payload` may point into the session's
/// transmit buffer.
async fn send_once<C: DatagramChannel>(
    channel: &mut C,
    payload: &[u8],
) -> Result<(), TransportError> {
    channel.send(payload).await.inspect_err(|e| {
        warn!("send failed: {:?}", e);
    })
}
