//! UDP datagram channel on the `embassy-net` stack.
//!
//! Sends go to the fixed listener endpoint. Receives poll the socket once
//! and return immediately when nothing is queued, so the control loop never
//! waits on the network. A datagram larger than the socket's receive buffer
//! is discarded by the stack and reads as nothing pending.

use core::net::SocketAddrV4;
use core::task::Poll;

use button_core::{DatagramChannel, TransportError};
use embassy_futures::poll_once;
use embassy_net::udp::{RecvError, SendError, UdpSocket};
use embassy_net::{IpAddress, IpEndpoint};

/// Convert socket send errors to [`TransportError`].
///
/// Helper instead of a `From` impl because both types are foreign here.
#[inline]
fn send_error_to_transport_error(e: SendError) -> TransportError {
    match e {
        SendError::NoRoute => TransportError::NoRoute,
        SendError::SocketNotBound => TransportError::NotBound,
        SendError::PacketTooLarge => TransportError::TooLarge,
        #[allow(unreachable_patterns)]
        _ => TransportError::Io,
    }
}

/// A bound UDP socket plus the destination for outbound datagrams.
pub struct UdpChannel<'d> {
    socket: UdpSocket<'d>,
    destination: IpEndpoint,
}

impl<'d> UdpChannel<'d> {
    /// Wrap an already bound socket.
    #[must_use]
    pub fn new(socket: UdpSocket<'d>, destination: SocketAddrV4) -> Self {
        Self {
            socket,
            destination: IpEndpoint::new(IpAddress::Ipv4(*destination.ip()), destination.port()),
        }
    }

    /// Get a reference to the socket.
    #[inline]
    #[must_use]
    pub fn socket(&self) -> &UdpSocket<'d> {
        &self.socket
    }
}

impl DatagramChannel for UdpChannel<'_> {
    async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.socket
            .send_to(payload, self.destination)
            .await
            .map_err(send_error_to_transport_error)
    }

    fn try_recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError> {
        match poll_once(self.socket.recv_from(buf)) {
            Poll::Ready(Ok((len, meta))) => {
                defmt::trace!("{} bytes from {}", len, meta.endpoint);
                Ok(Some(len))
            }
            // The stack has already discarded an oversized datagram
            Poll::Ready(Err(RecvError::Truncated)) => {
                defmt::trace!("oversized datagram dropped");
                Ok(None)
            }
            #[allow(unreachable_patterns)]
            Poll::Ready(Err(_)) => Err(TransportError::Io),
            Poll::Pending => Ok(None),
        }
    }
}
