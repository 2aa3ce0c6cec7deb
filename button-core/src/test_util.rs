//! Mocks and a minimal executor shared by the unit tests.

extern crate std;

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::digital::{self, InputPin};
use embedded_hal::i2c::{self, NoAcknowledgeSource, Operation};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::controller::TickSource;
use crate::haptic::{HapticDriver, HapticError};
use crate::transport::{DatagramChannel, TransportError};

/// Simple blocking executor for testing.
///
/// Every mock here completes immediately, so a pending poll is a test bug.
pub fn block_on<F: Future>(mut f: F) -> F::Output {
    fn noop_raw_waker() -> RawWaker {
        fn noop(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        RawWaker::new(core::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
    let mut cx = Context::from_waker(&waker);

    // SAFETY: We don't move f after pinning
    let mut f = unsafe { Pin::new_unchecked(&mut f) };

    match f.as_mut().poll(&mut cx) {
        Poll::Ready(result) => result,
        Poll::Pending => panic!("Mock future returned Pending unexpectedly"),
    }
}

/// Datagram channel that records sends and replays queued inbound datagrams.
pub struct MockChannel {
    /// Payloads that were accepted, in order.
    pub sent: Vec<Vec<u8>>,
    /// Every call to `send`, failed or not.
    pub send_attempts: usize,
    inbound: VecDeque<Result<Vec<u8>, TransportError>>,
    failures_left: usize,
    failure: TransportError,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            send_attempts: 0,
            inbound: VecDeque::new(),
            failures_left: 0,
            failure: TransportError::Io,
        }
    }

    /// Fail the next `count` sends with `error`.
    pub fn fail_sends(&mut self, count: usize, error: TransportError) {
        self.failures_left = count;
        self.failure = error;
    }

    pub fn push_inbound(&mut self, datagram: &[u8]) {
        self.inbound.push_back(Ok(datagram.to_vec()));
    }

    pub fn push_receive_error(&mut self, error: TransportError) {
        self.inbound.push_back(Err(error));
    }
}

impl DatagramChannel for MockChannel {
    async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.send_attempts += 1;
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(self.failure);
        }
        self.sent.push(payload.to_vec());
        Ok(())
    }

    /// Copies what fits but reports the full datagram length, like a socket
    /// that truncates silently.
    fn try_recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, TransportError> {
        match self.inbound.pop_front() {
            Some(Ok(datagram)) => {
                let n = datagram.len().min(buf.len());
                buf[..n].copy_from_slice(&datagram[..n]);
                Ok(Some(datagram.len()))
            }
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }
}

/// Delay that returns immediately and records the requested durations.
pub struct MockDelay {
    pub delays_ms: Vec<u32>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self {
            delays_ms: Vec::new(),
        }
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, _ns: u32) {}

    async fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}

/// Haptic driver that records played effects.
pub struct MockHaptic {
    pub played: Vec<u8>,
    pub fail: bool,
}

impl MockHaptic {
    pub fn new() -> Self {
        Self {
            played: Vec::new(),
            fail: false,
        }
    }
}

impl HapticDriver for MockHaptic {
    fn is_available(&self) -> bool {
        true
    }

    async fn play(&mut self, effect: u8) -> Result<(), HapticError> {
        if self.fail {
            return Err(HapticError::Bus);
        }
        self.played.push(effect);
        Ok(())
    }
}

/// Input pin that replays a sequence of levels, then holds the last one.
pub struct MockPin {
    levels: VecDeque<bool>,
    last: bool,
    fail_next: bool,
}

impl MockPin {
    pub fn new(levels: &[bool]) -> Self {
        Self {
            levels: levels.iter().copied().collect(),
            last: true,
            fail_next: false,
        }
    }

    /// Make the next read return an error without consuming a level.
    pub fn fail_next_read(&mut self) {
        self.fail_next = true;
    }

    /// Levels not yet read.
    pub fn remaining(&self) -> usize {
        self.levels.len()
    }
}

impl digital::ErrorType for MockPin {
    type Error = digital::ErrorKind;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.fail_next {
            self.fail_next = false;
            return Err(digital::ErrorKind::Other);
        }
        if let Some(level) = self.levels.pop_front() {
            self.last = level;
        }
        Ok(self.last)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Tick source that yields a fixed list of timestamps.
pub struct MockTicks {
    ticks: VecDeque<u64>,
}

impl MockTicks {
    pub fn every(period_ms: u64, count: usize) -> Self {
        Self {
            ticks: (0..count as u64).map(|i| i * period_ms).collect(),
        }
    }
}

impl TickSource for MockTicks {
    async fn next_tick(&mut self) -> u64 {
        self.ticks.pop_front().expect("tick source exhausted")
    }
}

/// I2C bus with one register-mapped device behind it.
#[derive(Debug)]
pub struct MockI2c {
    pub registers: [u8; 256],
    /// `(register, value)` for every byte written.
    pub writes: Vec<(u8, u8)>,
    /// NAK every transaction.
    pub absent: bool,
}

impl MockI2c {
    pub fn new() -> Self {
        Self {
            registers: [0; 256],
            writes: Vec::new(),
            absent: false,
        }
    }
}

impl i2c::ErrorType for MockI2c {
    type Error = i2c::ErrorKind;
}

impl I2c for MockI2c {
    async fn transaction(
        &mut self,
        _address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.absent {
            return Err(i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        let mut pointer = 0usize;
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    let Some((&first, rest)) = bytes.split_first() else {
                        continue;
                    };
                    pointer = usize::from(first);
                    for &value in rest {
                        self.registers[pointer] = value;
                        self.writes.push((pointer as u8, value));
                        pointer = (pointer + 1) % self.registers.len();
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.registers[pointer];
                        pointer = (pointer + 1) % self.registers.len();
                    }
                }
            }
        }
        Ok(())
    }
}
