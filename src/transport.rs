//! Byte-level access to a serial peripheral.
//!
//! Register programming stays with the board code; the rings only see a
//! [`Transport`] that moves one byte at a time. That keeps the receive and
//! transmit paths testable against [`Loopback`] without hardware.

use crate::error::TransferError;
use crate::ring::ByteRing;

pub trait Transport {
    type Error;

    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Asserts the peripheral's select line. No-op for links without one.
    fn select(&mut self) {}

    fn deselect(&mut self) {}
}

impl<X: Transport + ?Sized> Transport for &mut X {
    type Error = X::Error;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).write_byte(byte)
    }

    fn select(&mut self) {
        (**self).select()
    }

    fn deselect(&mut self) {
        (**self).deselect()
    }
}

/// Sends up to `max` of the oldest bytes in `ring` to `transport` within one
/// select/deselect bracket, returning how many went out.
///
/// A byte leaves the ring only after the transport accepted it, so on error
/// everything unsent is still queued.
pub fn transmit<X: Transport>(
    ring: &mut ByteRing<'_>,
    transport: &mut X,
    max: usize,
) -> Result<usize, TransferError<X::Error>> {
    transport.select();
    let mut sent = 0;
    let ret = loop {
        if sent == max {
            break Ok(sent);
        }

        let byte = match ring.oldest() {
            Some(byte) => byte,
            None => break Ok(sent),
        };

        if let Err(err) = transport.write_byte(byte) {
            break Err(TransferError {
                err,
                transferred: sent,
            });
        }

        ring.delete_oldest(1);
        sent += 1;
    };
    transport.deselect();

    log::trace!("transmitted {} bytes, {} still queued", sent, ring.len());
    ret
}

/// Reads `count` bytes from `transport` into `ring`. Older queued bytes are
/// evicted if the ring overflows.
pub fn receive<X: Transport>(
    transport: &mut X,
    ring: &mut ByteRing<'_>,
    count: usize,
) -> Result<usize, TransferError<X::Error>> {
    transport.select();
    let mut received = 0;
    let ret = loop {
        if received == count {
            break Ok(received);
        }

        match transport.read_byte() {
            Ok(byte) => {
                ring.push(byte);
                received += 1;
            }
            Err(err) => {
                break Err(TransferError {
                    err,
                    transferred: received,
                })
            }
        }
    };
    transport.deselect();

    log::trace!("received {} bytes, {} queued", received, ring.len());
    ret
}

#[cfg(feature = "std")]
pub use self::loopback::{Loopback, LoopbackError};

#[cfg(feature = "std")]
mod loopback {
    use super::Transport;
    use std::collections::VecDeque;
    use std::fmt;

    /// In-memory link: reads are served from a queue the test fills, writes
    /// are recorded.
    #[derive(Debug, Default)]
    pub struct Loopback {
        pub rx: VecDeque<u8>,
        pub tx: Vec<u8>,
        /// Writes fail once `tx` holds this many bytes.
        pub tx_limit: Option<usize>,
        selected: bool,
        selections: usize,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum LoopbackError {
        Empty,
        Full,
        NotSelected,
    }

    impl fmt::Display for LoopbackError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                LoopbackError::Empty => f.write_str("no byte to read"),
                LoopbackError::Full => f.write_str("transmit side is full"),
                LoopbackError::NotSelected => f.write_str("peripheral is not selected"),
            }
        }
    }

    impl std::error::Error for LoopbackError {}

    impl Loopback {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_rx(rx: &[u8]) -> Self {
            Self {
                rx: rx.iter().copied().collect(),
                ..Self::default()
            }
        }

        pub fn is_selected(&self) -> bool {
            self.selected
        }

        /// How many select/deselect brackets were opened.
        pub fn selections(&self) -> usize {
            self.selections
        }
    }

    impl Transport for Loopback {
        type Error = LoopbackError;

        fn read_byte(&mut self) -> Result<u8, Self::Error> {
            if !self.selected {
                return Err(LoopbackError::NotSelected);
            }
            self.rx.pop_front().ok_or(LoopbackError::Empty)
        }

        fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
            if !self.selected {
                return Err(LoopbackError::NotSelected);
            }
            if self.tx_limit.map_or(false, |limit| self.tx.len() >= limit) {
                return Err(LoopbackError::Full);
            }
            self.tx.push(byte);
            Ok(())
        }

        fn select(&mut self) {
            self.selected = true;
            self.selections += 1;
        }

        fn deselect(&mut self) {
            self.selected = false;
        }
    }
}
