//! Fixed-capacity ring buffers for firmware that moves bytes and samples
//! between interrupt handlers and a main loop.
//!
//! [`RingBuffer`] never allocates: it is a view over storage the caller owns.
//! A full ring evicts its oldest element on write rather than refusing it.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
#[cfg(feature = "std")]
mod loom;
mod ring;
#[cfg(feature = "std")]
mod shared;
#[cfg(feature = "std")]
pub mod sink;
pub mod telemetry;
pub mod transport;

pub use crate::error::{HistoryError, InitError, OutOfRange, SinkError, TransferError};
pub use crate::ring::{
    ByteRing, Iter, Peek, Phase, Ring16, Ring32, RingBuffer, DEFAULT_TEXT_SCAN,
};
#[cfg(feature = "std")]
pub use crate::shared::{split, Consumer, Producer};
#[cfg(feature = "std")]
pub use crate::sink::RingSink;
