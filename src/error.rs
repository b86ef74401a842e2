use core::fmt;

/// Returned by [`RingBuffer::new`](crate::RingBuffer::new) when the storage
/// cannot hold a single element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitError {
    CapacityTooSmall { capacity: usize },
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InitError::CapacityTooSmall { capacity } => write!(
                f,
                "ring storage of {} slots has no usable capacity, at least 2 are required",
                capacity
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InitError {}

/// The checked accessor was asked for an element the ring does not hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} is out of range for a ring holding {} elements",
            self.index, self.len
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRange {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryError {
    CapacityMismatch { pressure: usize, temperature: usize },
    NotEmpty,
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            HistoryError::CapacityMismatch {
                pressure,
                temperature,
            } => write!(
                f,
                "pressure ring has {} slots but temperature ring has {}",
                pressure, temperature
            ),
            HistoryError::NotEmpty => f.write_str("history rings must start empty"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HistoryError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SinkError {
    Closed,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Closed => write!(f, "send failed because the sink is closed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SinkError {}

impl SinkError {
    pub fn is_closed(&self) -> bool {
        matches!(self, SinkError::Closed)
    }
}

/// A transfer between a ring and a [`Transport`](crate::transport::Transport)
/// stopped early.
#[derive(Clone, PartialEq, Eq)]
pub struct TransferError<E> {
    pub(crate) err: E,
    pub(crate) transferred: usize,
}

impl<E> TransferError<E> {
    /// Bytes moved before the transport failed.
    pub fn transferred(&self) -> usize {
        self.transferred
    }

    pub fn into_inner(self) -> E {
        self.err
    }
}

impl<E: fmt::Debug> fmt::Debug for TransferError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferError")
            .field("err", &self.err)
            .field("transferred", &self.transferred)
            .finish()
    }
}

impl<E: fmt::Display> fmt::Display for TransferError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transport failed after {} bytes: {}",
            self.transferred, self.err
        )
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug + fmt::Display> std::error::Error for TransferError<E> {}
