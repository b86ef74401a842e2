use core::{cmp, fmt, slice};

use crate::error::{InitError, OutOfRange};

/// How far [`RingBuffer::write_text`] looks for the terminating NUL.
pub const DEFAULT_TEXT_SCAN: usize = 255;

/// Fixed-capacity circular buffer over caller-owned storage.
///
/// `head` is the next write slot and `tail` the oldest stored element. One
/// slot is always left free so `head == tail` only ever means empty, which
/// makes the usable capacity `storage.len() - 1`. Writing into a full ring
/// evicts the oldest element instead of failing.
///
/// Nothing here locks. A ring that is written from an interrupt handler and
/// drained from the main loop needs the accesses serialized by the caller,
/// see [`split`](crate::split) for the hosted version of that arrangement.
pub struct RingBuffer<'a, T> {
    storage: &'a mut [T],
    head: usize,
    tail: usize,
}

pub type ByteRing<'a> = RingBuffer<'a, u8>;
pub type Ring16<'a> = RingBuffer<'a, i16>;
pub type Ring32<'a> = RingBuffer<'a, i32>;

/// Outcome of [`RingBuffer::peek`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct Peek {
    /// Elements copied into the destination.
    pub len: usize,
    /// The destination asked for more than the ring held.
    pub truncated: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Partial,
    /// The next write evicts the oldest element.
    AtCapacity,
}

impl<'a, T: Copy> RingBuffer<'a, T> {
    /// Binds an empty ring to `storage`. The whole slice is used, so the
    /// capacity is `storage.len()`.
    pub fn new(storage: &'a mut [T]) -> Result<Self, InitError> {
        let capacity = storage.len();
        if capacity < 2 {
            log::warn!("refusing ring storage of {} slots", capacity);
            return Err(InitError::CapacityTooSmall { capacity });
        }

        log::debug!("ring bound to {} slots", capacity);
        Ok(Self {
            storage,
            head: 0,
            tail: 0,
        })
    }

    /// Appends one element, evicting the oldest one if the ring was full.
    /// Returns whether an eviction happened.
    pub fn push(&mut self, t: T) -> bool {
        self.storage[self.head] = t;
        self.head = self.index(self.head + 1);

        if self.head == self.tail {
            self.tail = self.index(self.tail + 1);
            true
        } else {
            false
        }
    }

    /// Appends `data` in order. Never fails: once the ring is full every
    /// further element pushes the oldest one out, so writing more than
    /// [`usable_capacity`](Self::usable_capacity) elements keeps only the
    /// last ones. Returns how many elements were evicted.
    pub fn write(&mut self, data: &[T]) -> usize {
        let mut evicted = 0;
        for &t in data {
            if self.push(t) {
                evicted += 1;
            }
        }

        if evicted > 0 {
            log::trace!("ring overflow, {} oldest elements evicted", evicted);
        }
        evicted
    }

    /// Copies the oldest `min(len, dest.len())` elements into `dest`, oldest
    /// first, without consuming them.
    pub fn peek(&self, dest: &mut [T]) -> Peek {
        let len = self.len();
        let n = cmp::min(len, dest.len());
        let (front, back) = self.as_slices();

        let first = cmp::min(n, front.len());
        dest[..first].copy_from_slice(&front[..first]);
        dest[first..n].copy_from_slice(&back[..n - first]);

        Peek {
            len: n,
            truncated: dest.len() > len,
        }
    }

    /// Discards up to `count` of the oldest elements and returns how many
    /// were actually dropped. Asking for more than is stored empties the ring.
    pub fn delete_oldest(&mut self, count: usize) -> usize {
        let len = self.len();
        let k = cmp::min(count, len);
        self.tail = self.index(self.tail + k);
        if k == len {
            self.head = self.tail;
        }
        k
    }

    /// Removes and returns the oldest element.
    pub fn pop(&mut self) -> Option<T> {
        let oldest = self.oldest()?;
        self.delete_oldest(1);
        Some(oldest)
    }

    pub fn oldest(&self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(self.storage[self.tail])
        }
    }

    /// The most recently written element still held.
    pub fn newest(&self) -> Option<T> {
        self.get_nth(0).ok()
    }

    /// Returns the `n`th newest element; `0` is the last one written.
    pub fn get_nth(&self, n: usize) -> Result<T, OutOfRange> {
        let len = self.len();
        if n >= len {
            return Err(OutOfRange { index: n, len });
        }
        // Safety: n < len < capacity
        Ok(unsafe { self.get_nth_unchecked(n) })
    }

    /// Returns the `n`th newest element without checking it is stored.
    ///
    /// With `len() <= n < capacity()` this reads a slot that holds stale or
    /// never written data; the value is meaningless but the read is sound.
    ///
    /// # Safety
    ///
    /// `n` must be less than [`capacity`](Self::capacity).
    pub unsafe fn get_nth_unchecked(&self, n: usize) -> T {
        debug_assert!(n < self.capacity());
        let idx = if n < self.head {
            self.head - n - 1
        } else {
            self.capacity() - 1 - n + self.head
        };
        *self.storage.get_unchecked(idx)
    }

    pub fn clear(&mut self) {
        self.tail = self.head;
    }
}

impl<'a, T> RingBuffer<'a, T> {
    pub fn len(&self) -> usize {
        if self.head >= self.tail {
            self.head - self.tail
        } else {
            self.capacity() - (self.tail - self.head)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.usable_capacity()
    }

    pub fn phase(&self) -> Phase {
        if self.is_empty() {
            Phase::Empty
        } else if self.is_full() {
            Phase::AtCapacity
        } else {
            Phase::Partial
        }
    }

    /// Slots in the backing storage.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Elements that fit before writes start evicting.
    pub fn usable_capacity(&self) -> usize {
        self.capacity() - 1
    }

    /// The stored elements as two contiguous runs, oldest first. The second
    /// run is empty unless the contents wrap around the end of the storage.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        if self.head >= self.tail {
            (&self.storage[self.tail..self.head], &[])
        } else {
            (&self.storage[self.tail..], &self.storage[..self.head])
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        let (front, back) = self.as_slices();
        Iter {
            front: front.iter(),
            back: back.iter(),
        }
    }

    fn index(&self, pos: usize) -> usize {
        pos % self.capacity()
    }
}

impl<'a> RingBuffer<'a, u8> {
    /// Writes `text` up to its first NUL, looking at no more than
    /// [`DEFAULT_TEXT_SCAN`] bytes.
    pub fn write_text(&mut self, text: &[u8]) -> usize {
        self.write_text_bounded(text, DEFAULT_TEXT_SCAN)
    }

    /// Writes `text` up to its first NUL, looking at no more than `max_scan`
    /// bytes. Without a NUL in range, `min(max_scan, text.len())` bytes are
    /// written. Returns the evicted count like [`write`](Self::write).
    pub fn write_text_bounded(&mut self, text: &[u8], max_scan: usize) -> usize {
        let scan = &text[..cmp::min(max_scan, text.len())];
        let len = scan.iter().position(|&b| b == 0).unwrap_or(scan.len());
        self.write(&scan[..len])
    }
}

impl fmt::Write for RingBuffer<'_, u8> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s.as_bytes());
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'r, 'a, T> IntoIterator for &'r RingBuffer<'a, T> {
    type Item = &'r T;
    type IntoIter = Iter<'r, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Oldest-first iterator over a ring's contents.
#[derive(Clone)]
pub struct Iter<'r, T> {
    front: slice::Iter<'r, T>,
    back: slice::Iter<'r, T>,
}

impl<'r, T> Iterator for Iter<'r, T> {
    type Item = &'r T;

    fn next(&mut self) -> Option<Self::Item> {
        self.front.next().or_else(|| self.back.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.front.len() + self.back.len();
        (len, Some(len))
    }
}

impl<'r, T> DoubleEndedIterator for Iter<'r, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.back.next_back().or_else(|| self.front.next_back())
    }
}

impl<'r, T> ExactSizeIterator for Iter<'r, T> {}
