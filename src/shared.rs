use crate::error::OutOfRange;
use crate::loom::{Arc, Mutex, MutexGuard};
use crate::ring::{Peek, RingBuffer};
use core::fmt;
use std::sync::PoisonError;

struct Shared<'a, T> {
    ring: Mutex<RingBuffer<'a, T>>,
}

impl<'a, T> Shared<'a, T> {
    // Stands in for masking the producer's interrupt: every port call is one
    // critical section. A panic inside one leaves the indices consistent, so
    // poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, RingBuffer<'a, T>> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Splits a ring into its producer and consumer ports.
///
/// The producer is what the receive interrupt or a sampler holds, the
/// consumer what the main loop drains. Each call on either side is atomic
/// with respect to the other, so the multi-step index updates of the ring
/// never interleave.
pub fn split<T>(ring: RingBuffer<'_, T>) -> (Producer<'_, T>, Consumer<'_, T>) {
    let shared = Arc::new(Shared {
        ring: Mutex::new(ring),
    });
    (
        Producer {
            inner: shared.clone(),
        },
        Consumer { inner: shared },
    )
}

pub struct Producer<'a, T> {
    inner: Arc<Shared<'a, T>>,
}

impl<'a, T: Copy> Producer<'a, T> {
    pub fn push(&mut self, t: T) -> bool {
        self.inner.lock().push(t)
    }

    pub fn write(&mut self, data: &[T]) -> usize {
        self.inner.lock().write(data)
    }

    /// Returns whether the consumer is gone.
    pub fn is_closed(&self) -> bool {
        Arc::strong_count(&self.inner) <= 1
    }
}

impl<'a> Producer<'a, u8> {
    pub fn write_text(&mut self, text: &[u8]) -> usize {
        self.inner.lock().write_text(text)
    }
}

impl fmt::Write for Producer<'_, u8> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s.as_bytes());
        Ok(())
    }
}

pub struct Consumer<'a, T> {
    inner: Arc<Shared<'a, T>>,
}

impl<'a, T: Copy> Consumer<'a, T> {
    pub fn peek(&self, dest: &mut [T]) -> Peek {
        self.inner.lock().peek(dest)
    }

    pub fn delete_oldest(&mut self, count: usize) -> usize {
        self.inner.lock().delete_oldest(count)
    }

    pub fn pop(&mut self) -> Option<T> {
        self.inner.lock().pop()
    }

    /// Copies out up to `dest.len()` oldest elements and removes them in the
    /// same critical section.
    pub fn take(&mut self, dest: &mut [T]) -> usize {
        let mut ring = self.inner.lock();
        let n = ring.peek(dest).len;
        ring.delete_oldest(n)
    }

    pub fn get_nth(&self, n: usize) -> Result<T, OutOfRange> {
        self.inner.lock().get_nth(n)
    }

    /// See [`RingBuffer::get_nth_unchecked`].
    ///
    /// # Safety
    ///
    /// `n` must be less than [`capacity`](Self::capacity).
    pub unsafe fn get_nth_unchecked(&self, n: usize) -> T {
        self.inner.lock().get_nth_unchecked(n)
    }

    pub fn newest(&self) -> Option<T> {
        self.inner.lock().newest()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Returns whether the producer is gone.
    pub fn is_closed(&self) -> bool {
        Arc::strong_count(&self.inner) <= 1
    }
}
