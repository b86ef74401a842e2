use crate::error::SinkError;
use crate::shared::Producer;
use futures_sink::Sink;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Async face of a [`Producer`]. Writes never wait for the consumer: a full
/// ring evicts its oldest element, so the sink is ready whenever it is open.
pub struct RingSink<'a, T> {
    inner: Option<Producer<'a, T>>,
}

impl<'a, T> RingSink<'a, T> {
    pub fn new(producer: Producer<'a, T>) -> Self {
        Self {
            inner: Some(producer),
        }
    }

    pub fn into_inner(self) -> Option<Producer<'a, T>> {
        self.inner
    }
}

impl<'a, T: Copy> Sink<T> for RingSink<'a, T> {
    type Error = SinkError;

    fn poll_ready(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner
            .as_ref()
            .map(|_| Poll::Ready(Ok(())))
            .unwrap_or(Poll::Ready(Err(SinkError::Closed)))
    }

    fn start_send(mut self: Pin<&mut Self>, item: T) -> Result<(), Self::Error> {
        self.inner
            .as_mut()
            .map(|inner| {
                inner.push(item);
            })
            .ok_or(SinkError::Closed)
    }

    fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner
            .as_ref()
            .map(|_| Poll::Ready(Ok(())))
            .unwrap_or(Poll::Ready(Err(SinkError::Closed)))
    }

    fn poll_close(mut self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner = None;
        Poll::Ready(Ok(()))
    }
}
