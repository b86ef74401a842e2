#![cfg(not(loom))]

use futures_util::SinkExt;
use std::fmt::Write;
use std::thread;
use telemetry_ring::error::SinkError;
use telemetry_ring::transport::{self, Loopback, LoopbackError, Transport};
use telemetry_ring::{split, RingBuffer, RingSink};

fn leak<T: Copy + Default>(len: usize) -> &'static mut [T] {
    Box::leak(vec![T::default(); len].into_boxed_slice())
}

#[test]
fn ports_see_the_same_ring() {
    let mut storage = [0u8; 16];
    let (mut tx, mut rx) = split(RingBuffer::new(&mut storage).unwrap());

    tx.write_text(b"ok\0ignored");
    write!(tx, "{}", 42).unwrap();

    assert_eq!(rx.len(), 4);
    assert_eq!(rx.newest(), Some(b'2'));
    assert_eq!(rx.get_nth(3), Ok(b'o'));

    let mut out = [0u8; 8];
    assert_eq!(rx.take(&mut out), 4);
    assert_eq!(&out[..4], b"ok42");
    assert!(rx.is_empty());
}

#[test]
fn closed_when_other_side_dropped() {
    let (tx, rx) = split(RingBuffer::new(leak::<u8>(4)).unwrap());
    assert!(!tx.is_closed());

    drop(rx);
    assert!(tx.is_closed());
}

#[test]
fn threaded_producer_never_reorders() {
    const COUNT: u32 = 10_000;
    let (mut tx, mut rx) = split(RingBuffer::new(leak::<u32>(64)).unwrap());

    let t = thread::spawn(move || {
        for i in 0..COUNT {
            tx.push(i);
        }
    });

    // elements may be evicted under the consumer, but what is drained must
    // stay strictly increasing
    let mut last = None;
    let mut drained = 0;
    loop {
        let v = match rx.pop() {
            Some(v) => v,
            // the producer may have pushed its last element right before
            // closing, so look once more
            None if rx.is_closed() => match rx.pop() {
                Some(v) => v,
                None => break,
            },
            None => {
                thread::yield_now();
                continue;
            }
        };

        if let Some(prev) = last {
            assert!(v > prev, "{} after {}", v, prev);
        }
        last = Some(v);
        drained += 1;
    }

    t.join().unwrap();
    assert!(drained > 0);
    assert_eq!(last, Some(COUNT - 1));
}

#[test]
fn sink_feeds_the_ring() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut storage = [0i16; 8];
    let (tx, rx) = split(RingBuffer::new(&mut storage).unwrap());
    let mut sink = RingSink::new(tx);

    futures_executor::block_on(async {
        for v in 0..10i16 {
            sink.feed(v).await.unwrap();
        }
        sink.flush().await.unwrap();
        sink.close().await.unwrap();

        assert_eq!(sink.send(99).await, Err(SinkError::Closed));
    });

    assert_eq!(rx.len(), 7);
    assert_eq!(rx.newest(), Some(9));
    assert_eq!(rx.get_nth(6), Ok(3));
}

#[tokio::test]
async fn sink_on_tokio_runtime() {
    let (tx, rx) = split(RingBuffer::new(leak::<i32>(32)).unwrap());
    let mut sink = RingSink::new(tx);

    let handle = tokio::spawn(async move {
        for v in 0..16 {
            sink.send(v).await.unwrap();
        }
    });
    handle.await.unwrap();

    assert_eq!(rx.len(), 16);
    assert_eq!(rx.newest(), Some(15));
    assert!(rx.is_closed());
}

#[test]
fn drain_to_transport_after_isr_writes() {
    let mut storage = [0u8; 32];
    let mut ring = RingBuffer::new(&mut storage).unwrap();
    let mut uart = Loopback::with_rx(b"AT\r\n");

    assert_eq!(transport::receive(&mut uart, &mut ring, 4), Ok(4));
    assert_eq!(transport::transmit(&mut ring, &mut uart, 2), Ok(2));
    assert_eq!(uart.tx, b"AT");
    assert_eq!(transport::transmit(&mut ring, &mut uart, usize::MAX), Ok(2));
    assert_eq!(uart.tx, b"AT\r\n");
    assert!(ring.is_empty());
    assert_eq!(uart.selections(), 3);
}

#[test]
fn consumer_drains_through_transport() {
    let (mut tx, mut rx) = split(RingBuffer::new(leak::<u8>(32)).unwrap());
    let mut uart = Loopback::new();

    tx.write(b"echo: hi\n");
    assert_eq!(uart.write_byte(b'x'), Err(LoopbackError::NotSelected));

    let mut out = [0u8; 4];
    uart.select();
    loop {
        let n = rx.take(&mut out);
        if n == 0 {
            break;
        }
        for &b in &out[..n] {
            uart.write_byte(b).unwrap();
        }
    }
    uart.deselect();

    assert_eq!(uart.tx, b"echo: hi\n");
    assert_eq!(uart.selections(), 1);
    assert!(!uart.is_selected());
    assert!(rx.is_empty());
}
