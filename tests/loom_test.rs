#![cfg(loom)]

use loom::thread;
use telemetry_ring::{split, RingBuffer};

fn leak(len: usize) -> &'static mut [u8] {
    Box::leak(vec![0u8; len].into_boxed_slice())
}

#[test]
fn write_against_delete() {
    loom::model(|| {
        let (mut tx, mut rx) = split(RingBuffer::new(leak(4)).unwrap());

        let t = thread::spawn(move || {
            tx.write(&[1, 2]);
            tx.write(&[3, 4]);
        });

        rx.delete_oldest(1);
        t.join().unwrap();

        // whatever the interleaving, the ring holds a contiguous run ending
        // in the last written element
        let mut out = [0u8; 3];
        let peek = rx.peek(&mut out);
        assert!(peek.len <= 3);
        assert_eq!(rx.newest(), Some(4));
        for w in out[..peek.len].windows(2) {
            assert_eq!(w[0] + 1, w[1]);
        }
    })
}

#[test]
fn take_is_atomic() {
    loom::model(|| {
        let (mut tx, mut rx) = split(RingBuffer::new(leak(8)).unwrap());

        let t = thread::spawn(move || {
            tx.write_text(b"abc");
        });

        let mut out = [0u8; 4];
        let n = rx.take(&mut out);
        t.join().unwrap();

        // either nothing or the full write was observed
        assert!(n == 0 || n == 3);
        assert_eq!(rx.len(), 3 - n);
    })
}
