use telemetry_ring::{split, RingBuffer};

// Walks the unchecked accessor over every in-contract index at every head
// position, so miri can check each read stays inside the storage.
#[test]
fn unchecked_nth_stays_in_bounds() {
    const CAP: usize = 7;
    let mut storage = [0u32; CAP];
    let mut ring = RingBuffer::new(&mut storage).unwrap();

    for i in 0..(3 * CAP as u32) {
        ring.push(i);
        for n in 0..ring.len() {
            let v = unsafe { ring.get_nth_unchecked(n) };
            assert_eq!(v, i - n as u32);
        }
        for n in ring.len()..CAP {
            let _ = unsafe { ring.get_nth_unchecked(n) };
        }
    }
}

#[test]
fn peek_across_the_wrap() {
    let mut storage = [0u16; 5];
    let mut ring = RingBuffer::new(&mut storage).unwrap();

    for round in 0..20u16 {
        ring.write(&[round, round + 1, round + 2]);
        ring.delete_oldest(2);

        let mut out = [0u16; 5];
        let peek = ring.peek(&mut out);
        eprintln!("round = {}, out = {:?}", round, &out[..peek.len]);
        assert_eq!(out[peek.len - 1], round + 2);
    }
}

#[cfg(not(loom))]
#[test]
fn split_ports_under_miri() {
    let mut storage = [0u8; 3];
    let (mut tx, mut rx) = split(RingBuffer::new(&mut storage).unwrap());

    tx.write(&[1, 2, 3]);
    assert_eq!(unsafe { rx.get_nth_unchecked(0) }, 3);
    assert_eq!(rx.pop(), Some(2));
    assert_eq!(rx.delete_oldest(10), 1);
    assert_eq!(rx.capacity(), 3);
}
