use telemetry_ring::transport::{self, Loopback, Transport};
use telemetry_ring::{split, RingBuffer};

fn main() {
    env_logger::init();

    let mut rx_storage = [0u8; 64];
    let mut tx_storage = [0u8; 64];
    let mut rx_ring = RingBuffer::new(&mut rx_storage).unwrap();
    let (mut tx, mut drain) = split(RingBuffer::new(&mut tx_storage).unwrap());

    // bytes arriving on the receive line, as the interrupt would see them
    let mut uart = Loopback::with_rx(b"hello from the host\n");
    let n = transport::receive(&mut uart, &mut rx_ring, 20).unwrap();
    println!("received {} bytes", n);

    // main loop: echo the line back through the transmit ring
    let mut line = [0u8; 64];
    let peek = rx_ring.peek(&mut line);
    rx_ring.delete_oldest(peek.len);
    tx.write(b"echo: ");
    tx.write(&line[..peek.len]);

    let mut out = [0u8; 16];
    uart.select();
    loop {
        let n = drain.take(&mut out);
        if n == 0 {
            break;
        }
        for &b in &out[..n] {
            uart.write_byte(b).unwrap();
        }
    }
    uart.deselect();

    print!("{}", String::from_utf8_lossy(&uart.tx));
}
