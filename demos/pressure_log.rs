use telemetry_ring::telemetry::{Sample, SampleHistory};
use telemetry_ring::transport::{self, Loopback};
use telemetry_ring::RingBuffer;

fn main() {
    env_logger::init();

    let mut pressure = [0i32; 9];
    let mut temperature = [0i32; 9];
    let mut line = [0u8; 128];

    let mut history = SampleHistory::new(
        RingBuffer::new(&mut pressure).unwrap(),
        RingBuffer::new(&mut temperature).unwrap(),
    )
    .unwrap();
    let mut out = RingBuffer::new(&mut line).unwrap();
    let mut uart = Loopback::new();

    for i in 0..12 {
        let sample = Sample {
            pressure: 101_325 - i * 12,
            temperature: 2_150 + i * 3,
            valid: i % 5 != 4,
        };
        history.record(sample);
        history.report(&mut out);
        transport::transmit(&mut out, &mut uart, usize::MAX).unwrap();
    }

    print!("{}", String::from_utf8_lossy(&uart.tx));
    println!(
        "{} samples kept, mean pressure {:?}, mean temperature {:?}",
        history.len(),
        history.mean_pressure(),
        history.mean_temperature()
    );
}
