use core::fmt::{self, Write};

use crate::error::{HistoryError, OutOfRange};
use crate::ring::{ByteRing, Ring32};

/// One compensated reading from the pressure sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sample {
    /// Pressure in hundredths of a millibar.
    pub pressure: i32,
    /// Temperature in hundredths of a degree Celsius.
    pub temperature: i32,
    pub valid: bool,
}

/// Recent pressure and temperature readings, newest last.
///
/// Both rings are fed together so the `n`th newest pressure and the `n`th
/// newest temperature always come from the same sample.
pub struct SampleHistory<'a> {
    pressure: Ring32<'a>,
    temperature: Ring32<'a>,
}

impl<'a> SampleHistory<'a> {
    /// Pairs two empty rings of the same capacity into a history.
    pub fn new(pressure: Ring32<'a>, temperature: Ring32<'a>) -> Result<Self, HistoryError> {
        if pressure.capacity() != temperature.capacity() {
            return Err(HistoryError::CapacityMismatch {
                pressure: pressure.capacity(),
                temperature: temperature.capacity(),
            });
        }
        // already stored elements would never line up with their partners
        if !pressure.is_empty() || !temperature.is_empty() {
            return Err(HistoryError::NotEmpty);
        }

        Ok(Self {
            pressure,
            temperature,
        })
    }

    /// Records `sample` if the sensor flagged it valid. Returns whether it
    /// was kept.
    pub fn record(&mut self, sample: Sample) -> bool {
        if !sample.valid {
            log::debug!("dropping invalid sample {:?}", sample);
            return false;
        }

        self.pressure.push(sample.pressure);
        self.temperature.push(sample.temperature);
        true
    }

    pub fn latest(&self) -> Option<Sample> {
        self.nth_newest(0).ok()
    }

    pub fn nth_newest(&self, n: usize) -> Result<Sample, OutOfRange> {
        Ok(Sample {
            pressure: self.pressure.get_nth(n)?,
            temperature: self.temperature.get_nth(n)?,
            valid: true,
        })
    }

    /// Mean pressure over the stored samples.
    pub fn mean_pressure(&self) -> Option<i32> {
        mean(&self.pressure)
    }

    pub fn mean_temperature(&self) -> Option<i32> {
        mean(&self.temperature)
    }

    pub fn len(&self) -> usize {
        self.pressure.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pressure.is_empty()
    }

    /// Formats the newest sample as a debug line into `out`. Writes nothing
    /// when no sample is stored.
    pub fn report(&self, out: &mut ByteRing<'_>) -> bool {
        match self.latest() {
            Some(sample) => {
                // ByteRing never rejects a write
                let _ = write!(out, "{}", sample);
                true
            }
            None => false,
        }
    }
}

fn mean(ring: &Ring32<'_>) -> Option<i32> {
    if ring.is_empty() {
        return None;
    }
    let sum: i64 = ring.iter().map(|&v| i64::from(v)).sum();
    Some((sum / ring.len() as i64) as i32)
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Pressure is {}, temperature is {}, {}",
            self.pressure,
            self.temperature,
            if self.valid { "Valid" } else { "Not valid" }
        )
    }
}
