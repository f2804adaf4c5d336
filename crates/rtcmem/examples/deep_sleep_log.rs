//! Simulated deep-sleep weather logger.
//!
//! Each loop iteration is one "boot": the logger opens the record list
//! kept in retained memory, derives a new sample from the last one, appends
//! it (evicting the oldest once the region is full) and prints the series.
//! The retained memory is a `BankedCells` that lives across iterations, the
//! way RTC memory lives across deep sleep. One simulated power cut shows
//! the list starting over.
//!
//! Run with `RUST_LOG=debug` to see the library's open/recovery events.

use std::error::Error;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rtcmem::prelude::*;
use tracing_subscriber::EnvFilter;

const BOOTS: u32 = 40;
const POWER_CUT_AT: u32 = 33;

/// One packed sample: 17 bytes, so 29 fit in the region.
///
/// Same byte layout as the `SensorSample` test fixture; change both together.
#[derive(Clone, Copy, Debug)]
struct Sample {
    timestamp: u32,
    temperature: f32,
    humidity: f32,
    pressure: f32,
    sent: bool,
    stored: bool,
}

impl Sample {
    fn initial() -> Self {
        Self {
            timestamp: 1,
            temperature: 20.0,
            humidity: 50.0,
            pressure: 100_000.0,
            sent: false,
            stored: false,
        }
    }

    /// The next sample: one tick later, each reading drifting randomly but
    /// pulled back inside its band.
    fn drift(&self, rng: &mut impl Rng) -> Self {
        let mut s = *self;
        s.timestamp += 1;
        if s.temperature < 25.0 {
            s.temperature += rng.random_range(0..200) as f32 / 100.0;
        }
        if s.temperature > 15.0 {
            s.temperature -= rng.random_range(0..200) as f32 / 100.0;
        }
        if s.humidity < 75.0 {
            s.humidity += rng.random_range(0..500) as f32 / 100.0;
        }
        if s.humidity > 25.0 {
            s.humidity -= rng.random_range(0..500) as f32 / 100.0;
        }
        if s.pressure < 110_000.0 {
            s.pressure += rng.random_range(0..1000) as f32;
        }
        if s.pressure > 90_000.0 {
            s.pressure -= rng.random_range(0..1000) as f32;
        }
        s.sent = false;
        s.stored = false;
        s
    }
}

impl Record for Sample {
    const SIZE: usize = 17;

    fn encode(&self, out: &mut [u8]) {
        out[0..4].copy_from_slice(&self.timestamp.to_le_bytes());
        out[4..8].copy_from_slice(&self.temperature.to_le_bytes());
        out[8..12].copy_from_slice(&self.humidity.to_le_bytes());
        out[12..16].copy_from_slice(&self.pressure.to_le_bytes());
        out[16] = self.sent as u8 | (self.stored as u8) << 1;
    }

    fn decode(bytes: &[u8]) -> Self {
        let field = |i: usize| [bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]];
        Self {
            timestamp: u32::from_le_bytes(field(0)),
            temperature: f32::from_le_bytes(field(4)),
            humidity: f32::from_le_bytes(field(8)),
            pressure: f32::from_le_bytes(field(12)),
            sent: bytes[16] & 0b01 != 0,
            stored: bytes[16] & 0b10 != 0,
        }
    }
}

type Log<'a> = RecordList<Sample, &'a mut BankedCells>;

fn print_series(log: &Log<'_>) {
    let series = |f: fn(&Sample) -> String| log.iter().map(|s| f(&s)).collect::<Vec<_>>().join(",");
    println!("timestamp: {}", series(|s| s.timestamp.to_string()));
    println!("temperature: {} C", series(|s| format!("{:.2}", s.temperature)));
    println!("humidity: {} %", series(|s| format!("{:.2}", s.humidity)));
    println!("pressure: {} Pa", series(|s| format!("{:.0}", s.pressure)));
}

/// One wake-up: open, report, append, print.
fn boot(memory: &mut BankedCells, rng: &mut ChaCha8Rng) -> Result<(), Box<dyn Error>> {
    let mut log: Log<'_> = RecordList::open(WordStore::new(memory)?)?;

    let sample = match log.last() {
        None => {
            println!("First run");
            Sample::initial()
        }
        Some(last) => {
            let full = if log.is_full() { "+" } else { "" };
            println!("{}{full} time(s)", log.len());
            last.drift(rng)
        }
    };

    log.add(&sample, OnFull::EvictOldest)?;
    print_series(&log);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut memory = BankedCells::new(RegionConfig::default())?;
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);

    for n in 0..BOOTS {
        if n == POWER_CUT_AT {
            tracing::info!(boot = n, "simulating power loss");
            memory.power_loss();
        }
        println!();
        boot(&mut memory, &mut rng)?;
    }
    Ok(())
}
