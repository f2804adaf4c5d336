//! Reusable record fixtures.
//!
//! - [`Reading`]: 12 bytes, 42 per region.
//! - [`SensorSample`]: 17 bytes, a packed weather-station record with
//!   float measurements and status flags; 29 per region.

use rtcmem_core::Record;

/// Three little-endian `u32`s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reading {
    pub seq: u32,
    pub value: u32,
    pub check: u32,
}

impl Reading {
    /// A reading whose fields are all derived from `n`.
    pub fn numbered(n: u32) -> Self {
        Self {
            seq: n,
            value: n.wrapping_mul(0x9E37_79B9),
            check: !n,
        }
    }
}

impl Record for Reading {
    const SIZE: usize = 12;

    fn encode(&self, out: &mut [u8]) {
        out[0..4].copy_from_slice(&self.seq.to_le_bytes());
        out[4..8].copy_from_slice(&self.value.to_le_bytes());
        out[8..12].copy_from_slice(&self.check.to_le_bytes());
    }

    fn decode(bytes: &[u8]) -> Self {
        let word = |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        Self {
            seq: word(0),
            value: word(4),
            check: word(8),
        }
    }
}

/// A packed environmental sample: timestamp, three floats, two flag bits.
///
/// The `deep_sleep_log` demo in the `rtcmem` crate persists the same
/// 17-byte layout; change both together.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SensorSample {
    pub timestamp: u32,
    pub temperature: f32,
    pub humidity: f32,
    pub pressure: f32,
    pub sent: bool,
    pub stored: bool,
}

impl Record for SensorSample {
    const SIZE: usize = 17;

    fn encode(&self, out: &mut [u8]) {
        out[0..4].copy_from_slice(&self.timestamp.to_le_bytes());
        out[4..8].copy_from_slice(&self.temperature.to_le_bytes());
        out[8..12].copy_from_slice(&self.humidity.to_le_bytes());
        out[12..16].copy_from_slice(&self.pressure.to_le_bytes());
        out[16] = self.sent as u8 | (self.stored as u8) << 1;
    }

    fn decode(bytes: &[u8]) -> Self {
        let word = |i: usize| [bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]];
        Self {
            timestamp: u32::from_le_bytes(word(0)),
            temperature: f32::from_le_bytes(word(4)),
            humidity: f32::from_le_bytes(word(8)),
            pressure: f32::from_le_bytes(word(12)),
            sent: bytes[16] & 0b01 != 0,
            stored: bytes[16] & 0b10 != 0,
        }
    }
}
