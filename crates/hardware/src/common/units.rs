//! Size and frequency quantities.
//!
//! Option strings such as `"16KiB"`, `"8GiB"`, or `"3GHz"` are parsed here into strong types.
//! Memory sizes use binary prefixes for both the IEC (`KiB`) and the short (`kB`) spellings,
//! matching how the simulator interprets memory sizes. Frequencies are converted to a clock
//! period expressed in simulator ticks (one tick is one picosecond).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::{ConfigError, Result};

/// Simulator ticks per second (1 tick = 1 ps).
pub const TICKS_PER_SECOND: u64 = 1_000_000_000_000;

const SIZE_UNITS: [(&str, u64); 9] = [
    ("TiB", 1 << 40),
    ("GiB", 1 << 30),
    ("MiB", 1 << 20),
    ("KiB", 1 << 10),
    ("TB", 1 << 40),
    ("GB", 1 << 30),
    ("MB", 1 << 20),
    ("kB", 1 << 10),
    ("B", 1),
];

const FREQUENCY_UNITS: [(&str, f64); 5] = [
    ("THz", 1e12),
    ("GHz", 1e9),
    ("MHz", 1e6),
    ("kHz", 1e3),
    ("Hz", 1.0),
];

/// Splits `"16KiB"` into `("16", "KiB")`, tolerating whitespace around either part.
fn split_quantity(raw: &str) -> (&str, &str) {
    let trimmed = raw.trim();
    let unit_start = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(unit_start);
    (number.trim(), unit.trim())
}

/// A memory capacity in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MemorySize(u64);

impl MemorySize {
    /// Creates a size from a raw byte count.
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    /// Creates a size of `kib` kibibytes.
    pub const fn kib(kib: u64) -> Self {
        Self(kib << 10)
    }

    /// Creates a size of `gib` gibibytes.
    pub const fn gib(gib: u64) -> Self {
        Self(gib << 30)
    }

    /// Returns the size in bytes.
    pub const fn bytes(self) -> u64 {
        self.0
    }

    /// Parses a size-with-unit string such as `"16KiB"` or `"4096"`.
    ///
    /// A missing unit means bytes. Fractional values are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidQuantity`] if the number or unit is malformed, or if the
    /// result does not fit in 64 bits.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || ConfigError::InvalidQuantity {
            kind: "memory size",
            value: raw.to_string(),
        };

        let (number, unit) = split_quantity(raw);
        let value: u64 = number.parse().map_err(|_| invalid())?;
        let multiplier = if unit.is_empty() {
            1
        } else {
            SIZE_UNITS
                .iter()
                .find(|(name, _)| *name == unit)
                .map(|(_, scale)| *scale)
                .ok_or_else(invalid)?
        };

        value.checked_mul(multiplier).map(Self).ok_or_else(invalid)
    }
}

impl FromStr for MemorySize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for MemorySize {
    /// Formats with the largest IEC unit that divides the size exactly (e.g., `16KiB`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (unit, scale) in SIZE_UNITS.iter().take(4) {
            if self.0 != 0 && self.0 % scale == 0 {
                return write!(f, "{}{}", self.0 / scale, unit);
            }
        }
        write!(f, "{}B", self.0)
    }
}

/// A clock frequency in hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Frequency(u64);

impl Frequency {
    /// Creates a frequency from a raw hertz value.
    pub const fn from_hz(hz: u64) -> Self {
        Self(hz)
    }

    /// Returns the frequency in hertz.
    pub const fn hz(self) -> u64 {
        self.0
    }

    /// Returns the clock period in simulator ticks, rounded to the nearest tick.
    pub fn period_ticks(self) -> u64 {
        if self.0 == 0 {
            return 0;
        }
        (TICKS_PER_SECOND + self.0 / 2) / self.0
    }

    /// Parses a frequency string such as `"3GHz"` or `"2.5GHz"`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidQuantity`] if the number or unit is malformed, or if the
    /// frequency is not strictly positive.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || ConfigError::InvalidQuantity {
            kind: "frequency",
            value: raw.to_string(),
        };

        let (number, unit) = split_quantity(raw);
        let value: f64 = number.parse().map_err(|_| invalid())?;
        let scale = FREQUENCY_UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, scale)| *scale)
            .ok_or_else(invalid)?;

        let hz = (value * scale).round();
        if !hz.is_finite() || hz < 1.0 || hz > u64::MAX as f64 {
            return Err(invalid());
        }
        Ok(Self(hz as u64))
    }
}

impl FromStr for Frequency {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (unit, scale) in FREQUENCY_UNITS {
            let scale = scale as u64;
            if self.0 != 0 && self.0 % scale == 0 {
                return write!(f, "{}{}", self.0 / scale, unit);
            }
        }
        write!(f, "{}Hz", self.0)
    }
}
