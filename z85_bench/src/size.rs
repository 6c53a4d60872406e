//! Byte sizes with units, as used in the config and report.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Size units that can be parsed, with their size in bits.
///
/// Bits are used as the base so the `b` unit doesn't need fractions.
const PARSE_UNITS: &[(&str, u64)] = &[
    ("MB", 8_000_000),
    ("KiB", 8 * 1024),
    ("KB", 8_000),
    ("B", 8),
    ("b", 1),
];

/// The names of [`PARSE_UNITS`], as listed in errors.
const UNIT_LIST: &str = "MB, KiB, KB, B, b";

/// Size units used for display, largest first, with their size in bytes.
const DISPLAY_UNITS: &[(&str, u64)] = &[("MB", 1_000_000), ("KB", 1_000), ("B", 1)];

/// The largest size accepted for benchmark buffers.
pub const MAX: DataSize = DataSize(300_000_000);

/// A size in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct DataSize(u64);

/// Error parsing a [`DataSize`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The amount isn't a valid number.
    #[error("invalid size amount {0:?}")]
    Amount(String),
    /// The unit isn't one of the supported ones.
    #[error("the size unit {0:?} is not supported, use one of: {units}", units = UNIT_LIST)]
    Unit(String),
    /// The size doesn't come out to a whole amount of bytes.
    #[error("size must be a whole amount of bytes")]
    PartialByte,
    /// The size is too large to be represented.
    #[error("size is too large")]
    Overflow,
}

impl DataSize {
    /// Creates a size from a byte count.
    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    /// The size in bytes.
    pub const fn bytes(self) -> u64 {
        self.0
    }
}

impl FromStr for DataSize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        let (amount, unit) = s.split_at(split);

        let amount: u64 = amount
            .parse()
            .map_err(|_| ParseError::Amount(amount.to_owned()))?;

        let unit = unit.trim_start();
        let &(_, bits) = PARSE_UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .ok_or_else(|| ParseError::Unit(unit.to_owned()))?;

        let bits = amount.checked_mul(bits).ok_or(ParseError::Overflow)?;
        if bits % 8 != 0 {
            return Err(ParseError::PartialByte);
        }

        Ok(Self(bits / 8))
    }
}

impl TryFrom<String> for DataSize {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for DataSize {
    /// Writes the size in the largest unit it is at least 1 of.
    ///
    /// The precision defaults to 2 decimals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        let (unit, scale) = DISPLAY_UNITS
            .iter()
            .copied()
            .find(|&(_, scale)| self.0 >= scale)
            .unwrap_or(("B", 1));

        let value = self.0 as f64 / scale as f64;
        write!(f, "{value:.precision$}{unit}")
    }
}
