use std::num::NonZeroU32;
use std::str::FromStr;

use serde::Deserialize;

use crate::size::DataSize;

pub mod setup;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub bench: BenchConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub log: log4rs::config::RawConfig,
}

#[derive(Debug, Deserialize)]
pub struct BenchConfig {
    /// How often each input is encoded and decoded per codec.
    pub runs: NonZeroU32,
    /// Text used for the sequential string benchmark.
    pub text: String,
    /// Buffer sizes for the data chunk benchmarks.
    #[serde(default)]
    pub sizes: Vec<DataSize>,
    pub fill: Fill,
}

/// What the data chunk buffers are filled with.
///
/// Written as `byte:<n>` or `random`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Fill {
    /// Every byte is the same.
    Byte(u8),
    /// Random bytes, regenerated for each size.
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fill {0:?}, expected `byte:<0-255>` or `random`")]
pub struct FillError(String);

impl FromStr for Fill {
    type Err = FillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "random" {
            return Ok(Self::Random);
        }

        s.strip_prefix("byte:")
            .and_then(|byte| byte.parse().ok())
            .map(Self::Byte)
            .ok_or_else(|| FillError(s.to_owned()))
    }
}

impl TryFrom<String> for Fill {
    type Error = FillError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    pub color: Option<bool>,
}
