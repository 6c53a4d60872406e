//! Times encoding and decoding with each codec.

use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result, bail, ensure};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rand::Rng as _;

use crate::config::Fill;
use crate::size::{self, DataSize};

/// A codec to compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Base64,
    Z85,
}

impl Codec {
    pub const ALL: [Self; 2] = [Self::Base64, Self::Z85];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::Z85 => "Z85",
        }
    }

    fn encode(self, data: &[u8]) -> Result<String> {
        match self {
            Self::Base64 => Ok(STANDARD.encode(data)),
            Self::Z85 => Ok(z85::encode(data)?),
        }
    }

    fn decode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Base64 => Ok(STANDARD.decode(text)?),
            Self::Z85 => Ok(z85::decode(text)?),
        }
    }
}

/// The time taken by a single run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timing {
    pub encode: Duration,
    pub decode: Duration,
}

/// All runs of one codec over the same input.
#[derive(Debug)]
pub struct CodecReport {
    pub codec: Codec,
    pub input: DataSize,
    pub runs: Vec<Timing>,
}

impl CodecReport {
    fn new(codec: Codec, input: DataSize) -> Self {
        Self {
            codec,
            input,
            runs: Vec::new(),
        }
    }

    /// The summed time of all runs.
    pub fn total(&self) -> Timing {
        self.runs.iter().fold(Timing::default(), |acc, t| Timing {
            encode: acc.encode + t.encode,
            decode: acc.decode + t.decode,
        })
    }

    /// The mean time of a run.
    pub fn average(&self) -> Timing {
        let total = self.total();
        match u32::try_from(self.runs.len()) {
            Ok(0) | Err(_) => total,
            Ok(count) => Timing {
                encode: total.encode / count,
                decode: total.decode / count,
            },
        }
    }
}

/// One benchmarked input, with a report for every codec.
#[derive(Debug)]
pub struct Scenario {
    pub name: String,
    pub reports: Vec<CodecReport>,
}

/// Encodes and decodes `text` as UTF-8 with every codec.
pub fn sequential_string(text: &str, runs: NonZeroU32) -> Result<Scenario> {
    log::info!("Benchmarking {} bytes of text.", text.len());
    compare(format!("sequential string {text:?}"), text.as_bytes(), runs)
}

/// Encodes and decodes a buffer of `size` bytes with every codec.
///
/// # Errors
///
/// Returns [`Err`] if `size` exceeds [`size::MAX`] or a round trip fails.
pub fn data_chunk(size: DataSize, fill: Fill, runs: NonZeroU32) -> Result<Scenario> {
    if size > size::MAX {
        bail!("{size} exceeds the maximum benchmark size of {}", size::MAX);
    }

    let len = usize::try_from(size.bytes()).context("size doesn't fit in memory")?;
    log::info!("Benchmarking a {size} data chunk.");

    let data = match fill {
        Fill::Byte(byte) => vec![byte; len],
        Fill::Random => {
            let mut data = vec![0u8; len];
            rand::rng().fill(&mut data[..]);
            data
        },
    };

    compare(format!("data chunk {size}"), &data, runs)
}

/// Runs every codec `runs` times, alternating between codecs on each run.
fn compare(name: String, data: &[u8], runs: NonZeroU32) -> Result<Scenario> {
    let input = DataSize::from_bytes(u64::try_from(data.len())?);
    let mut reports = Codec::ALL.map(|codec| CodecReport::new(codec, input));

    for run in 0..runs.get() {
        for report in &mut reports {
            let timing = time_round_trip(report.codec, data)
                .with_context(|| format!("{} failed on run {run}", report.codec.name()))?;

            log::debug!(
                "{} run {run}: encode {:?}, decode {:?}",
                report.codec.name(),
                timing.encode,
                timing.decode,
            );
            report.runs.push(timing);
        }
    }

    Ok(Scenario {
        name,
        reports: reports.into(),
    })
}

fn time_round_trip(codec: Codec, data: &[u8]) -> Result<Timing> {
    let start = Instant::now();
    let encoded = codec.encode(data)?;
    let encode = start.elapsed();

    let start = Instant::now();
    let decoded = codec.decode(&encoded)?;
    let decode = start.elapsed();

    ensure!(decoded == data, "decoded data differs from the input");
    Ok(Timing { encode, decode })
}
