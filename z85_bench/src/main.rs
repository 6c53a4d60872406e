use std::io::{self, Write as _};
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;

mod bench;
mod config;
mod report;
mod size;
mod term;

use config::{BenchConfig, Config};

/// Compares Z85 against base64 by timing encoding and decoding.
#[derive(Debug, Parser)]
struct Cli {
    /// An additional config file to load.
    ///
    /// `z85_bench.toml` in the working directory is always loaded if present.
    /// Values from this file take precedence over it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How often each input is encoded and decoded per codec.
    #[arg(short, long)]
    runs: Option<u32>,

    /// A data chunk size to benchmark, such as `10KB` or `2KiB`.
    ///
    /// May be specified multiple times. Replaces the configured sizes.
    #[arg(short, long = "size")]
    sizes: Vec<String>,

    /// The text used for the sequential string benchmark.
    #[arg(short, long)]
    text: Option<String>,

    /// What data chunks are filled with: `byte:<n>` or `random`.
    #[arg(short, long)]
    fill: Option<String>,

    /// Override whether this program outputs color.
    ///
    /// Auto-detection is performed, but in case it is wrong, you may use this
    /// to override the default.
    #[arg(long)]
    color: Option<bool>,

    /// Log every run.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(cli)?;
    init_logging(config.log)?;

    let color = config
        .output
        .color
        .unwrap_or_else(|| term::supports_ansi_escapes(&io::stdout()));

    // run the program and clean up
    let res = run(&config.bench, color);
    if let Err(why) = &res {
        log::error!("Exiting due to error: {why:?}");
    }

    log::logger().flush();
    res
}

fn run(config: &BenchConfig, color: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();

    let scenario = bench::sequential_string(&config.text, config.runs)?;
    report::write_table(&mut stdout, &scenario, color)?;
    stdout.flush()?;

    for &size in &config.sizes {
        let scenario = bench::data_chunk(size, config.fill, config.runs)?;
        report::write_table(&mut stdout, &scenario, color)?;
        stdout.flush()?;
    }

    log::info!("Done.");
    Ok(())
}

fn build_config(cli: Cli) -> Result<Config> {
    use crate::config::setup::{Builder, Env, File, Overrides, TomlText};

    let default_config = include_str!("../assets/default_config.toml");
    let sizes = (!cli.sizes.is_empty()).then_some(cli.sizes);

    let overrides = Overrides::new()
        .set("bench.runs", cli.runs.map(i64::from))
        .set("bench.sizes", sizes)
        .set("bench.text", cli.text)
        .set("bench.fill", cli.fill)
        .set("output.color", cli.color)
        .set("log.root.level", cli.verbose.then_some("debug"));

    Builder::new()
        .add_layer(TomlText::new(default_config))
        .add_layer(File::new("z85_bench.toml").required(false))
        .add_layer(cli.config.map(File::new))
        .add_layer(Env::new("Z85_BENCH"))
        .add_layer(overrides)
        .build()
        .context("failed to load config")
}

fn init_logging(config: log4rs::config::RawConfig) -> Result<()> {
    let deserializers = log4rs::config::Deserializers::default();
    let (appenders, errors) = config.appenders_lossy(&deserializers);
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let config = log4rs::Config::builder()
        .appenders(appenders)
        .loggers(config.loggers())
        .build(config.root())?;

    log4rs::init_config(config)?;
    Ok(())
}
