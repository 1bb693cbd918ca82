//! tapline - render an impulse through a delay line and inspect each tap
//!
//! Run with: cargo run --bin tapline -- [config.toml] [--samples N] [--sample-rate HZ]

mod response;

use std::{fs, path::PathBuf};

use color_eyre::eyre::{bail, eyre, WrapErr};
use saavy_delay::{
    io::{AudioInput, AudioOutput},
    BlockProcessor, DelayConfig,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const BLOCK_SIZE: usize = 64;

struct Options {
    config: Option<PathBuf>,
    samples: usize,
    sample_rate: f32,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> color_eyre::Result<Self> {
        let mut options = Options {
            config: None,
            samples: 64,
            sample_rate: 48_000.0,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--samples" => {
                    let value = args.next().ok_or_else(|| eyre!("--samples needs a value"))?;
                    options.samples = value
                        .parse()
                        .wrap_err_with(|| format!("invalid sample count {value:?}"))?;
                }
                "--sample-rate" => {
                    let value = args
                        .next()
                        .ok_or_else(|| eyre!("--sample-rate needs a value"))?;
                    options.sample_rate = value
                        .parse()
                        .wrap_err_with(|| format!("invalid sample rate {value:?}"))?;
                }
                flag if flag.starts_with("--") => bail!("unknown option {flag}"),
                path => options.config = Some(PathBuf::from(path)),
            }
        }

        Ok(options)
    }
}

/// Three taps on a short buffer, one of them fractional
fn demo_config() -> DelayConfig {
    DelayConfig::new()
        .with_capacity(64)
        .with_taps(3)
        .with_delay(5.0)
        .with_delay(12.5)
        .with_delay(40.0)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let options = Options::parse(std::env::args().skip(1))?;

    let config = match &options.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .wrap_err_with(|| format!("reading {}", path.display()))?;
            toml::from_str::<DelayConfig>(&text)
                .wrap_err_with(|| format!("parsing {}", path.display()))?
        }
        None => demo_config(),
    };

    let mut processor = BlockProcessor::new(config);
    processor.prepare(options.sample_rate);

    let line = processor
        .line()
        .ok_or_else(|| eyre!("delay line was not allocated"))?;
    let taps = line.tap_count();
    let delays: Vec<f32> = (0..taps).filter_map(|tap| line.tap_delay(tap)).collect();
    info!(
        capacity = line.capacity(),
        taps,
        sample_rate = options.sample_rate,
        "rendering impulse"
    );

    // Render the impulse block by block, as a host would
    let mut rendered = vec![Vec::with_capacity(options.samples); taps];
    let mut input = AudioInput::with_channels(1, BLOCK_SIZE);
    let mut output = AudioOutput::default();
    input.buffers[0][0] = 1.0;

    let mut remaining = options.samples;
    while remaining > 0 {
        let len = remaining.min(BLOCK_SIZE);
        input.buffers[0].resize(len, 0.0);
        processor.process_block(&input, &mut output);

        for (tap, samples) in rendered.iter_mut().zip(&output.buffers) {
            tap.extend_from_slice(samples);
        }
        input.buffers[0].fill(0.0);
        remaining -= len;
    }

    for (tap, (samples, delay)) in rendered.iter().zip(&delays).enumerate() {
        println!("tap {tap}: delay {delay} samples");

        let nonzero: Vec<String> = samples
            .iter()
            .enumerate()
            .filter(|(_, s)| **s != 0.0)
            .map(|(n, s)| format!("[{n}] {s:.4}"))
            .collect();
        println!("  impulse: {}", nonzero.join("  "));

        let response: Vec<String> = response::magnitude_db(samples, options.sample_rate)
            .into_iter()
            .map(|(freq, db)| format!("{freq:.0} Hz {db:+.2} dB"))
            .collect();
        println!("  response: {}", response.join(", "));
    }

    Ok(())
}
