use anyhow::{Context, Result};
use clap::Parser;
use rolling_stats::Stats;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use fracdelay::config::{RateRatio, ResampleConfig};
use fracdelay::signal_processing::{Basis, Resampler};
use fracdelay::wav::{deinterleave, interleave, read_wav, save_wav};

#[derive(Parser, Debug)]
#[command(name = "fracdelay")]
#[command(about = "Resample WAV files with a Farrow interpolator", long_about = None)]
struct Args {
    /// Input WAV file
    input: PathBuf,

    /// Output WAV file (32-bit float)
    output: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interpolation basis
    #[arg(short, long, value_enum)]
    basis: Option<Basis>,

    /// Output sample rate in Hz
    #[arg(short = 'r', long, conflicts_with = "ratio")]
    target_rate: Option<u32>,

    /// Output/input rate ratio (e.g., "1.5", "44100/48000")
    #[arg(long)]
    ratio: Option<RateRatio>,

    /// Write a JSON report of the run to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Serialize)]
struct StatsSummary {
    count: usize,
    mean: f32,
    std_dev: f32,
    min: f32,
    max: f32,
}

impl StatsSummary {
    fn from_stats(stats: &Stats<f32>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

#[derive(Debug, Serialize)]
struct RunReport {
    input: String,
    output: String,
    basis: Basis,
    ratio: f64,
    input_rate: u32,
    output_rate: u32,
    channels: u16,
    input_frames: usize,
    output_frames: usize,
    warmup_samples: usize,
    output_level: Vec<Option<StatsSummary>>,
}

fn load_config(args: &Args) -> Result<ResampleConfig> {
    let mut config = match args.config {
        Some(ref path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            ResampleConfig::from_toml_str(&content).context("Failed to parse config file")?
        }
        None => ResampleConfig::default(),
    };

    if let Some(basis) = args.basis {
        config.basis = basis;
    }
    if let Some(rate) = args.target_rate {
        config.target_rate = Some(rate);
        config.ratio = None;
    }
    if let Some(ratio) = args.ratio {
        config.ratio = Some(ratio);
        config.target_rate = None;
    }

    config.validate()?;
    Ok(config)
}

fn resample_channel(
    samples: &[f32],
    config: &ResampleConfig,
    ratio: f64,
    level: &mut Stats<f32>,
) -> Result<(Vec<f32>, usize)> {
    let mut resampler = Resampler::<f32>::new(config.basis, ratio)?;
    let mut output = Vec::with_capacity((samples.len() as f64 * ratio).ceil() as usize);

    for block in samples.chunks(config.block_size) {
        let resampled = resampler.process(block);
        for &s in &resampled {
            level.update(s.abs());
        }
        output.extend(resampled);
    }

    Ok((output, resampler.warmup_samples()))
}

fn run(args: &Args, config: &ResampleConfig) -> Result<RunReport> {
    let (samples, spec) = read_wav(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let channels = spec.channels as usize;
    if channels > 1 {
        log::warn!("{} channels: each is resampled independently", spec.channels);
    }

    let ratio = config.resolve_ratio(spec.sample_rate).as_f64();
    let output_rate = config.output_rate(spec.sample_rate);
    log::info!(
        "{}: {} Hz -> {} Hz (ratio {:.6}, basis {:?})",
        args.input.display(),
        spec.sample_rate,
        output_rate,
        ratio,
        config.basis
    );

    let mut resampled = Vec::with_capacity(channels);
    let mut levels = Vec::with_capacity(channels);
    let mut warmup_samples = 0;
    for channel in deinterleave(&samples, channels) {
        let mut level: Stats<f32> = Stats::new();
        let (output, warmup) = resample_channel(&channel, config, ratio, &mut level)?;
        warmup_samples = warmup;
        resampled.push(output);
        levels.push(StatsSummary::from_stats(&level));
    }

    let output = interleave(&resampled);
    save_wav(&args.output, &output, spec.channels, output_rate)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(RunReport {
        input: display_path(&args.input),
        output: display_path(&args.output),
        basis: config.basis,
        ratio,
        input_rate: spec.sample_rate,
        output_rate,
        channels: spec.channels,
        input_frames: samples.len() / channels.max(1),
        output_frames: output.len() / channels.max(1),
        warmup_samples,
        output_level: levels,
    })
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .init();

    let config = load_config(&args)?;
    let report = run(&args, &config)?;

    println!(
        "{} -> {}: {} frames at {} Hz -> {} frames at {} Hz",
        report.input,
        report.output,
        report.input_frames,
        report.input_rate,
        report.output_frames,
        report.output_rate
    );

    if let Some(ref path) = args.report {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        fs::write(path, json).context("Failed to write report")?;
    }

    Ok(())
}
