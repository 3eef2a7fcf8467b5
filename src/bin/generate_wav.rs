use anyhow::{Context, Result};
use clap::Parser;
use fracdelay::save_wav;
use fracdelay::simulation::{
    AdditiveNoiseConfig, apply_additive_noise, generate_chirp, generate_tone,
};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate_wav")]
#[command(about = "Generate tone and chirp WAV files for resampler testing")]
struct Args {
    /// TOML noise configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "data/synthetic")]
    output_dir: PathBuf,

    /// Tone frequencies in Hz: comma-separated (e.g., "440,1000") or range (e.g., "1000-8000:1000")
    #[arg(short, long, default_value = "1000-8000:1000")]
    frequencies: String,

    /// Also write a chirp sweeping from 20 Hz to 0.45 of the sample rate
    #[arg(long)]
    chirp: bool,

    /// Base seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Signal duration in seconds
    #[arg(short, long, default_value_t = 1.0)]
    duration: f64,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 48000)]
    sample_rate: u32,

    /// Peak amplitude
    #[arg(long, default_value_t = 0.5)]
    amplitude: f64,

    /// Output filename prefix
    #[arg(long, default_value = "tone")]
    prefix: String,

    /// Generate manifest.json
    #[arg(long)]
    manifest: bool,

    /// AWGN SNR in dB (CLI override)
    #[arg(long)]
    snr: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    awgn: Option<AwgnSection>,
}

#[derive(Debug, Deserialize)]
struct AwgnSection {
    snr_db: f64,
}

#[derive(Debug, serde::Serialize)]
struct ManifestEntry {
    file: String,
    frequency_hz: Option<f64>,
    seed: u64,
}

#[derive(Debug, serde::Serialize)]
struct Manifest {
    sample_rate: u32,
    duration: f64,
    amplitude: f64,
    snr_db: Option<f64>,
    files: Vec<ManifestEntry>,
}

fn parse_frequencies(s: &str) -> Result<Vec<f64>> {
    if s.contains(':') {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 {
            anyhow::bail!("Invalid range format. Use 'start-end:step'");
        }
        let step: f64 = parts[1].parse().context("Invalid step value")?;
        if step <= 0.0 {
            anyhow::bail!("Step must be positive");
        }
        let range_parts: Vec<&str> = parts[0].split('-').collect();
        if range_parts.len() != 2 {
            anyhow::bail!("Invalid range format. Use 'start-end:step'");
        }
        let start: f64 = range_parts[0].parse().context("Invalid start value")?;
        let end: f64 = range_parts[1].parse().context("Invalid end value")?;

        let mut frequencies = Vec::new();
        let mut f = start;
        while f <= end {
            frequencies.push(f);
            f += step;
        }
        Ok(frequencies)
    } else {
        s.split(',')
            .map(|p| p.trim().parse::<f64>().context("Invalid frequency value"))
            .collect()
    }
}

fn load_toml_config(path: &PathBuf) -> Result<TomlConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn write_signal(path: &PathBuf, signal: &[f64], sample_rate: u32) -> Result<()> {
    let samples: Vec<f32> = signal.iter().map(|&x| x as f32).collect();
    save_wav(path, &samples, 1, sample_rate).context("Failed to write WAV file")
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::init();

    fs::create_dir_all(&args.output_dir).context("Failed to create output directory")?;

    let toml_config = if let Some(ref config_path) = args.config {
        load_toml_config(config_path)?
    } else {
        TomlConfig::default()
    };
    let snr_db = args.snr.or(toml_config.awgn.as_ref().map(|a| a.snr_db));

    let mut frequencies: Vec<Option<f64>> = parse_frequencies(&args.frequencies)?
        .into_iter()
        .map(Some)
        .collect();
    if args.chirp {
        frequencies.push(None);
    }

    let num_samples = (args.duration * args.sample_rate as f64) as usize;
    let nyquist = args.sample_rate as f64 / 2.0;
    let base_seed = args.seed.unwrap_or(0);
    let mut manifest_entries = Vec::new();

    for (i, &freq) in frequencies.iter().enumerate() {
        let seed = base_seed + i as u64;
        let (mut signal, filename) = match freq {
            Some(hz) => {
                if hz >= nyquist {
                    log::warn!("Skipping {} Hz: at or above Nyquist ({} Hz)", hz, nyquist);
                    continue;
                }
                (
                    generate_tone(hz, args.sample_rate, num_samples, args.amplitude),
                    format!("{}_{:05}hz.wav", args.prefix, hz as u32),
                )
            }
            None => (
                generate_chirp(
                    20.0,
                    0.45 * args.sample_rate as f64,
                    args.sample_rate,
                    num_samples,
                    args.amplitude,
                ),
                format!("{}_chirp.wav", args.prefix),
            ),
        };

        if let Some(snr_db) = snr_db {
            let noise = AdditiveNoiseConfig {
                snr_db,
                seed: Some(seed),
            };
            apply_additive_noise(&mut signal, &noise)?;
        }

        let filepath = args.output_dir.join(&filename);
        write_signal(&filepath, &signal, args.sample_rate)?;

        manifest_entries.push(ManifestEntry {
            file: filename,
            frequency_hz: freq,
            seed,
        });
        eprint!("\rGenerating: {}/{}", i + 1, frequencies.len());
    }
    eprintln!();

    if args.manifest {
        let manifest = Manifest {
            sample_rate: args.sample_rate,
            duration: args.duration,
            amplitude: args.amplitude,
            snr_db,
            files: manifest_entries,
        };
        let manifest_path = args.output_dir.join("manifest.json");
        let manifest_json =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json).context("Failed to write manifest")?;
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!("Generated files in {}", args.output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frequencies_comma_separated() {
        let frequencies = parse_frequencies("440, 1000,2500").unwrap();
        assert_eq!(frequencies, vec![440.0, 1000.0, 2500.0]);
    }

    #[test]
    fn test_parse_frequencies_range() {
        let frequencies = parse_frequencies("1000-4000:1000").unwrap();
        assert_eq!(frequencies, vec![1000.0, 2000.0, 3000.0, 4000.0]);
    }

    #[test]
    fn test_parse_frequencies_invalid() {
        assert!(parse_frequencies("1000-4000:0").is_err());
        assert!(parse_frequencies("1000:10").is_err());
        assert!(parse_frequencies("abc").is_err());
    }
}
