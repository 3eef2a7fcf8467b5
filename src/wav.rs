use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

/// Read a WAV file as interleaved f32 samples in [-1, 1]
///
/// Integer formats are scaled by their full-scale value.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec), hound::Error> {
    let mut reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();

    let samples = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = 2_i64.pow(spec.bits_per_sample as u32 - 1) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    log::debug!(
        "Read {}: {} Hz, {} channel(s), {} frames",
        path.as_ref().display(),
        spec.sample_rate,
        spec.channels,
        samples.len() / spec.channels.max(1) as usize
    );
    Ok((samples, spec))
}

/// Write interleaved samples as a 32-bit float WAV file
pub fn save_wav<P: AsRef<Path>>(
    path: P,
    samples: &[f32],
    channels: u16,
    sample_rate: u32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    for &sample in samples {
        writer.write_sample(sample)?;
    }

    writer.finalize()?;
    Ok(())
}

/// Split interleaved samples into one vector per channel
pub fn deinterleave(samples: &[f32], channels: usize) -> Vec<Vec<f32>> {
    let channels = channels.max(1);
    let mut out = vec![Vec::with_capacity(samples.len() / channels); channels];
    for frame in samples.chunks_exact(channels) {
        for (ch, &s) in frame.iter().enumerate() {
            out[ch].push(s);
        }
    }
    out
}

/// Interleave per-channel vectors, truncating to the shortest channel
pub fn interleave(channels: &[Vec<f32>]) -> Vec<f32> {
    let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
    let mut out = Vec::with_capacity(frames * channels.len());
    for i in 0..frames {
        for ch in channels {
            out.push(ch[i]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deinterleave_interleave() {
        let samples = [1.0, -1.0, 2.0, -2.0, 3.0, -3.0];
        let split = deinterleave(&samples, 2);
        assert_eq!(split, vec![vec![1.0, 2.0, 3.0], vec![-1.0, -2.0, -3.0]]);
        assert_eq!(interleave(&split), samples.to_vec());
    }

    #[test]
    fn test_interleave_truncates_to_shortest() {
        let channels = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0]];
        assert_eq!(interleave(&channels), vec![1.0, 4.0, 2.0, 5.0]);
    }

    #[test]
    fn test_wav_round_trip() {
        let path = std::env::temp_dir().join(format!("fracdelay_wav_{}.wav", std::process::id()));
        let samples = [0.0f32, 0.5, -0.25, 1.0];
        save_wav(&path, &samples, 2, 8000).unwrap();

        let (read, spec) = read_wav(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 8000);
        assert_eq!(read, samples.to_vec());
    }
}
