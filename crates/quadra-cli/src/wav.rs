//! WAV file reading and writing.

use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Error types for WAV I/O.
#[derive(Debug, thiserror::Error)]
pub enum WavError {
    /// WAV decode/encode error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Requested output bit depth is not 16, 24 or 32.
    #[error("Unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    /// The file holds no channels.
    #[error("WAV file has no channels")]
    NoChannels,
}

/// Convenience result type for WAV I/O.
pub type Result<T> = std::result::Result<T, WavError>;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(WavError::NoChannels);
    }
    let num_frames = u64::from(reader.duration());
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24 or 32; 32 means float).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Read a WAV file as mono f32 samples along with its spec.
///
/// Multi-channel files are mixed down by averaging channels. The returned
/// spec still reports the file's own channel count.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = usize::from(spec.channels);
    if channels == 0 {
        return Err(WavError::NoChannels);
    }

    let samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok((mono, spec))
}

/// Write mono samples to a WAV file.
///
/// 32-bit output is IEEE float; 16 and 24-bit output is PCM, clamped to
/// full scale.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    if !matches!(spec.bits_per_sample, 16 | 24 | 32) {
        return Err(WavError::UnsupportedBitDepth(spec.bits_per_sample));
    }

    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn float_roundtrip_is_exact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("float.wav");
        let samples = [0.0, 0.5, -0.25, 1.5];

        write_wav(&path, &samples, WavSpec::default()).unwrap();
        let (loaded, spec) = read_wav(&path).unwrap();

        assert_eq!(loaded, samples);
        assert_eq!(spec, WavSpec::default());
    }

    #[test]
    fn pcm_16_clamps_and_quantizes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pcm.wav");
        let spec = WavSpec {
            bits_per_sample: 16,
            ..WavSpec::default()
        };

        write_wav(&path, &[0.5, 2.0, -2.0], spec).unwrap();
        let (loaded, _) = read_wav(&path).unwrap();

        assert!((loaded[0] - 0.5).abs() < 1e-4);
        assert!(loaded[1] < 1.0 && loaded[1] > 0.999);
        assert_eq!(loaded[2], -1.0);
    }

    #[test]
    fn stereo_is_mixed_to_mono() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stereo.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for (l, r) in [(1.0f32, 0.0f32), (0.5, 0.5), (-1.0, 0.0)] {
            writer.write_sample(l).unwrap();
            writer.write_sample(r).unwrap();
        }
        writer.finalize().unwrap();

        let (mono, spec) = read_wav(&path).unwrap();
        assert_eq!(mono, [0.5, 0.5, -0.5]);
        assert_eq!(spec.channels, 2);

        let info = read_wav_info(&path).unwrap();
        assert_eq!(info.num_frames, 3);
        assert_eq!(info.format, WavFormat::IeeeFloat);
    }

    #[test]
    fn rejects_unsupported_bit_depth() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.wav");
        let spec = WavSpec {
            bits_per_sample: 12,
            ..WavSpec::default()
        };
        assert!(matches!(
            write_wav(&path, &[0.0], spec),
            Err(WavError::UnsupportedBitDepth(12))
        ));
    }
}
