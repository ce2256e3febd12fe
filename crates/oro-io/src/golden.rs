//! Golden file persistence and comparison.

use crate::wav::{WavSpec, read_wav, write_wav};
use crate::{Error, Result};
use oro_core::{AudioBuffer, RenderedAudio};
use std::fmt;
use std::path::{Path, PathBuf};

/// File extension of golden files. The content is a WAV stream.
pub const GOLDEN_EXTENSION: &str = "golden";

/// Location of the golden file for a case: `dir/<name>.golden`.
pub fn golden_path(dir: impl AsRef<Path>, name: &str) -> PathBuf {
    dir.as_ref().join(format!("{name}.{GOLDEN_EXTENSION}"))
}

/// Persist a rendering as 16-bit PCM, replacing any existing file.
///
/// Missing parent directories are created.
pub fn save(audio: &RenderedAudio, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| Error::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    write_wav(path, audio.buffer(), golden_spec(audio)?)?;
    tracing::debug!(
        path = %path.display(),
        channels = audio.channel_count(),
        frames = audio.sample_count(),
        "saved golden file"
    );
    Ok(())
}

/// Load a golden file back into a rendering.
pub fn load(path: impl AsRef<Path>) -> Result<RenderedAudio> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let (buffer, spec) = read_wav(path)?;
    Ok(RenderedAudio::new(buffer, spec.sample_rate))
}

fn golden_spec(audio: &RenderedAudio) -> Result<WavSpec> {
    let channels = u16::try_from(audio.channel_count())
        .map_err(|_| Error::Format(format!("{} channels", audio.channel_count())))?;
    Ok(WavSpec::golden(channels, audio.sample_rate()))
}

/// Root-mean-square difference over every channel and frame.
///
/// Returns `None` when the buffers differ in channel or frame count. Empty
/// buffers have zero error.
pub fn rms_error(a: &AudioBuffer, b: &AudioBuffer) -> Option<f64> {
    if a.num_channels() != b.num_channels() || a.num_frames() != b.num_frames() {
        return None;
    }
    let mut sum_sq = 0.0f64;
    let mut count = 0usize;
    for (ca, cb) in a.channels().zip(b.channels()) {
        for (&x, &y) in ca.iter().zip(cb.iter()) {
            let diff = f64::from(x) - f64::from(y);
            sum_sq += diff * diff;
            count += 1;
        }
    }
    if count == 0 {
        return Some(0.0);
    }
    Some((sum_sq / count as f64).sqrt())
}

/// Position of the first NaN or infinite sample, as `(channel, frame)`.
fn first_non_finite(buffer: &AudioBuffer) -> Option<(usize, usize)> {
    buffer.channels().enumerate().find_map(|(channel, samples)| {
        samples
            .iter()
            .position(|s| !s.is_finite())
            .map(|frame| (channel, frame))
    })
}

/// Sample rate and channel count of a rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioShape {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of channels.
    pub channels: usize,
}

impl AudioShape {
    /// Shape of the given rendering.
    pub fn of(audio: &RenderedAudio) -> Self {
        Self {
            sample_rate: audio.sample_rate(),
            channels: audio.channel_count(),
        }
    }
}

impl fmt::Display for AudioShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz x {} ch", self.sample_rate, self.channels)
    }
}

/// Outcome of comparing a rendering against its golden file.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    /// RMS error is within tolerance.
    Passed {
        /// Measured RMS error.
        rms_error: f64,
    },
    /// No golden file at the expected path.
    GoldenMissing,
    /// Golden file exists but could not be decoded.
    Unreadable {
        /// Decoder message.
        reason: String,
    },
    /// Sample rate or channel count differ.
    FormatMismatch {
        /// Shape stored in the golden file.
        expected: AudioShape,
        /// Shape of the fresh rendering.
        actual: AudioShape,
    },
    /// Frame counts differ.
    LengthMismatch {
        /// Frames in the golden file.
        expected: usize,
        /// Frames in the fresh rendering.
        actual: usize,
    },
    /// The rendering contains a NaN or infinite sample.
    NonFinite {
        /// Channel of the first bad sample.
        channel: usize,
        /// Frame of the first bad sample.
        frame: usize,
    },
    /// RMS error is above tolerance.
    ToleranceExceeded {
        /// Measured RMS error.
        rms_error: f64,
        /// Allowed RMS error.
        tolerance: f64,
    },
}

impl Comparison {
    /// Judge a measured error: passes iff `rms_error <= tolerance`.
    pub fn from_error(rms_error: f64, tolerance: f64) -> Self {
        if rms_error <= tolerance {
            Self::Passed { rms_error }
        } else {
            Self::ToleranceExceeded {
                rms_error,
                tolerance,
            }
        }
    }

    /// `true` only for [`Comparison::Passed`].
    pub fn passed(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }

    /// Measured RMS error, if the comparison got that far.
    pub fn rms_error(&self) -> Option<f64> {
        match self {
            Self::Passed { rms_error } | Self::ToleranceExceeded { rms_error, .. } => {
                Some(*rms_error)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed { rms_error } => write!(f, "passed (rms error {rms_error:.6})"),
            Self::GoldenMissing => write!(f, "golden file missing"),
            Self::Unreadable { reason } => write!(f, "golden file unreadable: {reason}"),
            Self::FormatMismatch { expected, actual } => {
                write!(f, "format mismatch: expected {expected}, got {actual}")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "length mismatch: expected {expected} frames, got {actual}")
            }
            Self::NonFinite { channel, frame } => {
                write!(f, "non-finite sample at channel {channel}, frame {frame}")
            }
            Self::ToleranceExceeded {
                rms_error,
                tolerance,
            } => write!(f, "rms error {rms_error:.6} exceeds tolerance {tolerance:.6}"),
        }
    }
}

/// Compare a fresh rendering against the golden file at `path`.
///
/// Shape checks run first and short-circuit. A rendering holding NaN or
/// infinite samples fails as [`Comparison::NonFinite`]. Otherwise it is
/// quantized through a scratch 16-bit WAV, exactly as [`save`] would store
/// it, before the RMS error is measured.
pub fn compare(rendered: &RenderedAudio, path: impl AsRef<Path>, tolerance: f64) -> Comparison {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "golden file missing");
        return Comparison::GoldenMissing;
    }

    let golden = match load(path) {
        Ok(golden) => golden,
        Err(e) => {
            return Comparison::Unreadable {
                reason: e.to_string(),
            };
        }
    };

    let expected = AudioShape::of(&golden);
    let actual = AudioShape::of(rendered);
    if expected != actual {
        return Comparison::FormatMismatch { expected, actual };
    }
    if golden.sample_count() != rendered.sample_count() {
        return Comparison::LengthMismatch {
            expected: golden.sample_count(),
            actual: rendered.sample_count(),
        };
    }

    if let Some((channel, frame)) = first_non_finite(rendered.buffer()) {
        tracing::debug!(path = %path.display(), channel, frame, "non-finite sample");
        return Comparison::NonFinite { channel, frame };
    }

    let quantized = match quantize(rendered) {
        Ok(buffer) => buffer,
        Err(e) => {
            return Comparison::Unreadable {
                reason: format!("scratch file: {e}"),
            };
        }
    };

    let Some(error) = rms_error(&quantized, golden.buffer()) else {
        return Comparison::Unreadable {
            reason: "scratch file changed shape".to_string(),
        };
    };
    tracing::debug!(path = %path.display(), rms_error = error, tolerance, "compared");
    Comparison::from_error(error, tolerance)
}

/// Round-trip a rendering through a temporary golden-format WAV.
fn quantize(audio: &RenderedAudio) -> Result<AudioBuffer> {
    let scratch = tempfile::Builder::new()
        .prefix("oro-")
        .suffix(".temp.wav")
        .tempfile()?;
    write_wav(scratch.path(), audio.buffer(), golden_spec(audio)?)?;
    let (buffer, _) = read_wav(scratch.path())?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tone(frames: usize, channels: usize, sample_rate: u32, amp: f32) -> RenderedAudio {
        let data: Vec<Vec<f32>> = (0..channels)
            .map(|c| {
                (0..frames)
                    .map(|i| (i as f32 * 0.05 + c as f32).sin() * amp)
                    .collect()
            })
            .collect();
        RenderedAudio::new(AudioBuffer::from_channels(data).unwrap(), sample_rate)
    }

    #[test]
    fn test_golden_path() {
        assert_eq!(
            golden_path("golden_files", "basic_note"),
            PathBuf::from("golden_files/basic_note.golden")
        );
    }

    #[test]
    fn test_rms_error() {
        let a = AudioBuffer::from_channels(vec![vec![0.0, 0.0], vec![0.0, 0.0]]).unwrap();
        let b = AudioBuffer::from_channels(vec![vec![0.5, 0.5], vec![0.5, 0.5]]).unwrap();
        assert!((rms_error(&a, &b).unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(rms_error(&a, &a), Some(0.0));
        assert_eq!(
            rms_error(&AudioBuffer::new(2, 0), &AudioBuffer::new(2, 0)),
            Some(0.0)
        );
    }

    #[test]
    fn test_rms_error_rejects_shape_mismatch() {
        let stereo = AudioBuffer::new(2, 64);
        assert_eq!(rms_error(&stereo, &AudioBuffer::new(1, 64)), None);
        assert_eq!(rms_error(&stereo, &AudioBuffer::new(2, 63)), None);
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        assert!(Comparison::from_error(0.001, 0.001).passed());
        assert!(!Comparison::from_error(0.001_000_1, 0.001).passed());
        assert!(Comparison::from_error(0.0, 0.0).passed());
    }

    #[test]
    fn test_save_then_compare_at_zero_tolerance() {
        let dir = TempDir::new().unwrap();
        let path = golden_path(dir.path(), "tone");
        let audio = tone(3000, 2, 44100, 0.8);

        save(&audio, &path).unwrap();
        let verdict = compare(&audio, &path, 0.0);
        assert_eq!(verdict, Comparison::Passed { rms_error: 0.0 });
    }

    #[test]
    fn test_save_creates_directories_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = golden_path(dir.path().join("a/b"), "x");

        save(&tone(100, 1, 8000, 0.5), &path).unwrap();
        save(&tone(200, 1, 8000, 0.5), &path).unwrap();
        assert_eq!(load(&path).unwrap().sample_count(), 200);
    }

    #[test]
    fn test_load_missing() {
        let dir = TempDir::new().unwrap();
        let err = load(dir.path().join("nope.golden")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_missing_golden() {
        let dir = TempDir::new().unwrap();
        let verdict = compare(&tone(10, 2, 44100, 0.1), dir.path().join("nope.golden"), 1.0);
        assert_eq!(verdict, Comparison::GoldenMissing);
        assert_eq!(verdict.rms_error(), None);
    }

    #[test]
    fn test_unreadable_golden() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("junk.golden");
        std::fs::write(&path, b"definitely not a wav file").unwrap();
        let verdict = compare(&tone(10, 2, 44100, 0.1), &path, 1.0);
        assert!(matches!(verdict, Comparison::Unreadable { .. }));
    }

    #[test]
    fn test_shape_mismatches_short_circuit() {
        let dir = TempDir::new().unwrap();
        let path = golden_path(dir.path(), "shape");
        save(&tone(1000, 2, 44100, 0.0), &path).unwrap();

        // Identical (silent) content, so only shape can fail these.
        let rate = compare(&tone(1000, 2, 48000, 0.0), &path, 1.0);
        assert!(matches!(rate, Comparison::FormatMismatch { .. }));

        let channels = compare(&tone(1000, 1, 44100, 0.0), &path, 1.0);
        assert_eq!(
            channels,
            Comparison::FormatMismatch {
                expected: AudioShape {
                    sample_rate: 44100,
                    channels: 2
                },
                actual: AudioShape {
                    sample_rate: 44100,
                    channels: 1
                },
            }
        );

        let length = compare(&tone(1001, 2, 44100, 0.0), &path, 1.0);
        assert_eq!(
            length,
            Comparison::LengthMismatch {
                expected: 1000,
                actual: 1001
            }
        );
    }

    #[test]
    fn test_content_change_exceeds_tolerance() {
        let dir = TempDir::new().unwrap();
        let path = golden_path(dir.path(), "drift");
        save(&tone(2000, 2, 44100, 0.5), &path).unwrap();

        let verdict = compare(&tone(2000, 2, 44100, 0.6), &path, 0.001);
        match verdict {
            Comparison::ToleranceExceeded {
                rms_error,
                tolerance,
            } => {
                assert!(rms_error > 0.001);
                assert_eq!(tolerance, 0.001);
            }
            other => panic!("expected tolerance failure, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_rendering_fails_against_silence() {
        let dir = TempDir::new().unwrap();
        let path = golden_path(dir.path(), "silence");
        save(&tone(64, 2, 44100, 0.0), &path).unwrap();

        let nan = AudioBuffer::from_channels(vec![vec![f32::NAN; 64]; 2]).unwrap();
        let verdict = compare(&RenderedAudio::new(nan, 44100), &path, 0.0);
        assert_eq!(
            verdict,
            Comparison::NonFinite {
                channel: 0,
                frame: 0
            }
        );
        assert!(!verdict.passed());

        let mut spike = vec![vec![0.0f32; 64]; 2];
        spike[1][17] = f32::INFINITY;
        let spike = AudioBuffer::from_channels(spike).unwrap();
        let verdict = compare(&RenderedAudio::new(spike, 44100), &path, 1.0);
        assert_eq!(
            verdict,
            Comparison::NonFinite {
                channel: 1,
                frame: 17
            }
        );
        assert_eq!(verdict.to_string(), "non-finite sample at channel 1, frame 17");
    }

    #[test]
    fn test_display() {
        let c = Comparison::LengthMismatch {
            expected: 10,
            actual: 12,
        };
        assert_eq!(c.to_string(), "length mismatch: expected 10 frames, got 12");
        assert_eq!(Comparison::GoldenMissing.to_string(), "golden file missing");
    }
}
