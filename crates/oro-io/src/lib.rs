//! Golden file storage for the oro regression harness.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for multi-channel planar buffers
//! - **Golden store**: [`save`], [`load`] and [`compare`] for reference renderings
//!
//! Golden files are 16-bit PCM WAV carrying the rendering's sample rate and
//! channel count. [`compare`] pushes a fresh rendering through the same
//! quantization before measuring, so a rendering always matches its own
//! freshly saved golden file.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use oro_io::{compare, golden_path, save};
//!
//! let path = golden_path("golden_files", "basic_note");
//! save(&audio, &path)?;
//!
//! let verdict = compare(&audio, &path, 0.001);
//! assert!(verdict.passed());
//! ```

mod golden;
mod wav;

pub use golden::{
    AudioShape, Comparison, GOLDEN_EXTENSION, compare, golden_path, load, rms_error, save,
};
pub use wav::{
    GOLDEN_BITS_PER_SAMPLE, WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav,
};

use std::path::PathBuf;

/// Error types for golden file operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Golden file does not exist.
    #[error("Golden file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Parent directory of a golden file could not be created.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Buffer and WAV layout disagree.
    #[error("Unsupported layout: {0}")]
    Format(String),
}

/// Convenience result type for golden file operations.
pub type Result<T> = std::result::Result<T, Error>;
