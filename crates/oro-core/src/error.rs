//! Error types for test case configuration and rendering.

use thiserror::Error;

/// A test case or binding that cannot be rendered as declared.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Sample rate must be greater than zero.
    #[error("sample rate must be positive, got {0}")]
    InvalidSampleRate(u32),

    /// Block size must be greater than zero.
    #[error("block size must be positive, got {0}")]
    InvalidBlockSize(usize),

    /// Tolerance must be finite and not negative.
    #[error("tolerance must be a finite value >= 0, got {0}")]
    InvalidTolerance(f64),

    /// Case duration must be finite and not negative.
    #[error("duration must be a finite value >= 0 seconds, got {0}")]
    InvalidDuration(f64),

    /// A note was declared with a non-positive or non-finite duration.
    #[error("note #{index} has invalid duration {duration} (must be > 0)")]
    InvalidNoteDuration {
        /// Position of the note in the timeline.
        index: usize,
        /// The offending duration in seconds.
        duration: f64,
    },

    /// A note starts before zero or at a non-finite time.
    #[error("note #{index} has invalid start time {start} (must be >= 0)")]
    InvalidNoteStart {
        /// Position of the note in the timeline.
        index: usize,
        /// The offending start time in seconds.
        start: f64,
    },

    /// Note numbers are MIDI note numbers, 0 to 127.
    #[error("note #{index} has note number {note} outside 0..=127")]
    InvalidNoteNumber {
        /// Position of the note in the timeline.
        index: usize,
        /// The offending note number.
        note: u8,
    },

    /// Velocity must lie in 0.0 to 1.0.
    #[error("note #{index} has velocity {velocity} outside 0.0..=1.0")]
    InvalidVelocity {
        /// Position of the note in the timeline.
        index: usize,
        /// The offending velocity.
        velocity: f32,
    },

    /// The unit exposes no output channels, so there is nothing to render.
    #[error("unit under test has no output channels")]
    NoOutputChannels,

    /// A parameter binding names a parameter the unit does not expose.
    #[error("unit has no parameter named '{name}'")]
    UnknownParameter {
        /// Name given in the binding.
        name: String,
    },
}

/// A fault raised by the unit under test while processing a block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProcessError {
    message: String,
}

impl ProcessError {
    /// Create a process error with a human readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message supplied by the unit.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Why a render call produced no audio.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The test case failed validation before any block was processed.
    #[error("invalid test case: {0}")]
    Config(#[from] ConfigError),

    /// The unit faulted; the partial rendering is discarded.
    #[error("unit faulted in block {block}: {source}")]
    Unit {
        /// Index of the block being processed when the fault occurred.
        block: usize,
        /// Fault reported by the unit.
        #[source]
        source: ProcessError,
    },
}
