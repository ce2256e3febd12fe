//! Test case definition.
//!
//! A [`TestCase`] bundles a note timeline, parameter bindings and the render
//! configuration (duration, sample rate, block size, tolerance). It is built
//! once and then only read while rendering.

use crate::binder::BindPolicy;
use crate::error::ConfigError;
use crate::event::{NoteEvent, Timeline};

/// Default case length in seconds.
pub const DEFAULT_DURATION: f64 = 5.0;
/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
/// Default block size in samples.
pub const DEFAULT_BLOCK_SIZE: usize = 512;
/// Default maximum RMS error for a passing comparison.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// A named parameter value applied before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamBinding {
    /// Parameter name as exposed by the unit.
    pub name: String,
    /// Value to apply.
    pub value: f32,
}

impl ParamBinding {
    /// Creates a binding.
    pub fn new(name: impl Into<String>, value: f32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// How a suite treats unit state left over from the previous case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Isolation {
    /// Re-prepare the unit before this case.
    #[default]
    Prepare,
    /// Keep whatever state the previous case left behind. The unit is only
    /// prepared if it has not yet been prepared with this case's sample rate
    /// and block size.
    Persist,
}

/// One golden-file regression case.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    name: String,
    description: String,
    duration: f64,
    sample_rate: u32,
    block_size: usize,
    tolerance: f64,
    timeline: Timeline,
    params: Vec<ParamBinding>,
    bind_policy: BindPolicy,
    isolation: Isolation,
}

impl TestCase {
    /// Creates a case with default configuration and an empty timeline.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            duration: DEFAULT_DURATION,
            sample_rate: DEFAULT_SAMPLE_RATE,
            block_size: DEFAULT_BLOCK_SIZE,
            tolerance: DEFAULT_TOLERANCE,
            timeline: Timeline::new(),
            params: Vec::new(),
            bind_policy: BindPolicy::default(),
            isolation: Isolation::default(),
        }
    }

    /// Set the length in seconds.
    pub fn set_duration(&mut self, seconds: f64) {
        self.duration = seconds;
    }

    /// Set the sample rate in Hz.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
    }

    /// Set the block size in samples.
    pub fn set_block_size(&mut self, block_size: usize) {
        self.block_size = block_size;
    }

    /// Set the maximum RMS error that still passes.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance;
    }

    /// Set how unmatched parameter bindings are treated.
    pub fn set_bind_policy(&mut self, policy: BindPolicy) {
        self.bind_policy = policy;
    }

    /// Set the cross-case state policy.
    pub fn set_isolation(&mut self, isolation: Isolation) {
        self.isolation = isolation;
    }

    /// Builder form of [`set_duration`](Self::set_duration).
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    /// Builder form of [`set_sample_rate`](Self::set_sample_rate).
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Builder form of [`set_block_size`](Self::set_block_size).
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Builder form of [`set_tolerance`](Self::set_tolerance).
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Builder form of [`set_bind_policy`](Self::set_bind_policy).
    pub fn with_bind_policy(mut self, policy: BindPolicy) -> Self {
        self.bind_policy = policy;
        self
    }

    /// Builder form of [`set_isolation`](Self::set_isolation).
    pub fn with_isolation(mut self, isolation: Isolation) -> Self {
        self.isolation = isolation;
        self
    }

    /// Builder form of [`add_parameter`](Self::add_parameter).
    pub fn with_param(mut self, name: impl Into<String>, value: f32) -> Self {
        self.add_parameter(name, value);
        self
    }

    /// Appends a parameter binding. Duplicates are kept.
    pub fn add_parameter(&mut self, name: impl Into<String>, value: f32) {
        self.params.push(ParamBinding::new(name, value));
    }

    /// Drops every parameter binding.
    pub fn reset_all_parameters(&mut self) {
        self.params.clear();
    }

    /// Appends one note to the timeline.
    pub fn add_note(&mut self, note: u8, velocity: f32, start: f64, duration: f64) {
        self.timeline.add_note(note, velocity, start, duration);
    }

    /// Appends a chord: one note per pitch, in the given order.
    pub fn add_chord(&mut self, notes: &[u8], velocity: f32, start: f64, duration: f64) {
        self.timeline.add_chord(notes, velocity, start, duration);
    }

    /// Appends notes in order.
    pub fn add_sequence(&mut self, notes: impl IntoIterator<Item = NoteEvent>) {
        self.timeline.add_sequence(notes);
    }

    /// Case name; also the golden file stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Block size in samples.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Maximum passing RMS error.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The note timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Parameter bindings in declaration order.
    pub fn params(&self) -> &[ParamBinding] {
        &self.params
    }

    /// Unmatched-binding policy.
    pub fn bind_policy(&self) -> BindPolicy {
        self.bind_policy
    }

    /// Cross-case state policy.
    pub fn isolation(&self) -> Isolation {
        self.isolation
    }

    /// Samples per channel a render of this case produces:
    /// `round(duration * sample_rate)`.
    pub fn total_samples(&self) -> usize {
        (self.duration * f64::from(self.sample_rate)).round() as usize
    }

    /// Number of blocks: `ceil(total_samples / block_size)`.
    ///
    /// Returns 0 for a zero block size; [`validate`](Self::validate) rejects
    /// such cases.
    pub fn block_count(&self) -> usize {
        if self.block_size == 0 {
            return 0;
        }
        self.total_samples().div_ceil(self.block_size)
    }

    /// Checks the configuration and every note.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.block_size == 0 {
            return Err(ConfigError::InvalidBlockSize(self.block_size));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ConfigError::InvalidDuration(self.duration));
        }

        for (index, note) in self.timeline.notes().iter().enumerate() {
            if note.note > 127 {
                return Err(ConfigError::InvalidNoteNumber {
                    index,
                    note: note.note,
                });
            }
            if !(0.0..=1.0).contains(&note.velocity) {
                return Err(ConfigError::InvalidVelocity {
                    index,
                    velocity: note.velocity,
                });
            }
            if !note.start.is_finite() || note.start < 0.0 {
                return Err(ConfigError::InvalidNoteStart {
                    index,
                    start: note.start,
                });
            }
            if !note.duration.is_finite() || note.duration <= 0.0 {
                return Err(ConfigError::InvalidNoteDuration {
                    index,
                    duration: note.duration,
                });
            }
        }
        Ok(())
    }
}
