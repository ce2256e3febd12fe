//! Oro Core - golden-file regression harness primitives
//!
//! This crate holds everything needed to turn a scripted note timeline into
//! deterministic audio from an arbitrary unit under test.
//!
//! # Core Abstractions
//!
//! ## Unit Capability Interface
//!
//! - [`AudioUnit`] - prepare / process / channel counts
//! - [`ParameterInfo`] - ordered, index-addressed parameter enumeration
//!
//! ## Event Scheduling
//!
//! - [`Timeline`] - notes in declaration order (`add_note`, `add_chord`, `add_sequence`)
//! - [`SampleEvent`] - note-on/off at a sample offset
//! - [`slice_for_window`] - half-open per-block event selection
//!
//! ## Rendering
//!
//! - [`TestCase`] - timeline, bindings and render configuration
//! - [`bind_all`] - apply bindings in the unit's parameter order
//! - [`render`] - block-by-block rendering into a [`RenderedAudio`]
//!
//! # Example
//!
//! ```rust,ignore
//! use oro_core::{TestCase, bind_all, render};
//!
//! let mut case = TestCase::new("basic_note", "Test basic note playback").with_duration(2.0);
//! case.add_note(60, 0.8, 0.1, 1.5);
//! case.add_parameter("gain", 0.7);
//!
//! unit.prepare(case.sample_rate() as f32, case.block_size());
//! bind_all(&mut unit, case.params(), case.bind_policy())?;
//! let audio = render(&mut unit, &case)?;
//! assert_eq!(audio.sample_count(), 88200);
//! ```

pub mod binder;
pub mod buffer;
pub mod case;
pub mod error;
pub mod event;
pub mod param_info;
pub mod render;
pub mod unit;

pub use binder::{BindPolicy, bind_all};
pub use buffer::{AudioBuffer, RenderedAudio};
pub use case::{
    DEFAULT_BLOCK_SIZE, DEFAULT_DURATION, DEFAULT_SAMPLE_RATE, DEFAULT_TOLERANCE, Isolation,
    ParamBinding, TestCase,
};
pub use error::{ConfigError, ProcessError, RenderError};
pub use event::{EventKind, NoteEvent, SampleEvent, Timeline, seconds_to_samples, slice_for_window};
pub use param_info::{ParamDescriptor, ParamUnit, ParameterInfo};
pub use render::{BlockWindow, block_windows, render};
pub use unit::{AudioUnit, ChannelCounts};
