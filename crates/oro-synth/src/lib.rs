//! Example unit under test for the oro harness.
//!
//! [`SimpleSynth`] is a monophonic sine synth: stereo output, no inputs, a
//! `gain` parameter plus `attack` / `release` times for its [`ArEnvelope`].
//! It is the unit the `oro` command line renders its built-in cases with.
//!
//! ```rust,ignore
//! use oro_core::{TestCase, bind_all, render};
//! use oro_synth::SimpleSynth;
//!
//! let mut synth = SimpleSynth::default();
//! let mut case = TestCase::new("basic_note", "Test basic note playback").with_duration(2.0);
//! case.add_note(60, 0.8, 0.1, 1.5);
//! case.add_parameter("gain", 0.7);
//!
//! synth.prepare(44100.0, 512);
//! bind_all(&mut synth, case.params(), case.bind_policy())?;
//! let audio = render(&mut synth, &case)?;
//! ```

pub mod envelope;
pub mod synth;

pub use envelope::{ArEnvelope, EnvelopeState};
pub use synth::{OUTPUT_CHANNELS, SimpleSynth, midi_to_freq};
