//! The capability interface a unit under test must provide.
//!
//! The harness never depends on a concrete processor type. Anything that
//! implements [`AudioUnit`] (a synth, an effect, a test double) can be
//! rendered, bound and compared.
//!
//! ## Design Decisions
//!
//! - **Stateful across blocks**: `process` is called once per block in
//!   increasing sample order and the harness never resets the unit between
//!   blocks of one render. Running phase, envelopes and voice state carry
//!   over exactly as they would in a real-time callback sequence.
//!
//! - **Fallible processing**: a unit reports faults through
//!   [`ProcessError`] instead of panicking. A fault aborts the render that
//!   triggered it.
//!
//! - **Object-safe**: the suite drives units through `&mut dyn AudioUnit`
//!   as readily as through generics.

use crate::buffer::AudioBuffer;
use crate::error::ProcessError;
use crate::event::SampleEvent;
use crate::param_info::ParameterInfo;

/// Input and output channel counts of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChannelCounts {
    /// Input channels consumed (0 for pure generators).
    pub inputs: usize,
    /// Output channels produced.
    pub outputs: usize,
}

impl ChannelCounts {
    /// Channel layout of a generator: no inputs, `outputs` outputs.
    pub const fn generator(outputs: usize) -> Self {
        Self { inputs: 0, outputs }
    }
}

/// Core trait for every unit the harness can render.
///
/// # Example
///
/// ```rust
/// use oro_core::{
///     AudioBuffer, AudioUnit, ChannelCounts, ParamDescriptor, ParameterInfo, ProcessError,
///     SampleEvent,
/// };
///
/// struct Click;
///
/// impl ParameterInfo for Click {
///     fn param_count(&self) -> usize { 0 }
///     fn param_info(&self, _: usize) -> Option<ParamDescriptor> { None }
///     fn get_param(&self, _: usize) -> f32 { 0.0 }
///     fn set_param(&mut self, _: usize, _: f32) {}
/// }
///
/// impl AudioUnit for Click {
///     fn prepare(&mut self, _sample_rate: f32, _block_size: usize) {}
///
///     fn process(
///         &mut self,
///         buffer: &mut AudioBuffer,
///         events: &[SampleEvent],
///     ) -> Result<(), ProcessError> {
///         for event in events.iter().filter(|e| e.is_note_on()) {
///             for channel in buffer.channels_mut() {
///                 channel[event.offset] = 1.0;
///             }
///         }
///         Ok(())
///     }
///
///     fn channel_counts(&self) -> ChannelCounts {
///         ChannelCounts::generator(1)
///     }
/// }
/// ```
pub trait AudioUnit: ParameterInfo {
    /// One-time setup before rendering.
    ///
    /// Implementations must reset all internal processing state and restore
    /// parameters to their defaults, so that a freshly prepared unit renders
    /// identically every time.
    fn prepare(&mut self, sample_rate: f32, block_size: usize);

    /// Processes one block in place.
    ///
    /// `buffer` arrives zero-filled with [`ChannelCounts::outputs`] channels
    /// and at most the prepared block size in frames. `events` are the note
    /// events falling inside this block, with offsets relative to its first
    /// frame, in declaration order.
    fn process(
        &mut self,
        buffer: &mut AudioBuffer,
        events: &[SampleEvent],
    ) -> Result<(), ProcessError>;

    /// Input and output channel counts.
    fn channel_counts(&self) -> ChannelCounts;
}

impl<T: AudioUnit + ?Sized> AudioUnit for Box<T> {
    fn prepare(&mut self, sample_rate: f32, block_size: usize) {
        (**self).prepare(sample_rate, block_size);
    }

    fn process(
        &mut self,
        buffer: &mut AudioBuffer,
        events: &[SampleEvent],
    ) -> Result<(), ProcessError> {
        (**self).process(buffer, events)
    }

    fn channel_counts(&self) -> ChannelCounts {
        (**self).channel_counts()
    }
}

impl<T: ParameterInfo + ?Sized> ParameterInfo for Box<T> {
    fn param_count(&self) -> usize {
        (**self).param_count()
    }

    fn param_info(&self, index: usize) -> Option<crate::ParamDescriptor> {
        (**self).param_info(index)
    }

    fn get_param(&self, index: usize) -> f32 {
        (**self).get_param(index)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        (**self).set_param(index, value);
    }
}
