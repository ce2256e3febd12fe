//! Monophonic sine synthesizer used as the reference unit under test.

use crate::envelope::ArEnvelope;
use oro_core::{
    AudioBuffer, AudioUnit, ChannelCounts, EventKind, ParamDescriptor, ParameterInfo,
    ProcessError, SampleEvent,
};
use std::f64::consts::TAU;

/// Stereo output, no inputs.
pub const OUTPUT_CHANNELS: usize = 2;

const GAIN: usize = 0;
const ATTACK: usize = 1;
const RELEASE: usize = 2;

const PARAMS: [ParamDescriptor; 3] = [
    ParamDescriptor::linear("gain", "Gain", 0.0, 1.0, 0.7),
    ParamDescriptor::time_ms("attack", "Attack", 0.0, 1000.0, 5.0),
    ParamDescriptor::time_ms("release", "Release", 0.0, 2000.0, 50.0),
];

/// Frequency in Hz of a MIDI note number (A4 = 69 = 440 Hz).
#[inline]
pub fn midi_to_freq(note: u8) -> f64 {
    440.0 * 2f64.powf((f64::from(note) - 69.0) / 12.0)
}

/// Monophonic sine synth.
///
/// A note-on takes over the voice and restarts the oscillator phase; a
/// note-off releases the voice only if it names the sounding note. Output is
/// `sin * gain * velocity * envelope`, identical on both channels.
///
/// Events are applied at their exact sample offset. Events sharing an offset
/// are applied in the order given.
///
/// ## Parameters
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | gain | 0.0 to 1.0 | 0.7 |
/// | 1 | attack | 0 to 1000 ms | 5.0 |
/// | 2 | release | 0 to 2000 ms | 50.0 |
#[derive(Debug, Clone)]
pub struct SimpleSynth {
    sample_rate: f32,
    gain: f32,
    phase: f64,
    phase_inc: f64,
    note: Option<u8>,
    velocity: f32,
    envelope: ArEnvelope,
}

impl Default for SimpleSynth {
    fn default() -> Self {
        Self::new(44100.0)
    }
}

impl SimpleSynth {
    /// Create a synth with default parameters.
    pub fn new(sample_rate: f32) -> Self {
        let mut synth = Self {
            sample_rate,
            gain: PARAMS[GAIN].default,
            phase: 0.0,
            phase_inc: 0.0,
            note: None,
            velocity: 0.0,
            envelope: ArEnvelope::new(sample_rate),
        };
        synth.envelope.set_attack_ms(PARAMS[ATTACK].default);
        synth.envelope.set_release_ms(PARAMS[RELEASE].default);
        synth
    }

    /// Output gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Note that owns the voice, including during its release.
    pub fn current_note(&self) -> Option<u8> {
        self.note
    }

    /// Whether the voice currently produces sound.
    pub fn is_sounding(&self) -> bool {
        self.envelope.is_active()
    }

    fn handle(&mut self, event: &SampleEvent) {
        match event.kind {
            EventKind::NoteOn => {
                self.note = Some(event.note);
                self.velocity = event.velocity;
                self.phase = 0.0;
                self.phase_inc = midi_to_freq(event.note) / f64::from(self.sample_rate);
                self.envelope.gate_on();
            }
            EventKind::NoteOff => {
                if self.note == Some(event.note) {
                    self.envelope.gate_off();
                }
            }
        }
    }

    #[inline]
    fn next_sample(&mut self) -> f32 {
        if !self.envelope.is_active() {
            return 0.0;
        }
        let level = self.envelope.advance();
        let value = (self.phase * TAU).sin() as f32 * self.gain * self.velocity * level;
        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        value
    }
}

impl ParameterInfo for SimpleSynth {
    fn param_count(&self) -> usize {
        PARAMS.len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        PARAMS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            GAIN => self.gain,
            ATTACK => self.envelope.attack_ms(),
            RELEASE => self.envelope.release_ms(),
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        let Some(desc) = PARAMS.get(index) else {
            return;
        };
        let value = desc.clamp(value);
        match index {
            GAIN => self.gain = value,
            ATTACK => self.envelope.set_attack_ms(value),
            RELEASE => self.envelope.set_release_ms(value),
            _ => {}
        }
    }
}

impl AudioUnit for SimpleSynth {
    fn prepare(&mut self, sample_rate: f32, block_size: usize) {
        tracing::debug!(sample_rate, block_size, "preparing SimpleSynth");
        *self = Self::new(sample_rate);
    }

    fn process(
        &mut self,
        buffer: &mut AudioBuffer,
        events: &[SampleEvent],
    ) -> Result<(), ProcessError> {
        if buffer.num_channels() != OUTPUT_CHANNELS {
            return Err(ProcessError::new(format!(
                "SimpleSynth renders {OUTPUT_CHANNELS} channels, buffer has {}",
                buffer.num_channels()
            )));
        }
        let frames = buffer.num_frames();
        if let Some(late) = events.iter().find(|e| e.offset >= frames) {
            return Err(ProcessError::new(format!(
                "event offset {} outside block of {frames} frames",
                late.offset
            )));
        }

        let mut ordered: Vec<&SampleEvent> = events.iter().collect();
        ordered.sort_by_key(|e| e.offset);
        let mut pending = ordered.into_iter().peekable();

        for i in 0..frames {
            while let Some(event) = pending.next_if(|e| e.offset == i) {
                self.handle(event);
            }
            let value = self.next_sample();
            for channel in buffer.channels_mut() {
                channel[i] = value;
            }
        }
        Ok(())
    }

    fn channel_counts(&self) -> ChannelCounts {
        ChannelCounts::generator(OUTPUT_CHANNELS)
    }
}
