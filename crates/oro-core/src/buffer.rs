//! Planar multi-channel sample buffers.
//!
//! [`AudioBuffer`] holds one `Vec<f32>` per channel, all of equal length. It
//! is both the transient per-block buffer handed to a unit and the storage
//! behind a complete [`RenderedAudio`].

/// Planar audio buffer: one equally sized `Vec<f32>` per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    channels: Vec<Vec<f32>>,
    num_frames: usize,
}

impl AudioBuffer {
    /// Creates a zero-filled buffer.
    pub fn new(num_channels: usize, num_frames: usize) -> Self {
        Self {
            channels: vec![vec![0.0; num_frames]; num_channels],
            num_frames,
        }
    }

    /// Builds a buffer from per-channel sample vectors.
    ///
    /// Returns `None` if the channels differ in length.
    pub fn from_channels(channels: Vec<Vec<f32>>) -> Option<Self> {
        let num_frames = channels.first().map_or(0, Vec::len);
        if channels.iter().any(|c| c.len() != num_frames) {
            return None;
        }
        Some(Self {
            channels,
            num_frames,
        })
    }

    /// Deinterleaves `L, R, L, R, ...` style data.
    ///
    /// A trailing partial frame is dropped.
    pub fn from_interleaved(interleaved: &[f32], num_channels: usize) -> Self {
        if num_channels == 0 {
            return Self::new(0, 0);
        }
        let num_frames = interleaved.len() / num_channels;
        let mut buffer = Self::new(num_channels, num_frames);
        for (frame, chunk) in interleaved.chunks_exact(num_channels).enumerate() {
            for (channel, &sample) in chunk.iter().enumerate() {
                buffer.channels[channel][frame] = sample;
            }
        }
        buffer
    }

    /// Interleaves all channels frame by frame.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut interleaved = Vec::with_capacity(self.num_frames * self.channels.len());
        for frame in 0..self.num_frames {
            for channel in &self.channels {
                interleaved.push(channel[frame]);
            }
        }
        interleaved
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples per channel.
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Total sample count across all channels.
    pub fn total_samples(&self) -> usize {
        self.num_frames * self.channels.len()
    }

    /// Returns true if the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.num_frames == 0
    }

    /// Samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_channels()`.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Mutable samples of one channel.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_channels()`.
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.channels[index]
    }

    /// Iterates over the channels.
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Iterates mutably over the channels.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        self.channels.iter_mut().map(Vec::as_mut_slice)
    }

    /// Fills every channel with zeros.
    pub fn clear(&mut self) {
        for channel in &mut self.channels {
            channel.fill(0.0);
        }
    }

    /// Copies `block` into this buffer starting at frame `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the channel counts differ or the block would run past the
    /// end of this buffer.
    pub fn write_at(&mut self, offset: usize, block: &AudioBuffer) {
        assert_eq!(
            self.channels.len(),
            block.channels.len(),
            "channel count mismatch"
        );
        let end = offset + block.num_frames;
        for (dst, src) in self.channels.iter_mut().zip(block.channels.iter()) {
            dst[offset..end].copy_from_slice(src);
        }
    }
}

/// A complete rendering of one test case.
///
/// Created fresh by every render call and owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedAudio {
    buffer: AudioBuffer,
    sample_rate: u32,
}

impl RenderedAudio {
    /// Wraps a buffer rendered at `sample_rate` Hz.
    pub fn new(buffer: AudioBuffer, sample_rate: u32) -> Self {
        Self {
            buffer,
            sample_rate,
        }
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.buffer.num_channels()
    }

    /// Number of samples per channel.
    pub fn sample_count(&self) -> usize {
        self.buffer.num_frames()
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The underlying sample buffer.
    pub fn buffer(&self) -> &AudioBuffer {
        &self.buffer
    }

    /// Consumes the rendering, returning the sample buffer.
    pub fn into_buffer(self) -> AudioBuffer {
        self.buffer
    }
}
