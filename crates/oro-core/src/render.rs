//! Block-by-block offline rendering.
//!
//! [`render`] drives a unit through a test case exactly the way a real-time
//! host would: fixed-size blocks in increasing sample order, each with the
//! note events that fall inside it, and a shorter final block when the case
//! length is not a multiple of the block size. The unit is never reset
//! between blocks.

use crate::buffer::{AudioBuffer, RenderedAudio};
use crate::case::TestCase;
use crate::error::{ConfigError, RenderError};
use crate::event::slice_for_window;
use crate::unit::AudioUnit;

/// One processing block of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockWindow {
    /// Block index, starting at 0.
    pub index: usize,
    /// First frame of the block in the full rendering.
    pub offset: usize,
    /// Frames in this block; only the final block may be shorter than the
    /// block size.
    pub len: usize,
}

/// Splits `[0, total_samples)` into consecutive blocks of `block_size`.
///
/// Yields nothing when `block_size` is zero.
pub fn block_windows(
    total_samples: usize,
    block_size: usize,
) -> impl Iterator<Item = BlockWindow> {
    let count = if block_size == 0 {
        0
    } else {
        total_samples.div_ceil(block_size)
    };
    (0..count).map(move |index| {
        let offset = index * block_size;
        BlockWindow {
            index,
            offset,
            len: block_size.min(total_samples - offset),
        }
    })
}

/// Renders `case` through `unit`.
///
/// The unit must already be prepared and bound; this call only processes.
/// A fault in any block aborts the render and no audio is returned.
pub fn render<U: AudioUnit + ?Sized>(
    unit: &mut U,
    case: &TestCase,
) -> Result<RenderedAudio, RenderError> {
    case.validate()?;

    let channels = unit.channel_counts().outputs;
    if channels == 0 {
        return Err(ConfigError::NoOutputChannels.into());
    }

    let total_samples = case.total_samples();
    let events = case.timeline().build_event_buffer(case.sample_rate());
    let mut output = AudioBuffer::new(channels, total_samples);

    tracing::debug!(
        case = case.name(),
        total_samples,
        blocks = case.block_count(),
        events = events.len(),
        "render"
    );

    for window in block_windows(total_samples, case.block_size()) {
        let mut block = AudioBuffer::new(channels, window.len);
        let block_events = slice_for_window(&events, window.offset, window.len);
        if !block_events.is_empty() {
            tracing::trace!(block = window.index, events = block_events.len(), "block events");
        }

        unit.process(&mut block, &block_events)
            .map_err(|source| RenderError::Unit {
                block: window.index,
                source,
            })?;

        output.write_at(window.offset, &block);
    }

    Ok(RenderedAudio::new(output, case.sample_rate()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_cover_range_with_short_tail() {
        let windows: Vec<BlockWindow> = block_windows(88200, 512).collect();
        assert_eq!(windows.len(), 173);
        assert_eq!(windows[0], BlockWindow { index: 0, offset: 0, len: 512 });
        let last = windows[172];
        assert_eq!(last.offset, 172 * 512);
        assert_eq!(last.len, 56);
        assert_eq!(windows.iter().map(|w| w.len).sum::<usize>(), 88200);
    }

    #[test]
    fn exact_multiple_has_no_short_block() {
        let windows: Vec<BlockWindow> = block_windows(1024, 256).collect();
        assert_eq!(windows.len(), 4);
        assert!(windows.iter().all(|w| w.len == 256));
    }

    #[test]
    fn degenerate_windows() {
        assert_eq!(block_windows(0, 512).count(), 0);
        assert_eq!(block_windows(100, 0).count(), 0);
    }
}
