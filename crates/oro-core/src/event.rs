//! Note timelines and their sample-indexed event form.
//!
//! A [`Timeline`] holds notes in declaration order with times in seconds.
//! [`Timeline::build_event_buffer`] turns each note into a note-on and a
//! note-off at `floor(time * sample_rate)`, and [`slice_for_window`] cuts the
//! events for one processing block out of that buffer.
//!
//! Events are never re-sorted: a note declared later appends its pair after
//! earlier notes even if it starts sooner. Overlapping notes on the same
//! pitch are passed through as declared.

/// One note in a timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    /// MIDI note number, 0 to 127.
    pub note: u8,
    /// Velocity, 0.0 to 1.0.
    pub velocity: f32,
    /// Start time in seconds.
    pub start: f64,
    /// Length in seconds, greater than zero.
    pub duration: f64,
}

impl NoteEvent {
    /// Creates a note.
    pub fn new(note: u8, velocity: f32, start: f64, duration: f64) -> Self {
        Self {
            note,
            velocity,
            start,
            duration,
        }
    }

    /// End time in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Whether a sample event starts or stops a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Note starts sounding.
    NoteOn,
    /// Note is released.
    NoteOff,
}

/// A note event positioned at an absolute or block-relative sample offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleEvent {
    /// Sample offset, relative to whatever window the event was sliced into.
    pub offset: usize,
    /// On or off.
    pub kind: EventKind,
    /// MIDI note number.
    pub note: u8,
    /// Note-on velocity; note-offs carry `0.0`.
    pub velocity: f32,
}

impl SampleEvent {
    /// Returns true for note-on events.
    pub fn is_note_on(&self) -> bool {
        self.kind == EventKind::NoteOn
    }
}

/// Converts a time in seconds to a sample index: `floor(seconds * sample_rate)`.
#[inline]
pub fn seconds_to_samples(seconds: f64, sample_rate: u32) -> usize {
    (seconds * f64::from(sample_rate)).floor() as usize
}

/// An ordered sequence of notes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    notes: Vec<NoteEvent>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one note.
    pub fn add_note(&mut self, note: u8, velocity: f32, start: f64, duration: f64) {
        self.notes.push(NoteEvent::new(note, velocity, start, duration));
    }

    /// Appends one note per entry of `notes`, in the given order, all sharing
    /// velocity and timing.
    pub fn add_chord(&mut self, notes: &[u8], velocity: f32, start: f64, duration: f64) {
        for &note in notes {
            self.add_note(note, velocity, start, duration);
        }
    }

    /// Appends every note of `notes`, preserving order.
    pub fn add_sequence(&mut self, notes: impl IntoIterator<Item = NoteEvent>) {
        self.notes.extend(notes);
    }

    /// Notes in declaration order.
    pub fn notes(&self) -> &[NoteEvent] {
        &self.notes
    }

    /// Number of notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns true if no notes were declared.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Expands every note into a note-on/note-off pair at `sample_rate`.
    ///
    /// The result has exactly `2 * len()` events, in declaration order.
    pub fn build_event_buffer(&self, sample_rate: u32) -> Vec<SampleEvent> {
        let mut events = Vec::with_capacity(self.notes.len() * 2);
        for note in &self.notes {
            events.push(SampleEvent {
                offset: seconds_to_samples(note.start, sample_rate),
                kind: EventKind::NoteOn,
                note: note.note,
                velocity: note.velocity,
            });
            events.push(SampleEvent {
                offset: seconds_to_samples(note.end(), sample_rate),
                kind: EventKind::NoteOff,
                note: note.note,
                velocity: 0.0,
            });
        }
        events
    }
}

/// Selects the events in `[window_start, window_start + window_len)` and
/// rebases their offsets to the window start.
///
/// The window is half-open: an event exactly at `window_start + window_len`
/// belongs to the next window. Relative order of the selected events is kept.
pub fn slice_for_window(
    events: &[SampleEvent],
    window_start: usize,
    window_len: usize,
) -> Vec<SampleEvent> {
    let window_end = window_start + window_len;
    events
        .iter()
        .filter(|e| e.offset >= window_start && e.offset < window_end)
        .map(|e| SampleEvent {
            offset: e.offset - window_start,
            ..*e
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(offset: usize, note: u8) -> SampleEvent {
        SampleEvent {
            offset,
            kind: EventKind::NoteOn,
            note,
            velocity: 1.0,
        }
    }

    fn off(offset: usize, note: u8) -> SampleEvent {
        SampleEvent {
            offset,
            kind: EventKind::NoteOff,
            note,
            velocity: 0.0,
        }
    }

    #[test]
    fn note_maps_to_floor_of_time() {
        let mut timeline = Timeline::new();
        timeline.add_note(60, 0.8, 0.1, 1.5);
        let events = timeline.build_event_buffer(44100);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::NoteOn);
        assert_eq!(events[0].offset, 4410);
        assert_eq!(events[0].velocity, 0.8);
        assert_eq!(events[1].kind, EventKind::NoteOff);
        assert_eq!(events[1].offset, 70560);
        assert_eq!(events[1].velocity, 0.0);
    }

    #[test]
    fn chord_matches_sequential_notes() {
        let mut chord = Timeline::new();
        chord.add_chord(&[60, 64, 67], 0.6, 0.5, 1.0);

        let mut single = Timeline::new();
        single.add_note(60, 0.6, 0.5, 1.0);
        single.add_note(64, 0.6, 0.5, 1.0);
        single.add_note(67, 0.6, 0.5, 1.0);

        assert_eq!(chord, single);
        let pitches: Vec<u8> = chord.notes().iter().map(|n| n.note).collect();
        assert_eq!(pitches, vec![60, 64, 67]);
    }

    #[test]
    fn event_buffer_keeps_declaration_order() {
        let mut timeline = Timeline::new();
        timeline.add_note(72, 1.0, 1.0, 0.5);
        timeline.add_note(48, 1.0, 0.0, 0.25);
        let events = timeline.build_event_buffer(1000);

        let offsets: Vec<usize> = events.iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![1000, 1500, 0, 250]);
    }

    #[test]
    fn sequence_appends_in_order() {
        let mut timeline = Timeline::new();
        timeline.add_note(40, 0.5, 0.0, 1.0);
        timeline.add_sequence([
            NoteEvent::new(41, 0.5, 0.1, 1.0),
            NoteEvent::new(42, 0.5, 0.2, 1.0),
        ]);
        let pitches: Vec<u8> = timeline.notes().iter().map(|n| n.note).collect();
        assert_eq!(pitches, vec![40, 41, 42]);
    }

    #[test]
    fn window_is_half_open() {
        let events = vec![on(511, 60), off(512, 60)];

        let first = slice_for_window(&events, 0, 512);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].offset, 511);

        let second = slice_for_window(&events, 512, 512);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].offset, 0);
        assert_eq!(second[0].kind, EventKind::NoteOff);
    }

    #[test]
    fn window_slice_keeps_relative_order() {
        let events = vec![on(90, 1), on(70, 2), on(300, 3)];
        let sliced = slice_for_window(&events, 64, 64);
        let notes: Vec<u8> = sliced.iter().map(|e| e.note).collect();
        assert_eq!(notes, vec![1, 2]);
        assert_eq!(sliced[0].offset, 26);
        assert_eq!(sliced[1].offset, 6);
    }
}
