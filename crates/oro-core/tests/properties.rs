//! Property-based tests for event scheduling.
//!
//! Checks that per-block slicing partitions the event buffer and that
//! note-off always follows note-on once a note spans at least one sample.

use oro_core::{EventKind, SampleEvent, Timeline, block_windows, slice_for_window};
use proptest::prelude::*;

fn arb_timeline() -> impl Strategy<Value = Timeline> {
    prop::collection::vec((0u8..=127, 0.0f32..=1.0, 0.0f64..3.0, 0.001f64..2.0), 0..24).prop_map(
        |notes| {
            let mut timeline = Timeline::new();
            for (note, velocity, start, duration) in notes {
                timeline.add_note(note, velocity, start, duration);
            }
            timeline
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Every event inside the render range lands in exactly one block, at
    /// the right relative offset, and events beyond it land in none.
    #[test]
    fn slicing_partitions_events(
        timeline in arb_timeline(),
        sample_rate in prop::sample::select(vec![8000u32, 22050, 44100, 48000]),
        block_size in 1usize..2048,
        total in 0usize..200_000,
    ) {
        let events = timeline.build_event_buffer(sample_rate);
        let mut rebuilt: Vec<SampleEvent> = Vec::new();

        for window in block_windows(total, block_size) {
            for event in slice_for_window(&events, window.offset, window.len) {
                prop_assert!(event.offset < window.len);
                rebuilt.push(SampleEvent { offset: event.offset + window.offset, ..event });
            }
        }

        let expected: Vec<SampleEvent> =
            events.iter().copied().filter(|e| e.offset < total).collect();
        prop_assert_eq!(rebuilt.len(), expected.len());
        for event in &expected {
            prop_assert!(rebuilt.contains(event));
        }
    }

    /// Each note yields one note-on then one note-off; the off is strictly
    /// later whenever the note is at least one sample long.
    #[test]
    fn note_off_follows_note_on(
        timeline in arb_timeline(),
        sample_rate in prop::sample::select(vec![8000u32, 44100, 96000]),
    ) {
        let events = timeline.build_event_buffer(sample_rate);
        prop_assert_eq!(events.len(), timeline.len() * 2);

        for (pair, note) in events.chunks(2).zip(timeline.notes()) {
            prop_assert_eq!(pair[0].kind, EventKind::NoteOn);
            prop_assert_eq!(pair[1].kind, EventKind::NoteOff);
            prop_assert_eq!(pair[0].note, note.note);
            if note.duration * f64::from(sample_rate) >= 1.0 {
                prop_assert!(pair[1].offset > pair[0].offset);
            }
        }
    }
}
