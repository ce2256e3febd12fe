//! Built-in cases for SimpleSynth.

use oro_core::TestCase;

/// Single C4 with the default gain.
pub fn basic_note() -> TestCase {
    let mut case = TestCase::new("basic_note", "Test basic note playback")
        .with_duration(2.0)
        .with_sample_rate(44100)
        .with_block_size(512);
    // C4, starts at 0.1s, duration 1.5s
    case.add_note(60, 0.8, 0.1, 1.5);
    case.add_parameter("gain", 0.7);
    case
}

/// C major triad at half gain.
pub fn chord_test() -> TestCase {
    let mut case = TestCase::new("chord_test", "Test chord playback").with_duration(2.0);
    case.add_chord(&[60, 64, 67], 0.6, 0.5, 1.0);
    case.add_parameter("gain", 0.5);
    case
}

/// Cases used when no suite file is given.
pub fn builtin() -> Vec<TestCase> {
    vec![basic_note(), chord_test()]
}
