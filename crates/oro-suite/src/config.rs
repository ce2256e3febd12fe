//! TOML suite files.

use oro_core::{
    DEFAULT_BLOCK_SIZE, DEFAULT_DURATION, DEFAULT_SAMPLE_RATE, DEFAULT_TOLERANCE, Isolation,
    NoteEvent, TestCase,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SuiteError;

/// A suite definition on disk.
///
/// # TOML Format
///
/// ```toml
/// [[cases]]
/// name = "basic_note"
/// description = "Test basic note playback"
/// duration = 2.0
///
/// [[cases.notes]]
/// note = 60
/// velocity = 0.8
/// start = 0.1
/// duration = 1.5
///
/// [[cases.params]]
/// name = "gain"
/// value = 0.7
///
/// [[cases]]
/// name = "chord_test"
/// duration = 3.0
/// isolation = "persist"
///
/// [[cases.notes]]
/// note = [60, 64, 67]
/// start = 0.1
/// duration = 2.5
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SuiteFile {
    /// Cases in registration order.
    #[serde(default)]
    pub cases: Vec<CaseConfig>,
}

impl SuiteFile {
    /// Load a suite from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SuiteError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SuiteError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a suite from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, SuiteError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the suite to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SuiteError> {
        let path = path.as_ref();
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| SuiteError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the suite to a TOML string.
    pub fn to_toml(&self) -> Result<String, SuiteError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build validated test cases, in file order.
    pub fn to_cases(&self) -> Result<Vec<TestCase>, SuiteError> {
        self.cases
            .iter()
            .map(|config| {
                let case = config.to_case();
                case.validate().map_err(|source| SuiteError::InvalidCase {
                    name: config.name.clone(),
                    source,
                })?;
                Ok(case)
            })
            .collect()
    }
}

impl FromIterator<CaseConfig> for SuiteFile {
    fn from_iter<I: IntoIterator<Item = CaseConfig>>(iter: I) -> Self {
        Self {
            cases: iter.into_iter().collect(),
        }
    }
}

/// One `[[cases]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseConfig {
    /// Unique case name; also the golden file stem.
    pub name: String,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Rendered length in seconds.
    #[serde(default = "default_duration")]
    pub duration: f64,

    /// Render sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Frames per processing block.
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// Maximum RMS error that still passes.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Whether the unit is re-prepared before this case.
    #[serde(default)]
    pub isolation: IsolationMode,

    /// Scheduled notes.
    #[serde(default)]
    pub notes: Vec<NoteConfig>,

    /// Parameter values, applied in the unit's order.
    #[serde(default)]
    pub params: Vec<ParamConfig>,
}

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_velocity() -> f32 {
    0.8
}

impl CaseConfig {
    /// A case with defaults and no notes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            duration: DEFAULT_DURATION,
            sample_rate: DEFAULT_SAMPLE_RATE,
            block_size: DEFAULT_BLOCK_SIZE,
            tolerance: DEFAULT_TOLERANCE,
            isolation: IsolationMode::default(),
            notes: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Build the in-memory case. Validation is left to the caller.
    pub fn to_case(&self) -> TestCase {
        let mut case = TestCase::new(&self.name, &self.description)
            .with_duration(self.duration)
            .with_sample_rate(self.sample_rate)
            .with_block_size(self.block_size)
            .with_tolerance(self.tolerance)
            .with_isolation(self.isolation.into());

        for note in &self.notes {
            match &note.note {
                Pitch::Single(n) => case.add_note(*n, note.velocity, note.start, note.duration),
                Pitch::Chord(ns) => case.add_chord(ns, note.velocity, note.start, note.duration),
            }
        }
        for param in &self.params {
            case.add_parameter(&param.name, param.value);
        }
        case
    }
}

impl From<&TestCase> for CaseConfig {
    fn from(case: &TestCase) -> Self {
        Self {
            name: case.name().to_string(),
            description: case.description().to_string(),
            duration: case.duration(),
            sample_rate: case.sample_rate(),
            block_size: case.block_size(),
            tolerance: case.tolerance(),
            isolation: case.isolation().into(),
            notes: case.timeline().notes().iter().map(NoteConfig::from).collect(),
            params: case
                .params()
                .iter()
                .map(|p| ParamConfig {
                    name: p.name.clone(),
                    value: p.value,
                })
                .collect(),
        }
    }
}

/// Serialized form of [`Isolation`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IsolationMode {
    /// Re-prepare the unit before the case.
    #[default]
    Prepare,
    /// Carry state over from the previous case.
    Persist,
}

impl From<IsolationMode> for Isolation {
    fn from(mode: IsolationMode) -> Self {
        match mode {
            IsolationMode::Prepare => Isolation::Prepare,
            IsolationMode::Persist => Isolation::Persist,
        }
    }
}

impl From<Isolation> for IsolationMode {
    fn from(isolation: Isolation) -> Self {
        match isolation {
            Isolation::Prepare => IsolationMode::Prepare,
            Isolation::Persist => IsolationMode::Persist,
        }
    }
}

/// A single note number or a chord sharing timing and velocity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Pitch {
    /// One MIDI note.
    Single(u8),
    /// Several MIDI notes at once.
    Chord(Vec<u8>),
}

/// One `[[cases.notes]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteConfig {
    /// MIDI note number(s).
    pub note: Pitch,
    /// Velocity in 0.0 to 1.0.
    #[serde(default = "default_velocity")]
    pub velocity: f32,
    /// Start time in seconds.
    #[serde(default)]
    pub start: f64,
    /// Length in seconds.
    pub duration: f64,
}

impl From<&NoteEvent> for NoteConfig {
    fn from(note: &NoteEvent) -> Self {
        Self {
            note: Pitch::Single(note.note),
            velocity: note.velocity,
            start: note.start,
            duration: note.duration,
        }
    }
}

/// One `[[cases.params]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParamConfig {
    /// Parameter name as exposed by the unit.
    pub name: String,
    /// Value to set.
    pub value: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use oro_core::ConfigError;

    const SUITE: &str = r#"
        [[cases]]
        name = "basic_note"
        description = "Test basic note playback"
        duration = 2.0

        [[cases.notes]]
        note = 60
        velocity = 0.8
        start = 0.1
        duration = 1.5

        [[cases.params]]
        name = "gain"
        value = 0.7

        [[cases]]
        name = "chord_test"
        duration = 3.0
        block_size = 256
        isolation = "persist"

        [[cases.notes]]
        note = [60, 64, 67]
        velocity = 0.7
        start = 0.1
        duration = 2.5
    "#;

    #[test]
    fn test_parse_suite() {
        let suite = SuiteFile::from_toml(SUITE).unwrap();
        assert_eq!(suite.cases.len(), 2);

        let basic = &suite.cases[0];
        assert_eq!(basic.name, "basic_note");
        assert_eq!(basic.sample_rate, 44100);
        assert_eq!(basic.block_size, 512);
        assert_eq!(basic.tolerance, 0.001);
        assert_eq!(basic.isolation, IsolationMode::Prepare);
        assert_eq!(basic.notes[0].note, Pitch::Single(60));
        assert_eq!(basic.params[0].name, "gain");

        let chord = &suite.cases[1];
        assert_eq!(chord.isolation, IsolationMode::Persist);
        assert_eq!(chord.notes[0].note, Pitch::Chord(vec![60, 64, 67]));
    }

    #[test]
    fn test_to_cases() {
        let cases = SuiteFile::from_toml(SUITE).unwrap().to_cases().unwrap();
        assert_eq!(cases[0].total_samples(), 88200);
        assert_eq!(cases[0].params().len(), 1);
        assert_eq!(cases[1].timeline().len(), 3);
        assert_eq!(cases[1].block_size(), 256);
        assert_eq!(cases[1].isolation(), Isolation::Persist);
    }

    #[test]
    fn test_defaults() {
        let suite = SuiteFile::from_toml(
            r#"
            [[cases]]
            name = "empty"

            [[cases.notes]]
            note = 69
            duration = 1.0
            "#,
        )
        .unwrap();
        let case = &suite.cases[0];
        assert_eq!(case.duration, 5.0);
        assert_eq!(case.notes[0].velocity, 0.8);
        assert_eq!(case.notes[0].start, 0.0);
    }

    #[test]
    fn test_invalid_case_is_reported_by_name() {
        let suite = SuiteFile::from_toml(
            r#"
            [[cases]]
            name = "broken"
            block_size = 0
            "#,
        )
        .unwrap();
        let err = suite.to_cases().unwrap_err();
        match err {
            SuiteError::InvalidCase { name, source } => {
                assert_eq!(name, "broken");
                assert_eq!(source, ConfigError::InvalidBlockSize(0));
            }
            other => panic!("expected InvalidCase, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_name_is_parse_error() {
        let err = SuiteFile::from_toml("[[cases]]\nduration = 1.0\n").unwrap_err();
        assert!(matches!(err, SuiteError::TomlParse(_)));
    }

    #[test]
    fn test_roundtrip_through_test_case() {
        let mut case = TestCase::new("seq", "three notes").with_duration(1.5);
        case.add_note(60, 0.5, 0.0, 0.25);
        case.add_note(62, 0.5, 0.25, 0.25);
        case.add_parameter("gain", 0.25);

        let suite: SuiteFile = std::iter::once(CaseConfig::from(&case)).collect();
        let text = suite.to_toml().unwrap();
        let parsed = SuiteFile::from_toml(&text).unwrap();
        assert_eq!(parsed, suite);
        assert_eq!(parsed.to_cases().unwrap()[0], case);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("suite.toml");
        let suite = SuiteFile::from_toml(SUITE).unwrap();
        suite.save(&path).unwrap();
        assert_eq!(SuiteFile::load(&path).unwrap(), suite);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SuiteFile::load("/nonexistent/suite.toml").unwrap_err();
        assert!(matches!(err, SuiteError::ReadFile { .. }));
    }
}
