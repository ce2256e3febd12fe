//! Suite manager: ordered cases run against one shared unit.

use std::io::{self, Write};
use std::path::Path;

use oro_core::{AudioUnit, Isolation, RenderedAudio, TestCase, bind_all, render};
use oro_io::{Comparison, compare, golden_path, save};

use crate::error::{CaseError, SuiteError};
use crate::report::{CaseReport, RunMode, SuiteReport};

/// What happened to one case in the last run.
#[derive(Debug)]
pub enum CaseStatus {
    /// Golden file written.
    Generated,
    /// Rendered and compared against the golden file.
    Compared(Comparison),
    /// Could not be rendered or saved.
    Failed(CaseError),
}

/// Result of one case in the last `generate_all` / `run_all`.
#[derive(Debug)]
pub struct CaseOutcome {
    /// Case name.
    pub name: String,
    /// What happened.
    pub status: CaseStatus,
}

impl CaseOutcome {
    /// Whether this case counts as passed.
    pub fn passed(&self) -> bool {
        match &self.status {
            CaseStatus::Generated => true,
            CaseStatus::Compared(c) => c.passed(),
            CaseStatus::Failed(_) => false,
        }
    }
}

/// Ordered collection of test cases sharing one unit per run.
///
/// Cases run in registration order. Every case is attempted; a failure is
/// recorded in its [`CaseOutcome`] and the run continues.
///
/// # Example
///
/// ```rust,ignore
/// let mut suite = GoldenSuite::new();
/// suite.add_case(basic_note)?;
/// suite.add_case(chord_test)?;
///
/// let all_passed = suite.run_all(&mut synth, "golden_files");
/// suite.print_results();
/// ```
#[derive(Debug, Default)]
pub struct GoldenSuite {
    cases: Vec<TestCase>,
    outcomes: Vec<CaseOutcome>,
    mode: Option<RunMode>,
    prepared: Option<(u32, usize)>,
}

impl GoldenSuite {
    /// Create an empty suite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a case. Names must be unique since they name golden files.
    pub fn add_case(&mut self, case: TestCase) -> Result<(), SuiteError> {
        if self.cases.iter().any(|c| c.name() == case.name()) {
            return Err(SuiteError::DuplicateCase(case.name().to_string()));
        }
        self.cases.push(case);
        Ok(())
    }

    /// Registered cases in order.
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Mutable access to registered cases, e.g. to override policies.
    pub fn cases_mut(&mut self) -> &mut [TestCase] {
        &mut self.cases
    }

    /// Number of registered cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Whether no case is registered.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Outcomes of the most recent run.
    pub fn outcomes(&self) -> &[CaseOutcome] {
        &self.outcomes
    }

    /// Cases that passed in the most recent run.
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Cases that failed in the most recent run.
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.passed_count()
    }

    /// Render every case and save it to `dir/<name>.golden`, printing
    /// progress to stdout. Returns `true` if every case was generated.
    pub fn generate_all<U: AudioUnit + ?Sized>(
        &mut self,
        unit: &mut U,
        dir: impl AsRef<Path>,
    ) -> bool {
        self.generate_all_to(unit, dir, &mut io::stdout().lock())
    }

    /// [`generate_all`](Self::generate_all) with progress written to `out`.
    pub fn generate_all_to<U: AudioUnit + ?Sized>(
        &mut self,
        unit: &mut U,
        dir: impl AsRef<Path>,
        out: &mut impl Write,
    ) -> bool {
        let dir = dir.as_ref();
        self.begin(RunMode::Generate);
        if let Err(e) = std::fs::create_dir_all(dir) {
            tracing::warn!(dir = %dir.display(), error = %e, "cannot create golden directory");
        }

        for case in &self.cases {
            progress(out, format_args!("Generating golden audio for: {}", case.name()));
            let status = match render_case(unit, case, &mut self.prepared) {
                Ok(audio) => match save(&audio, golden_path(dir, case.name())) {
                    Ok(()) => CaseStatus::Generated,
                    Err(e) => CaseStatus::Failed(e.into()),
                },
                Err(e) => CaseStatus::Failed(e),
            };

            match &status {
                CaseStatus::Failed(e) => {
                    tracing::warn!(case = case.name(), error = %e, "generation failed");
                    progress(out, format_args!("✗ Failed: {} ({e})", case.name()));
                }
                _ => {
                    tracing::info!(case = case.name(), "golden file generated");
                    progress(out, format_args!("✓ Generated: {}", case.name()));
                }
            }
            self.outcomes.push(CaseOutcome {
                name: case.name().to_string(),
                status,
            });
        }

        self.failed_count() == 0
    }

    /// Render every case and compare it against `dir/<name>.golden`,
    /// printing a line per case. Returns `true` iff every case passed.
    pub fn run_all<U: AudioUnit + ?Sized>(
        &mut self,
        unit: &mut U,
        dir: impl AsRef<Path>,
    ) -> bool {
        self.run_all_to(unit, dir, &mut io::stdout().lock())
    }

    /// [`run_all`](Self::run_all) with progress written to `out`.
    pub fn run_all_to<U: AudioUnit + ?Sized>(
        &mut self,
        unit: &mut U,
        dir: impl AsRef<Path>,
        out: &mut impl Write,
    ) -> bool {
        let dir = dir.as_ref();
        self.begin(RunMode::Test);

        for case in &self.cases {
            let status = match render_case(unit, case, &mut self.prepared) {
                Ok(audio) => CaseStatus::Compared(compare(
                    &audio,
                    golden_path(dir, case.name()),
                    case.tolerance(),
                )),
                Err(e) => CaseStatus::Failed(e),
            };

            match &status {
                CaseStatus::Compared(c) if c.passed() => {
                    tracing::info!(case = case.name(), rms_error = ?c.rms_error(), "passed");
                    progress(out, format_args!("✓ Passed: {}", case.name()));
                }
                CaseStatus::Compared(c) => {
                    tracing::warn!(case = case.name(), reason = %c, "failed");
                    progress(out, format_args!("✗ Failed: {} ({c})", case.name()));
                }
                CaseStatus::Failed(e) => {
                    tracing::warn!(case = case.name(), error = %e, "failed");
                    progress(out, format_args!("✗ Failed: {} ({e})", case.name()));
                }
                CaseStatus::Generated => {}
            }
            self.outcomes.push(CaseOutcome {
                name: case.name().to_string(),
                status,
            });
        }

        self.failed_count() == 0
    }

    /// Print the pass/fail summary of the last run to stdout.
    pub fn print_results(&self) {
        // stdout closed under us; nothing useful left to do
        let _ = self.write_results(&mut io::stdout().lock());
    }

    /// Write the pass/fail summary of the last run.
    pub fn write_results(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "\n=== Test Results ===")?;
        writeln!(out, "Passed: {}", self.passed_count())?;
        writeln!(out, "Failed: {}", self.failed_count())?;
        writeln!(out, "Total: {}", self.outcomes.len())
    }

    /// Machine-readable summary of the last run.
    pub fn report(&self) -> SuiteReport {
        SuiteReport {
            mode: self.mode.unwrap_or(RunMode::Test),
            passed: self.passed_count(),
            failed: self.failed_count(),
            total: self.outcomes.len(),
            cases: self.outcomes.iter().map(CaseReport::from).collect(),
        }
    }

    /// Start a run. The unit passed in may be a different one, so its first
    /// case is always prepared.
    fn begin(&mut self, mode: RunMode) {
        self.outcomes.clear();
        self.mode = Some(mode);
        self.prepared = None;
    }
}

/// Prepare (per the case's isolation), bind and render one case.
fn render_case<U: AudioUnit + ?Sized>(
    unit: &mut U,
    case: &TestCase,
    prepared: &mut Option<(u32, usize)>,
) -> Result<RenderedAudio, CaseError> {
    case.validate()?;

    let config = (case.sample_rate(), case.block_size());
    let reuse = case.isolation() == Isolation::Persist && *prepared == Some(config);
    if !reuse {
        unit.prepare(case.sample_rate() as f32, case.block_size());
        *prepared = Some(config);
    }

    let applied = bind_all(unit, case.params(), case.bind_policy())?;
    tracing::debug!(
        case = case.name(),
        applied,
        reprepared = !reuse,
        "bound parameters"
    );

    Ok(render(unit, case)?)
}

fn progress(out: &mut impl Write, line: std::fmt::Arguments<'_>) {
    // progress output is best effort
    let _ = writeln!(out, "{line}");
}
