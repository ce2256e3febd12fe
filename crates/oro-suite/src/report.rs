//! JSON run reports.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SuiteError;
use crate::suite::{CaseOutcome, CaseStatus};

/// Which operation produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Golden files were written.
    Generate,
    /// Renderings were compared against golden files.
    Test,
}

/// Summary of one suite run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Operation that was run.
    pub mode: RunMode,
    /// Cases that passed.
    pub passed: usize,
    /// Cases that failed.
    pub failed: usize,
    /// Cases attempted.
    pub total: usize,
    /// Per-case details in registration order.
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SuiteError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as JSON to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SuiteError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|e| SuiteError::write_file(path, e))
    }
}

/// One case in a [`SuiteReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Case name.
    pub name: String,
    /// Whether the case passed.
    pub passed: bool,
    /// Measured RMS error, when a comparison got that far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rms_error: Option<f64>,
    /// Human-readable result.
    pub detail: String,
}

impl From<&CaseOutcome> for CaseReport {
    fn from(outcome: &CaseOutcome) -> Self {
        let (rms_error, detail) = match &outcome.status {
            CaseStatus::Generated => (None, "generated".to_string()),
            CaseStatus::Compared(c) => (c.rms_error(), c.to_string()),
            CaseStatus::Failed(e) => (None, e.to_string()),
        };
        Self {
            name: outcome.name.clone(),
            passed: outcome.passed(),
            rms_error,
            detail,
        }
    }
}
