//! Suite management for oro golden-file regression tests.
//!
//! - [`GoldenSuite`]: ordered cases, `generate_all` / `run_all` against one unit
//! - [`SuiteFile`]: TOML suite definitions
//! - [`SuiteReport`]: JSON summary of a run
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use oro_suite::{GoldenSuite, SuiteFile};
//!
//! let mut suite = GoldenSuite::new();
//! for case in SuiteFile::load("suite.toml")?.to_cases()? {
//!     suite.add_case(case)?;
//! }
//!
//! suite.generate_all(&mut unit, "golden_files");
//! let ok = suite.run_all(&mut unit, "golden_files");
//! suite.print_results();
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod suite;

pub use config::{CaseConfig, IsolationMode, NoteConfig, ParamConfig, Pitch, SuiteFile};
pub use error::{CaseError, SuiteError};
pub use report::{CaseReport, RunMode, SuiteReport};
pub use suite::{CaseOutcome, CaseStatus, GoldenSuite};
