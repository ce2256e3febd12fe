//! Options and suite assembly shared by all commands.

use anyhow::Context;
use clap::Args;
use oro_core::BindPolicy;
use oro_suite::{GoldenSuite, SuiteFile};
use std::path::PathBuf;

use crate::cases;

#[derive(Args)]
pub struct SuiteArgs {
    /// Directory holding the golden files
    #[arg(long, value_name = "DIR", default_value = "golden_files")]
    pub golden_dir: PathBuf,

    /// TOML suite definition (defaults to the built-in SimpleSynth cases)
    #[arg(long, value_name = "FILE")]
    pub suite: Option<PathBuf>,

    /// Ignore parameter bindings the unit does not expose
    #[arg(long)]
    pub lenient_params: bool,
}

impl SuiteArgs {
    /// Assemble the suite these options describe.
    pub fn build_suite(&self) -> anyhow::Result<GoldenSuite> {
        let cases = match &self.suite {
            Some(path) => SuiteFile::load(path)
                .and_then(|file| file.to_cases())
                .with_context(|| format!("loading suite {}", path.display()))?,
            None => cases::builtin(),
        };

        let mut suite = GoldenSuite::new();
        for mut case in cases {
            if self.lenient_params {
                case.set_bind_policy(BindPolicy::Lenient);
            }
            suite.add_case(case)?;
        }
        tracing::debug!(cases = suite.len(), "suite assembled");
        Ok(suite)
    }
}
