//! Golden file generation command.

use clap::Args;
use oro_synth::SimpleSynth;

use super::common::SuiteArgs;

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    suite: SuiteArgs,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<bool> {
    let mut suite = args.suite.build_suite()?;
    let dir = &args.suite.golden_dir;

    println!("Generating golden audio files...\n");
    let mut synth = SimpleSynth::default();
    let ok = suite.generate_all(&mut synth, dir);

    if ok {
        println!("\n✓ Golden files generated in {}/", dir.display());
    } else {
        println!(
            "\n✗ {} of {} cases failed to generate",
            suite.failed_count(),
            suite.outcomes().len()
        );
    }
    Ok(ok)
}
