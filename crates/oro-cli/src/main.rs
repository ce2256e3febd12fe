//! oro CLI - golden-file regression tests for the bundled SimpleSynth.

mod cases;
mod commands;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oro")]
#[command(author, version, about = "Golden audio regression tests", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every case and write its golden file
    Generate(commands::generate::GenerateArgs),

    /// Render every case and compare it against its golden file
    Test(commands::test::TestArgs),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                e.exit();
            }
            // usage problems (including no subcommand) are failures
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Test(args) => commands::test::run(args),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}
