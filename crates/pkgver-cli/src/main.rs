use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use anstream::eprintln;
use anyhow::Result;
use clap::{Args, Parser};
use owo_colors::OwoColorize;
use tracing::debug;

use pkgver::{parse, AnyVersion, Version, VersionParseError};

use crate::compare::CompareArgs;
use crate::inspect::InspectArgs;
use crate::sort::SortArgs;

mod compare;
mod inspect;
mod logging;
mod sort;

#[derive(Parser)]
#[command(name = "pkgver", version, about = "Sort, compare and inspect Python package versions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Use verbose output, repeat for more (`-vv`). `RUST_LOG` takes precedence.
    #[arg(global = true, short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print versions in ascending order, one per line
    ///
    /// Reads newline-separated versions from stdin if none are given.
    Sort(SortArgs),
    /// Print `<`, `==` or `>` for two versions
    Compare(CompareArgs),
    /// Show how a version was parsed and normalized
    Inspect(InspectArgs),
}

/// How to treat strings that don't follow PEP 440.
#[derive(Args, Clone, Copy)]
pub(crate) struct StrictArgs {
    /// Reject versions that don't follow PEP 440 instead of ordering them with the legacy scheme
    #[arg(long, env = "PKGVER_STRICT")]
    strict: bool,
}

impl StrictArgs {
    /// Parse a version, only falling back to the legacy scheme if not strict.
    pub(crate) fn parse(self, version: &str) -> Result<AnyVersion, VersionParseError> {
        if self.strict {
            Version::from_str(version).map(AnyVersion::Pep440)
        } else {
            Ok(parse(version))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Sort(args) => sort::sort(&args),
        Command::Compare(args) => compare::compare(&args),
        Command::Inspect(args) => inspect::inspect(&args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::setup_logging(cli.verbose) {
        eprintln!("{}: {err}", "error".red().bold());
        return ExitCode::FAILURE;
    }

    let start = Instant::now();
    let result = run(cli);
    debug!("Took {}ms", start.elapsed().as_millis());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut causes = err.chain();
            if let Some(first) = causes.next() {
                eprintln!("{}: {first}", "error".red().bold());
            }
            for cause in causes {
                eprintln!("  {}: {cause}", "Caused by".red().bold());
            }
            // Invalid input is a usage error, like clap's own
            if err.downcast_ref::<VersionParseError>().is_some() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
