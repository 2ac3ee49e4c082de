use std::io::{self, BufRead};

use anstream::println;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use pkgver::AnyVersion;

use crate::StrictArgs;

#[derive(Parser)]
pub(crate) struct SortArgs {
    /// The versions to sort
    versions: Vec<String>,
    /// Print the newest version first
    #[arg(short, long)]
    reverse: bool,
    #[command(flatten)]
    strict: StrictArgs,
}

/// Print the inputs sorted by version, as written.
///
/// Equal versions, such as `1.0` and `1.0.0`, keep their input order when sorting ascending.
pub(crate) fn sort(args: &SortArgs) -> Result<()> {
    let inputs = if args.versions.is_empty() {
        debug!("Reading versions from stdin");
        io::stdin()
            .lock()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read versions from stdin")?
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    } else {
        args.versions.clone()
    };

    let mut versions = sort_versions(&inputs, args.strict)?;
    if args.reverse {
        versions.reverse();
    }
    for (input, _) in versions {
        println!("{input}");
    }
    Ok(())
}

/// Parse all inputs, then stable-sort them by version.
fn sort_versions(inputs: &[String], strict: StrictArgs) -> Result<Vec<(&str, AnyVersion)>> {
    let mut versions = inputs
        .iter()
        .map(|input| -> Result<(&str, AnyVersion)> {
            let version = strict.parse(input)?;
            if version.is_legacy() {
                debug!("`{input}` doesn't follow PEP 440, using legacy ordering");
            }
            Ok((input.as_str(), version))
        })
        .collect::<Result<Vec<_>>>()?;
    versions.sort_by(|(_, left), (_, right)| left.cmp(right));
    Ok(versions)
}
