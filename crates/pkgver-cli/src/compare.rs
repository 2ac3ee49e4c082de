use std::cmp::Ordering;

use anstream::println;
use anyhow::{Context, Result};
use clap::Parser;

use crate::StrictArgs;

#[derive(Parser)]
pub(crate) struct CompareArgs {
    /// The left-hand version
    left: String,
    /// The right-hand version
    right: String,
    #[command(flatten)]
    strict: StrictArgs,
}

pub(crate) fn compare(args: &CompareArgs) -> Result<()> {
    let left = args
        .strict
        .parse(&args.left)
        .context("Failed to parse the left-hand version")?;
    let right = args
        .strict
        .parse(&args.right)
        .context("Failed to parse the right-hand version")?;
    let symbol = match left.cmp(&right) {
        Ordering::Less => "<",
        Ordering::Equal => "==",
        Ordering::Greater => ">",
    };
    println!("{symbol}");
    Ok(())
}
