use anstream::println;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use serde::Serialize;

use pkgver::AnyVersion;

use crate::StrictArgs;

#[derive(Clone, Copy, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
pub(crate) struct InspectArgs {
    /// The version to inspect
    version: String,
    #[arg(long, value_enum, default_value_t, env = "PKGVER_FORMAT")]
    format: OutputFormat,
    #[command(flatten)]
    strict: StrictArgs,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Kind {
    Pep440,
    Legacy,
}

#[derive(Serialize)]
struct Report {
    kind: Kind,
    version: String,
    public: String,
    base_version: String,
    local: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    epoch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    release: Option<Vec<String>>,
    is_prerelease: bool,
    is_postrelease: bool,
    is_devrelease: bool,
}

impl Report {
    fn new(version: &AnyVersion) -> Self {
        let pep440 = version.as_version();
        Self {
            kind: if version.is_legacy() {
                Kind::Legacy
            } else {
                Kind::Pep440
            },
            version: version.to_string(),
            public: version.public(),
            base_version: version.base_version(),
            local: version.local(),
            // Strings, since the numbers have no upper bound
            epoch: pep440.map(|version| version.epoch().to_string()),
            release: pep440.map(|version| {
                version
                    .release()
                    .iter()
                    .map(ToString::to_string)
                    .collect()
            }),
            is_prerelease: version.is_prerelease(),
            is_postrelease: version.is_postrelease(),
            is_devrelease: version.is_devrelease(),
        }
    }

    fn print_text(&self) {
        let kind = match self.kind {
            Kind::Pep440 => "PEP 440",
            Kind::Legacy => "legacy",
        };
        println!("{}: {} ({kind})", "version".bold(), self.version);
        println!("{}: {}", "public".bold(), self.public);
        println!("{}: {}", "base_version".bold(), self.base_version);
        println!(
            "{}: {}",
            "local".bold(),
            self.local.as_deref().unwrap_or("-")
        );
        if let Some(epoch) = &self.epoch {
            println!("{}: {epoch}", "epoch".bold());
        }
        if let Some(release) = &self.release {
            let release = release.join(".");
            println!("{}: {release}", "release".bold());
        }
        println!("{}: {}", "is_prerelease".bold(), self.is_prerelease);
        println!("{}: {}", "is_postrelease".bold(), self.is_postrelease);
        println!("{}: {}", "is_devrelease".bold(), self.is_devrelease);
    }
}

pub(crate) fn inspect(args: &InspectArgs) -> Result<()> {
    let version = args
        .strict
        .parse(&args.version)
        .with_context(|| format!("Failed to inspect `{}`", args.version))?;
    let report = Report::new(&version);
    match args.format {
        OutputFormat::Text => report.print_text(),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
