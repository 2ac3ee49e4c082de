//! Parse and order Python package versions: [PEP 440](https://peps.python.org/pep-0440) versions
//! plus a legacy fallback for everything else.
//!
//! ```rust
//! use pkgver::parse;
//!
//! assert!(parse("1.0.dev1") < parse("1.0a1"));
//! assert!(parse("1.0") == parse("1.0.0"));
//! assert!(parse("1!1.0") > parse("2.0"));
//! // Doesn't follow PEP 440, but still sorts, before every PEP 440 version
//! assert!(parse("not-a-version-1.0-final") < parse("0.0.dev0"));
//! ```
//!
//! [`parse`] never fails. Strings that match the PEP 440 grammar become a [`Version`], everything
//! else a [`LegacyVersion`] that is ordered by the setuptools scheme that predates PEP 440. Use
//! [`Version::from_str`](std::str::FromStr) to reject non-PEP 440 strings instead.
//!
//! Some orderings that are easy to get wrong:
//!
//! * The epoch, written as a prefix such as `1!1.2.3`, dominates everything else:
//!   `2.0 < 1!0.1`.
//! * A dev release of a final release sorts before all of its pre-releases, while a dev release of
//!   a pre-release sorts just below that pre-release: `1.0.dev1 < 1.0a1.dev1 < 1.0a1`.
//! * Post releases sort after the final release but before the next release.
//! * Local versions sort above the public version they extend. Their segments are compared one by
//!   one, with numbers above strings: `1.0 < 1.0+abc < 1.0+1`.
#![deny(missing_docs)]

#[cfg(feature = "tracing")]
use tracing::debug;

pub use {
    any_version::AnyVersion,
    key::{KeyField, VersionKey},
    legacy::{LegacyKey, LegacyVersion},
    version::{LocalSegment, PrereleaseKind, Version, VersionParseError, VERSION_PATTERN},
};

mod any_version;
mod key;
mod legacy;
mod version;

/// Parse a version string, falling back to a [`LegacyVersion`] if it doesn't follow PEP 440.
pub fn parse(version: &str) -> AnyVersion {
    match version.parse::<Version>() {
        Ok(version) => AnyVersion::Pep440(version),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            debug!("{_err}, using legacy ordering");
            AnyVersion::Legacy(LegacyVersion::new(version))
        }
    }
}
