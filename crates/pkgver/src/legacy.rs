use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Version;

/// Numeric components are zero-padded to this width, so that comparing the padded strings gives
/// the numeric order for numbers up to eight digits.
const NUMBER_WIDTH: usize = 8;

/// A zero padded to [`NUMBER_WIDTH`]. Only this exact part is dropped as a trailing zero, a
/// longer run of zeros keeps its width and stays significant.
const PADDED_ZERO: &str = "00000000";

/// Appended to every key, sorts after alpha, beta, candidate and dev markers.
const FINAL: &str = "*final";

/// A version string that doesn't follow PEP 440, such as `2004d` or `1.0-final`.
///
/// Legacy versions are ordered with the setuptools scheme that predates PEP 440: the string is
/// split into numeric and alphabetic parts which are compared pairwise. A `LegacyVersion` always
/// sorts before every [`Version`].
///
/// ```rust
/// use pkgver::LegacyVersion;
///
/// assert!(LegacyVersion::new("1.0-beta") < LegacyVersion::new("1.0"));
/// assert!(LegacyVersion::new("2004d") < LegacyVersion::new("2004e"));
/// ```
#[derive(Debug, Clone)]
pub struct LegacyVersion {
    version: String,
    key: LegacyKey,
}

/// The comparison key of a [`LegacyVersion`].
///
/// The parts are plain strings: numbers are zero-padded and everything else is prefixed with
/// `*`, which sorts before any digit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LegacyKey {
    parts: Vec<String>,
}

impl LegacyKey {
    /// Tokenize a version string into its legacy comparison key.
    pub fn new(version: &str) -> Self {
        let mut parts: Vec<String> = Vec::new();
        for part in legacy_parts(&version.to_lowercase()) {
            if part.starts_with('*') {
                // Drop the `-` before a prerelease tag, `1.0-a` is `1.0a`
                if part.as_str() < FINAL {
                    while parts.last().is_some_and(|last| last == "*final-") {
                        parts.pop();
                    }
                }
                // Drop the trailing zeros of a run of numbers, `1.0.0-a` is `1-a`
                while parts.last().is_some_and(|last| last == PADDED_ZERO) {
                    parts.pop();
                }
            }
            parts.push(part);
        }
        Self { parts }
    }

    /// The encoded parts, e.g. `["00000001", "*a", "00000002", "*final"]` for `1.0a2`.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

/// Runs of decimal digits (any script), runs of ASCII letters, and single `.` or `-`.
///
/// Digits outside ASCII still split the string, but they are not padded as numbers since only a
/// leading ASCII digit marks a numeric part.
static COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+|[a-z]+|\.|-").unwrap());

/// Split a lowercased version into the matches of [`COMPONENT_RE`] and the runs of anything else
/// between them.
fn components(version: &str) -> Vec<&str> {
    let mut components = Vec::new();
    let mut last = 0;
    for component in COMPONENT_RE.find_iter(version) {
        if component.start() > last {
            components.push(&version[last..component.start()]);
        }
        components.push(component.as_str());
        last = component.end();
    }
    if last < version.len() {
        components.push(&version[last..]);
    }
    components
}

/// Normalize and encode the components of a lowercased version, terminated by [`FINAL`].
fn legacy_parts(version: &str) -> impl Iterator<Item = String> + '_ {
    components(version)
        .into_iter()
        .map(|component| match component {
            "pre" | "preview" | "rc" => "c",
            "-" => "final-",
            "dev" => "@",
            other => other,
        })
        .filter(|component| !component.is_empty() && *component != ".")
        .map(|component| {
            if component.starts_with(|c: char| c.is_ascii_digit()) {
                format!("{component:0>NUMBER_WIDTH$}")
            } else {
                format!("*{component}")
            }
        })
        .chain(std::iter::once(FINAL.to_string()))
}

impl LegacyVersion {
    /// Wrap any string as a legacy version. This never fails.
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            key: LegacyKey::new(version),
        }
    }

    /// The original string.
    pub fn as_str(&self) -> &str {
        &self.version
    }

    /// The original string, legacy versions have no local segment.
    pub fn public(&self) -> &str {
        &self.version
    }

    /// The original string, legacy versions have no release segment to extract.
    pub fn base_version(&self) -> &str {
        &self.version
    }

    /// Always `None`.
    #[allow(clippy::unused_self)]
    pub fn local(&self) -> Option<&str> {
        None
    }

    /// Always `false`, even for strings like `1.0-beta`.
    #[allow(clippy::unused_self)]
    pub fn is_prerelease(&self) -> bool {
        false
    }

    /// Always `false`.
    #[allow(clippy::unused_self)]
    pub fn is_postrelease(&self) -> bool {
        false
    }

    /// Always `false`.
    #[allow(clippy::unused_self)]
    pub fn is_devrelease(&self) -> bool {
        false
    }

    /// The key that equality, ordering and hashing are defined by.
    pub fn key(&self) -> &LegacyKey {
        &self.key
    }
}

impl FromStr for LegacyVersion {
    type Err = std::convert::Infallible;

    fn from_str(version: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(version))
    }
}

impl Display for LegacyVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.version)
    }
}

impl PartialEq for LegacyVersion {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for LegacyVersion {}

impl Hash for LegacyVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for LegacyVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LegacyVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

// A legacy version behaves as if it had an epoch of -1: below every PEP 440 version, never equal
// to one.

impl PartialEq<Version> for LegacyVersion {
    fn eq(&self, _other: &Version) -> bool {
        false
    }
}

impl PartialEq<LegacyVersion> for Version {
    fn eq(&self, _other: &LegacyVersion) -> bool {
        false
    }
}

impl PartialOrd<Version> for LegacyVersion {
    fn partial_cmp(&self, _other: &Version) -> Option<Ordering> {
        Some(Ordering::Less)
    }
}

impl PartialOrd<LegacyVersion> for Version {
    fn partial_cmp(&self, _other: &LegacyVersion) -> Option<Ordering> {
        Some(Ordering::Greater)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for LegacyVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

#[cfg(feature = "serde")]
impl Serialize for LegacyVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.version)
    }
}
