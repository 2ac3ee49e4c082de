use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use num_bigint::BigUint;
use regex::{Captures, Regex};
#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::key::{KeyField, VersionKey};

/// The regex from <https://peps.python.org/pep-0440/#appendix-b-parsing-version-strings-with-regular-expressions>.
///
/// Deliberately not anchored to the start and end of the string, so that third-party code can
/// embed it in larger patterns. It must be compiled with the `x` (verbose) and `i`
/// (case-insensitive) flags.
pub const VERSION_PATTERN: &str = r"
    v?                                                # <https://peps.python.org/pep-0440/#preceding-v-character>
    (?:
        (?:(?P<epoch>[0-9]+)!)?                       # epoch
        (?P<release>[0-9]+(?:\.[0-9]+)*)              # release segment
        (?P<pre_field>                                # pre-release
            [-_\.]?
            (?P<pre_name>a|b|c|rc|alpha|beta|pre|preview)
            [-_\.]?
            (?P<pre>[0-9]+)?
        )?
        (?P<post_field>                               # post release
            (?:-(?P<post_old>[0-9]+))
            |
            (?:
                [-_\.]?
                (?P<post_l>post|rev|r)
                [-_\.]?
                (?P<post_new>[0-9]+)?
            )
        )?
        (?P<dev_field>                                # dev release
            [-_\.]?
            (?P<dev_l>dev)
            [-_\.]?
            (?P<dev>[0-9]+)?
        )?
    )
    (?:\+(?P<local>[a-z0-9]+(?:[-_\.][a-z0-9]+)*))?   # local version
";

/// Matches a full version string, such as `1.19.a1`, with optional surrounding whitespace.
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?xi)^\s*{VERSION_PATTERN}\s*$")).unwrap());

/// Missing release components read as zero.
static ZERO: BigUint = BigUint::ZERO;

/// A version string that doesn't follow PEP 440.
///
/// [`crate::parse`] never surfaces this error, it routes the string to [`crate::LegacyVersion`]
/// instead. It is only returned by the strict [`Version::from_str`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    /// The string doesn't match the version grammar.
    #[error("Invalid version: `{version}`")]
    Invalid {
        /// The offending input.
        version: String,
    },
}

impl VersionParseError {
    /// Returns the string that failed to parse.
    pub fn version(&self) -> &str {
        match self {
            Self::Invalid { version } => version,
        }
    }
}

/// Optional prerelease modifier (alpha, beta or release candidate) appended to version
///
/// <https://peps.python.org/pep-0440/#pre-releases>
///
/// The variant order is the comparison order: `a < b < rc`.
#[derive(PartialEq, Eq, Debug, Hash, Clone, Copy, Ord, PartialOrd)]
pub enum PrereleaseKind {
    /// alpha prerelease
    Alpha,
    /// beta prerelease
    Beta,
    /// release candidate prerelease
    Rc,
}

impl FromStr for PrereleaseKind {
    type Err = String;

    fn from_str(prerelease: &str) -> Result<Self, Self::Err> {
        match prerelease.to_lowercase().as_str() {
            "a" | "alpha" => Ok(Self::Alpha),
            "b" | "beta" => Ok(Self::Beta),
            "c" | "rc" | "pre" | "preview" => Ok(Self::Rc),
            _ => Err(format!(
                "'{prerelease}' isn't recognized as alpha, beta or release candidate",
            )),
        }
    }
}

impl Display for PrereleaseKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alpha => write!(f, "a"),
            Self::Beta => write!(f, "b"),
            Self::Rc => write!(f, "rc"),
        }
    }
}

/// A part of the [local version identifier](<https://peps.python.org/pep-0440/#local-version-identifiers>)
///
/// > Comparison and ordering of local versions considers each segment of the local version
/// > (divided by a .) separately. If a segment consists entirely of ASCII digits then that section
/// > should be considered an integer for comparison purposes and if a segment contains any ASCII
/// > letters then that segment is compared lexicographically with case insensitivity. When
/// > comparing a numeric and lexicographic segment, the numeric section always compares as greater
/// > than the lexicographic segment. Additionally a local version with a great number of segments
/// > will always compare as greater than a local version with fewer segments, as long as the
/// > shorter local version’s segments match the beginning of the longer local version’s segments
/// > exactly.
///
/// With the [`Ord`] below, the default `Ord` of `[LocalSegment]` matches these rules.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum LocalSegment {
    /// Not-parseable as integer segment of local version, lowercased
    String(String),
    /// Inferred integer segment of local version
    Number(BigUint),
}

impl Display for LocalSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(string) => write!(f, "{string}"),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl PartialOrd for LocalSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocalSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(n1), Self::Number(n2)) => n1.cmp(n2),
            (Self::String(s1), Self::String(s2)) => s1.cmp(s2),
            (Self::Number(_), Self::String(_)) => Ordering::Greater,
            (Self::String(_), Self::Number(_)) => Ordering::Less,
        }
    }
}

/// A version number that follows PEP 440, such as `1.2.3` or `4!5.6.7-a8.post9.dev0`.
///
/// The fields are only readable through accessors, a `Version` never changes after parsing.
/// Equality, ordering and hashing all go through [`VersionKey`], so `1.2` and `1.2.0` are the
/// same version even though they print differently.
///
/// ```rust
/// use std::str::FromStr;
/// use num_bigint::BigUint;
/// use pkgver::Version;
///
/// let version = Version::from_str("1.19").unwrap();
/// assert_eq!(version.release(), [BigUint::from(1u32), BigUint::from(19u32)]);
/// ```
#[derive(Debug, Clone)]
pub struct Version {
    /// The [versioning epoch](https://peps.python.org/pep-0440/#version-epochs).
    epoch: BigUint,
    /// The normal number part of the version, such a `1.2.3` in `4!1.2.3-a8.post9.dev1`.
    /// Never empty.
    release: Vec<BigUint>,
    /// The [prerelease](https://peps.python.org/pep-0440/#pre-releases) kind plus a number
    pre: Option<(PrereleaseKind, BigUint)>,
    /// The [post release](https://peps.python.org/pep-0440/#post-releases) number
    post: Option<BigUint>,
    /// The [developmental release](https://peps.python.org/pep-0440/#developmental-releases) number
    dev: Option<BigUint>,
    /// A [local version identifier](https://peps.python.org/pep-0440/#local-version-identifiers)
    /// such as `+deadbeef` in `1.2.3+deadbeef`
    local: Option<Vec<LocalSegment>>,
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(de::Error::custom)
    }
}

/// <https://github.com/serde-rs/serde/issues/1316#issue-332908452>
#[cfg(feature = "serde")]
impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Version {
    /// The epoch, `0` unless given explicitly as in `1!2.0`.
    pub fn epoch(&self) -> &BigUint {
        &self.epoch
    }

    /// The release numbers as written, e.g. `[1, 2, 0]` for `1.2.0`.
    pub fn release(&self) -> &[BigUint] {
        &self.release
    }

    /// The prerelease kind and number, e.g. `(Rc, 1)` for `1.0rc1`.
    pub fn pre(&self) -> Option<(PrereleaseKind, &BigUint)> {
        self.pre.as_ref().map(|(kind, number)| (*kind, number))
    }

    /// The post release number, e.g. `2` for `1.0.post2` or `1.0-2`.
    pub fn post(&self) -> Option<&BigUint> {
        self.post.as_ref()
    }

    /// The dev release number, e.g. `3` for `1.0.dev3`.
    pub fn dev(&self) -> Option<&BigUint> {
        self.dev.as_ref()
    }

    /// The parsed local segments, if any.
    pub fn local_segments(&self) -> Option<&[LocalSegment]> {
        self.local.as_deref()
    }

    /// The first item of release or 0 if unavailable.
    pub fn major(&self) -> &BigUint {
        self.release.first().unwrap_or(&ZERO)
    }

    /// The second item of release or 0 if unavailable.
    pub fn minor(&self) -> &BigUint {
        self.release.get(1).unwrap_or(&ZERO)
    }

    /// The third item of release or 0 if unavailable.
    pub fn micro(&self) -> &BigUint {
        self.release.get(2).unwrap_or(&ZERO)
    }

    /// Whether this is an alpha/beta/rc or dev version
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some() || self.dev.is_some()
    }

    /// Whether this is a post version
    pub fn is_postrelease(&self) -> bool {
        self.post.is_some()
    }

    /// Whether this is a dev version
    pub fn is_devrelease(&self) -> bool {
        self.dev.is_some()
    }

    /// Whether this is a local version (e.g. `1.2.3+localsuffixesareweird`)
    pub fn is_local(&self) -> bool {
        self.local.is_some()
    }

    /// The epoch and release segment only, e.g. `1!2.0` for `1!2.0rc1.post3+abc`.
    pub fn base_version(&self) -> String {
        let epoch = if self.epoch == BigUint::ZERO {
            String::new()
        } else {
            format!("{}!", self.epoch)
        };
        let release = self
            .release
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>()
            .join(".");
        format!("{epoch}{release}")
    }

    /// The normalized version without the local segment.
    pub fn public(&self) -> String {
        let pre = self
            .pre
            .as_ref()
            .map(|(pre_kind, pre_version)| format!("{pre_kind}{pre_version}"))
            .unwrap_or_default();
        let post = self
            .post
            .as_ref()
            .map(|post| format!(".post{post}"))
            .unwrap_or_default();
        let dev = self
            .dev
            .as_ref()
            .map(|dev| format!(".dev{dev}"))
            .unwrap_or_default();
        format!("{}{pre}{post}{dev}", self.base_version())
    }

    /// The normalized local segment without the leading `+`, e.g. `ubuntu.1` for `1.0+ubuntu-1`.
    pub fn local(&self) -> Option<String> {
        self.local.as_ref().map(|segments| {
            segments
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<String>>()
                .join(".")
        })
    }

    /// The key that equality, ordering and hashing are defined by.
    ///
    /// The order is
    /// `1.0.dev456 < 1.0a1 < 1.0a2.dev456 < 1.0a12.dev456 < 1.0a12 < 1.0b1.dev456 < 1.0b2
    /// < 1.0b2.post345.dev456 < 1.0b2.post345 < 1.0c1.dev456 < 1.0c1 < 1.0rc2 < 1.0
    /// < 1.0.post456.dev34 < 1.0.post456 < 1.0.post456+abc < 1.0.post456+1`
    pub fn key(&self) -> VersionKey<'_> {
        // A dev release without a pre or post segment, such as `1.0.dev1`, sorts before every
        // prerelease of the same release.
        let pre = match (&self.pre, &self.post, &self.dev) {
            (Some((kind, number)), _, _) => KeyField::Value((*kind, number)),
            (None, None, Some(_)) => KeyField::Min,
            (None, _, _) => KeyField::Max,
        };
        VersionKey {
            epoch: &self.epoch,
            release: trim_release(&self.release),
            pre,
            post: self.post.as_ref().map_or(KeyField::Min, KeyField::Value),
            dev: self.dev.as_ref().map_or(KeyField::Max, KeyField::Value),
            local: self
                .local
                .as_deref()
                .map_or(KeyField::Min, KeyField::Value),
        }
    }
}

/// Strip trailing zeros so that `1.2`, `1.2.0` and `1.2.0.0` share a key, keeping the leading
/// element so that `0.0` becomes `0` rather than empty.
fn trim_release(release: &[BigUint]) -> &[BigUint] {
    let len = release
        .iter()
        .rposition(|number| *number != BigUint::ZERO)
        .map_or(1, |last| last + 1);
    &release[..len.min(release.len())]
}

/// Shows normalized version
impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.public())?;
        if let Some(local) = self.local() {
            write!(f, "+{local}")?;
        }
        Ok(())
    }
}

impl PartialEq<Self> for Version {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd<Self> for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    /// Parses a version such as `1.19`, `1.0a1`,`1.0+abc.5` or `1!2012.2`
    fn from_str(version: &str) -> Result<Self, Self::Err> {
        let captures =
            VERSION_RE
                .captures(version)
                .ok_or_else(|| VersionParseError::Invalid {
                    version: version.to_string(),
                })?;
        Self::parse_impl(version, &captures)
    }
}

impl Version {
    fn parse_impl(version: &str, captures: &Captures) -> Result<Self, VersionParseError> {
        let invalid = || VersionParseError::Invalid {
            version: version.to_string(),
        };
        // The regex only lets ASCII digits through, of any length
        let number = |digits: &str| digits.parse::<BigUint>().map_err(|_| invalid());
        let number_field = |field_name: &str| {
            captures
                .name(field_name)
                .map(|field| number(field.as_str()))
                .transpose()
        };

        // "If no explicit epoch is given, the implicit epoch is 0"
        let epoch = number_field("epoch")?.unwrap_or_default();
        let pre = {
            let pre_kind = captures
                .name("pre_name")
                .map(|pre| PrereleaseKind::from_str(pre.as_str()))
                .transpose()
                // Already enforced by the regex
                .map_err(|_| invalid())?;
            // <https://peps.python.org/pep-0440/#implicit-pre-release-number>
            let pre_number = number_field("pre")?.unwrap_or_default();
            pre_kind.map(|pre_kind| (pre_kind, pre_number))
        };
        let post = if captures.name("post_field").is_some() {
            // `1.0-5` is the same as `1.0.post5`, and `1.0.post` is `1.0.post0`
            Some(
                number_field("post_new")?
                    .or(number_field("post_old")?)
                    .unwrap_or_default(),
            )
        } else {
            None
        };
        let dev = if captures.name("dev_field").is_some() {
            // <https://peps.python.org/pep-0440/#implicit-development-release-number>
            Some(number_field("dev")?.unwrap_or_default())
        } else {
            None
        };
        let local = captures
            .name("local")
            .map(|local| {
                local
                    .as_str()
                    .split(['-', '_', '.'])
                    .map(|segment| {
                        if segment.bytes().all(|byte| byte.is_ascii_digit()) {
                            number(segment).map(LocalSegment::Number)
                        } else {
                            // "and if a segment contains any ASCII letters then that segment is
                            // compared lexicographically with case insensitivity"
                            Ok(LocalSegment::String(segment.to_lowercase()))
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        let release = captures
            .name("release")
            // Already enforced by the regex
            .ok_or_else(invalid)?
            .as_str()
            .split('.')
            .map(number)
            .collect::<Result<Vec<BigUint>, _>>()?;

        Ok(Self {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }
}
