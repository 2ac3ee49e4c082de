use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{parse, LegacyVersion, Version};

/// Either a PEP 440 [`Version`] or a [`LegacyVersion`], as returned by [`parse`].
///
/// Versions of both kinds sort together: every legacy version sorts before every PEP 440
/// version, and versions of the same kind compare by their own key.
///
/// ```rust
/// use pkgver::parse;
///
/// let mut versions = vec![parse("1.0.post1"), parse("1.0"), parse("french toast"), parse("1.0a1")];
/// versions.sort();
/// let sorted: Vec<String> = versions.iter().map(ToString::to_string).collect();
/// assert_eq!(sorted, ["french toast", "1.0a1", "1.0", "1.0.post1"]);
/// ```
#[derive(Debug, Clone)]
pub enum AnyVersion {
    /// A version that follows PEP 440.
    Pep440(Version),
    /// A version that doesn't, ordered by the legacy scheme.
    Legacy(LegacyVersion),
}

impl AnyVersion {
    /// Returns `true` if the string didn't follow PEP 440.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }

    /// The PEP 440 version, if this is one.
    pub fn as_version(&self) -> Option<&Version> {
        match self {
            Self::Pep440(version) => Some(version),
            Self::Legacy(_) => None,
        }
    }

    /// The legacy version, if this is one.
    pub fn as_legacy(&self) -> Option<&LegacyVersion> {
        match self {
            Self::Pep440(_) => None,
            Self::Legacy(legacy) => Some(legacy),
        }
    }

    /// The normalized version without the local segment, or the original string for legacy
    /// versions.
    pub fn public(&self) -> String {
        match self {
            Self::Pep440(version) => version.public(),
            Self::Legacy(legacy) => legacy.public().to_string(),
        }
    }

    /// The epoch and release segment, or the original string for legacy versions.
    pub fn base_version(&self) -> String {
        match self {
            Self::Pep440(version) => version.base_version(),
            Self::Legacy(legacy) => legacy.base_version().to_string(),
        }
    }

    /// The normalized local segment, never present for legacy versions.
    pub fn local(&self) -> Option<String> {
        match self {
            Self::Pep440(version) => version.local(),
            Self::Legacy(_) => None,
        }
    }

    /// Whether this is an alpha/beta/rc or dev version, never for legacy versions.
    pub fn is_prerelease(&self) -> bool {
        match self {
            Self::Pep440(version) => version.is_prerelease(),
            Self::Legacy(legacy) => legacy.is_prerelease(),
        }
    }

    /// Whether this is a post version, never for legacy versions.
    pub fn is_postrelease(&self) -> bool {
        match self {
            Self::Pep440(version) => version.is_postrelease(),
            Self::Legacy(legacy) => legacy.is_postrelease(),
        }
    }

    /// Whether this is a dev version, never for legacy versions.
    pub fn is_devrelease(&self) -> bool {
        match self {
            Self::Pep440(version) => version.is_devrelease(),
            Self::Legacy(legacy) => legacy.is_devrelease(),
        }
    }
}

impl From<Version> for AnyVersion {
    fn from(version: Version) -> Self {
        Self::Pep440(version)
    }
}

impl From<LegacyVersion> for AnyVersion {
    fn from(legacy: LegacyVersion) -> Self {
        Self::Legacy(legacy)
    }
}

impl FromStr for AnyVersion {
    type Err = Infallible;

    fn from_str(version: &str) -> Result<Self, Self::Err> {
        Ok(parse(version))
    }
}

/// The normalized form for PEP 440 versions, the original string for legacy versions.
impl Display for AnyVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pep440(version) => write!(f, "{version}"),
            Self::Legacy(legacy) => write!(f, "{legacy}"),
        }
    }
}

impl PartialEq for AnyVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AnyVersion {}

impl Hash for AnyVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Pep440(version) => version.hash(state),
            Self::Legacy(legacy) => legacy.hash(state),
        }
    }
}

impl PartialOrd for AnyVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AnyVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Pep440(left), Self::Pep440(right)) => left.cmp(right),
            (Self::Legacy(left), Self::Legacy(right)) => left.cmp(right),
            (Self::Legacy(_), Self::Pep440(_)) => Ordering::Less,
            (Self::Pep440(_), Self::Legacy(_)) => Ordering::Greater,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for AnyVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(parse(&s))
    }
}

#[cfg(feature = "serde")]
impl Serialize for AnyVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use indoc::indoc;

    use crate::{parse, AnyVersion};

    /// A mix of both kinds, in no particular order.
    const MIXED: &[&str] = &[
        "1.0",
        "1.0.0",
        "1!1.0",
        "2.0",
        "1.0a1",
        "1.0.dev1",
        "1.0.post1",
        "1.0+abc",
        "1.0+1",
        "not-a-version-1.0-final",
        "french toast",
        "2004d",
        "1.0-final",
        "",
        "v1.0",
        "1.0-1",
    ];

    #[test]
    fn parse_routes_by_grammar() {
        assert!(!parse("1.0").is_legacy());
        assert!(!parse(" v1.0rc1+local.7 ").is_legacy());
        assert!(parse("not-a-version-1.0-final").is_legacy());
        assert!(parse("1.0+a+").is_legacy());
        assert!(parse("").is_legacy());
        assert!(!parse("1.99999999999999999999").is_legacy());
    }

    #[test]
    fn huge_numbers_stay_pep440() {
        let big = parse("1.99999999999999999999");
        assert!(big > parse("1.2"));
        assert!(big < parse("2.0"));
        assert!(parse("99999999999999999999999999!0") > parse("1!0"));
        assert!(parse("1.0.post99999999999999999999") > parse("1.0.post1"));
    }

    #[test]
    fn order_is_total() {
        let versions: Vec<AnyVersion> = MIXED.iter().map(|version| parse(version)).collect();
        for a in &versions {
            for b in &versions {
                // Exactly one of <, ==, > holds, and both directions agree
                let relations = [a < b, a == b, a > b];
                assert_eq!(relations.iter().filter(|holds| **holds).count(), 1, "{a} {b}");
                assert_eq!(a.cmp(b), b.cmp(a).reverse(), "{a} {b}");
                for c in &versions {
                    if a <= b && b <= c {
                        assert!(a <= c, "{a} {b} {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn sort_mixed() {
        let mut versions: Vec<AnyVersion> = MIXED.iter().map(|version| parse(version)).collect();
        versions.sort();
        let sorted = versions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(
            sorted + "\n",
            indoc! {"

                french toast
                not-a-version-1.0-final
                1.0-final
                2004d
                1.0.dev1
                1.0a1
                1.0
                1.0.0
                1.0
                1.0+abc
                1.0+1
                1.0.post1
                1.0.post1
                2.0
                1!1.0
            "}
        );
    }

    #[test]
    fn round_trip() {
        for version in MIXED {
            let parsed = parse(version);
            let reparsed = parse(&parsed.to_string());
            assert_eq!(parsed, reparsed, "{version}");
        }
    }

    #[test]
    fn equal_values_hash_equal() {
        let unique: HashSet<AnyVersion> = ["1.0", "1.0.0", "v1.0", "1.0.0.0", "1.0-final", "1.0-FINAL"]
            .iter()
            .map(|version| parse(version))
            .collect();
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn accessors_forward() {
        let version = parse("1.0+local.1");
        assert_eq!(version.public(), "1.0");
        assert_eq!(version.local().as_deref(), Some("local.1"));
        assert_eq!(parse("1.0").base_version(), "1.0");
        assert!(parse("1.0rc1").is_prerelease());
        assert!(parse("1.0.post1").is_postrelease());
        assert!(parse("1.0.dev1").is_devrelease());
        assert!(parse("1.0.dev1").as_version().is_some());

        let legacy = parse("1.0-beta-final");
        assert!(legacy.as_legacy().is_some());
        assert!(legacy.as_version().is_none());
        assert_eq!(legacy.public(), "1.0-beta-final");
        assert_eq!(legacy.base_version(), "1.0-beta-final");
        assert_eq!(legacy.local(), None);
        assert!(!legacy.is_prerelease());
        assert!(!legacy.is_postrelease());
        assert!(!legacy.is_devrelease());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_keeps_kind() {
        let versions: Vec<AnyVersion> =
            serde_json::from_str(r#"["1.0-RC1", "french toast"]"#).unwrap();
        assert!(!versions[0].is_legacy());
        assert!(versions[1].is_legacy());
        assert_eq!(
            serde_json::to_string(&versions).unwrap(),
            r#"["1.0rc1","french toast"]"#
        );
    }
}
