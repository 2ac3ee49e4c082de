use num_bigint::BigUint;

use crate::version::{LocalSegment, PrereleaseKind};

/// One component of a [`VersionKey`] that may be missing from the version.
///
/// A missing component sorts either before or after every present value, depending on the
/// component: a missing post release sorts first, a missing dev release sorts last. The derived
/// `Ord` compares the variant first and the value second, so `Min < Value(_) < Max` for any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyField<T> {
    /// Sorts before every value.
    Min,
    /// A component that is present in the version.
    Value(T),
    /// Sorts after every value.
    Max,
}

/// The comparison key of a [`crate::Version`], compared field by field from top to bottom.
///
/// Borrows from the version it was built from, see [`crate::Version::key`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionKey<'a> {
    /// The epoch as written.
    pub epoch: &'a BigUint,
    /// The release without trailing zeros, but never empty.
    ///
    /// Comparing two trimmed releases as slices gives the same result as padding the shorter one
    /// with zeros.
    pub release: &'a [BigUint],
    /// `Value` for `a`/`b`/`rc`, `Min` for a bare dev release such as `1.0.dev0` and `Max`
    /// otherwise, so that finals and post releases sort after their prereleases.
    pub pre: KeyField<(PrereleaseKind, &'a BigUint)>,
    /// `Min` if there is no post release.
    pub post: KeyField<&'a BigUint>,
    /// `Max` if there is no dev release.
    pub dev: KeyField<&'a BigUint>,
    /// `Min` if there is no local version.
    pub local: KeyField<&'a [LocalSegment]>,
}

#[cfg(test)]
mod tests {
    use super::KeyField;

    #[test]
    fn sentinels_bound_every_value() {
        for value in [0, 1, u64::MAX] {
            assert!(KeyField::Min < KeyField::Value(value));
            assert!(KeyField::Value(value) < KeyField::Max);
        }
        assert!(KeyField::<u64>::Min < KeyField::Max);
        assert!(KeyField::Value(1) < KeyField::Value(2));
    }

    #[test]
    fn tuple_values_compare_kind_first() {
        use crate::PrereleaseKind::{Alpha, Beta, Rc};

        assert!(KeyField::Value((Alpha, 10)) < KeyField::Value((Beta, 0)));
        assert!(KeyField::Value((Beta, 10)) < KeyField::Value((Rc, 0)));
        assert!(KeyField::Value((Rc, 2)) < KeyField::Value((Rc, 3)));
    }
}
