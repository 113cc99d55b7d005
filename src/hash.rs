//! Pluggable hash and equality capabilities for map and set keys.
//!
//! Any `Fn(&K) -> u64` is a [`KeyHasher`] and any `Fn(&K, &K) -> bool` is a
//! [`KeyEquality`], so plain closures work at call sites. The default pair
//! routes through `core::hash::Hash` and `Eq`.

use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// `hash(key) -> u64`. Keys that compare equal must hash equally.
pub trait KeyHasher<K: ?Sized> {
    fn hash(&self, key: &K) -> u64;
}

/// `equals(a, b) -> bool`; must be an equivalence relation.
pub trait KeyEquality<K: ?Sized> {
    fn equals(&self, a: &K, b: &K) -> bool;
}

impl<K: ?Sized, F> KeyHasher<K> for F
where
    F: Fn(&K) -> u64,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self(key)
    }
}

impl<K: ?Sized, F> KeyEquality<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        self(a, b)
    }
}

/// Hashes keys through a `BuildHasher`.
#[derive(Clone, Debug, Default)]
pub struct StdHasher<S = DefaultHashBuilder> {
    build: S,
}

impl StdHasher {
    /// Hasher over hashbrown's default builder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: BuildHasher> StdHasher<S> {
    pub fn with_build_hasher(build: S) -> Self {
        Self { build }
    }
}

impl<K: ?Sized + Hash, S: BuildHasher> KeyHasher<K> for StdHasher<S> {
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self.build.hash_one(key)
    }
}

/// Compares keys with `Eq`.
#[derive(Copy, Clone, Debug, Default)]
pub struct StdEquality;

impl<K: ?Sized + Eq> KeyEquality<K> for StdEquality {
    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_capabilities() {
        let h = |k: &u32| u64::from(*k) * 31;
        let e = |a: &u32, b: &u32| a % 10 == b % 10;
        assert_eq!(KeyHasher::hash(&h, &2), 62);
        assert!(e.equals(&3, &13));
        assert!(!e.equals(&3, &4));
    }

    /// Invariant: equal keys hash equally under the default hasher.
    #[test]
    fn std_hasher_is_deterministic_per_instance() {
        let h: StdHasher = StdHasher::new();
        let a = "apple".to_string();
        assert_eq!(h.hash(&a), h.hash(&"apple".to_string()));
        assert!(StdEquality.equals(&a, &"apple".to_string()));
    }
}
