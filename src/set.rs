//! HashSet: a facade over [`HashMap`] storing `()` for every key.
//!
//! The set keeps a reference to its element [`Allocator`]: keys the set
//! disposes of (duplicates passed to `add`, keys removed by `remove`, and
//! every key still held on drop) go through the allocator's free hook.
//!
//! Set algebra clones keys into a new set that uses `self`'s allocator,
//! hasher and equality. Operands that may be absent are handled by the
//! functions in [`nullable`].

use crate::allocator::{Allocator, Global, Heap};
use crate::build::{self, Transfer};
use crate::cursor::{Cursor, CursorExt, Iter};
use crate::error::{Error, Result};
use crate::hash::{KeyEquality, KeyHasher, StdEquality, StdHasher};
use crate::map::{Entries, HashMap, Snapshot, DEFAULT_CAPACITY};
use core::fmt;

pub struct HashSet<'a, K, S = StdHasher, E = StdEquality, H: Heap = Global> {
    map: HashMap<'a, K, (), S, E, H>,
    alloc: &'a Allocator<K, H>,
}

impl<'a, K, H> HashSet<'a, K, StdHasher, StdEquality, H>
where
    K: core::hash::Hash + Eq,
    H: Heap,
{
    pub fn new(alloc: &'a Allocator<K, H>) -> Result<Self> {
        Self::create(alloc, StdHasher::new(), StdEquality, DEFAULT_CAPACITY)
    }
}

impl<'a, K, S, E, H: Heap> HashSet<'a, K, S, E, H> {
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.map.load_factor()
    }

    pub fn allocator(&self) -> &'a Allocator<K, H> {
        self.alloc
    }

    pub fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(&K),
    {
        self.map.for_each(|k, _| action(k));
    }

    pub fn cursor(&self) -> Keys<'_, K> {
        Keys {
            entries: self.map.cursor(),
        }
    }

    pub fn iter(&self) -> Iter<Keys<'_, K>> {
        self.cursor().into_iter()
    }

    /// Snapshot of references to every key.
    pub fn to_vec(&self) -> Result<Snapshot<'_, K, H>> {
        self.map.keys()
    }

    /// Remove every key, releasing each through the allocator.
    pub fn clear(&mut self) {
        let alloc = self.alloc;
        self.map.clear_with(|k, ()| alloc.release(k));
    }
}

impl<'a, K, S, E, H> HashSet<'a, K, S, E, H>
where
    S: KeyHasher<K>,
    E: KeyEquality<K>,
    H: Heap,
{
    /// Create a set whose buckets live on `alloc`'s heap.
    pub fn create(
        alloc: &'a Allocator<K, H>,
        hasher: S,
        equality: E,
        initial_capacity: usize,
    ) -> Result<Self> {
        Ok(Self {
            map: HashMap::create(alloc.heap(), hasher, equality, initial_capacity)?,
            alloc,
        })
    }

    /// Drain `cursor` into a new set.
    ///
    /// With [`Transfer::Copy`] each key is produced by the allocator's copy
    /// hook; a missing hook fails before the cursor is touched. No partial
    /// set escapes a failure.
    pub fn from_cursor<C>(
        alloc: &'a Allocator<K, H>,
        hasher: S,
        equality: E,
        cursor: &mut C,
        transfer: Transfer,
    ) -> Result<Self>
    where
        C: Cursor<Item = K> + ?Sized,
    {
        transfer.check(alloc)?;
        let mut set = Self::create(alloc, hasher, equality, DEFAULT_CAPACITY)?;
        build::drain(cursor, alloc, transfer, |key| set.add(key))?;
        Ok(set)
    }

    /// Insert `key`; a duplicate is released and the set is unchanged.
    pub fn add(&mut self, key: K) -> Result<()> {
        self.add_check(key).map(drop)
    }

    /// Insert `key`, reporting whether it was new.
    pub fn add_check(&mut self, key: K) -> Result<bool> {
        if self.map.contains_key(&key) {
            self.alloc.release(key);
            return Ok(false);
        }
        match self.map.try_put(key, ()) {
            Ok(_) => Ok(true),
            Err((err, key, ())) => {
                self.alloc.release(key);
                Err(err)
            }
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Remove `key` and release the stored key through the allocator.
    pub fn remove(&mut self, key: &K) -> Result<()> {
        let stored = self.remove_get(key)?;
        self.alloc.release(stored);
        Ok(())
    }

    /// Remove `key` and hand the stored key to the caller.
    pub fn remove_get(&mut self, key: &K) -> Result<K> {
        self.map.remove(key).map(|(k, ())| k)
    }

    /// Same-capacity set holding clones of every key.
    pub fn copy(&self) -> Result<Self>
    where
        K: Clone,
        S: Clone,
        E: Clone,
    {
        Ok(Self {
            map: self.map.copy()?,
            alloc: self.alloc,
        })
    }

    /// Same-capacity set whose keys come from the allocator's copy hook.
    pub fn copy_deep(&self) -> Result<Self>
    where
        S: Clone,
        E: Clone,
    {
        let copy = self
            .alloc
            .copy_fn()
            .ok_or(Error::InvalidArgument("allocator has no copy function"))?;
        Ok(Self {
            map: self.map.copy_deep(copy, |_| Some(()))?,
            alloc: self.alloc,
        })
    }

    fn empty_like(&self, capacity: usize) -> Result<Self>
    where
        S: Clone,
        E: Clone,
    {
        Self::create(
            self.alloc,
            self.map.hasher().clone(),
            self.map.equality().clone(),
            capacity.max(1),
        )
    }

    // Clone `key` in unless an equal key is already present.
    fn insert_clone(&mut self, key: &K) -> Result<()>
    where
        K: Clone,
    {
        if !self.map.contains_key(key) {
            self.map.put(key.clone(), ())?;
        }
        Ok(())
    }

    /// Every key in `self` or `other`.
    pub fn union<S2, E2>(&self, other: &HashSet<'_, K, S2, E2, H>) -> Result<Self>
    where
        K: Clone,
        S: Clone,
        E: Clone,
    {
        let mut out = self.empty_like(self.capacity().max(other.capacity()))?;
        let mut status = Ok(());
        let mut add = |k: &K| {
            if status.is_ok() {
                status = out.insert_clone(k);
            }
        };
        self.for_each(&mut add);
        other.for_each(&mut add);
        status.map(|()| out)
    }

    /// Keys of `self` also found in `other`. Walks the smaller operand.
    pub fn intersection<S2, E2>(&self, other: &HashSet<'_, K, S2, E2, H>) -> Result<Self>
    where
        K: Clone,
        S: Clone,
        E: Clone,
        S2: KeyHasher<K>,
        E2: KeyEquality<K>,
    {
        let mut out = self.empty_like(self.capacity().min(other.capacity()))?;
        let mut status = Ok(());
        if self.len() <= other.len() {
            self.for_each(|k| {
                if status.is_ok() && other.contains(k) {
                    status = out.insert_clone(k);
                }
            });
        } else {
            other.for_each(|k| {
                if status.is_ok() && self.contains(k) {
                    status = out.insert_clone(k);
                }
            });
        }
        status.map(|()| out)
    }

    /// Keys of `self` not found in `other`.
    pub fn difference<S2, E2>(&self, other: &HashSet<'_, K, S2, E2, H>) -> Result<Self>
    where
        K: Clone,
        S: Clone,
        E: Clone,
        S2: KeyHasher<K>,
        E2: KeyEquality<K>,
    {
        let mut out = self.empty_like(self.capacity())?;
        let mut status = Ok(());
        self.for_each(|k| {
            if status.is_ok() && !other.contains(k) {
                status = out.insert_clone(k);
            }
        });
        status.map(|()| out)
    }

    /// Whether every key of `self` is in `other`.
    pub fn is_subset<S2, E2>(&self, other: &HashSet<'_, K, S2, E2, H>) -> bool
    where
        S2: KeyHasher<K>,
        E2: KeyEquality<K>,
    {
        let mut subset = true;
        self.for_each(|k| subset = subset && other.contains(k));
        subset
    }
}

impl<K, S, E, H: Heap> Drop for HashSet<'_, K, S, E, H> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a, 's, K, S, E, H: Heap> IntoIterator for &'s HashSet<'a, K, S, E, H> {
    type Item = &'s K;
    type IntoIter = Iter<Keys<'s, K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, S, E, H> PartialEq for HashSet<'_, K, S, E, H>
where
    S: KeyHasher<K>,
    E: KeyEquality<K>,
    H: Heap,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<K: fmt::Debug, S, E, H: Heap> fmt::Debug for HashSet<'_, K, S, E, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Forward-only cursor over a set's keys.
pub struct Keys<'m, K> {
    entries: Entries<'m, K, ()>,
}

impl<'m, K> Cursor for Keys<'m, K> {
    type Item = &'m K;

    fn has_next(&self) -> bool {
        self.entries.has_next()
    }

    fn next(&mut self) -> Result<&'m K> {
        self.entries.next().map(|(k, _)| k)
    }

    fn get(&self) -> Result<&'m K> {
        self.entries.get().map(|(k, _)| k)
    }

    fn reset(&mut self) {
        self.entries.reset()
    }
}

/// Set algebra over operands that may be absent.
///
/// - `union` / `intersection` with either operand absent yield `None`.
/// - `difference(Some(a), None)` yields a copy of `a`.
/// - `difference(None, _)` yields `None`.
/// - `is_subset` with either operand absent is `false`.
pub mod nullable {
    use super::HashSet;
    use crate::allocator::Heap;
    use crate::error::Result;
    use crate::hash::{KeyEquality, KeyHasher};

    pub fn union<'a, K, S, E, H>(
        a: Option<&HashSet<'a, K, S, E, H>>,
        b: Option<&HashSet<'_, K, S, E, H>>,
    ) -> Result<Option<HashSet<'a, K, S, E, H>>>
    where
        K: Clone,
        S: KeyHasher<K> + Clone,
        E: KeyEquality<K> + Clone,
        H: Heap,
    {
        match (a, b) {
            (Some(a), Some(b)) => a.union(b).map(Some),
            _ => Ok(None),
        }
    }

    pub fn intersection<'a, K, S, E, H>(
        a: Option<&HashSet<'a, K, S, E, H>>,
        b: Option<&HashSet<'_, K, S, E, H>>,
    ) -> Result<Option<HashSet<'a, K, S, E, H>>>
    where
        K: Clone,
        S: KeyHasher<K> + Clone,
        E: KeyEquality<K> + Clone,
        H: Heap,
    {
        match (a, b) {
            (Some(a), Some(b)) => a.intersection(b).map(Some),
            _ => Ok(None),
        }
    }

    pub fn difference<'a, K, S, E, H>(
        a: Option<&HashSet<'a, K, S, E, H>>,
        b: Option<&HashSet<'_, K, S, E, H>>,
    ) -> Result<Option<HashSet<'a, K, S, E, H>>>
    where
        K: Clone,
        S: KeyHasher<K> + Clone,
        E: KeyEquality<K> + Clone,
        H: Heap,
    {
        match (a, b) {
            (Some(a), Some(b)) => a.difference(b).map(Some),
            (Some(a), None) => a.copy().map(Some),
            (None, _) => Ok(None),
        }
    }

    pub fn is_subset<K, S, E, H>(
        a: Option<&HashSet<'_, K, S, E, H>>,
        b: Option<&HashSet<'_, K, S, E, H>>,
    ) -> bool
    where
        S: KeyHasher<K>,
        E: KeyEquality<K>,
        H: Heap,
    {
        match (a, b) {
            (Some(a), Some(b)) => a.is_subset(b),
            _ => false,
        }
    }
}
