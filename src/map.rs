//! HashMap: separately chained hash table over an entry arena.
//!
//! Layout
//! - Entries live in a `SlotMap` arena and never move once inserted.
//! - Each bucket holds the index of its chain head (the owning link) and
//!   of its chain tail (a non-owning link used for O(1) append). Chains
//!   are singly linked through `Entry::next`.
//! - Every entry caches the hash computed at insertion; the bucket index
//!   is `hash % capacity`. User hash and equality callbacks therefore only
//!   run inside `put`, `get`, `remove` and their siblings, never during a
//!   resize or copy.
//!
//! Growth
//! - After an insertion pushes `len / capacity` above
//!   [`LOAD_FACTOR_THRESHOLD`], the table tries to double. A refused
//!   resize is logged and the map stays correct at its old capacity; it
//!   is never reported as a `put` failure.
//! - Resizing allocates the new bucket array first and then relinks every
//!   entry by index, so a failure leaves the map untouched.
//!
//! Accounting
//! - Every bucket array and every entry is admitted through the map's
//!   [`Heap`] and released back to it, including on drop.
//!
//! Iteration order
//! - Unordered. Cursors walk buckets, then chains; the order changes when
//!   the table resizes and is not part of the contract.

use crate::allocator::{Global, Heap};
use crate::cursor::{Cursor, CursorExt, Iter};
use crate::error::{Error, Result};
use crate::guard::CallbackGuard;
use crate::hash::{KeyEquality, KeyHasher, StdEquality, StdHasher};
use crate::pair::Pair;
use core::alloc::Layout;
use core::fmt;
use core::ops::Deref;
use slotmap::SlotMap;

/// Bucket count used by [`HashMap::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// `len / capacity` above which an insertion triggers growth.
pub const LOAD_FACTOR_THRESHOLD: f64 = 0.75;

/// Capacity multiplier applied on growth.
pub const GROWTH_FACTOR: usize = 2;

slotmap::new_key_type! {
    struct EntryKey;
}

struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
    next: Option<EntryKey>,
}

#[derive(Copy, Clone, Debug, Default)]
struct Bucket {
    head: Option<EntryKey>,
    tail: Option<EntryKey>,
}

impl Bucket {
    const EMPTY: Bucket = Bucket {
        head: None,
        tail: None,
    };
}

fn bucket_layout(capacity: usize) -> Result<Layout> {
    Layout::array::<Bucket>(capacity).map_err(|_| Error::allocation(usize::MAX))
}

fn alloc_buckets<H: Heap + ?Sized>(heap: &H, capacity: usize) -> Result<Vec<Bucket>> {
    let layout = bucket_layout(capacity)?;
    heap.alloc(layout)?;
    let mut buckets = Vec::new();
    if buckets.try_reserve_exact(capacity).is_err() {
        heap.dealloc(layout);
        return Err(Error::allocation(layout.size()));
    }
    buckets.resize(capacity, Bucket::EMPTY);
    Ok(buckets)
}

fn release_buckets<H: Heap + ?Sized>(heap: &H, capacity: usize) {
    if let Ok(layout) = bucket_layout(capacity) {
        heap.dealloc(layout);
    }
}

#[inline]
fn slot(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

// Link `key` at the tail of bucket `idx`.
fn append<K, V>(
    buckets: &mut [Bucket],
    entries: &mut SlotMap<EntryKey, Entry<K, V>>,
    idx: usize,
    key: EntryKey,
) {
    let bucket = &mut buckets[idx];
    match bucket.tail {
        Some(tail) => entries[tail].next = Some(key),
        None => bucket.head = Some(key),
    }
    bucket.tail = Some(key);
}

/// Separately chained hash map with pluggable hashing and equality.
///
/// The heap is borrowed for the map's lifetime. Keys must not be mutated
/// in a way that changes their hash or equality while stored.
pub struct HashMap<'a, K, V, S = StdHasher, E = StdEquality, H: Heap = Global> {
    buckets: Vec<Bucket>,
    entries: SlotMap<EntryKey, Entry<K, V>>,
    hasher: S,
    equality: E,
    heap: &'a H,
    guard: CallbackGuard,
}

impl<'a, K, V, H> HashMap<'a, K, V, StdHasher, StdEquality, H>
where
    K: core::hash::Hash + Eq,
    H: Heap,
{
    /// Map with [`DEFAULT_CAPACITY`] buckets and `Hash`/`Eq` key handling.
    pub fn new(heap: &'a H) -> Result<Self> {
        Self::with_capacity(heap, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(heap: &'a H, capacity: usize) -> Result<Self> {
        Self::create(heap, StdHasher::new(), StdEquality, capacity)
    }
}

impl<'a, K, V, S, E, H: Heap> HashMap<'a, K, V, S, E, H> {
    fn entry_layout() -> Layout {
        Layout::new::<Entry<K, V>>()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Alias of [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    pub fn heap(&self) -> &'a H {
        self.heap
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn equality(&self) -> &E {
        &self.equality
    }

    /// Remove every entry, keeping the bucket array.
    pub fn clear(&mut self) {
        self.clear_with(|_, _| {});
    }

    /// Remove every entry, handing each key and value to `release`.
    pub fn clear_with<F>(&mut self, mut release: F)
    where
        F: FnMut(K, V),
    {
        for bucket in &mut self.buckets {
            *bucket = Bucket::EMPTY;
        }
        for (_, entry) in self.entries.drain() {
            self.heap.dealloc(Self::entry_layout());
            release(entry.key, entry.value);
        }
    }

    /// Visit every entry once, in unspecified order.
    pub fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(&K, &V),
    {
        for bucket in &self.buckets {
            let mut cur = bucket.head;
            while let Some(k) = cur {
                let entry = &self.entries[k];
                action(&entry.key, &entry.value);
                cur = entry.next;
            }
        }
    }

    /// Visit every entry once with mutable access to its value.
    pub fn for_each_mut<F>(&mut self, mut action: F)
    where
        F: FnMut(&K, &mut V),
    {
        for bucket in &self.buckets {
            let mut cur = bucket.head;
            while let Some(k) = cur {
                let entry = &mut self.entries[k];
                action(&entry.key, &mut entry.value);
                cur = entry.next;
            }
        }
    }

    /// Snapshot of references to every key (`get_keys`).
    pub fn keys(&self) -> Result<Snapshot<'_, K, H>> {
        let mut out = Snapshot::with_capacity(self.heap, self.len())?;
        for (k, _) in self.iter() {
            out.push(k);
        }
        Ok(out)
    }

    /// Snapshot of references to every value (`get_values`).
    pub fn values(&self) -> Result<Snapshot<'_, V, H>> {
        let mut out = Snapshot::with_capacity(self.heap, self.len())?;
        for (_, v) in self.iter() {
            out.push(v);
        }
        Ok(out)
    }

    /// Forward-only cursor over `(key, value)` references.
    pub fn cursor(&self) -> Entries<'_, K, V> {
        Entries::new(&self.buckets, &self.entries)
    }

    pub fn iter(&self) -> Iter<Entries<'_, K, V>> {
        self.cursor().into_iter()
    }

    /// Cursor of [`Pair`] views over every entry.
    pub fn pairs(&self) -> impl Cursor<Item = Pair<&K, &V>> + '_ {
        self.cursor().transform(|(k, v)| Pair::new(k, v))
    }
}

impl<'a, K, V, S, E, H> HashMap<'a, K, V, S, E, H>
where
    S: KeyHasher<K>,
    E: KeyEquality<K>,
    H: Heap,
{
    /// Create a map with `initial_capacity` buckets.
    pub fn create(heap: &'a H, hasher: S, equality: E, initial_capacity: usize) -> Result<Self> {
        if initial_capacity == 0 {
            return Err(Error::InvalidArgument("initial capacity must be non-zero"));
        }
        let buckets = alloc_buckets(heap, initial_capacity)?;
        log::trace!("created hash map with {} buckets", initial_capacity);
        Ok(Self {
            buckets,
            entries: SlotMap::with_key(),
            hasher,
            equality,
            heap,
            guard: CallbackGuard::new(),
        })
    }

    /// Drain `cursor` into a new map; later duplicates replace earlier values.
    ///
    /// Elements are moved. Any failure releases the partial map.
    pub fn from_cursor<C>(
        heap: &'a H,
        hasher: S,
        equality: E,
        initial_capacity: usize,
        mut cursor: C,
    ) -> Result<Self>
    where
        C: Cursor,
        C::Item: Into<(K, V)>,
    {
        let mut map = Self::create(heap, hasher, equality, initial_capacity)?;
        while cursor.has_next() {
            let (key, value) = cursor.next()?.into();
            map.put(key, value)?;
        }
        Ok(map)
    }

    fn locate(&self, key: &K, hash: u64) -> Option<EntryKey> {
        let mut cur = self.buckets[slot(hash, self.capacity())].head;
        while let Some(k) = cur {
            let entry = &self.entries[k];
            if entry.hash == hash && self.equality.equals(&entry.key, key) {
                return Some(k);
            }
            cur = entry.next;
        }
        None
    }

    /// Insert or replace. Returns the replaced value, if any.
    ///
    /// On replacement the stored key is kept and `key` is dropped. The
    /// only failure is a refused entry allocation, which leaves the map
    /// exactly as it was.
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        self.try_put(key, value).map_err(|(err, _, _)| err)
    }

    /// Like [`put`](Self::put), but a refused entry hands the key and value
    /// back with the error.
    pub fn try_put(
        &mut self,
        key: K,
        value: V,
    ) -> core::result::Result<Option<V>, (Error, K, V)> {
        {
            let _g = self.guard.enter("put");
            let hash = self.hasher.hash(&key);
            if let Some(k) = self.locate(&key, hash) {
                let old = core::mem::replace(&mut self.entries[k].value, value);
                return Ok(Some(old));
            }
            if let Err(err) = self.heap.alloc(Self::entry_layout()) {
                return Err((err, key, value));
            }
            let idx = slot(hash, self.buckets.len());
            let k = self.entries.insert(Entry {
                key,
                value,
                hash,
                next: None,
            });
            append(&mut self.buckets, &mut self.entries, idx, k);
        }

        if self.load_factor() > LOAD_FACTOR_THRESHOLD {
            let target = self.capacity().saturating_mul(GROWTH_FACTOR);
            if let Err(err) = self.relink(target) {
                log::warn!(
                    "hash map resize {} -> {} skipped: {}",
                    self.capacity(),
                    target,
                    err
                );
            }
        }
        Ok(None)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let _g = self.guard.enter("get");
        let k = self.locate(key, self.hasher.hash(key))?;
        Some(&self.entries[k].value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let _g = self.guard.enter("get_mut");
        let k = self.locate(key, self.hasher.hash(key))?;
        Some(&mut self.entries[k].value)
    }

    /// Stored key equal to `key`, with its value.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let _g = self.guard.enter("get_key_value");
        let k = self.locate(key, self.hasher.hash(key))?;
        let entry = &self.entries[k];
        Some((&entry.key, &entry.value))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        let _g = self.guard.enter("contains_key");
        self.locate(key, self.hasher.hash(key)).is_some()
    }

    /// Unlink the entry for `key` and hand its key and value to the caller.
    pub fn remove(&mut self, key: &K) -> Result<(K, V)> {
        let _g = self.guard.enter("remove");
        let hash = self.hasher.hash(key);
        let idx = slot(hash, self.buckets.len());
        let mut prev: Option<EntryKey> = None;
        let mut cur = self.buckets[idx].head;
        while let Some(k) = cur {
            let entry = &self.entries[k];
            if entry.hash == hash && self.equality.equals(&entry.key, key) {
                let next = entry.next;
                match prev {
                    Some(p) => self.entries[p].next = next,
                    None => self.buckets[idx].head = next,
                }
                if self.buckets[idx].tail == Some(k) {
                    self.buckets[idx].tail = prev;
                }
                let removed = self.entries.remove(k).ok_or(Error::KeyNotFound)?;
                self.heap.dealloc(Self::entry_layout());
                return Ok((removed.key, removed.value));
            }
            prev = Some(k);
            cur = entry.next;
        }
        Err(Error::KeyNotFound)
    }

    /// Remove `key` and drop its key and value.
    pub fn delete(&mut self, key: &K) -> Result<()> {
        self.remove(key).map(drop)
    }

    /// Move every entry into a table of `new_capacity` buckets.
    ///
    /// All-or-nothing: if the new bucket array cannot be allocated the
    /// map is left unchanged.
    pub fn resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity == 0 {
            return Err(Error::InvalidArgument("capacity must be non-zero"));
        }
        self.relink(new_capacity)
    }

    // Field-level borrows only: the guard scope stays alive throughout.
    fn relink(&mut self, new_capacity: usize) -> Result<()> {
        let _g = self.guard.enter("resize");
        let mut fresh = alloc_buckets(self.heap, new_capacity)?;
        let old_capacity = self.buckets.len();
        for b in 0..old_capacity {
            let mut cur = self.buckets[b].head;
            while let Some(k) = cur {
                let entry = &mut self.entries[k];
                cur = entry.next.take();
                let idx = slot(entry.hash, new_capacity);
                append(&mut fresh, &mut self.entries, idx, k);
            }
        }
        self.buckets = fresh;
        release_buckets(self.heap, old_capacity);
        log::debug!(
            "resized hash map from {} to {} buckets ({} entries)",
            old_capacity,
            new_capacity,
            self.entries.len()
        );
        Ok(())
    }

    /// Map with the same capacity, hashing and heap, holding clones of
    /// every key and value.
    ///
    /// This is a shallow copy for pointer-like payloads: cloning an `Rc`
    /// or a reference shares the pointee with the source.
    pub fn copy(&self) -> Result<Self>
    where
        K: Clone,
        V: Clone,
        S: Clone,
        E: Clone,
    {
        self.copy_with(|k| Some(k.clone()), |v| Some(v.clone()))
    }

    /// Map with independently produced keys and values.
    ///
    /// A callback returning `None` is an allocation failure; the partial
    /// copy is released and the source is untouched.
    pub fn copy_deep<FK, FV>(&self, key_copy: FK, value_copy: FV) -> Result<Self>
    where
        FK: Fn(&K) -> Option<K>,
        FV: Fn(&V) -> Option<V>,
        S: Clone,
        E: Clone,
    {
        self.copy_with(key_copy, value_copy)
    }

    fn copy_with<FK, FV>(&self, key_copy: FK, value_copy: FV) -> Result<Self>
    where
        FK: Fn(&K) -> Option<K>,
        FV: Fn(&V) -> Option<V>,
        S: Clone,
        E: Clone,
    {
        let mut out = Self::create(
            self.heap,
            self.hasher.clone(),
            self.equality.clone(),
            self.capacity(),
        )?;
        for (idx, bucket) in self.buckets.iter().enumerate() {
            let mut cur = bucket.head;
            while let Some(k) = cur {
                let entry = &self.entries[k];
                let key = key_copy(&entry.key)
                    .ok_or_else(|| Error::allocation(core::mem::size_of::<K>()))?;
                let value = value_copy(&entry.value)
                    .ok_or_else(|| Error::allocation(core::mem::size_of::<V>()))?;
                out.heap.alloc(Self::entry_layout())?;
                let copied = out.entries.insert(Entry {
                    key,
                    value,
                    hash: entry.hash,
                    next: None,
                });
                append(&mut out.buckets, &mut out.entries, idx, copied);
                cur = entry.next;
            }
        }
        Ok(out)
    }
}

impl<K, V, S, E, H: Heap> Drop for HashMap<'_, K, V, S, E, H> {
    fn drop(&mut self) {
        let entry = Layout::new::<Entry<K, V>>();
        for _ in 0..self.entries.len() {
            self.heap.dealloc(entry);
        }
        release_buckets(self.heap, self.buckets.len());
    }
}

impl<'a, 'm, K, V, S, E, H: Heap> IntoIterator for &'m HashMap<'a, K, V, S, E, H> {
    type Item = (&'m K, &'m V);
    type IntoIter = Iter<Entries<'m, K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Maps are equal when they hold equal keys (by `self`'s equality) with
/// equal values, whatever their capacity or layout.
impl<K, V, S, E, H> PartialEq for HashMap<'_, K, V, S, E, H>
where
    V: PartialEq,
    S: KeyHasher<K>,
    E: KeyEquality<K>,
    H: Heap,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut equal = true;
        self.for_each(|k, v| {
            if equal {
                equal = other.get(k) == Some(v);
            }
        });
        equal
    }
}

impl<K, V, S, E, H> fmt::Debug for HashMap<'_, K, V, S, E, H>
where
    K: fmt::Debug,
    V: fmt::Debug,
    H: Heap,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Forward-only cursor over a map's entries in bucket order.
pub struct Entries<'m, K, V> {
    buckets: &'m [Bucket],
    entries: &'m SlotMap<EntryKey, Entry<K, V>>,
    bucket: usize,
    at: Option<EntryKey>,
}

impl<'m, K, V> Entries<'m, K, V> {
    fn new(buckets: &'m [Bucket], entries: &'m SlotMap<EntryKey, Entry<K, V>>) -> Self {
        let mut cursor = Self {
            buckets,
            entries,
            bucket: 0,
            at: None,
        };
        cursor.seek();
        cursor
    }

    // Park on the head of the first non-empty bucket at or after `bucket`.
    fn seek(&mut self) {
        while self.at.is_none() && self.bucket < self.buckets.len() {
            self.at = self.buckets[self.bucket].head;
            if self.at.is_none() {
                self.bucket += 1;
            }
        }
    }

    fn view(&self, k: EntryKey) -> (&'m K, &'m V) {
        let entries: &'m SlotMap<EntryKey, Entry<K, V>> = self.entries;
        let entry = &entries[k];
        (&entry.key, &entry.value)
    }
}

impl<'m, K, V> Cursor for Entries<'m, K, V> {
    type Item = (&'m K, &'m V);

    fn has_next(&self) -> bool {
        self.at.is_some()
    }

    fn next(&mut self) -> Result<Self::Item> {
        let k = self.at.ok_or(Error::IteratorExhausted)?;
        self.at = self.entries[k].next;
        if self.at.is_none() {
            self.bucket += 1;
            self.seek();
        }
        Ok(self.view(k))
    }

    fn get(&self) -> Result<Self::Item> {
        self.at
            .map(|k| self.view(k))
            .ok_or(Error::IteratorExhausted)
    }

    fn reset(&mut self) {
        self.bucket = 0;
        self.at = None;
        self.seek();
    }
}

/// Heap-admitted array of references into a container.
///
/// The caller owns the array only; the referenced keys or values stay in
/// the container. Dropping the snapshot releases the array.
pub struct Snapshot<'m, T, H: Heap> {
    items: Vec<&'m T>,
    heap: &'m H,
    layout: Layout,
}

impl<'m, T, H: Heap> Snapshot<'m, T, H> {
    pub(crate) fn with_capacity(heap: &'m H, len: usize) -> Result<Self> {
        let layout =
            Layout::array::<&T>(len).map_err(|_| Error::allocation(usize::MAX))?;
        heap.alloc(layout)?;
        let mut items = Vec::new();
        if items.try_reserve_exact(len).is_err() {
            heap.dealloc(layout);
            return Err(Error::allocation(layout.size()));
        }
        Ok(Self {
            items,
            heap,
            layout,
        })
    }

    pub(crate) fn push(&mut self, item: &'m T) {
        self.items.push(item);
    }

    pub fn as_slice(&self) -> &[&'m T] {
        &self.items
    }

    /// Release the array back to the heap and keep the references.
    pub fn into_vec(mut self) -> Vec<&'m T> {
        core::mem::take(&mut self.items)
    }
}

impl<'m, T, H: Heap> Deref for Snapshot<'m, T, H> {
    type Target = [&'m T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T, H: Heap> Drop for Snapshot<'_, T, H> {
    fn drop(&mut self) {
        self.heap.dealloc(self.layout);
    }
}

impl<T: fmt::Debug, H: Heap> fmt::Debug for Snapshot<'_, T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
