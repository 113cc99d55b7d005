#![cfg(test)]

// Property tests for HashMap kept inside the crate so they can reach the
// tracking heap and internal constants without extra plumbing.

use crate::allocator::Tracking;
use crate::cursor::Cursor;
use crate::hash::{KeyHasher, StdEquality, StdHasher};
use crate::map::{HashMap, LOAD_FACTOR_THRESHOLD};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap as StdHashMap};
use std::fmt;
use std::hash::Hasher;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// Pool-indexed operations so that shrinking moves toward earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Resize(usize),
    Copy,
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => (1usize..40).prop_map(OpI::Resize),
            1 => Just(OpI::Copy),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_scenario<S>(hasher: S, pool: &[String], ops: Vec<OpI>) -> Result<(), TestCaseError>
where
    S: KeyHasher<Key> + Clone,
{
    let heap = Tracking::new();
    {
        let mut sut: HashMap<Key, i32, S, StdEquality, Tracking> =
            HashMap::create(&heap, hasher, StdEquality, 2).expect("create");
        let mut model: StdHashMap<Key, i32> = StdHashMap::new();
        let mut resized = false;

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = key_from(pool, i);
                    let old = sut.put(k.clone(), v).expect("global heap admits");
                    prop_assert_eq!(old, model.insert(k, v));
                }
                OpI::Remove(i) => {
                    let k = key_from(pool, i);
                    match sut.remove(&k) {
                        Ok((kk, vv)) => {
                            prop_assert_eq!(&kk, &k);
                            prop_assert_eq!(Some(vv), model.remove(&k));
                        }
                        Err(_) => prop_assert!(!model.contains_key(&k)),
                    }
                }
                OpI::Get(i) => {
                    let k = key_from(pool, i);
                    prop_assert_eq!(sut.get(&k), model.get(&k));
                }
                OpI::Contains(s) => {
                    let k = Key(s);
                    prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
                }
                OpI::Mutate(i, d) => {
                    let k = key_from(pool, i);
                    if let Some(v) = sut.get_mut(&k) {
                        *v = v.saturating_add(d);
                        let mv = model.get_mut(&k).expect("model tracks live key");
                        *mv = mv.saturating_add(d);
                    } else {
                        prop_assert!(!model.contains_key(&k));
                    }
                }
                OpI::Resize(n) => {
                    let before: BTreeSet<Key> = sut.iter().map(|(k, _)| k.clone()).collect();
                    sut.resize(n).expect("global heap admits");
                    prop_assert_eq!(sut.capacity(), n);
                    let after: BTreeSet<Key> = sut.iter().map(|(k, _)| k.clone()).collect();
                    prop_assert_eq!(before, after);
                    resized = true;
                }
                OpI::Copy => {
                    let copy = sut.copy().expect("global heap admits");
                    prop_assert_eq!(copy.capacity(), sut.capacity());
                    prop_assert!(copy == sut);
                }
                OpI::Iterate => {
                    let mut cursor = sut.cursor();
                    let mut seen = BTreeSet::new();
                    while cursor.has_next() {
                        let (k, v) = cursor.next().expect("has_next promised an entry");
                        prop_assert!(seen.insert(k.clone()), "entry visited twice");
                        prop_assert_eq!(Some(v), model.get(k));
                    }
                    let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                    prop_assert_eq!(seen, m_keys);
                }
            }

            // Post-conditions after each op
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            if !resized {
                prop_assert!(sut.load_factor() <= LOAD_FACTOR_THRESHOLD);
            }
        }
    }
    prop_assert_eq!(heap.live_blocks(), 0, "map leaked heap blocks");
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `put` returns the replaced value exactly when the model had one.
// - `remove` hands back the stored pair or reports a missing key.
// - `get`/`contains_key` parity; in-place mutation through `get_mut`.
// - Explicit resizes and automatic growth never lose or duplicate entries.
// - Copies compare equal to their source; cursors visit each entry once.
// - Every admitted heap block is released on drop.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(StdHasher::new(), &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl std::hash::BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: Same state-machine invariants as above, under worst-case
// collision behavior (constant hasher). Every entry shares one chain, which
// stresses unlinking at head, middle and tail.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario(StdHasher::with_build_hasher(ConstBuildHasher), &pool, ops)?;
    }
}
