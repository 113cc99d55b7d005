//! chained-collections: heap-aware hash containers and a cursor protocol
//! with lazy combinators.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: two small subsystems with precise contracts that the rest of a
//!   container library can build on.
//! - Layers:
//!   - Heap / Allocator: a `Heap` admits or refuses every allocation by
//!     `Layout`; an `Allocator<T, H>` adds optional element `copy` and
//!     `free` hooks. Heaps are passed in and borrowed, never global.
//!   - HashMap<K, V, S, E, H>: separately chained table over a slotmap
//!     arena, with pluggable `KeyHasher`/`KeyEquality` capabilities and
//!     load-factor-driven growth.
//!   - HashSet<K, S, E, H>: a facade storing `()` per key in a HashMap,
//!     plus set algebra.
//!   - Cursor: a bidirectional-capable iterator protocol and its
//!     combinators (range, filter, transform, chain, zip, enumerate,
//!     skip, take, repeat, copy), drained into containers through
//!     `build::Transfer`.
//!
//! Constraints
//! - Single-threaded: containers are `!Send`/`!Sync` (marker carried by
//!   the map's re-entry guard).
//! - Every allocation is admitted by the caller's heap and surfaced as
//!   `Error::AllocationFailure` when refused; nothing aborts.
//! - A failed `put`, `resize` or deep copy leaves the receiver exactly as
//!   it was.
//!
//! Failure policy inside `put`
//! - Growth is opportunistic. If the heap refuses the doubled bucket
//!   array, the insert still succeeds, the refusal is logged at `warn`,
//!   and the table stays correct at its old capacity.
//!
//! Hasher and rehashing invariants
//! - Each entry stores the `u64` hash computed at insertion, and bucket
//!   placement always uses the stored hash. User hash and equality code
//!   never runs during resize or copy.
//!
//! Reentrancy policy
//! - User callbacks run while a chain may be mid-update. In debug builds
//!   the map records the running operation and panics if a callback
//!   enters the same map again. Release builds carry no check.
//!
//! Ownership
//! - Removal hands keys and values back to the caller; a set releases the
//!   keys it disposes of through its allocator's `free` hook.
//! - A combinator owns the cursors it wraps; dropping it drops each of
//!   them once. Cursors over a container borrow it, so the container
//!   cannot change underneath them.
//!
//! Notes and non-goals
//! - Iteration order of maps and sets is unordered and changes across
//!   resizes.
//! - No ordered maps, persistence or built-in synchronization.

pub mod allocator;
pub mod build;
pub mod cursor;
pub mod error;
mod guard;
pub mod hash;
pub mod map;
mod map_proptest;
pub mod pair;
pub mod set;

// Public surface
pub use allocator::{Allocator, FailAfter, Global, Heap, Tracking};
pub use build::Transfer;
pub use cursor::{Cursor, CursorExt};
pub use error::{Error, Result};
pub use hash::{KeyEquality, KeyHasher, StdEquality, StdHasher};
pub use map::HashMap;
pub use pair::Pair;
pub use set::HashSet;
