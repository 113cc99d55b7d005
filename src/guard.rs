//! Debug-only detection of callbacks re-entering a container.
//!
//! The map runs user hash and equality callbacks while a chain may be
//! half-linked. A callback that calls back into the same map would observe
//! (or corrupt) that state, so in debug builds every guarded entry-point
//! records which operation is active and a nested entry panics naming
//! both. Release builds compile the guard away.
//!
//! The guard also carries the `!Send`/`!Sync` marker shared by every
//! container in the crate.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

#[derive(Debug)]
pub(crate) struct CallbackGuard {
    #[cfg(debug_assertions)]
    active: Cell<Option<&'static str>>,
    _single_threaded: PhantomData<*mut ()>,
}

impl CallbackGuard {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(None),
            _single_threaded: PhantomData,
        }
    }

    /// Mark `op` as running until the returned scope drops.
    #[inline]
    pub(crate) fn enter(&self, op: &'static str) -> Scope<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(outer) = self.active.get() {
                panic!("`{op}` re-entered the map while `{outer}` was running a callback");
            }
            self.active.set(Some(op));
            return Scope { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = op;
            return Scope { _z: PhantomData };
        }
    }
}

impl Default for CallbackGuard {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct Scope<'a> {
    #[cfg(debug_assertions)]
    owner: &'a CallbackGuard,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.active.set(None);
    }
}
