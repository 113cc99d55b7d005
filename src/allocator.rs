//! Heaps and element allocators.
//!
//! A [`Heap`] admits or refuses allocations by `Layout`; containers consult
//! it before every growth of their storage and report every release back
//! to it. The bytes themselves come from Rust's global allocator through
//! fallible reservation, so a refusal (or a failed reservation) always
//! surfaces as [`Error::AllocationFailure`] instead of an abort.
//!
//! An [`Allocator`] pairs a heap with optional per-element `copy` and
//! `free` hooks. Deep operations that need `copy` fail explicitly when it
//! is absent; they never fall back to moving or sharing.
//!
//! Heaps are caller-owned and borrowed by the containers built with them.
//! Fault injection is an ordinary heap ([`FailAfter`]) passed in by the
//! caller; there is no global counter anywhere in the crate.

use crate::error::{Error, Result};
use core::alloc::Layout;
use core::cell::Cell;
use core::fmt;

/// Admission half of an allocator.
pub trait Heap {
    /// Admit an allocation of `layout`. Failure leaves the heap unchanged.
    fn alloc(&self, layout: Layout) -> Result<()>;

    /// Release a previously admitted allocation of `layout`.
    fn dealloc(&self, layout: Layout);
}

impl<H: Heap + ?Sized> Heap for &H {
    #[inline]
    fn alloc(&self, layout: Layout) -> Result<()> {
        (**self).alloc(layout)
    }

    #[inline]
    fn dealloc(&self, layout: Layout) {
        (**self).dealloc(layout)
    }
}

/// Admits every allocation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Global;

impl Heap for Global {
    #[inline]
    fn alloc(&self, _layout: Layout) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn dealloc(&self, _layout: Layout) {}
}

/// Fault-injecting heap: admits the first `budget` calls to `alloc` and
/// refuses every call after that.
#[derive(Debug)]
pub struct FailAfter {
    budget: Cell<usize>,
    calls: Cell<usize>,
    refused: Cell<usize>,
}

impl FailAfter {
    pub fn new(budget: usize) -> Self {
        Self {
            budget: Cell::new(budget),
            calls: Cell::new(0),
            refused: Cell::new(0),
        }
    }

    /// Total `alloc` calls seen, admitted or not.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Number of refused `alloc` calls.
    pub fn refused(&self) -> usize {
        self.refused.get()
    }

    /// Admissions left before the heap starts refusing.
    pub fn remaining(&self) -> usize {
        self.budget.get()
    }

    /// Replace the remaining budget.
    pub fn rearm(&self, budget: usize) {
        self.budget.set(budget);
    }
}

impl Heap for FailAfter {
    fn alloc(&self, layout: Layout) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        match self.budget.get() {
            0 => {
                self.refused.set(self.refused.get() + 1);
                Err(Error::allocation(layout.size()))
            }
            n => {
                self.budget.set(n - 1);
                Ok(())
            }
        }
    }

    fn dealloc(&self, _layout: Layout) {}
}

/// Heap wrapper that keeps live and total allocation counts.
///
/// Wrap a [`FailAfter`] to check that failed operations leak nothing.
#[derive(Debug, Default)]
pub struct Tracking<H = Global> {
    inner: H,
    live_bytes: Cell<usize>,
    live_blocks: Cell<usize>,
    total_blocks: Cell<usize>,
}

impl Tracking {
    pub fn new() -> Self {
        Self::wrap(Global)
    }
}

impl<H: Heap> Tracking<H> {
    pub fn wrap(inner: H) -> Self {
        Self {
            inner,
            live_bytes: Cell::new(0),
            live_blocks: Cell::new(0),
            total_blocks: Cell::new(0),
        }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn live_bytes(&self) -> usize {
        self.live_bytes.get()
    }

    pub fn live_blocks(&self) -> usize {
        self.live_blocks.get()
    }

    /// Blocks admitted over the heap's lifetime.
    pub fn total_blocks(&self) -> usize {
        self.total_blocks.get()
    }
}

impl<H: Heap> Heap for Tracking<H> {
    fn alloc(&self, layout: Layout) -> Result<()> {
        self.inner.alloc(layout)?;
        self.live_bytes.set(self.live_bytes.get() + layout.size());
        self.live_blocks.set(self.live_blocks.get() + 1);
        self.total_blocks.set(self.total_blocks.get() + 1);
        Ok(())
    }

    fn dealloc(&self, layout: Layout) {
        let blocks = self.live_blocks.get();
        debug_assert!(blocks > 0, "dealloc without matching alloc");
        self.live_blocks.set(blocks.saturating_sub(1));
        self.live_bytes
            .set(self.live_bytes.get().saturating_sub(layout.size()));
        self.inner.dealloc(layout);
    }
}

/// Element copy hook. `None` means the copy could not be allocated.
pub type CopyFn<T> = fn(&T) -> Option<T>;

/// Element release hook; receives ownership of each disposed element.
pub type FreeFn<T> = fn(T);

fn clone_some<T: Clone>(value: &T) -> Option<T> {
    Some(value.clone())
}

/// A heap plus optional element hooks, fixed at construction.
pub struct Allocator<T, H = Global> {
    heap: H,
    copy: Option<CopyFn<T>>,
    free: Option<FreeFn<T>>,
}

impl<T> Allocator<T> {
    /// Hookless allocator over [`Global`].
    pub fn global() -> Self {
        Self::new(Global)
    }
}

impl<T> Default for Allocator<T> {
    fn default() -> Self {
        Self::global()
    }
}

impl<T, H: Heap> Allocator<T, H> {
    pub fn new(heap: H) -> Self {
        Self {
            heap,
            copy: None,
            free: None,
        }
    }

    pub fn with_copy(mut self, copy: CopyFn<T>) -> Self {
        self.copy = Some(copy);
        self
    }

    pub fn with_free(mut self, free: FreeFn<T>) -> Self {
        self.free = Some(free);
        self
    }

    pub fn heap(&self) -> &H {
        &self.heap
    }

    pub fn has_copy(&self) -> bool {
        self.copy.is_some()
    }

    pub fn has_free(&self) -> bool {
        self.free.is_some()
    }

    pub(crate) fn copy_fn(&self) -> Option<CopyFn<T>> {
        self.copy
    }

    /// Produce an independently owned copy of `value`.
    pub fn copy(&self, value: &T) -> Result<T> {
        let copy = self
            .copy
            .ok_or(Error::InvalidArgument("allocator has no copy function"))?;
        copy(value).ok_or_else(|| Error::allocation(core::mem::size_of::<T>()))
    }

    /// Dispose of an element through the free hook, or drop it.
    pub fn release(&self, value: T) {
        match self.free {
            Some(free) => free(value),
            None => drop(value),
        }
    }
}

impl<T: Clone, H: Heap> Allocator<T, H> {
    /// Use `Clone` as the copy hook.
    pub fn with_clone(self) -> Self {
        self.with_copy(clone_some::<T>)
    }
}

impl<T, H: Heap> Heap for Allocator<T, H> {
    #[inline]
    fn alloc(&self, layout: Layout) -> Result<()> {
        self.heap.alloc(layout)
    }

    #[inline]
    fn dealloc(&self, layout: Layout) {
        self.heap.dealloc(layout)
    }
}

impl<T, H: fmt::Debug> fmt::Debug for Allocator<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Allocator")
            .field("heap", &self.heap)
            .field("copy", &self.copy.is_some())
            .field("free", &self.free.is_some())
            .finish()
    }
}
