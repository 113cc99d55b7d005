use super::Cursor;
use crate::allocator::{Allocator, CopyFn, Heap};
use crate::error::{Error, Result};

/// Clones each borrowed upstream element through an allocator's copy hook,
/// so the consumer owns values independent of the upstream's lifetime.
pub struct Copied<C, T> {
    upstream: C,
    copy: CopyFn<T>,
}

impl<'t, C, T> Copied<C, T>
where
    T: 't,
    C: Cursor<Item = &'t T>,
{
    /// Fails with `InvalidArgument` when `alloc` has no copy hook.
    pub fn new<H: Heap>(upstream: C, alloc: &Allocator<T, H>) -> Result<Self> {
        let copy = alloc
            .copy_fn()
            .ok_or(Error::InvalidArgument("copy cursor needs an allocator copy function"))?;
        Ok(Self { upstream, copy })
    }

    fn duplicate(&self, value: &T) -> Result<T> {
        (self.copy)(value).ok_or_else(|| Error::allocation(core::mem::size_of::<T>()))
    }
}

impl<'t, C, T> Cursor for Copied<C, T>
where
    T: 't,
    C: Cursor<Item = &'t T>,
{
    type Item = T;

    fn is_valid(&self) -> bool {
        self.upstream.is_valid()
    }

    fn has_next(&self) -> bool {
        self.upstream.has_next()
    }

    // Copy before moving so a failed copy leaves the position unchanged.
    fn next(&mut self) -> Result<T> {
        let copy = self.duplicate(self.upstream.get()?)?;
        self.upstream.next()?;
        Ok(copy)
    }

    fn get(&self) -> Result<T> {
        self.duplicate(self.upstream.get()?)
    }

    fn has_prev(&self) -> bool {
        self.upstream.has_prev()
    }

    // The upstream cannot peek backwards, so a failed copy steps forward again.
    fn prev(&mut self) -> Result<T> {
        let item = self.upstream.prev()?;
        match self.duplicate(item) {
            Ok(copy) => Ok(copy),
            Err(e) => {
                let _ = self.upstream.next();
                Err(e)
            }
        }
    }

    fn reset(&mut self) {
        self.upstream.reset()
    }
}
