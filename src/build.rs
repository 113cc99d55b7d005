//! Draining cursors into containers.

use crate::allocator::{Allocator, Heap};
use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// How elements drained from a cursor end up in the new container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Transfer {
    /// Move each element in as produced.
    #[default]
    Move,
    /// Store a copy made by the allocator's copy hook; the cursor's own
    /// value is dropped.
    Copy,
}

impl Transfer {
    /// Fail up front if this mode cannot be honoured by `alloc`.
    pub fn check<T, H: Heap>(self, alloc: &Allocator<T, H>) -> Result<()> {
        match self {
            Transfer::Copy if !alloc.has_copy() => Err(Error::InvalidArgument(
                "copying construction needs an allocator copy function",
            )),
            _ => Ok(()),
        }
    }

    /// Turn a drained element into the value the container stores.
    pub fn apply<T, H: Heap>(self, alloc: &Allocator<T, H>, item: T) -> Result<T> {
        match self {
            Transfer::Move => Ok(item),
            Transfer::Copy => alloc.copy(&item),
        }
    }
}

/// Drain `cursor` into `sink`, transferring each element per `transfer`.
///
/// The mode is validated before the cursor is touched. The first error from
/// the cursor, the copy hook or `sink` stops the drain and is returned; the
/// caller drops whatever it built so far.
pub fn drain<C, T, H, F>(
    cursor: &mut C,
    alloc: &Allocator<T, H>,
    transfer: Transfer,
    mut sink: F,
) -> Result<()>
where
    C: Cursor<Item = T> + ?Sized,
    H: Heap,
    F: FnMut(T) -> Result<()>,
{
    transfer.check(alloc)?;
    while cursor.has_next() {
        let item = cursor.next()?;
        sink(transfer.apply(alloc, item)?)?;
    }
    Ok(())
}
