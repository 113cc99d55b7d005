//! Cursor protocol and lazy combinators.
//!
//! A [`Cursor`] rests *between* two elements of a sequence:
//!
//! - `next` returns the element after the position and steps over it;
//! - `get` peeks at that same element without moving (idempotent);
//! - `prev` steps back over the element before the position and returns
//!   it, so `next` followed by `prev` yields the same element twice;
//! - `reset` rewinds to the initial position and is always safe.
//!
//! Moving past either end is an explicit [`Error::IteratorExhausted`],
//! never stale data. Forward-only cursors keep the default `has_prev`
//! (`false`) and `prev` ([`Error::Unsupported`]). Exhaustion does not
//! invalidate a cursor: `is_valid` stays `true` after a full drain.
//!
//! Combinators own the cursors they wrap, so dropping a pipeline drops
//! every stage exactly once. Cursors over a container borrow it; the
//! container cannot be mutated while one is alive.

use crate::allocator::{Allocator, Heap};
use crate::error::{Error, Result};

mod chain;
mod copy;
mod enumerate;
mod filter;
mod range;
mod repeat;
mod skip;
mod slice;
mod take;
mod transform;
mod zip;

pub use chain::Chain;
pub use copy::Copied;
pub use enumerate::Enumerate;
pub use filter::Filter;
pub use range::Range;
pub use repeat::Repeat;
pub use skip::Skip;
pub use slice::SliceCursor;
pub use take::Take;
pub use transform::Transform;
pub use zip::Zip;

/// The iterator protocol shared by every source and combinator.
pub trait Cursor {
    type Item;

    /// Whether the cursor can be used at all. Independent of exhaustion.
    fn is_valid(&self) -> bool {
        true
    }

    /// Whether `next` would succeed.
    fn has_next(&self) -> bool;

    /// Return the element after the position and step over it.
    fn next(&mut self) -> Result<Self::Item>;

    /// The element `next` would return, without moving.
    fn get(&self) -> Result<Self::Item>;

    /// Whether `prev` would succeed.
    fn has_prev(&self) -> bool {
        false
    }

    /// Step back over the previous element and return it.
    fn prev(&mut self) -> Result<Self::Item> {
        Err(Error::Unsupported("prev on a forward-only cursor"))
    }

    /// Rewind to the initial position.
    fn reset(&mut self);
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;

    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }
    fn has_next(&self) -> bool {
        (**self).has_next()
    }
    fn next(&mut self) -> Result<Self::Item> {
        (**self).next()
    }
    fn get(&self) -> Result<Self::Item> {
        (**self).get()
    }
    fn has_prev(&self) -> bool {
        (**self).has_prev()
    }
    fn prev(&mut self) -> Result<Self::Item> {
        (**self).prev()
    }
    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Bounded `[start, end)` range with the given step.
pub fn range(start: i64, end: i64, step: i64) -> Result<Range> {
    Range::new(start, end, step)
}

/// Unbounded range starting at `start`.
pub fn range_from(start: i64, step: i64) -> Result<Range> {
    Range::unbounded(start, step)
}

/// `value` replayed `times` times, or forever when `times` is `None`.
pub fn repeat<T: Clone>(value: T, times: Option<usize>) -> Repeat<T> {
    Repeat::new(value, times)
}

/// Concatenate `members`, draining each before moving to the next.
pub fn chain<'c, T>(members: Vec<Box<dyn Cursor<Item = T> + 'c>>) -> Chain<'c, T> {
    Chain::new(members)
}

/// Combinator methods available on every sized cursor.
pub trait CursorExt: Cursor + Sized {
    fn filter<P>(self, pred: P) -> Filter<Self, P>
    where
        P: Fn(&Self::Item) -> bool,
    {
        Filter::new(self, pred)
    }

    fn transform<F, T>(self, f: F) -> Transform<Self, F>
    where
        F: Fn(Self::Item) -> T,
    {
        Transform::new(self, f)
    }

    fn chain<'c, C>(self, other: C) -> Chain<'c, Self::Item>
    where
        Self: 'c,
        C: Cursor<Item = Self::Item> + 'c,
    {
        Chain::new(vec![Box::new(self), Box::new(other)])
    }

    fn zip<B: Cursor>(self, other: B) -> Zip<Self, B> {
        Zip::new(self, other)
    }

    fn enumerate(self) -> Enumerate<Self> {
        Enumerate::new(self)
    }

    fn skip(self, n: usize) -> Skip<Self> {
        Skip::new(self, n)
    }

    fn take(self, n: usize) -> Take<Self> {
        Take::new(self, n)
    }

    /// Clone each borrowed element through `alloc`'s copy hook.
    fn copied<'t, T, H>(self, alloc: &Allocator<T, H>) -> Result<Copied<Self, T>>
    where
        T: 't,
        H: Heap,
        Self: Cursor<Item = &'t T>,
    {
        Copied::new(self, alloc)
    }

    /// Bridge into a std `Iterator` that ends at the first failure.
    fn into_iter(self) -> Iter<Self> {
        Iter { cursor: self }
    }

    /// Feed every remaining element to `f`.
    fn for_each<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(Self::Item),
    {
        while self.has_next() {
            f(self.next()?);
        }
        Ok(())
    }

    /// Drain the remaining elements, counting them.
    fn count_remaining(&mut self) -> Result<usize> {
        let mut n = 0;
        self.for_each(|_| n += 1)?;
        Ok(n)
    }

    fn collect_vec(&mut self) -> Result<Vec<Self::Item>> {
        let mut out = Vec::new();
        self.for_each(|item| out.push(item))?;
        Ok(out)
    }
}

impl<C: Cursor> CursorExt for C {}

/// std `Iterator` view of a cursor.
pub struct Iter<C> {
    cursor: C,
}

impl<C: Cursor> Iter<C> {
    pub fn into_inner(self) -> C {
        self.cursor
    }
}

impl<C: Cursor> Iterator for Iter<C> {
    type Item = C::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if !self.cursor.has_next() {
            return None;
        }
        self.cursor.next().ok()
    }
}

impl<C: Cursor> core::iter::FusedIterator for Iter<C> {}


#[cfg(test)]
mod tests {
    use super::testing::{DropCounted, Forward};
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn range_filter_transform_pipeline() {
        let mut c = range(0, 5, 1)
            .unwrap()
            .filter(|v| v % 2 == 0)
            .transform(|v| v * 2);
        assert_eq!(c.collect_vec().unwrap(), vec![0, 4, 8]);
    }

    /// Invariant: a drained cursor is still valid and rewinds on reset.
    #[test]
    fn drained_cursor_stays_valid_and_resets() {
        let mut c = range(0, 3, 1).unwrap();
        assert_eq!(c.count_remaining().unwrap(), 3);
        assert!(c.is_valid());
        assert!(!c.has_next());
        assert_eq!(c.next(), Err(Error::IteratorExhausted));
        assert_eq!(c.get(), Err(Error::IteratorExhausted));
        c.reset();
        assert_eq!(c.get(), Ok(0));
    }

    #[test]
    fn forward_only_prev_is_unsupported() {
        let mut c = Forward::new(vec![1, 2]);
        c.next().unwrap();
        assert!(!c.has_prev());
        assert!(matches!(c.prev(), Err(Error::Unsupported(_))));
        assert_eq!(c.get(), Ok(2), "a refused prev must not move the cursor");
    }

    /// Invariant: dropping a pipeline drops every wrapped cursor exactly once.
    #[test]
    fn dropping_pipeline_drops_each_stage_once() {
        let drops = Rc::new(Cell::new(0));
        let a = DropCounted {
            inner: range(0, 4, 1).unwrap(),
            drops: drops.clone(),
        };
        let b = DropCounted {
            inner: range(10, 12, 1).unwrap(),
            drops: drops.clone(),
        };
        let c = DropCounted {
            inner: range(0, 100, 1).unwrap(),
            drops: drops.clone(),
        };
        let mut pipeline = a
            .chain(b)
            .zip(c)
            .enumerate()
            .skip(1)
            .take(3)
            .transform(|(i, p)| (i, *p.first() + *p.second()));
        assert_eq!(
            pipeline.collect_vec().unwrap(),
            vec![(1, 2), (2, 4), (3, 6)]
        );
        assert_eq!(drops.get(), 0);
        drop(pipeline);
        assert_eq!(drops.get(), 3);
    }

    #[test]
    fn std_bridge_stops_at_end() {
        let v: Vec<i64> = range(3, 0, -1).unwrap().into_iter().collect();
        assert_eq!(v, vec![3, 2, 1]);
        let total: i64 = repeat(2i64, Some(4)).into_iter().sum();
        assert_eq!(total, 8);
    }

    #[test]
    fn boxed_cursor_delegates() {
        let mut c: Box<dyn Cursor<Item = i64>> = Box::new(range(0, 2, 1).unwrap());
        assert_eq!(c.next(), Ok(0));
        assert!(c.has_prev());
        assert_eq!(c.prev(), Ok(0));
        c.reset();
        assert_eq!(c.count_remaining().unwrap(), 2);
    }
}
