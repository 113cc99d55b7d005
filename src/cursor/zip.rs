use super::Cursor;
use crate::error::{Error, Result};
use crate::pair::Pair;

/// Positional pairs from two cursors, ending with the shorter one.
///
/// Both sides always move together. When the second side fails to step,
/// the first is stepped back again so the pairing stays aligned.
pub struct Zip<A, B> {
    a: A,
    b: B,
}

impl<A, B> Zip<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }

    pub fn into_parts(self) -> (A, B) {
        (self.a, self.b)
    }
}

impl<A: Cursor, B: Cursor> Cursor for Zip<A, B> {
    type Item = Pair<A::Item, B::Item>;

    fn is_valid(&self) -> bool {
        self.a.is_valid() && self.b.is_valid()
    }

    fn has_next(&self) -> bool {
        self.a.has_next() && self.b.has_next()
    }

    fn next(&mut self) -> Result<Self::Item> {
        if !self.has_next() {
            return Err(Error::IteratorExhausted);
        }
        let first = self.a.next()?;
        match self.b.next() {
            Ok(second) => Ok(Pair::new(first, second)),
            Err(e) => {
                let _ = self.a.prev();
                Err(e)
            }
        }
    }

    fn get(&self) -> Result<Self::Item> {
        Ok(Pair::new(self.a.get()?, self.b.get()?))
    }

    fn has_prev(&self) -> bool {
        self.a.has_prev() && self.b.has_prev()
    }

    fn prev(&mut self) -> Result<Self::Item> {
        if !self.has_prev() {
            return Err(Error::IteratorExhausted);
        }
        let first = self.a.prev()?;
        match self.b.prev() {
            Ok(second) => Ok(Pair::new(first, second)),
            Err(e) => {
                let _ = self.a.next();
                Err(e)
            }
        }
    }

    fn reset(&mut self) {
        self.a.reset();
        self.b.reset();
    }
}
