use super::Cursor;
use crate::error::{Error, Result};

/// Prefixes each element with its position in the sequence.
pub struct Enumerate<C> {
    upstream: C,
    index: usize,
}

impl<C> Enumerate<C> {
    pub fn new(upstream: C) -> Self {
        Self { upstream, index: 0 }
    }
}

impl<C: Cursor> Cursor for Enumerate<C> {
    type Item = (usize, C::Item);

    fn is_valid(&self) -> bool {
        self.upstream.is_valid()
    }

    fn has_next(&self) -> bool {
        self.upstream.has_next()
    }

    fn next(&mut self) -> Result<Self::Item> {
        let item = self.upstream.next()?;
        let index = self.index;
        self.index += 1;
        Ok((index, item))
    }

    fn get(&self) -> Result<Self::Item> {
        Ok((self.index, self.upstream.get()?))
    }

    fn has_prev(&self) -> bool {
        self.index > 0 && self.upstream.has_prev()
    }

    fn prev(&mut self) -> Result<Self::Item> {
        if self.index == 0 {
            return Err(Error::IteratorExhausted);
        }
        let item = self.upstream.prev()?;
        self.index = self.index.saturating_sub(1);
        Ok((self.index, item))
    }

    fn reset(&mut self) {
        self.upstream.reset();
        self.index = 0;
    }
}
