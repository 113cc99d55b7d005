use super::Cursor;
use crate::error::{Error, Result};

/// At most `limit` upstream elements.
pub struct Take<C> {
    upstream: C,
    limit: usize,
    taken: usize,
}

impl<C> Take<C> {
    pub fn new(upstream: C, limit: usize) -> Self {
        Self {
            upstream,
            limit,
            taken: 0,
        }
    }
}

impl<C: Cursor> Cursor for Take<C> {
    type Item = C::Item;

    fn is_valid(&self) -> bool {
        self.upstream.is_valid()
    }

    fn has_next(&self) -> bool {
        self.taken < self.limit && self.upstream.has_next()
    }

    fn next(&mut self) -> Result<C::Item> {
        if self.taken >= self.limit {
            return Err(Error::IteratorExhausted);
        }
        let item = self.upstream.next()?;
        self.taken += 1;
        Ok(item)
    }

    fn get(&self) -> Result<C::Item> {
        if self.taken >= self.limit {
            return Err(Error::IteratorExhausted);
        }
        self.upstream.get()
    }

    fn has_prev(&self) -> bool {
        self.taken > 0 && self.upstream.has_prev()
    }

    fn prev(&mut self) -> Result<C::Item> {
        if self.taken == 0 {
            return Err(Error::IteratorExhausted);
        }
        let item = self.upstream.prev()?;
        self.taken -= 1;
        Ok(item)
    }

    fn reset(&mut self) {
        self.upstream.reset();
        self.taken = 0;
    }
}
