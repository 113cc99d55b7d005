use super::Cursor;
use crate::error::{Error, Result};

/// Drops the first `n` upstream elements.
///
/// The skipped prefix is consumed on construction and on every reset;
/// stepping back stops at the start of the window.
pub struct Skip<C> {
    upstream: C,
    n: usize,
    stepped: usize,
}

impl<C: Cursor> Skip<C> {
    pub fn new(upstream: C, n: usize) -> Self {
        let mut skip = Self {
            upstream,
            n,
            stepped: 0,
        };
        skip.skip_prefix();
        skip
    }

    fn skip_prefix(&mut self) {
        for _ in 0..self.n {
            if self.upstream.next().is_err() {
                break;
            }
        }
    }
}

impl<C: Cursor> Cursor for Skip<C> {
    type Item = C::Item;

    fn is_valid(&self) -> bool {
        self.upstream.is_valid()
    }

    fn has_next(&self) -> bool {
        self.upstream.has_next()
    }

    fn next(&mut self) -> Result<C::Item> {
        let item = self.upstream.next()?;
        self.stepped += 1;
        Ok(item)
    }

    fn get(&self) -> Result<C::Item> {
        self.upstream.get()
    }

    fn has_prev(&self) -> bool {
        self.stepped > 0 && self.upstream.has_prev()
    }

    fn prev(&mut self) -> Result<C::Item> {
        if self.stepped == 0 {
            return Err(Error::IteratorExhausted);
        }
        let item = self.upstream.prev()?;
        self.stepped -= 1;
        Ok(item)
    }

    fn reset(&mut self) {
        self.upstream.reset();
        self.stepped = 0;
        self.skip_prefix();
    }
}
