use super::Cursor;
use crate::error::{Error, Result};

/// Bidirectional cursor over a borrowed slice.
#[derive(Clone, Debug)]
pub struct SliceCursor<'s, T> {
    items: &'s [T],
    pos: usize,
}

impl<'s, T> SliceCursor<'s, T> {
    pub fn new(items: &'s [T]) -> Self {
        Self { items, pos: 0 }
    }
}

impl<'s, T> Cursor for SliceCursor<'s, T> {
    type Item = &'s T;

    fn has_next(&self) -> bool {
        self.pos < self.items.len()
    }

    fn next(&mut self) -> Result<&'s T> {
        let item = self.get()?;
        self.pos += 1;
        Ok(item)
    }

    fn get(&self) -> Result<&'s T> {
        let items: &'s [T] = self.items;
        items.get(self.pos).ok_or(Error::IteratorExhausted)
    }

    fn has_prev(&self) -> bool {
        self.pos > 0
    }

    fn prev(&mut self) -> Result<&'s T> {
        let back = self.pos.checked_sub(1).ok_or(Error::IteratorExhausted)?;
        let items: &'s [T] = self.items;
        self.pos = back;
        Ok(&items[back])
    }

    fn reset(&mut self) {
        self.pos = 0;
    }
}
