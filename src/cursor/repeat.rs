use super::Cursor;
use crate::error::{Error, Result};

/// One value replayed a fixed number of times, or without end.
#[derive(Clone, Debug)]
pub struct Repeat<T> {
    value: T,
    times: Option<usize>,
    pos: usize,
}

impl<T: Clone> Repeat<T> {
    pub fn new(value: T, times: Option<usize>) -> Self {
        Self {
            value,
            times,
            pos: 0,
        }
    }
}

impl<T: Clone> Cursor for Repeat<T> {
    type Item = T;

    fn has_next(&self) -> bool {
        self.times.map_or(true, |n| self.pos < n)
    }

    fn next(&mut self) -> Result<T> {
        let value = self.get()?;
        self.pos = self.pos.saturating_add(1);
        Ok(value)
    }

    fn get(&self) -> Result<T> {
        if !self.has_next() {
            return Err(Error::IteratorExhausted);
        }
        Ok(self.value.clone())
    }

    fn has_prev(&self) -> bool {
        self.pos > 0
    }

    fn prev(&mut self) -> Result<T> {
        self.pos = self.pos.checked_sub(1).ok_or(Error::IteratorExhausted)?;
        Ok(self.value.clone())
    }

    fn reset(&mut self) {
        self.pos = 0;
    }
}
