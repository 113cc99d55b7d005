use super::Cursor;
use crate::error::{Error, Result};

/// Arithmetic sequence over `i64`.
///
/// The element at position `i` is always computed as `start + i * step`,
/// never accumulated, so any mix of `next` and `prev` lands on exactly
/// the values a plain forward walk produces. A bounded range stops before
/// `end`; an unbounded one stops where the next value would overflow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Range {
    start: i64,
    end: Option<i64>,
    step: i64,
    pos: usize,
}

impl Range {
    pub fn new(start: i64, end: i64, step: i64) -> Result<Self> {
        Self::build(start, Some(end), step)
    }

    pub fn unbounded(start: i64, step: i64) -> Result<Self> {
        Self::build(start, None, step)
    }

    fn build(start: i64, end: Option<i64>, step: i64) -> Result<Self> {
        if step == 0 {
            return Err(Error::InvalidArgument("range step must be non-zero"));
        }
        Ok(Self {
            start,
            end,
            step,
            pos: 0,
        })
    }

    pub fn is_bounded(&self) -> bool {
        self.end.is_some()
    }

    /// Number of positions in the sequence, saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        let (start, step) = (i128::from(self.start), i128::from(self.step));
        let limit = match (self.end, step > 0) {
            (Some(end), true) => i128::from(end) - 1,
            (Some(end), false) => i128::from(end) + 1,
            (None, true) => i128::from(i64::MAX),
            (None, false) => i128::from(i64::MIN),
        };
        let span = if step > 0 { limit - start } else { start - limit };
        if span < 0 {
            return 0;
        }
        let n = span / step.abs() + 1;
        usize::try_from(n).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current position: the number of elements before the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Random access to the element at `index`.
    pub fn nth(&self, index: usize) -> Result<i64> {
        self.at(index)
            .ok_or_else(|| Error::out_of_range(index, self.len()))
    }

    fn at(&self, index: usize) -> Option<i64> {
        let offset = i64::try_from(index).ok()?.checked_mul(self.step)?;
        let value = self.start.checked_add(offset)?;
        match self.end {
            Some(end) if self.step > 0 && value >= end => None,
            Some(end) if self.step < 0 && value <= end => None,
            _ => Some(value),
        }
    }
}

impl Cursor for Range {
    type Item = i64;

    fn has_next(&self) -> bool {
        self.at(self.pos).is_some()
    }

    fn next(&mut self) -> Result<i64> {
        let value = self.get()?;
        self.pos += 1;
        Ok(value)
    }

    fn get(&self) -> Result<i64> {
        self.at(self.pos).ok_or(Error::IteratorExhausted)
    }

    fn has_prev(&self) -> bool {
        self.pos > 0
    }

    fn prev(&mut self) -> Result<i64> {
        let back = self.pos.checked_sub(1).ok_or(Error::IteratorExhausted)?;
        let value = self.at(back).ok_or(Error::IteratorExhausted)?;
        self.pos = back;
        Ok(value)
    }

    fn reset(&mut self) {
        self.pos = 0;
    }
}
