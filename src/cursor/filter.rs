use super::Cursor;
use crate::error::Result;

/// Yields only upstream elements matching `pred`.
///
/// The upstream is kept parked on the next match, so `get` and
/// `has_next` never run the predicate. Forward-only.
pub struct Filter<C, P> {
    upstream: C,
    pred: P,
}

impl<C, P> Filter<C, P>
where
    C: Cursor,
    P: Fn(&C::Item) -> bool,
{
    pub fn new(upstream: C, pred: P) -> Self {
        let mut filter = Self { upstream, pred };
        filter.park();
        filter
    }

    pub fn into_inner(self) -> C {
        self.upstream
    }

    // Step the upstream over non-matching elements.
    fn park(&mut self) {
        while let Ok(item) = self.upstream.get() {
            if (self.pred)(&item) || self.upstream.next().is_err() {
                break;
            }
        }
    }
}

impl<C, P> Cursor for Filter<C, P>
where
    C: Cursor,
    P: Fn(&C::Item) -> bool,
{
    type Item = C::Item;

    fn is_valid(&self) -> bool {
        self.upstream.is_valid()
    }

    fn has_next(&self) -> bool {
        self.upstream.has_next()
    }

    fn next(&mut self) -> Result<C::Item> {
        let item = self.upstream.next()?;
        self.park();
        Ok(item)
    }

    fn get(&self) -> Result<C::Item> {
        self.upstream.get()
    }

    fn reset(&mut self) {
        self.upstream.reset();
        self.park();
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::testing::Forward;
    use crate::cursor::{range, Cursor, CursorExt};
    use crate::error::Error;

    #[test]
    fn skips_leading_and_trailing_misses() {
        let mut c = Forward::new(vec![1, 3, 4, 5, 6, 7]).filter(|v| v % 2 == 0);
        assert_eq!(c.get(), Ok(4));
        assert_eq!(c.collect_vec().unwrap(), vec![4, 6]);
        assert!(!c.has_next());
        assert_eq!(c.next(), Err(Error::IteratorExhausted));
    }

    #[test]
    fn nothing_matches() {
        let mut c = range(0, 10, 1).unwrap().filter(|_| false);
        assert!(!c.has_next());
        assert_eq!(c.get(), Err(Error::IteratorExhausted));
        c.reset();
        assert!(!c.has_next());
    }

    #[test]
    fn reset_reparks_on_first_match() {
        let mut c = range(1, 10, 1).unwrap().filter(|v| v % 3 == 0);
        assert_eq!(c.next(), Ok(3));
        assert_eq!(c.next(), Ok(6));
        c.reset();
        assert_eq!(c.get(), Ok(3));
        assert!(!c.has_prev());
    }
}
