use super::Cursor;
use crate::error::Result;

/// Maps each upstream element through `f`.
///
/// Every call that yields an element runs `f` afresh, and the produced
/// value belongs to the caller. Bidirectional when the upstream is.
pub struct Transform<C, F> {
    upstream: C,
    f: F,
}

impl<C, F> Transform<C, F> {
    pub fn new(upstream: C, f: F) -> Self {
        Self { upstream, f }
    }

    pub fn into_inner(self) -> C {
        self.upstream
    }
}

impl<C, F, T> Cursor for Transform<C, F>
where
    C: Cursor,
    F: Fn(C::Item) -> T,
{
    type Item = T;

    fn is_valid(&self) -> bool {
        self.upstream.is_valid()
    }

    fn has_next(&self) -> bool {
        self.upstream.has_next()
    }

    fn next(&mut self) -> Result<T> {
        self.upstream.next().map(&self.f)
    }

    fn get(&self) -> Result<T> {
        self.upstream.get().map(&self.f)
    }

    fn has_prev(&self) -> bool {
        self.upstream.has_prev()
    }

    fn prev(&mut self) -> Result<T> {
        self.upstream.prev().map(&self.f)
    }

    fn reset(&mut self) {
        self.upstream.reset()
    }
}
