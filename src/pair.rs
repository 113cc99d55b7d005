//! Two-slot value produced by `zip` and usable on its own.

/// A `first`/`second` pair. Dropping the pair drops both slots.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pair<A, B> {
    first: A,
    second: B,
}

impl<A, B> Pair<A, B> {
    pub const fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }

    pub fn first_mut(&mut self) -> &mut A {
        &mut self.first
    }

    pub fn second_mut(&mut self) -> &mut B {
        &mut self.second
    }

    /// Replace the first slot, returning the old value.
    pub fn set_first(&mut self, first: A) -> A {
        core::mem::replace(&mut self.first, first)
    }

    /// Replace the second slot, returning the old value.
    pub fn set_second(&mut self, second: B) -> B {
        core::mem::replace(&mut self.second, second)
    }

    pub fn swap(self) -> Pair<B, A> {
        Pair::new(self.second, self.first)
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A, B> From<(A, B)> for Pair<A, B> {
    fn from((first, second): (A, B)) -> Self {
        Self::new(first, second)
    }
}

impl<A, B> From<Pair<A, B>> for (A, B) {
    fn from(pair: Pair<A, B>) -> Self {
        pair.into_parts()
    }
}

#[cfg(test)]
mod tests {
    use super::Pair;
    use std::rc::Rc;

    #[test]
    fn accessors_and_replacement() {
        let mut p = Pair::new("k".to_string(), 1);
        assert_eq!(p.first(), "k");
        *p.second_mut() += 1;
        assert_eq!(p.set_first("j".to_string()), "k");
        assert_eq!(p.into_parts(), ("j".to_string(), 2));
    }

    #[test]
    fn swap_and_tuple_conversions() {
        let p: Pair<i32, char> = (1, 'a').into();
        assert_eq!(p.swap(), Pair::new('a', 1));
        let t: (i32, char) = p.into();
        assert_eq!(t, (1, 'a'));
    }

    /// Invariant: dropping a pair releases both slots.
    #[test]
    fn drop_releases_both_slots() {
        let a = Rc::new(1);
        let b = Rc::new(2);
        let p = Pair::new(a.clone(), b.clone());
        assert_eq!(Rc::strong_count(&a), 2);
        drop(p);
        assert_eq!(Rc::strong_count(&a), 1);
        assert_eq!(Rc::strong_count(&b), 1);
    }
}
