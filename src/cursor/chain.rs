use super::Cursor;
use crate::error::{Error, Result};

/// Concatenation of cursors yielding the same item type.
///
/// Each member is drained before the next one is touched. Stepping back
/// only ever moves the member that last yielded, crossing into an earlier
/// member once the later one is back where the chain found it. A
/// forward-only member that has yielded stops `prev` with `Unsupported`.
pub struct Chain<'c, T> {
    members: Vec<Box<dyn Cursor<Item = T> + 'c>>,
    // Net elements the chain has taken from each member.
    taken: Vec<usize>,
    current: usize,
}

impl<'c, T> Chain<'c, T> {
    pub fn new(members: Vec<Box<dyn Cursor<Item = T> + 'c>>) -> Self {
        let taken = vec![0; members.len()];
        let mut chain = Self {
            members,
            taken,
            current: 0,
        };
        chain.settle();
        chain
    }

    /// Append another member at the end.
    pub fn push<C>(&mut self, member: C)
    where
        C: Cursor<Item = T> + 'c,
    {
        self.members.push(Box::new(member));
        self.taken.push(0);
        self.settle();
    }

    pub fn members(&self) -> usize {
        self.members.len()
    }

    // Move `current` forward past drained members, stopping at the last.
    fn settle(&mut self) {
        while self.current + 1 < self.members.len() && !self.members[self.current].has_next() {
            self.current += 1;
        }
    }

    // Latest member at or before `current` the chain has taken from.
    fn last_taken(&self) -> Option<usize> {
        let end = self.taken.len().min(self.current + 1);
        self.taken[..end].iter().rposition(|&n| n > 0)
    }
}

impl<T> Cursor for Chain<'_, T> {
    type Item = T;

    fn is_valid(&self) -> bool {
        self.members.iter().all(|m| m.is_valid())
    }

    fn has_next(&self) -> bool {
        self.members
            .get(self.current)
            .is_some_and(|m| m.has_next())
    }

    fn next(&mut self) -> Result<T> {
        let at = self.current;
        let member = self.members.get_mut(at).ok_or(Error::IteratorExhausted)?;
        let item = member.next()?;
        self.taken[at] += 1;
        self.settle();
        Ok(item)
    }

    fn get(&self) -> Result<T> {
        self.members
            .get(self.current)
            .ok_or(Error::IteratorExhausted)?
            .get()
    }

    fn has_prev(&self) -> bool {
        self.last_taken()
            .is_some_and(|i| self.members[i].has_prev())
    }

    fn prev(&mut self) -> Result<T> {
        let i = self.last_taken().ok_or(Error::IteratorExhausted)?;
        let item = self.members[i].prev()?;
        self.taken[i] -= 1;
        self.current = i;
        Ok(item)
    }

    fn reset(&mut self) {
        for m in &mut self.members {
            m.reset();
        }
        self.taken.iter_mut().for_each(|n| *n = 0);
        self.current = 0;
        self.settle();
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::testing::Forward;
    use crate::cursor::{chain, range, Cursor, CursorExt};
    use crate::error::Error;

    #[test]
    fn concatenates_and_skips_empty_members() {
        let mut c = chain(vec![
            Box::new(range(0, 0, 1).unwrap()),
            Box::new(range(0, 2, 1).unwrap()),
            Box::new(range(0, 0, 1).unwrap()),
            Box::new(range(5, 7, 1).unwrap()),
            Box::new(range(0, 0, 1).unwrap()),
        ]);
        assert_eq!(c.collect_vec().unwrap(), vec![0, 1, 5, 6]);
        assert!(!c.has_next());
        c.reset();
        assert_eq!(c.get(), Ok(0));
    }

    #[test]
    fn empty_chain_is_exhausted_not_invalid() {
        let mut c = chain::<i64>(Vec::new());
        assert!(c.is_valid());
        assert!(!c.has_next());
        assert_eq!(c.next(), Err(Error::IteratorExhausted));
        assert_eq!(c.prev(), Err(Error::IteratorExhausted));
    }

    #[test]
    fn prev_crosses_member_boundaries() {
        let mut c = range(0, 2, 1).unwrap().chain(range(10, 11, 1).unwrap());
        assert_eq!(c.collect_vec().unwrap(), vec![0, 1, 10]);
        assert_eq!(c.prev(), Ok(10));
        assert_eq!(c.prev(), Ok(1));
        assert_eq!(c.prev(), Ok(0));
        assert!(!c.has_prev());
        assert_eq!(c.next(), Ok(0));
        assert_eq!(c.next(), Ok(1));
        assert_eq!(c.next(), Ok(10));
    }

    #[test]
    fn forward_only_members_refuse_prev() {
        let mut c = Forward::new(vec![1, 2]).chain(Forward::new(vec![3]));
        c.next().unwrap();
        assert!(!c.has_prev());
        assert!(matches!(c.prev(), Err(Error::Unsupported(_))));
        assert_eq!(c.get(), Ok(2));
    }

    /// Invariant: a forward-only member that has yielded is never skipped
    /// when stepping back.
    #[test]
    fn prev_does_not_jump_over_a_forward_only_member() {
        let mut c = range(0, 2, 1)
            .unwrap()
            .chain(range(10, 14, 1).unwrap().filter(|_| true));
        let taken: Vec<i64> = (0..4).map(|_| c.next().unwrap()).collect();
        assert_eq!(taken, vec![0, 1, 10, 11]);
        assert!(!c.has_prev());
        assert!(matches!(c.prev(), Err(Error::Unsupported(_))));
        assert_eq!(c.collect_vec().unwrap(), vec![12, 13]);
    }

    /// Invariant: an untouched forward-only member does not block stepping
    /// back into the member before it.
    #[test]
    fn prev_steps_over_an_untouched_forward_member() {
        let mut c = range(0, 2, 1)
            .unwrap()
            .chain(range(10, 12, 1).unwrap().filter(|_| true));
        assert_eq!(c.next(), Ok(0));
        assert_eq!(c.next(), Ok(1));
        assert!(c.has_prev());
        assert_eq!(c.prev(), Ok(1));
        assert_eq!(c.collect_vec().unwrap(), vec![1, 10, 11]);
    }

    #[test]
    fn push_extends_a_drained_chain() {
        let mut c = chain(vec![Box::new(range(0, 1, 1).unwrap())]);
        assert_eq!(c.next(), Ok(0));
        c.push(range(7, 8, 1).unwrap());
        assert_eq!(c.members(), 2);
        assert_eq!(c.next(), Ok(7));
    }
}
