use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use revenum_core_rs::list::{GrowableList, IndexedList};
use revenum_core_rs::{Error, Result};

use crate::cursor::Cursor;
use crate::enumerator::{forward_index, Enumerable, Enumerator};
use crate::proxy::ListProxy;

/// Wraps any indexed list to be enumerated back to front.
///
/// The list is read through a type-erased capability, so one enumerable type covers every
/// list shape. No modification checks are made: the count is read when an enumerator is
/// created or reset, and each step reads the live list.
///
/// Equality and hashing look at the identity of the wrapped list, never at its contents.
pub struct ReverseEnumerable<'a, T> {
    list: ListProxy<'a, T>,
}

impl<'a, T> ReverseEnumerable<'a, T> {
    pub fn new<L: IndexedList<'a, Item = T> + 'a>(list: &'a L) -> Self {
        Self::from_proxy(ListProxy::ReadOnly(list))
    }

    pub fn growable<G: GrowableList<'a, Item = T> + 'a>(list: &'a G) -> Self {
        Self::from_proxy(ListProxy::Growable(list))
    }

    pub(crate) fn from_proxy(list: ListProxy<'a, T>) -> Self {
        Self { list }
    }

    /// Whether the enumerable wraps a list, i.e. wasn't default-constructed.
    pub fn is_initialized(&self) -> bool {
        self.list.is_bound()
    }
}

impl<'a, T> Enumerable for ReverseEnumerable<'a, T> {
    type Item = T;
    type Enumerator = ReverseEnumerator<'a, T>;

    fn count(&self) -> usize {
        self.list.count()
    }

    fn get(&self, index: usize) -> Result<T> {
        if !self.list.is_bound() {
            return Err(Error::Uninitialized);
        }
        self.list.item(forward_index(index, self.list.count())?)
    }

    fn enumerator(&self) -> ReverseEnumerator<'a, T> {
        ReverseEnumerator::from_proxy(self.list)
    }
}

impl<'a, T> IntoIterator for ReverseEnumerable<'a, T> {
    type Item = T;
    type IntoIter = ReverseEnumerator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.enumerator()
    }
}

impl<T> Clone for ReverseEnumerable<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ReverseEnumerable<'_, T> {}

impl<T> Default for ReverseEnumerable<'_, T> {
    fn default() -> Self {
        Self::from_proxy(ListProxy::Unbound)
    }
}

impl<T> PartialEq for ReverseEnumerable<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list
    }
}

impl<T> Eq for ReverseEnumerable<'_, T> {}

impl<T> Hash for ReverseEnumerable<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.list.hash(state);
    }
}

impl<T> Debug for ReverseEnumerable<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReverseEnumerable")
            .field("initialized", &self.list.is_bound())
            .field("count", &self.list.count())
            .finish()
    }
}

/// Enumerates the elements of an indexed list in reverse order.
pub struct ReverseEnumerator<'a, T> {
    list: ListProxy<'a, T>,
    cursor: Cursor<T>,
}

impl<'a, T> ReverseEnumerator<'a, T> {
    pub fn new<L: IndexedList<'a, Item = T> + 'a>(list: &'a L) -> Self {
        Self::from_proxy(ListProxy::ReadOnly(list))
    }

    pub fn growable<G: GrowableList<'a, Item = T> + 'a>(list: &'a G) -> Self {
        Self::from_proxy(ListProxy::Growable(list))
    }

    pub(crate) fn from_proxy(list: ListProxy<'a, T>) -> Self {
        Self {
            cursor: Cursor::new(list.count()),
            list,
        }
    }

    /// Steps the traversal without going through the checked protocol.
    #[inline(always)]
    pub(crate) fn step(&mut self) -> bool {
        let list = self.list;
        self.cursor.advance(|index| list.item(index).ok())
    }

    #[inline(always)]
    pub(crate) fn rewind(&mut self) {
        self.cursor.rewind(self.list.count());
    }

    #[inline(always)]
    pub(crate) fn take_current(&mut self) -> Option<T> {
        self.cursor.take()
    }
}

impl<T> Enumerator for ReverseEnumerator<'_, T> {
    type Item = T;

    fn advance(&mut self) -> Result<bool> {
        Ok(self.step())
    }

    fn current(&self) -> Option<&T> {
        self.cursor.current()
    }

    fn reset(&mut self) -> Result<()> {
        self.rewind();
        Ok(())
    }
}

impl<T> Iterator for ReverseEnumerator<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let list = self.list;
        self.cursor.next(|index| list.item(index).ok())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.cursor.remaining()))
    }
}

impl<T> FusedIterator for ReverseEnumerator<'_, T> {}

impl<T> Default for ReverseEnumerator<'_, T> {
    fn default() -> Self {
        Self::from_proxy(ListProxy::Unbound)
    }
}

impl<T: Debug> Debug for ReverseEnumerator<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReverseEnumerator")
            .field("cursor", &self.cursor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use itertools::assert_equal;
    use revenum_core_rs::list::TrackedVec;

    use super::*;

    #[test]
    fn test_order_reversed() -> Result<()> {
        let source = vec!["a", "b", "c"];
        let mut enumerator = ReverseEnumerator::new(&source);

        for expected in ["c", "b", "a"] {
            assert!(enumerator.advance()?);
            assert_eq!(enumerator.current(), Some(&&expected));
        }
        assert!(!enumerator.advance()?);
        assert_eq!(enumerator.current(), None);
        Ok(())
    }

    #[test]
    fn test_empty() -> Result<()> {
        let source: Vec<u8> = Vec::new();
        let mut enumerator = ReverseEnumerable::new(&source).enumerator();
        assert!(!enumerator.advance()?);
        assert_eq!(ReverseEnumerable::new(&source).into_iter().count(), 0);
        Ok(())
    }

    #[test]
    fn test_reset_repeats_traversal() -> Result<()> {
        let source = TrackedVec::from(vec![1, 2, 3, 4]);
        let mut enumerator = ReverseEnumerator::growable(&source);

        assert!(enumerator.advance()?);
        assert!(enumerator.advance()?);
        enumerator.reset()?;
        assert_eq!(enumerator.current(), None);
        assert_equal(&mut enumerator, [4, 3, 2, 1]);

        enumerator.reset()?;
        assert_equal(enumerator, [4, 3, 2, 1]);
        Ok(())
    }

    #[test]
    fn test_no_modification_checks() -> Result<()> {
        let source = TrackedVec::from(vec![1, 2, 3]);
        let mut enumerator = ReverseEnumerator::growable(&source);

        assert!(enumerator.advance()?);
        assert_eq!(enumerator.current(), Some(&3));

        source.push(4);
        source.set(1, 20)?;
        assert!(enumerator.advance()?);
        assert_eq!(enumerator.current(), Some(&20));

        // Reset picks up the new count
        enumerator.reset()?;
        assert_equal(enumerator, [4, 3, 20, 1]);
        Ok(())
    }

    #[test]
    fn test_shrunk_list_is_skipped() -> Result<()> {
        let source = TrackedVec::from(vec![1, 2, 3, 4]);
        let mut enumerator = ReverseEnumerator::growable(&source);
        source.truncate(2);

        // Positions 3 and 2 vanished; the protocol still steps over them
        assert!(enumerator.advance()?);
        assert_eq!(enumerator.current(), None);

        enumerator.reset()?;
        source.extend([3, 4]);
        let mut iter = ReverseEnumerator::growable(&source);
        source.truncate(1);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), None);
        Ok(())
    }

    #[test]
    fn test_indexer() -> Result<()> {
        let source: VecDeque<_> = ["a", "b", "c"].into_iter().collect();
        let enumerable = ReverseEnumerable::new(&source);

        assert_eq!(enumerable.count(), 3);
        assert_eq!(enumerable.get(0)?, &"c");
        assert_eq!(enumerable.get(2)?, &"a");
        for i in 0..source.len() {
            assert_eq!(enumerable.get(source.len() - 1 - i)?, &source[i]);
        }

        assert_eq!(
            enumerable.get(3),
            Err(Error::OutOfRange { index: 3, count: 3 })
        );
        assert_eq!(
            enumerable.get(usize::MAX),
            Err(Error::OutOfRange { index: usize::MAX, count: 3 })
        );
        Ok(())
    }

    #[test]
    fn test_uninitialized() -> Result<()> {
        let enumerable = ReverseEnumerable::<u8>::default();
        assert!(!enumerable.is_initialized());
        assert_eq!(enumerable.count(), 0);
        assert_eq!(enumerable.get(0), Err(Error::Uninitialized));

        let mut enumerator = enumerable.enumerator();
        assert!(!enumerator.advance()?);
        enumerator.reset()?;
        assert!(!enumerator.advance()?);
        assert_eq!(ReverseEnumerator::<u8>::default().next(), None);
        Ok(())
    }

    #[test]
    fn test_identity_equality() {
        let first = vec![1, 2, 3];
        let second = vec![1, 2, 3];

        let a = ReverseEnumerable::new(&first);
        let b = ReverseEnumerable::new(&first);
        let c = ReverseEnumerable::new(&second);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, ReverseEnumerable::default());

        // Traversal state doesn't matter
        let mut enumerator = a.enumerator();
        enumerator.next();
        assert_eq!(a, b);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_boxed() {
        let source = vec![1, 2, 3];
        let boxed = ReverseEnumerable::new(&source).boxed();
        assert_equal(boxed, [&3, &2, &1]);
    }
}
