use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use by_address::ByThinAddress;
use revenum_core_rs::list::IndexedList;
use revenum_core_rs::{Error, Result};

use crate::cursor::Cursor;
use crate::enumerator::{forward_index, Enumerable, Enumerator};

/// Reverse enumeration over a list that only offers indexed reads.
///
/// There is no version to compare, so modifications are never detected. Each step reads the
/// live list: replaced values are observed, and positions that vanished because the list
/// shrank read as `None`.
pub struct ReadonlyReverseEnumerable<'a, L: ?Sized> {
    list: Option<&'a L>,
}

impl<'a, L: ?Sized + IndexedList<'a>> ReadonlyReverseEnumerable<'a, L> {
    pub fn new(list: &'a L) -> Self {
        Self { list: Some(list) }
    }

    pub fn target(&self) -> Option<&'a L> {
        self.list
    }
}

impl<'a, L: ?Sized + IndexedList<'a>> Enumerable for ReadonlyReverseEnumerable<'a, L> {
    type Item = L::Item;
    type Enumerator = ReadonlyReverseEnumerator<'a, L>;

    fn count(&self) -> usize {
        self.list.map_or(0, |list| list.count())
    }

    fn get(&self, index: usize) -> Result<L::Item> {
        let list = self.list.ok_or(Error::Uninitialized)?;
        let count = list.count();
        list.item(forward_index(index, count)?)
            .ok_or(Error::OutOfRange { index, count })
    }

    fn enumerator(&self) -> ReadonlyReverseEnumerator<'a, L> {
        match self.list {
            Some(list) => ReadonlyReverseEnumerator::new(list),
            None => ReadonlyReverseEnumerator::default(),
        }
    }
}

impl<'a, L: ?Sized + IndexedList<'a>> IntoIterator for ReadonlyReverseEnumerable<'a, L> {
    type Item = L::Item;
    type IntoIter = ReadonlyReverseEnumerator<'a, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.enumerator()
    }
}

impl<L: ?Sized> Clone for ReadonlyReverseEnumerable<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L: ?Sized> Copy for ReadonlyReverseEnumerable<'_, L> {}

impl<L: ?Sized> Default for ReadonlyReverseEnumerable<'_, L> {
    fn default() -> Self {
        Self { list: None }
    }
}

impl<L: ?Sized> PartialEq for ReadonlyReverseEnumerable<'_, L> {
    fn eq(&self, other: &Self) -> bool {
        self.list.map(ByThinAddress) == other.list.map(ByThinAddress)
    }
}

impl<L: ?Sized> Eq for ReadonlyReverseEnumerable<'_, L> {}

impl<L: ?Sized> Hash for ReadonlyReverseEnumerable<'_, L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.list.map(ByThinAddress).hash(state);
    }
}

impl<L: ?Sized> Debug for ReadonlyReverseEnumerable<'_, L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadonlyReverseEnumerable")
            .field("initialized", &self.list.is_some())
            .finish()
    }
}

/// Reverse enumerator over a read-only indexed list.
///
/// `advance` always succeeds while the cursor is above zero. If the list shrank below the
/// cursor, `current` is `None` for that step; the [`Iterator`] impl skips such positions.
pub struct ReadonlyReverseEnumerator<'a, L: ?Sized + IndexedList<'a>> {
    list: Option<&'a L>,
    cursor: Cursor<L::Item>,
}

impl<'a, L: ?Sized + IndexedList<'a>> ReadonlyReverseEnumerator<'a, L> {
    pub fn new(list: &'a L) -> Self {
        Self {
            list: Some(list),
            cursor: Cursor::new(list.count()),
        }
    }
}

impl<'a, L: ?Sized + IndexedList<'a>> Enumerator for ReadonlyReverseEnumerator<'a, L> {
    type Item = L::Item;

    fn advance(&mut self) -> Result<bool> {
        let list = self.list;
        Ok(self
            .cursor
            .advance(|index| list.and_then(|list| list.item(index))))
    }

    fn current(&self) -> Option<&L::Item> {
        self.cursor.current()
    }

    fn reset(&mut self) -> Result<()> {
        self.cursor.rewind(self.list.map_or(0, |list| list.count()));
        Ok(())
    }
}

impl<'a, L: ?Sized + IndexedList<'a>> Iterator for ReadonlyReverseEnumerator<'a, L> {
    type Item = L::Item;

    fn next(&mut self) -> Option<L::Item> {
        let list = self.list;
        self.cursor
            .next(|index| list.and_then(|list| list.item(index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.cursor.remaining()))
    }
}

impl<'a, L: ?Sized + IndexedList<'a>> FusedIterator for ReadonlyReverseEnumerator<'a, L> {}

impl<'a, L: ?Sized + IndexedList<'a>> Default for ReadonlyReverseEnumerator<'a, L> {
    fn default() -> Self {
        Self {
            list: None,
            cursor: Cursor::default(),
        }
    }
}

impl<'a, L: ?Sized + IndexedList<'a>> Debug for ReadonlyReverseEnumerator<'a, L>
where
    L::Item: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadonlyReverseEnumerator")
            .field("cursor", &self.cursor)
            .finish()
    }
}
