use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};

use by_address::ByThinAddress;
use derive_more::Display;
use revenum_core_rs::list::{GrowableList, Version};
use revenum_core_rs::{Error, Result};

use crate::cursor::Cursor;
use crate::enumerator::{forward_index, Enumerable, Enumerator};

/// Lifecycle of a [`ListReverseEnumerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum State {
    /// Just created or reset; nothing read yet.
    Fresh,
    /// At least one element was produced and every step passed the version check.
    Iterating,
    /// The front of the list was passed.
    Exhausted,
    /// A version check failed. Terminal: every further `advance`/`reset` fails as well.
    Modified,
}

/// Wraps a growable list to be enumerated back to front.
///
/// Enumerators created from it fail with [`Error::CollectionModified`] once the list is
/// structurally modified, exactly like forward iteration of the same list would. The check
/// can be turned off with [`ListReverseEnumerable::with_modification_check`].
pub struct ListReverseEnumerable<'a, L: ?Sized + GrowableList<'a>> {
    list: Option<&'a L>,
    check_modification: bool,
}

impl<'a, L: ?Sized + GrowableList<'a>> ListReverseEnumerable<'a, L> {
    pub fn new(list: &'a L) -> Self {
        Self {
            list: Some(list),
            check_modification: true,
        }
    }

    /// Enables or disables the structural modification check of produced enumerators.
    pub fn with_modification_check(mut self, enabled: bool) -> Self {
        self.check_modification = enabled;
        self
    }

    pub fn suppress_modification_check(&self) -> bool {
        !self.check_modification
    }

    /// The wrapped list, `None` for a default-constructed enumerable.
    pub fn target(&self) -> Option<&'a L> {
        self.list
    }
}

impl<'a, L: ?Sized + GrowableList<'a>> Enumerable for ListReverseEnumerable<'a, L> {
    type Item = L::Item;
    type Enumerator = ListReverseEnumerator<'a, L>;

    fn count(&self) -> usize {
        self.list.map_or(0, |list| list.count())
    }

    fn get(&self, index: usize) -> Result<L::Item> {
        let list = self.list.ok_or(Error::Uninitialized)?;
        let count = list.count();
        list.item(forward_index(index, count)?)
            .ok_or(Error::OutOfRange { index, count })
    }

    fn enumerator(&self) -> ListReverseEnumerator<'a, L> {
        let enumerator = match self.list {
            Some(list) => ListReverseEnumerator::new(list),
            None => ListReverseEnumerator::default(),
        };
        enumerator.with_modification_check(self.check_modification)
    }
}

impl<'a, L: ?Sized + GrowableList<'a>> IntoIterator for ListReverseEnumerable<'a, L> {
    type Item = Result<L::Item>;
    type IntoIter = ListReverseEnumerator<'a, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.enumerator()
    }
}

impl<'a, L: ?Sized + GrowableList<'a>> Clone for ListReverseEnumerable<'a, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, L: ?Sized + GrowableList<'a>> Copy for ListReverseEnumerable<'a, L> {}

impl<'a, L: ?Sized + GrowableList<'a>> Default for ListReverseEnumerable<'a, L> {
    fn default() -> Self {
        Self {
            list: None,
            check_modification: true,
        }
    }
}

impl<'a, L: ?Sized + GrowableList<'a>> PartialEq for ListReverseEnumerable<'a, L> {
    fn eq(&self, other: &Self) -> bool {
        self.list.map(ByThinAddress) == other.list.map(ByThinAddress)
    }
}

impl<'a, L: ?Sized + GrowableList<'a>> Eq for ListReverseEnumerable<'a, L> {}

impl<'a, L: ?Sized + GrowableList<'a>> Hash for ListReverseEnumerable<'a, L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.list.map(ByThinAddress).hash(state);
    }
}

impl<'a, L: ?Sized + GrowableList<'a>> Debug for ListReverseEnumerable<'a, L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListReverseEnumerable")
            .field("initialized", &self.list.is_some())
            .field("count", &self.count())
            .field("check_modification", &self.check_modification)
            .finish()
    }
}

/// Enumerates a growable list in reverse order, failing on structural modification.
///
/// The list version is captured on construction. Every `advance` and `reset` compares it to
/// the live version before doing anything else, including after the front of the list was
/// passed, so a modification made while handling the last element is still reported.
/// In-place replacement of an element is not a structural modification and goes unnoticed.
pub struct ListReverseEnumerator<'a, L: ?Sized + GrowableList<'a>> {
    list: Option<&'a L>,
    version: Version,
    cursor: Cursor<L::Item>,
    state: State,
    check_modification: bool,
}

impl<'a, L: ?Sized + GrowableList<'a>> ListReverseEnumerator<'a, L> {
    pub fn new(list: &'a L) -> Self {
        Self {
            list: Some(list),
            version: list.version(),
            cursor: Cursor::new(list.count()),
            state: State::Fresh,
            check_modification: true,
        }
    }

    pub fn with_modification_check(mut self, enabled: bool) -> Self {
        self.check_modification = enabled;
        self
    }

    pub fn suppress_modification_check(&self) -> bool {
        !self.check_modification
    }

    pub fn state(&self) -> State {
        self.state
    }

    fn check_version(&mut self) -> Result<()> {
        let Some(list) = self.list else {
            return Ok(());
        };
        if self.check_modification && list.version() != self.version {
            log::debug!(
                "Reverse enumeration observed a structural modification: expected {}, found {}",
                self.version,
                list.version()
            );
            self.state = State::Modified;
            return Err(Error::CollectionModified);
        }
        Ok(())
    }
}

impl<'a, L: ?Sized + GrowableList<'a>> Enumerator for ListReverseEnumerator<'a, L> {
    type Item = L::Item;

    fn advance(&mut self) -> Result<bool> {
        self.check_version()?;

        let list = self.list;
        let more = self
            .cursor
            .advance(|index| list.and_then(|list| list.item(index)));
        self.state = if more {
            State::Iterating
        } else {
            State::Exhausted
        };
        Ok(more)
    }

    fn current(&self) -> Option<&L::Item> {
        self.cursor.current()
    }

    fn reset(&mut self) -> Result<()> {
        self.check_version()?;

        self.cursor.rewind(self.list.map_or(0, |list| list.count()));
        self.state = State::Fresh;
        Ok(())
    }
}

/// Yields `Err(Error::CollectionModified)` once when a modification is detected and stops.
impl<'a, L: ?Sized + GrowableList<'a>> Iterator for ListReverseEnumerator<'a, L> {
    type Item = Result<L::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Modified {
            return None;
        }
        loop {
            match self.advance() {
                Ok(true) => {
                    if let Some(item) = self.cursor.take() {
                        return Some(Ok(item));
                    }
                }
                Ok(false) => return None,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl<'a, L: ?Sized + GrowableList<'a>> Default for ListReverseEnumerator<'a, L> {
    fn default() -> Self {
        Self {
            list: None,
            version: Version::default(),
            cursor: Cursor::default(),
            state: State::Fresh,
            check_modification: true,
        }
    }
}

impl<'a, L: ?Sized + GrowableList<'a>> Debug for ListReverseEnumerator<'a, L>
where
    L::Item: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListReverseEnumerator")
            .field("version", &self.version)
            .field("cursor", &self.cursor)
            .field("state", &self.state)
            .field("check_modification", &self.check_modification)
            .finish()
    }
}
