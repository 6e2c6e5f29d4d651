use std::hash::{Hash, Hasher};

use by_address::ByThinAddress;
use revenum_core_rs::list::{GrowableList, IndexedList};
use revenum_core_rs::{Error, Result};

/// Borrowed, type-erased handle to either capability set, so the generic enumerator can read
/// any indexed list through one type without boxing it.
pub(crate) enum ListProxy<'a, T> {
    Growable(&'a (dyn GrowableList<'a, Item = T> + 'a)),
    ReadOnly(&'a (dyn IndexedList<'a, Item = T> + 'a)),
    Unbound,
}

impl<'a, T> ListProxy<'a, T> {
    #[inline(always)]
    pub fn count(&self) -> usize {
        match self {
            ListProxy::Growable(list) => list.count(),
            ListProxy::ReadOnly(list) => list.count(),
            ListProxy::Unbound => 0,
        }
    }

    /// Element at forward `index`. Reading through an unbound proxy is an invalid operation.
    #[inline(always)]
    pub fn item(&self, index: usize) -> Result<T> {
        let item = match self {
            ListProxy::Growable(list) => list.item(index),
            ListProxy::ReadOnly(list) => list.item(index),
            ListProxy::Unbound => return Err(Error::Uninitialized),
        };
        item.ok_or(Error::OutOfRange {
            index,
            count: self.count(),
        })
    }

    pub fn is_bound(&self) -> bool {
        !matches!(self, ListProxy::Unbound)
    }

    /// The wrapped list keyed by address, whichever capability it came through.
    fn address(&self) -> Option<ByThinAddress<&'a (dyn IndexedList<'a, Item = T> + 'a)>> {
        match *self {
            ListProxy::Growable(list) => {
                Some(ByThinAddress(list as &'a (dyn IndexedList<'a, Item = T> + 'a)))
            }
            ListProxy::ReadOnly(list) => Some(ByThinAddress(list)),
            ListProxy::Unbound => None,
        }
    }
}

impl<T> Clone for ListProxy<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ListProxy<'_, T> {}

impl<T> Default for ListProxy<'_, T> {
    fn default() -> Self {
        ListProxy::Unbound
    }
}

impl<T> PartialEq for ListProxy<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl<T> Eq for ListProxy<'_, T> {}

impl<T> Hash for ListProxy<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}
