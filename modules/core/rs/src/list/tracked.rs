use std::cell::{Cell, RefCell};
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};

use by_address::ByThinAddress;
use derive_more::Display;

use super::{GrowableList, IndexedList};
use crate::{Error, Result};

/// Opaque snapshot of a [`TrackedVec`]'s structural version.
///
/// Two snapshots compare equal iff no element was inserted or removed between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[display("v{_0}")]
pub struct Version(u64);

/// A growable vector that counts its structural modifications.
///
/// Mutators take `&self`, so the vector can be modified while enumerators hold shared
/// borrows of it. Every insertion or removal bumps the version observed through
/// [`GrowableList::version`]; replacing an element in place with [`TrackedVec::set`] does not.
///
/// Elements are read out by value (`T: Clone`), since no reference into the storage can
/// outlive a call. The type is intentionally `!Sync`: version checks catch same-thread,
/// re-entrant modification, not data races.
pub struct TrackedVec<T> {
    items: RefCell<Vec<T>>,
    version: Cell<u64>,
}

impl<T> TrackedVec<T> {
    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::from(Vec::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Current structural version.
    #[inline(always)]
    pub fn version(&self) -> Version {
        Version(self.version.get())
    }

    #[inline(always)]
    fn bump(&self) {
        self.version.set(self.version.get().wrapping_add(1));
    }

    pub fn push(&self, value: T) {
        self.items.borrow_mut().push(value);
        self.bump();
    }

    pub fn pop(&self) -> Option<T> {
        let popped = self.items.borrow_mut().pop();
        if popped.is_some() {
            self.bump();
        }
        popped
    }

    pub fn insert(&self, index: usize, value: T) -> Result<()> {
        let mut items = self.items.borrow_mut();
        if index > items.len() {
            return Err(Error::OutOfRange {
                index,
                count: items.len(),
            });
        }
        items.insert(index, value);
        drop(items);

        self.bump();
        Ok(())
    }

    pub fn remove(&self, index: usize) -> Result<T> {
        let mut items = self.items.borrow_mut();
        if index >= items.len() {
            return Err(Error::OutOfRange {
                index,
                count: items.len(),
            });
        }
        let removed = items.remove(index);
        drop(items);

        self.bump();
        Ok(removed)
    }

    /// Replaces the element at `index` and returns the previous one. This is not a structural
    /// modification and leaves the version untouched.
    pub fn set(&self, index: usize, value: T) -> Result<T> {
        let mut items = self.items.borrow_mut();
        let count = items.len();
        match items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(Error::OutOfRange { index, count }),
        }
    }

    pub fn extend(&self, values: impl IntoIterator<Item = T>) {
        // `values` may read this vector, so it's drained before the mutable borrow
        let mut values: Vec<T> = values.into_iter().collect();
        if values.is_empty() {
            return;
        }
        self.items.borrow_mut().append(&mut values);
        self.bump();
    }

    pub fn truncate(&self, len: usize) {
        let mut items = self.items.borrow_mut();
        let changed = len < items.len();
        items.truncate(len);
        drop(items);

        if changed {
            self.bump();
        }
    }

    pub fn clear(&self) {
        self.truncate(0);
    }

    /// Read-only capability view of this vector.
    pub fn view(&self) -> TrackedView<'_, T> {
        TrackedView { list: self }
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items.into_inner()
    }
}

impl<T: Clone> TrackedVec<T> {
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.borrow().get(index).cloned()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.borrow().clone()
    }
}

impl<T> From<Vec<T>> for TrackedVec<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: RefCell::new(items),
            version: Cell::new(0),
        }
    }
}

impl<T> FromIterator<T> for TrackedVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> Default for TrackedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for TrackedVec<T> {
    fn clone(&self) -> Self {
        Self::from(self.to_vec())
    }
}

impl<T: Debug> Debug for TrackedVec<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedVec")
            .field("items", &self.items.borrow())
            .field("version", &self.version())
            .finish()
    }
}

impl<'a, T: Clone + 'a> IndexedList<'a> for TrackedVec<T> {
    type Item = T;

    #[inline(always)]
    fn count(&self) -> usize {
        self.len()
    }

    #[inline(always)]
    fn item(&'a self, index: usize) -> Option<Self::Item> {
        self.get(index)
    }
}

impl<'a, T: Clone + 'a> GrowableList<'a> for TrackedVec<T> {
    #[inline(always)]
    fn version(&self) -> Version {
        TrackedVec::version(self)
    }
}

/// Read-only window onto a [`TrackedVec`]: exposes reads and the structural version, but
/// none of the mutators.
pub struct TrackedView<'a, T> {
    list: &'a TrackedVec<T>,
}

impl<'a, T> TrackedView<'a, T> {
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn version(&self) -> Version {
        self.list.version()
    }

    /// The viewed vector as a type-erased growable capability. The trait object has no
    /// mutators either.
    pub fn as_growable(&self) -> &'a (dyn GrowableList<'a, Item = T> + 'a)
    where
        T: Clone + 'a,
    {
        self.list
    }

    /// Whether both views look at the same vector.
    pub fn same_list(&self, other: &Self) -> bool {
        ByThinAddress(self.list) == ByThinAddress(other.list)
    }
}

impl<T: Clone> TrackedView<'_, T> {
    pub fn get(&self, index: usize) -> Option<T> {
        self.list.get(index)
    }
}

impl<T> Clone for TrackedView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TrackedView<'_, T> {}

/// Views are equal iff they look at the same vector.
impl<T> PartialEq for TrackedView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_list(other)
    }
}

impl<T> Eq for TrackedView<'_, T> {}

impl<T> Hash for TrackedView<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ByThinAddress(self.list).hash(state);
    }
}

impl<'a, T> From<&'a TrackedVec<T>> for TrackedView<'a, T> {
    fn from(list: &'a TrackedVec<T>) -> Self {
        list.view()
    }
}

impl<T: Debug> Debug for TrackedView<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TrackedView").field(self.list).finish()
    }
}

impl<'a, 'v, T: Clone + 'a> IndexedList<'a> for TrackedView<'v, T> {
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn item(&'a self, index: usize) -> Option<Self::Item> {
        self.get(index)
    }
}

impl<'a, 'v, T: Clone + 'a> GrowableList<'a> for TrackedView<'v, T> {
    fn version(&self) -> Version {
        TrackedView::version(self)
    }
}
