use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};

use revenum_core_rs::list::{TrackedView, Version};
use revenum_core_rs::{Error, Result};

use crate::enumerator::{forward_index, Enumerable, Enumerator};
use crate::list::State;
use crate::proxy::ListProxy;
use crate::reverse::{ReverseEnumerable, ReverseEnumerator};

/// Reverse enumeration over a read-only view of a [`TrackedVec`](revenum_core_rs::list::TrackedVec).
///
/// Behaves like [`ListReverseEnumerable`](crate::ListReverseEnumerable), but nothing reachable
/// from it can mutate the list. Structural modifications made elsewhere are still detected.
pub struct ImmutableListReverseEnumerable<'a, T> {
    view: Option<TrackedView<'a, T>>,
}

impl<'a, T: Clone + 'a> ImmutableListReverseEnumerable<'a, T> {
    pub fn new(view: TrackedView<'a, T>) -> Self {
        Self {
            view: Some(view),
        }
    }

    pub fn view(&self) -> Option<TrackedView<'a, T>> {
        self.view
    }

    /// Drops the modification check, turning this into the generic reverse enumerable.
    pub fn as_mutable(&self) -> ReverseEnumerable<'a, T> {
        match self.view {
            Some(view) => ReverseEnumerable::from_proxy(ListProxy::Growable(view.as_growable())),
            None => ReverseEnumerable::default(),
        }
    }
}

impl<'a, T: Clone + 'a> Enumerable for ImmutableListReverseEnumerable<'a, T> {
    type Item = T;
    type Enumerator = ImmutableListReverseEnumerator<'a, T>;

    fn count(&self) -> usize {
        self.view.map_or(0, |view| view.len())
    }

    fn get(&self, index: usize) -> Result<T> {
        let view = self.view.ok_or(Error::Uninitialized)?;
        let count = view.len();
        view.get(forward_index(index, count)?)
            .ok_or(Error::OutOfRange { index, count })
    }

    fn enumerator(&self) -> ImmutableListReverseEnumerator<'a, T> {
        match self.view {
            Some(view) => ImmutableListReverseEnumerator::new(view),
            None => ImmutableListReverseEnumerator::default(),
        }
    }
}

impl<'a, T: Clone + 'a> From<ImmutableListReverseEnumerable<'a, T>> for ReverseEnumerable<'a, T> {
    fn from(enumerable: ImmutableListReverseEnumerable<'a, T>) -> Self {
        enumerable.as_mutable()
    }
}

impl<'a, T: Clone + 'a> IntoIterator for ImmutableListReverseEnumerable<'a, T> {
    type Item = Result<T>;
    type IntoIter = ImmutableListReverseEnumerator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.enumerator()
    }
}

impl<T> Clone for ImmutableListReverseEnumerable<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ImmutableListReverseEnumerable<'_, T> {}

impl<T> Default for ImmutableListReverseEnumerable<'_, T> {
    fn default() -> Self {
        Self { view: None }
    }
}

impl<T> PartialEq for ImmutableListReverseEnumerable<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.view == other.view
    }
}

impl<T> Eq for ImmutableListReverseEnumerable<'_, T> {}

impl<T> Hash for ImmutableListReverseEnumerable<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.view.hash(state);
    }
}

impl<T> Debug for ImmutableListReverseEnumerable<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImmutableListReverseEnumerable")
            .field("initialized", &self.view.is_some())
            .field("count", &self.view.map_or(0, |view| view.len()))
            .finish()
    }
}

/// Checked reverse enumerator over a [`TrackedView`].
///
/// Traversal is delegated to a [`ReverseEnumerator`]; this type only guards every `advance` and
/// `reset` with a version comparison, including once the traversal is exhausted.
pub struct ImmutableListReverseEnumerator<'a, T> {
    view: Option<TrackedView<'a, T>>,
    version: Version,
    inner: ReverseEnumerator<'a, T>,
    state: State,
}

impl<'a, T: Clone + 'a> ImmutableListReverseEnumerator<'a, T> {
    pub fn new(view: TrackedView<'a, T>) -> Self {
        Self {
            view: Some(view),
            version: view.version(),
            inner: ReverseEnumerator::from_proxy(ListProxy::Growable(view.as_growable())),
            state: State::Fresh,
        }
    }
}

impl<T> ImmutableListReverseEnumerator<'_, T> {
    pub fn state(&self) -> State {
        self.state
    }

    fn check_version(&mut self) -> Result<()> {
        match self.view {
            Some(view) if view.version() != self.version => {
                log::debug!(
                    "Reverse enumeration of an immutable view observed a structural modification: \
                     expected {}, found {}",
                    self.version,
                    view.version()
                );
                self.state = State::Modified;
                Err(Error::CollectionModified)
            }
            _ => Ok(()),
        }
    }
}

impl<T> Enumerator for ImmutableListReverseEnumerator<'_, T> {
    type Item = T;

    fn advance(&mut self) -> Result<bool> {
        self.check_version()?;

        let more = self.inner.step();
        self.state = if more {
            State::Iterating
        } else {
            State::Exhausted
        };
        Ok(more)
    }

    fn current(&self) -> Option<&T> {
        self.inner.current()
    }

    fn reset(&mut self) -> Result<()> {
        self.check_version()?;

        self.inner.rewind();
        self.state = State::Fresh;
        Ok(())
    }
}

impl<T> Iterator for ImmutableListReverseEnumerator<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Modified {
            return None;
        }
        loop {
            match self.advance() {
                Ok(true) => {
                    if let Some(item) = self.inner.take_current() {
                        return Some(Ok(item));
                    }
                }
                Ok(false) => return None,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

impl<T> Default for ImmutableListReverseEnumerator<'_, T> {
    fn default() -> Self {
        Self {
            view: None,
            version: Version::default(),
            inner: ReverseEnumerator::default(),
            state: State::Fresh,
        }
    }
}

impl<T: Debug> Debug for ImmutableListReverseEnumerator<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImmutableListReverseEnumerator")
            .field("version", &self.version)
            .field("inner", &self.inner)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use itertools::assert_equal;
    use revenum_core_rs::list::TrackedVec;

    use super::*;

    #[test]
    fn test_order_reversed() -> Result<()> {
        let list = TrackedVec::from(vec!['a', 'b', 'c']);
        let enumerable = ImmutableListReverseEnumerable::new(list.view());

        let mut enumerator = enumerable.enumerator();
        let mut seen = Vec::new();
        while enumerator.advance()? {
            seen.extend(enumerator.current().copied());
        }
        assert_eq!(seen, vec!['c', 'b', 'a']);
        assert_eq!(enumerator.state(), State::Exhausted);

        assert_equal(enumerable, [Ok('c'), Ok('b'), Ok('a')]);
        Ok(())
    }

    #[test]
    fn test_external_modification_detected() -> Result<()> {
        let list = TrackedVec::from(vec![1, 2, 3]);
        let mut enumerator = ImmutableListReverseEnumerator::new(list.view());

        assert!(enumerator.advance()?);
        list.insert(0, 0)?;
        assert_eq!(enumerator.advance(), Err(Error::CollectionModified));
        assert_eq!(enumerator.state(), State::Modified);
        assert_eq!(enumerator.reset(), Err(Error::CollectionModified));
        assert_eq!(enumerator.next(), None);
        Ok(())
    }

    #[test]
    fn test_modification_after_last_element() -> Result<()> {
        let list = TrackedVec::from(vec![1]);
        let mut seen = Vec::new();
        let mut failure = None;

        for item in ImmutableListReverseEnumerable::new(list.view()) {
            match item {
                Ok(item) => {
                    seen.push(item);
                    list.push(2);
                }
                Err(err) => failure = Some(err),
            }
        }
        assert_eq!(seen, vec![1]);
        assert_eq!(failure, Some(Error::CollectionModified));
        Ok(())
    }

    #[test]
    fn test_reset() -> Result<()> {
        let list = TrackedVec::from(vec![1, 2, 3]);
        let mut enumerator = ImmutableListReverseEnumerator::new(list.view());

        enumerator.reset()?;
        assert_equal(&mut enumerator, [Ok(3), Ok(2), Ok(1)]);
        enumerator.reset()?;
        assert_equal(&mut enumerator, [Ok(3), Ok(2), Ok(1)]);

        list.set(1, 20)?;
        enumerator.reset()?;
        assert_equal(&mut enumerator, [Ok(3), Ok(20), Ok(1)]);
        Ok(())
    }

    #[test]
    fn test_indexer() -> Result<()> {
        let list = TrackedVec::from(vec!["a", "b", "c"]);
        let enumerable = ImmutableListReverseEnumerable::new(list.view());

        assert_eq!(enumerable.count(), 3);
        assert_eq!(enumerable.get(0)?, "c");
        assert_eq!(enumerable.get(2)?, "a");
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
        let enumerable = ImmutableListReverseEnumerable::<u8>::default();
        assert_eq!(enumerable.count(), 0);
        assert!(enumerable.view().is_none());
        assert_eq!(enumerable.get(0), Err(Error::Uninitialized));

        let mut enumerator = enumerable.enumerator();
        assert!(!enumerator.advance()?);
        enumerator.reset()?;
        assert_eq!(enumerator.next(), None);

        assert!(!enumerable.as_mutable().is_initialized());
        Ok(())
    }

    #[test]
    fn test_as_mutable_drops_check() -> Result<()> {
        let list = TrackedVec::from(vec![1, 2, 3]);
        let enumerable = ImmutableListReverseEnumerable::new(list.view());

        let mutable: ReverseEnumerable<_> = enumerable.into();
        assert_eq!(mutable, enumerable.as_mutable());
        assert_eq!(mutable.get(0)?, 3);

        let mut enumerator = mutable.enumerator();
        assert_eq!(enumerator.next(), Some(3));
        list.push(4);
        assert_equal(enumerator, [2, 1]);
        Ok(())
    }

    #[test]
    fn test_identity_equality() {
        let first = TrackedVec::from(vec![1, 2]);
        let second = TrackedVec::from(vec![1, 2]);

        let a = ImmutableListReverseEnumerable::new(first.view());
        let b = ImmutableListReverseEnumerable::new(TrackedView::from(&first));
        let c = ImmutableListReverseEnumerable::new(second.view());

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, ImmutableListReverseEnumerable::default());

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
