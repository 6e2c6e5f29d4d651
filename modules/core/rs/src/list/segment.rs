use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};

use by_address::ByThinAddress;
use derive_getters::Dissolve;

use super::IndexedList;
use crate::{Error, Result};

/// A bounded `[offset, offset + count)` window over a fixed-size backing array.
///
/// Equality is identity-based: two segments are equal iff they delimit the same range of the
/// same backing storage, regardless of the element values.
#[derive(Dissolve)]
pub struct ArraySegment<'a, T> {
    array: &'a [T],
    offset: usize,
    count: usize,
}

impl<'a, T> ArraySegment<'a, T> {
    pub fn new(array: &'a [T], offset: usize, count: usize) -> Result<Self> {
        match offset.checked_add(count) {
            Some(end) if end <= array.len() => Ok(Self {
                array,
                offset,
                count,
            }),
            _ => Err(Error::OutOfRange {
                index: offset.saturating_add(count),
                count: array.len(),
            }),
        }
    }

    /// Segment spanning the whole array.
    pub fn whole(array: &'a [T]) -> Self {
        Self {
            array,
            offset: 0,
            count: array.len(),
        }
    }

    // By-value accessors: derived `Getters` would hand out `&&'a [T]` and `&usize`
    pub fn array(&self) -> &'a [T] {
        self.array
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Element at `index` relative to the segment start.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&'a T> {
        if index < self.count {
            self.array.get(self.offset + index)
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &'a [T] {
        &self.array[self.offset..self.offset + self.count]
    }
}

impl<T> Clone for ArraySegment<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArraySegment<'_, T> {}

impl<'a, T> From<&'a [T]> for ArraySegment<'a, T> {
    fn from(array: &'a [T]) -> Self {
        Self::whole(array)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for ArraySegment<'a, T> {
    fn from(array: &'a [T; N]) -> Self {
        Self::whole(array)
    }
}

impl<'a, T> From<&'a Vec<T>> for ArraySegment<'a, T> {
    fn from(array: &'a Vec<T>) -> Self {
        Self::whole(array)
    }
}

impl<T> PartialEq for ArraySegment<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ByThinAddress(self.array) == ByThinAddress(other.array)
            && self.offset == other.offset
            && self.count == other.count
    }
}

impl<T> Eq for ArraySegment<'_, T> {}

impl<T> Hash for ArraySegment<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ByThinAddress(self.array).hash(state);
        self.offset.hash(state);
        self.count.hash(state);
    }
}

impl<T: Debug> Debug for ArraySegment<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArraySegment")
            .field("offset", &self.offset)
            .field("count", &self.count)
            .field("items", &self.as_slice())
            .finish()
    }
}

impl<'a, 's, T> IndexedList<'a> for ArraySegment<'s, T> {
    type Item = &'s T;

    fn count(&self) -> usize {
        self.count
    }

    fn item(&'a self, index: usize) -> Option<Self::Item> {
        self.get(index)
    }
}
