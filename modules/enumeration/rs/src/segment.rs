use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use revenum_core_rs::list::ArraySegment;
use revenum_core_rs::{Error, Result};

use crate::cursor::Cursor;
use crate::enumerator::{forward_index, Enumerable, Enumerator};

/// Reverse enumeration over a segment of a fixed-size array.
///
/// The backing storage can't change length, so no modification checks are needed. Element
/// values may still change through interior mutability and are observed live.
pub struct ArraySegmentReverseEnumerable<'a, T> {
    segment: Option<ArraySegment<'a, T>>,
}

impl<'a, T> ArraySegmentReverseEnumerable<'a, T> {
    pub fn new(segment: impl Into<ArraySegment<'a, T>>) -> Self {
        Self {
            segment: Some(segment.into()),
        }
    }

    /// Enumerable over `array[offset..offset + count]`.
    pub fn with_range(array: &'a [T], offset: usize, count: usize) -> Result<Self> {
        ArraySegment::new(array, offset, count).map(Self::new)
    }

    pub fn segment(&self) -> Option<ArraySegment<'a, T>> {
        self.segment
    }
}

impl<'a, T> Enumerable for ArraySegmentReverseEnumerable<'a, T> {
    type Item = &'a T;
    type Enumerator = ArraySegmentReverseEnumerator<'a, T>;

    fn count(&self) -> usize {
        self.segment.map_or(0, |segment| segment.count())
    }

    fn get(&self, index: usize) -> Result<&'a T> {
        let segment = self.segment.ok_or(Error::Uninitialized)?;
        let count = segment.count();
        segment
            .get(forward_index(index, count)?)
            .ok_or(Error::OutOfRange { index, count })
    }

    fn enumerator(&self) -> ArraySegmentReverseEnumerator<'a, T> {
        match self.segment {
            Some(segment) => ArraySegmentReverseEnumerator::new(segment),
            None => ArraySegmentReverseEnumerator::default(),
        }
    }
}

impl<'a, T> IntoIterator for ArraySegmentReverseEnumerable<'a, T> {
    type Item = &'a T;
    type IntoIter = ArraySegmentReverseEnumerator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.enumerator()
    }
}

impl<T> Clone for ArraySegmentReverseEnumerable<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArraySegmentReverseEnumerable<'_, T> {}

impl<T> PartialEq for ArraySegmentReverseEnumerable<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.segment == other.segment
    }
}

impl<T> Eq for ArraySegmentReverseEnumerable<'_, T> {}

impl<T> Hash for ArraySegmentReverseEnumerable<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segment.hash(state);
    }
}

impl<T> Default for ArraySegmentReverseEnumerable<'_, T> {
    fn default() -> Self {
        Self { segment: None }
    }
}

impl<T: Debug> Debug for ArraySegmentReverseEnumerable<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArraySegmentReverseEnumerable")
            .field("segment", &self.segment)
            .finish()
    }
}

/// Reverse enumerator over an [`ArraySegment`]; all indexing is relative to the segment start.
pub struct ArraySegmentReverseEnumerator<'a, T> {
    segment: Option<ArraySegment<'a, T>>,
    cursor: Cursor<&'a T>,
}

impl<'a, T> ArraySegmentReverseEnumerator<'a, T> {
    pub fn new(segment: impl Into<ArraySegment<'a, T>>) -> Self {
        let segment = segment.into();
        Self {
            segment: Some(segment),
            cursor: Cursor::new(segment.count()),
        }
    }
}

impl<'a, T> Enumerator for ArraySegmentReverseEnumerator<'a, T> {
    type Item = &'a T;

    fn advance(&mut self) -> Result<bool> {
        let segment = self.segment;
        Ok(self
            .cursor
            .advance(|index| segment.and_then(|segment| segment.get(index))))
    }

    fn current(&self) -> Option<&&'a T> {
        self.cursor.current()
    }

    fn reset(&mut self) -> Result<()> {
        self.cursor
            .rewind(self.segment.map_or(0, |segment| segment.count()));
        Ok(())
    }
}

impl<'a, T> Iterator for ArraySegmentReverseEnumerator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let segment = self.segment;
        self.cursor
            .next(|index| segment.and_then(|segment| segment.get(index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cursor.remaining();
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for ArraySegmentReverseEnumerator<'_, T> {}

impl<T> FusedIterator for ArraySegmentReverseEnumerator<'_, T> {}

impl<T> Clone for ArraySegmentReverseEnumerator<'_, T> {
    fn clone(&self) -> Self {
        Self {
            segment: self.segment,
            cursor: self.cursor.clone(),
        }
    }
}

impl<T> Default for ArraySegmentReverseEnumerator<'_, T> {
    fn default() -> Self {
        Self {
            segment: None,
            cursor: Cursor::default(),
        }
    }
}

impl<T: Debug> Debug for ArraySegmentReverseEnumerator<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArraySegmentReverseEnumerator")
            .field("segment", &self.segment)
            .field("cursor", &self.cursor)
            .finish()
    }
}
