//! Capability traits for sequences that can be read by integer index.
//!
//! The traits take the borrow lifetime as a parameter so that the produced item may either
//! borrow from the sequence (`&'a T` for slices and vectors) or be an owned copy read out of a
//! sequence with interior mutability ([`TrackedVec`]). Both traits are object safe, which lets
//! enumerators erase the concrete sequence type without allocating.

use std::collections::VecDeque;

pub use segment::ArraySegment;
pub use tracked::{TrackedVec, TrackedView, Version};

mod segment;
mod tracked;

/// A sequence with a known element count and random read access by index.
pub trait IndexedList<'a> {
    type Item;

    /// Number of elements currently in the sequence.
    fn count(&self) -> usize;

    /// Element at `index`, or `None` if `index >= self.count()`.
    fn item(&'a self, index: usize) -> Option<Self::Item>;
}

/// An [`IndexedList`] that can grow and shrink, and reports a version that changes on every
/// structural modification (insertion or removal, but not in-place replacement).
pub trait GrowableList<'a>: IndexedList<'a> {
    fn version(&self) -> Version;
}

impl<'a, T: 'a> IndexedList<'a> for [T] {
    type Item = &'a T;

    #[inline(always)]
    fn count(&self) -> usize {
        self.len()
    }

    #[inline(always)]
    fn item(&'a self, index: usize) -> Option<Self::Item> {
        self.get(index)
    }
}

impl<'a, T: 'a, const N: usize> IndexedList<'a> for [T; N] {
    type Item = &'a T;

    #[inline(always)]
    fn count(&self) -> usize {
        N
    }

    #[inline(always)]
    fn item(&'a self, index: usize) -> Option<Self::Item> {
        self.get(index)
    }
}

impl<'a, T: 'a> IndexedList<'a> for Vec<T> {
    type Item = &'a T;

    #[inline(always)]
    fn count(&self) -> usize {
        self.len()
    }

    #[inline(always)]
    fn item(&'a self, index: usize) -> Option<Self::Item> {
        self.get(index)
    }
}

impl<'a, T: 'a> IndexedList<'a> for VecDeque<T> {
    type Item = &'a T;

    #[inline(always)]
    fn count(&self) -> usize {
        self.len()
    }

    #[inline(always)]
    fn item(&'a self, index: usize) -> Option<Self::Item> {
        self.get(index)
    }
}
