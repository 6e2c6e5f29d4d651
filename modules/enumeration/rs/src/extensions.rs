//! Entry points that pick the most specific reverse enumerable for a sequence's static type.
//!
//! | sequence                                   | enumerable                         |
//! |--------------------------------------------|------------------------------------|
//! | `TrackedVec<T>`, `dyn GrowableList`        | [`ListReverseEnumerable`]          |
//! | `TrackedView<T>`                           | [`ImmutableListReverseEnumerable`] |
//! | `[T]`, `[T; N]`, `Vec<T>`, `ArraySegment`  | [`ArraySegmentReverseEnumerable`]  |
//! | `VecDeque<T>`                              | [`ReadonlyReverseEnumerable`]      |
//! | `dyn IndexedList`                          | [`ReverseEnumerable`]              |

use std::collections::VecDeque;

use revenum_core_rs::list::{ArraySegment, GrowableList, IndexedList, TrackedVec, TrackedView};

use crate::enumerator::Enumerable;
use crate::immutable::ImmutableListReverseEnumerable;
use crate::list::ListReverseEnumerable;
use crate::proxy::ListProxy;
use crate::readonly::ReadonlyReverseEnumerable;
use crate::reverse::ReverseEnumerable;
use crate::segment::ArraySegmentReverseEnumerable;

/// Sequences that can be enumerated back to front.
pub trait InReverseOrder<'a> {
    type Enumerable: Enumerable;

    fn in_reverse_order(&'a self) -> Self::Enumerable;

    fn reverse_enumerator(&'a self) -> <Self::Enumerable as Enumerable>::Enumerator {
        self.in_reverse_order().enumerator()
    }
}

/// Reverse enumerable over `sequence`, chosen by its static type.
pub fn in_reverse_order<'a, S>(sequence: &'a S) -> S::Enumerable
where
    S: InReverseOrder<'a> + ?Sized,
{
    sequence.in_reverse_order()
}

/// Fresh reverse enumerator over `sequence`, chosen by its static type.
pub fn reverse_enumerator_of<'a, S>(sequence: &'a S) -> <S::Enumerable as Enumerable>::Enumerator
where
    S: InReverseOrder<'a> + ?Sized,
{
    sequence.reverse_enumerator()
}

impl<'a, T: Clone + 'a> InReverseOrder<'a> for TrackedVec<T> {
    type Enumerable = ListReverseEnumerable<'a, TrackedVec<T>>;

    fn in_reverse_order(&'a self) -> Self::Enumerable {
        ListReverseEnumerable::new(self)
    }
}

impl<'a, T: 'a> InReverseOrder<'a> for dyn GrowableList<'a, Item = T> + 'a {
    type Enumerable = ListReverseEnumerable<'a, dyn GrowableList<'a, Item = T> + 'a>;

    fn in_reverse_order(&'a self) -> Self::Enumerable {
        ListReverseEnumerable::new(self)
    }
}

impl<'a, 'v, T: Clone + 'v> InReverseOrder<'a> for TrackedView<'v, T> {
    type Enumerable = ImmutableListReverseEnumerable<'v, T>;

    fn in_reverse_order(&'a self) -> Self::Enumerable {
        ImmutableListReverseEnumerable::new(*self)
    }
}

impl<'a, T: 'a> InReverseOrder<'a> for [T] {
    type Enumerable = ArraySegmentReverseEnumerable<'a, T>;

    fn in_reverse_order(&'a self) -> Self::Enumerable {
        ArraySegmentReverseEnumerable::new(self)
    }
}

impl<'a, T: 'a, const N: usize> InReverseOrder<'a> for [T; N] {
    type Enumerable = ArraySegmentReverseEnumerable<'a, T>;

    fn in_reverse_order(&'a self) -> Self::Enumerable {
        ArraySegmentReverseEnumerable::new(self)
    }
}

impl<'a, T: 'a> InReverseOrder<'a> for Vec<T> {
    type Enumerable = ArraySegmentReverseEnumerable<'a, T>;

    fn in_reverse_order(&'a self) -> Self::Enumerable {
        ArraySegmentReverseEnumerable::new(self)
    }
}

impl<'a, 's, T> InReverseOrder<'a> for ArraySegment<'s, T> {
    type Enumerable = ArraySegmentReverseEnumerable<'s, T>;

    fn in_reverse_order(&'a self) -> Self::Enumerable {
        ArraySegmentReverseEnumerable::new(*self)
    }
}

impl<'a, T: 'a> InReverseOrder<'a> for VecDeque<T> {
    type Enumerable = ReadonlyReverseEnumerable<'a, VecDeque<T>>;

    fn in_reverse_order(&'a self) -> Self::Enumerable {
        ReadonlyReverseEnumerable::new(self)
    }
}

impl<'a, T: 'a> InReverseOrder<'a> for dyn IndexedList<'a, Item = T> + 'a {
    type Enumerable = ReverseEnumerable<'a, T>;

    fn in_reverse_order(&'a self) -> Self::Enumerable {
        ReverseEnumerable::from_proxy(ListProxy::ReadOnly(self))
    }
}
