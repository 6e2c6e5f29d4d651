use impl_tools::autoimpl;
use revenum_core_rs::Result;

/// A restartable cursor over a finite sequence.
///
/// A fresh enumerator is positioned before the first element: `advance` must return
/// `Ok(true)` before `current` yields anything. `Ok(false)` is the end-of-sequence signal,
/// not an error.
#[autoimpl(for <T: trait + ?Sized> &mut T, Box <T>)]
pub trait Enumerator {
    type Item;

    /// Moves to the next element. Implementations without modification checks never fail.
    fn advance(&mut self) -> Result<bool>;

    /// Element produced by the last successful `advance`, if any.
    fn current(&self) -> Option<&Self::Item>;

    /// Repositions the enumerator before the first element, re-reading the sequence count.
    fn reset(&mut self) -> Result<()>;
}

/// A cheap, copyable factory of [`Enumerator`]s that also supports random access in
/// enumeration order.
pub trait Enumerable {
    type Item;
    type Enumerator: Enumerator<Item = Self::Item>;

    fn count(&self) -> usize;

    /// Element at position `index` in enumeration order.
    fn get(&self, index: usize) -> Result<Self::Item>;

    /// A fresh enumerator positioned before the first element.
    fn enumerator(&self) -> Self::Enumerator;

    /// Type-erased iterator over the enumeration. This allocates; prefer the concrete
    /// enumerator wherever the static type is known.
    fn boxed<'b>(&self) -> Box<dyn Iterator<Item = <Self::Enumerator as Iterator>::Item> + 'b>
    where
        Self::Enumerator: Iterator + 'b,
    {
        Box::new(self.enumerator())
    }
}

/// Maps a position in reverse order onto the forward index it corresponds to.
#[inline(always)]
pub(crate) fn forward_index(index: usize, count: usize) -> Result<usize> {
    if index < count {
        Ok(count - 1 - index)
    } else {
        Err(revenum_core_rs::Error::OutOfRange { index, count })
    }
}
