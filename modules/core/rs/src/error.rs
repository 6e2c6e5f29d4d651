use derive_more::{Display, Error};

/// Failures raised by reverse enumeration and the sequences it wraps.
///
/// Reaching the end of a sequence is never an error: enumerators report it by
/// returning `Ok(false)` from `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Error)]
pub enum Error {
    /// An index fell outside `[0, count)`.
    #[display("Index {index} is out of range for a sequence of {count} elements")]
    OutOfRange { index: usize, count: usize },
    /// The sequence was structurally modified (an element was added or removed) after the
    /// enumerator captured its version.
    #[display("Collection was modified; enumeration operation may not execute")]
    CollectionModified,
    /// The wrapper was default-constructed and never bound to a sequence.
    #[display("Can't use indexer; list has not been initialized")]
    Uninitialized,
}

pub type Result<T> = std::result::Result<T, Error>;
