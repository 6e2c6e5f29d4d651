pub use enumerator::{Enumerable, Enumerator};
pub use extensions::{in_reverse_order, reverse_enumerator_of, InReverseOrder};
pub use immutable::{ImmutableListReverseEnumerable, ImmutableListReverseEnumerator};
pub use list::{ListReverseEnumerable, ListReverseEnumerator, State};
pub use readonly::{ReadonlyReverseEnumerable, ReadonlyReverseEnumerator};
pub use reverse::{ReverseEnumerable, ReverseEnumerator};
pub use segment::{ArraySegmentReverseEnumerable, ArraySegmentReverseEnumerator};

pub use revenum_core_rs::list::{
    ArraySegment, GrowableList, IndexedList, TrackedVec, TrackedView, Version,
};
pub use revenum_core_rs::{Error, Result};

mod cursor;
mod enumerator;
mod extensions;
mod immutable;
mod list;
mod proxy;
mod readonly;
mod reverse;
mod segment;
