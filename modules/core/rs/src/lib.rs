pub use error::{Error, Result};

mod error;
pub mod list;
