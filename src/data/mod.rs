//! Data module - reference CSV parsing, indexing and loading

mod index;
mod loader;
mod parser;

pub use index::{ReferenceField, ReferenceIndex};
pub use loader::{LoaderError, ReferenceLoader};
pub use parser::{parse, RawRow};
