//! Catalog search.

mod query;

pub use query::{SearchKind, SearchQuery};
