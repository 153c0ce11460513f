//! Catalog module.
//!
//! Read-only book data as served by the backend, plus the explicit
//! optional-price type shared by the catalog and cart views.

mod item;
mod price;

pub use item::{CatalogItem, UNKNOWN_AUTHOR};
pub use price::{Price, PRICE_NOT_AVAILABLE};
