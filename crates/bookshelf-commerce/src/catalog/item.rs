//! Book records as served by the catalog endpoints.

use serde::{Deserialize, Serialize};

use crate::catalog::Price;
use crate::ids::ItemId;

/// Author shown when the record has none.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// A book in the catalog.
///
/// Everything except `id` is optional on the wire; missing text fields
/// deserialize as `None` and a missing price as [`Price::Unlisted`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Backend identifier.
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cover image file name, served under `/books/image/{name}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    #[serde(default)]
    pub price: Price,
    /// Copies in stock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<i64>,
}

impl CatalogItem {
    /// Create a minimal record with a title and price.
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            isbn: None,
            title: title.into(),
            author: None,
            publisher: None,
            description: None,
            image_name: None,
            price,
            inventory: None,
        }
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Author for display; blank or missing authors read "Unknown Author".
    pub fn author_display(&self) -> &str {
        self.author
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
    }

    /// Description for display, empty when missing.
    pub fn description_display(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}
