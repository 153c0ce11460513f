//! Catalog queries and the endpoints they map to.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The kinds of search offered to shoppers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchKind {
    Title,
    Author,
    Publisher,
    Isbn,
    Price,
    Inventory,
}

impl SearchKind {
    /// Every kind, in menu order.
    pub const ALL: [SearchKind; 6] = [
        SearchKind::Title,
        SearchKind::Author,
        SearchKind::Publisher,
        SearchKind::Isbn,
        SearchKind::Price,
        SearchKind::Inventory,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            SearchKind::Title => "Title",
            SearchKind::Author => "Author",
            SearchKind::Publisher => "Publisher",
            SearchKind::Isbn => "ISBN",
            SearchKind::Price => "Price range",
            SearchKind::Inventory => "Minimum inventory",
        }
    }
}

/// A catalog listing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum SearchQuery {
    /// Every book.
    #[default]
    All,
    /// Title contains keyword.
    Title(String),
    /// Author contains name.
    Author(String),
    /// Publisher contains name.
    Publisher(String),
    /// ISBN contains pattern.
    Isbn(String),
    /// Price between `min` and `max` inclusive.
    PriceRange { min: f64, max: f64 },
    /// More than `n` copies in stock.
    MinInventory(i64),
}

impl SearchQuery {
    /// Build a query from raw form input.
    ///
    /// Keyword kinds use `text` (trimmed). `Price` reads `min` and `max`,
    /// `Inventory` reads `min`; blank or non-numeric bounds are rejected,
    /// as are price bounds that are not finite or out of order.
    pub fn from_input(
        kind: SearchKind,
        text: &str,
        min: &str,
        max: &str,
    ) -> Result<Self, ValidationError> {
        let text = text.trim().to_string();
        Ok(match kind {
            SearchKind::Title => SearchQuery::Title(text),
            SearchKind::Author => SearchQuery::Author(text),
            SearchKind::Publisher => SearchQuery::Publisher(text),
            SearchKind::Isbn => SearchQuery::Isbn(text),
            SearchKind::Price => {
                SearchQuery::price_range(parse_number("minPrice", min)?, parse_number("maxPrice", max)?)?
            }
            SearchKind::Inventory => SearchQuery::MinInventory(parse_number("minInventory", min)?),
        })
    }

    /// A checked price filter. Both bounds must be finite and `min <= max`.
    pub fn price_range(min: f64, max: f64) -> Result<Self, ValidationError> {
        if !min.is_finite() {
            return Err(ValidationError::InvalidNumber("minPrice"));
        }
        if !max.is_finite() {
            return Err(ValidationError::InvalidNumber("maxPrice"));
        }
        if min > max {
            return Err(ValidationError::InvertedRange {
                low: "minPrice",
                high: "maxPrice",
            });
        }
        Ok(SearchQuery::PriceRange { min, max })
    }

    /// Endpoint path relative to the API base.
    pub fn path(&self) -> &'static str {
        match self {
            SearchQuery::All => "/books",
            SearchQuery::Title(_) => "/books/search",
            SearchQuery::Author(_) => "/books/search/author",
            SearchQuery::Publisher(_) => "/books/search/publisher",
            SearchQuery::Isbn(_) => "/books/search/isbn",
            SearchQuery::PriceRange { .. } => "/books/filter/price",
            SearchQuery::MinInventory(_) => "/books/filter/inventory",
        }
    }

    /// Query-string parameters, unencoded.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            SearchQuery::All => Vec::new(),
            SearchQuery::Title(k) => vec![("keyword", k.clone())],
            SearchQuery::Author(a) => vec![("author", a.clone())],
            SearchQuery::Publisher(p) => vec![("publisher", p.clone())],
            SearchQuery::Isbn(i) => vec![("isbn", i.clone())],
            SearchQuery::PriceRange { min, max } => {
                vec![("minPrice", min.to_string()), ("maxPrice", max.to_string())]
            }
            SearchQuery::MinInventory(n) => vec![("minInventory", n.to_string())],
        }
    }

    /// Short human description for headings and logs.
    pub fn describe(&self) -> String {
        match self {
            SearchQuery::All => "all books".to_string(),
            SearchQuery::Title(k) => format!("title contains \"{}\"", k),
            SearchQuery::Author(a) => format!("author contains \"{}\"", a),
            SearchQuery::Publisher(p) => format!("publisher contains \"{}\"", p),
            SearchQuery::Isbn(i) => format!("ISBN contains \"{}\"", i),
            SearchQuery::PriceRange { min, max } => format!("price between {} and {}", min, max),
            SearchQuery::MinInventory(n) => format!("more than {} in stock", n),
        }
    }
}

fn parse_number<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidNumber(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_and_params() {
        let q = SearchQuery::Author("Le Guin".to_string());
        assert_eq!(q.path(), "/books/search/author");
        assert_eq!(q.params(), vec![("author", "Le Guin".to_string())]);

        assert_eq!(SearchQuery::All.path(), "/books");
        assert!(SearchQuery::All.params().is_empty());
    }

    #[test]
    fn test_price_range_params() {
        let q = SearchQuery::from_input(SearchKind::Price, "", "5", " 20.5 ").unwrap();
        assert_eq!(q, SearchQuery::PriceRange { min: 5.0, max: 20.5 });
        assert_eq!(
            q.params(),
            vec![
                ("minPrice", "5".to_string()),
                ("maxPrice", "20.5".to_string())
            ]
        );
    }

    #[test]
    fn test_inventory_from_input() {
        let q = SearchQuery::from_input(SearchKind::Inventory, "", "3", "").unwrap();
        assert_eq!(q, SearchQuery::MinInventory(3));
        assert_eq!(q.path(), "/books/filter/inventory");
    }

    #[test]
    fn test_bad_number_is_rejected() {
        let err = SearchQuery::from_input(SearchKind::Price, "", "cheap", "10").unwrap_err();
        assert_eq!(err, ValidationError::InvalidNumber("minPrice"));
    }

    #[test]
    fn test_non_finite_price_is_rejected() {
        let err = SearchQuery::from_input(SearchKind::Price, "", "NaN", "10").unwrap_err();
        assert_eq!(err, ValidationError::InvalidNumber("minPrice"));

        let err = SearchQuery::from_input(SearchKind::Price, "", "1", "inf").unwrap_err();
        assert_eq!(err, ValidationError::InvalidNumber("maxPrice"));
    }

    #[test]
    fn test_inverted_price_range_is_rejected() {
        let err = SearchQuery::from_input(SearchKind::Price, "", "20", "5").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvertedRange {
                low: "minPrice",
                high: "maxPrice"
            }
        );
        assert_eq!(err.to_string(), "minPrice must not be greater than maxPrice");

        // equal bounds are a single price point
        assert!(SearchQuery::price_range(7.5, 7.5).is_ok());
    }

    #[test]
    fn test_keyword_is_trimmed() {
        let q = SearchQuery::from_input(SearchKind::Title, "  dune ", "", "").unwrap();
        assert_eq!(q, SearchQuery::Title("dune".to_string()));
    }
}
