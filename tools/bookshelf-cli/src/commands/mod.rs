//! CLI command implementations.

pub mod auth;
pub mod books;
pub mod shop;

use anyhow::{bail, Result};
use bookshelf_commerce::search::SearchQuery;
use clap::Args;

/// Arguments for the books command.
///
/// With no filter every book is listed. At most one filter may be given;
/// `--min-price` and `--max-price` together count as one.
#[derive(Args, Debug)]
pub struct BooksArgs {
    /// Title contains this keyword.
    #[arg(long)]
    pub title: Option<String>,

    /// Author contains this name.
    #[arg(long)]
    pub author: Option<String>,

    /// Publisher contains this name.
    #[arg(long)]
    pub publisher: Option<String>,

    /// ISBN contains this pattern.
    #[arg(long)]
    pub isbn: Option<String>,

    /// Lowest price, inclusive.
    #[arg(long, requires = "max_price")]
    pub min_price: Option<f64>,

    /// Highest price, inclusive.
    #[arg(long, requires = "min_price")]
    pub max_price: Option<f64>,

    /// Only books with more copies in stock than this.
    #[arg(long)]
    pub min_inventory: Option<i64>,
}

impl BooksArgs {
    /// Turn the flags into a single catalog query.
    pub fn query(&self) -> Result<SearchQuery> {
        let mut queries = Vec::new();
        if let Some(title) = &self.title {
            queries.push(SearchQuery::Title(title.trim().to_string()));
        }
        if let Some(author) = &self.author {
            queries.push(SearchQuery::Author(author.trim().to_string()));
        }
        if let Some(publisher) = &self.publisher {
            queries.push(SearchQuery::Publisher(publisher.trim().to_string()));
        }
        if let Some(isbn) = &self.isbn {
            queries.push(SearchQuery::Isbn(isbn.trim().to_string()));
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            queries.push(SearchQuery::price_range(min, max)?);
        }
        if let Some(n) = self.min_inventory {
            queries.push(SearchQuery::MinInventory(n));
        }

        if queries.len() > 1 {
            bail!("Only one search filter can be used at a time");
        }
        Ok(queries.pop().unwrap_or_default())
    }
}

/// Arguments for the login command.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username; prompted for when omitted.
    #[arg(short, long)]
    pub username: Option<String>,
}
