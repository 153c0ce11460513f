//! Commerce error types.
//!
//! Each user action has its own error type so callers can match on exactly
//! what that action can produce. [`CommerceError`] gathers them for code
//! that does not care which action failed.

use bookshelf_data::FetchError;
use thiserror::Error;

use crate::ids::ItemId;

/// A single catalog lookup failed.
#[derive(Error, Debug)]
#[error("Failed to load book {item_id}: {source}")]
pub struct LookupError {
    /// The item that could not be fetched.
    pub item_id: ItemId,
    /// What went wrong on the wire.
    pub source: FetchError,
}

/// Turning a cart into priced lines failed as a whole.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// One of the per-line lookups failed; no partial result is produced.
    #[error("Could not load your cart: {0}")]
    Lookup(#[from] LookupError),

    /// A line or cart total did not fit the money representation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

/// Listing or searching the catalog failed.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog endpoint could not be reached or answered with an error.
    #[error("An error occurred while searching for books: {0}")]
    Fetch(#[from] FetchError),
}

/// The checkout submission failed.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// The server answered with a non-success status.
    #[error("Checkout failed (HTTP {status}).")]
    Rejected { status: u16 },

    /// The request never completed.
    #[error("An error occurred during checkout: {0}")]
    Transport(#[from] FetchError),
}

/// Client-side form validation failed before any network call.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Required fields were blank.
    #[error("All fields are required (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A numeric field could not be parsed.
    #[error("{0} must be a number")]
    InvalidNumber(&'static str),

    /// The lower bound of a range is above the upper bound.
    #[error("{low} must not be greater than {high}")]
    InvertedRange {
        low: &'static str,
        high: &'static str,
    },
}

/// Login or signup failed.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The form was rejected locally.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server refused the request.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The action needs a login and there is none.
    #[error("You must be logged in to do that")]
    NotLoggedIn,

    /// The request never completed.
    #[error("Request failed: {0}")]
    Transport(#[from] FetchError),
}

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },
}
