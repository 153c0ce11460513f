//! Storefront domain types and logic for Bookshelf.
//!
//! This crate holds everything a bookstore client needs between the user and
//! the REST backend:
//!
//! - **Cart**: book ids and quantities, and the presenter that prices them
//! - **Catalog**: book records with an explicit "no listed price" state
//! - **Checkout**: single-shot submission of a cart snapshot
//! - **Search**: query kinds and the endpoints they map to
//! - **Session**: one shopper's cart, login and checkout state
//!
//! # Example
//!
//! ```rust,ignore
//! use bookshelf_commerce::prelude::*;
//! use bookshelf_data::{FetchClient, TimeoutConfig};
//!
//! let client = FetchClient::http(TimeoutConfig::default())?
//!     .with_base_url("http://localhost:8080/api");
//! let api = Arc::new(StorefrontApi::new(client));
//! let mut session = StorefrontSession::over_api(UserId::new("1"), api);
//!
//! session.add_to_cart("42");
//! session.add_to_cart("42");
//! let summary = session.view_cart().await?;
//! println!("Total: {}", summary.grand_total.display());
//!
//! match session.checkout().await {
//!     CheckoutOutcome::Success => println!("Order placed"),
//!     CheckoutOutcome::Failure(reason) => eprintln!("{reason}"),
//! }
//! ```

pub mod auth;
pub mod backend;
pub mod error;
pub mod gateway;
pub mod ids;
pub mod money;
pub mod session;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

#[cfg(test)]
mod testing;

pub use error::{
    AuthError, CatalogError, CheckoutError, CommerceError, LookupError, ResolutionError,
    ValidationError,
};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{CatalogItem, Price};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartPresenter, CartSummary, PricedLine};

    // Checkout
    pub use crate::checkout::{
        CheckoutAttempt, CheckoutCoordinator, CheckoutOutcome, CheckoutRequest, CheckoutState,
    };

    // Search
    pub use crate::search::{SearchKind, SearchQuery};

    // Auth and backend
    pub use crate::auth::{AuthToken, LoginForm, RegistrationForm};
    pub use crate::backend::StorefrontApi;
    pub use crate::gateway::{AuthGateway, CatalogGateway, CheckoutGateway};
    pub use crate::session::{StorefrontSession, ViewTicket};
}
