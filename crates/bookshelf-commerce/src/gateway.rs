//! Seams to the storefront backend.
//!
//! The cart core only talks to these traits. [`StorefrontApi`](crate::backend::StorefrontApi)
//! implements all three over HTTP; tests plug in fakes.

use async_trait::async_trait;

use crate::auth::{AuthToken, LoginForm, RegistrationForm, User};
use crate::catalog::CatalogItem;
use crate::checkout::CheckoutRequest;
use crate::error::{AuthError, CatalogError, CheckoutError, LookupError};
use crate::ids::{ItemId, UserId};
use crate::search::SearchQuery;

/// Read access to the book catalog.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Fetch a single book by id.
    async fn fetch_item(&self, id: &ItemId) -> Result<CatalogItem, LookupError>;

    /// List books matching a query.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Books suggested from the logged-in user's purchase history.
    async fn recommended(&self) -> Result<Vec<CatalogItem>, CatalogError>;
}

/// The purchase endpoint.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Submit a cart snapshot once. `Ok` means the server acknowledged it.
    async fn submit(&self, user_id: &UserId, request: &CheckoutRequest)
        -> Result<(), CheckoutError>;
}

/// Login and signup.
///
/// Implementations keep the token from a successful login for the lifetime
/// of the gateway and attach it to later requests; nothing is persisted.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Log in and remember the returned token.
    async fn login(&self, form: &LoginForm) -> Result<AuthToken, AuthError>;

    /// Create an account. Does not log in.
    async fn register(&self, form: &RegistrationForm) -> Result<(), AuthError>;

    /// Profile of the user the remembered token belongs to.
    async fn me(&self) -> Result<User, AuthError>;

    /// Forget the remembered token.
    fn logout(&self);
}
