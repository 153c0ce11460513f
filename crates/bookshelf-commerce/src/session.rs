//! A shopper's session with the storefront.
//!
//! [`StorefrontSession`] owns everything a shopping run needs: the cart, the
//! user the checkout is made for, the gateways, and the last checkout
//! attempt. It is created once and handed around by `&mut`, so nothing
//! about the cart lives in globals.

use std::sync::Arc;

use crate::auth::{LoginForm, RegistrationForm, User};
use crate::backend::StorefrontApi;
use crate::cart::{Cart, CartPresenter, CartSummary};
use crate::catalog::CatalogItem;
use crate::checkout::{CheckoutAttempt, CheckoutCoordinator, CheckoutOutcome};
use crate::error::{AuthError, CatalogError, ResolutionError};
use crate::gateway::{AuthGateway, CatalogGateway, CheckoutGateway};
use crate::ids::{ItemId, UserId};
use crate::search::SearchQuery;

/// Marks one rendering of a view.
///
/// Only the most recently issued ticket is current; results that arrive for
/// an older ticket belong to a superseded view and should be dropped.
///
/// A caller that awaits each load while holding `&mut StorefrontSession`
/// cannot start a second view mid-load, so its ticket is always current.
/// Tickets matter to front ends that share the session behind a lock and
/// let loads overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTicket(u64);

/// One shopper's storefront state.
pub struct StorefrontSession {
    user_id: UserId,
    username: Option<String>,
    cart: Cart,
    catalog: Arc<dyn CatalogGateway>,
    presenter: CartPresenter,
    coordinator: CheckoutCoordinator,
    auth: Arc<dyn AuthGateway>,
    last_checkout: CheckoutAttempt,
    view_generation: u64,
}

impl StorefrontSession {
    /// Start a session with an empty cart.
    pub fn new(
        user_id: UserId,
        catalog: Arc<dyn CatalogGateway>,
        checkout: Arc<dyn CheckoutGateway>,
        auth: Arc<dyn AuthGateway>,
    ) -> Self {
        tracing::debug!(%user_id, "session started");
        Self {
            user_id,
            username: None,
            cart: Cart::new(),
            presenter: CartPresenter::new(Arc::clone(&catalog)),
            catalog,
            coordinator: CheckoutCoordinator::new(checkout),
            auth,
            last_checkout: CheckoutAttempt::new(),
            view_generation: 0,
        }
    }

    /// Start a session where one API client serves every gateway.
    pub fn over_api(user_id: UserId, api: Arc<StorefrontApi>) -> Self {
        Self::new(user_id, api.clone(), api.clone(), api)
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Name of the logged-in user, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The most recent checkout attempt (idle before the first checkout).
    pub fn last_checkout(&self) -> &CheckoutAttempt {
        &self.last_checkout
    }

    /// List catalog books matching `query`.
    pub async fn browse(&self, query: &SearchQuery) -> Result<Vec<CatalogItem>, CatalogError> {
        self.catalog.search(query).await
    }

    /// Put one copy of a book in the cart and return its new quantity.
    pub fn add_to_cart(&mut self, item_id: impl Into<ItemId>) -> u32 {
        let item_id = item_id.into();
        let quantity = self.cart.add(item_id.clone());
        tracing::debug!(%item_id, quantity, "added to cart");
        quantity
    }

    /// Take a book out of the cart entirely.
    pub fn remove_from_cart(&mut self, item_id: &ItemId) -> bool {
        self.cart.remove(item_id)
    }

    /// Badge count: total copies in the cart.
    pub fn cart_count(&self) -> u64 {
        self.cart.total_quantity()
    }

    /// Books suggested for the logged-in user. Empty when the store has
    /// nothing to suggest.
    pub async fn recommended(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        self.catalog.recommended().await
    }

    /// Price the cart against the catalog.
    pub async fn view_cart(&self) -> Result<CartSummary, ResolutionError> {
        self.presenter.summarize(&self.cart).await
    }

    /// Submit the cart and clear it if, and only if, the order went through.
    pub async fn checkout(&mut self) -> CheckoutOutcome {
        let mut attempt = CheckoutAttempt::new();
        let outcome = match self
            .coordinator
            .run(&mut attempt, &self.cart, &self.user_id)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => CheckoutOutcome::Failure(e.to_string()),
        };

        if outcome.is_success() {
            self.cart.clear();
        }
        self.last_checkout = attempt;
        outcome
    }

    /// Log in through the auth gateway.
    pub async fn login(&mut self, form: &LoginForm) -> Result<(), AuthError> {
        self.auth.login(form).await?;
        self.username = Some(form.username.clone());
        Ok(())
    }

    /// Create an account. The session stays logged out.
    ///
    /// Incomplete forms are rejected here, before any gateway is called.
    pub async fn register(&self, form: &RegistrationForm) -> Result<(), AuthError> {
        form.validate()?;
        self.auth.register(form).await
    }

    /// Profile of the logged-in user.
    pub async fn profile(&self) -> Result<User, AuthError> {
        if self.username.is_none() {
            return Err(AuthError::NotLoggedIn);
        }
        self.auth.me().await
    }

    pub fn logout(&mut self) {
        self.auth.logout();
        self.username = None;
    }

    /// Issue a ticket for a new rendering, superseding all earlier ones.
    pub fn begin_view(&mut self) -> ViewTicket {
        self.view_generation += 1;
        ViewTicket(self.view_generation)
    }

    /// Whether `ticket` belongs to the latest rendering.
    pub fn is_current_view(&self, ticket: ViewTicket) -> bool {
        ticket.0 == self.view_generation
    }

    /// End the session. The cart and any login token are discarded.
    pub fn close(self) {
        self.auth.logout();
        tracing::debug!(
            user_id = %self.user_id,
            abandoned_lines = self.cart.len(),
            "session closed"
        );
    }
}

impl std::fmt::Debug for StorefrontSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontSession")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("cart", &self.cart)
            .field("last_checkout", &self.last_checkout)
            .finish_non_exhaustive()
    }
}
