//! HTTP implementation of the storefront gateways.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use bookshelf_data::{ClientRequestBuilder, FetchClient, FetchError, Response};

use crate::auth::{AuthToken, LoginForm, RegistrationForm, User};
use crate::catalog::CatalogItem;
use crate::checkout::CheckoutRequest;
use crate::error::{AuthError, CatalogError, CheckoutError, LookupError};
use crate::gateway::{AuthGateway, CatalogGateway, CheckoutGateway};
use crate::ids::{ItemId, UserId};
use crate::search::SearchQuery;

/// Shown when a login is refused without a usable message.
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
/// Shown when a signup is refused with a JSON body that carries no message.
pub const SIGNUP_FAILED: &str = "Signup failed";
/// Shown when the profile endpoint refuses without a usable message.
pub const PROFILE_FAILED: &str = "Could not load your profile";
/// Shown when a refusal body is not JSON.
pub const NON_JSON_RESPONSE: &str = "Non-JSON response from server";

/// The storefront REST API.
///
/// Holds the bearer token from the last successful login and attaches it to
/// every request until [`AuthGateway::logout`] is called.
pub struct StorefrontApi {
    client: FetchClient,
    token: RwLock<Option<AuthToken>>,
}

impl StorefrontApi {
    /// Wrap a client whose base URL points at the API root (e.g. `http://host/api`).
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            token: RwLock::new(None),
        }
    }

    /// Whether a login token is held.
    pub fn is_logged_in(&self) -> bool {
        self.current_token().is_some()
    }

    fn current_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|t| t.as_str().to_string())
    }

    fn store_token(&self, token: Option<AuthToken>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: ClientRequestBuilder,
    ) -> Result<T, FetchError> {
        let token = self.current_token();
        request
            .bearer_auth_opt(token.as_deref())
            .send()
            .await?
            .error_for_status()?
            .json()
    }

    async fn get_book(&self, id: &ItemId) -> Result<CatalogItem, FetchError> {
        let request = self.client.get("/books").path_segment(id.as_str())?;
        self.get_json(request).await
    }
}

impl std::fmt::Debug for StorefrontApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontApi")
            .field("client", &self.client)
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

#[async_trait]
impl CatalogGateway for StorefrontApi {
    async fn fetch_item(&self, id: &ItemId) -> Result<CatalogItem, LookupError> {
        tracing::debug!(item_id = %id, "fetching book");
        self.get_book(id).await.map_err(|source| LookupError {
                item_id: id.clone(),
                source,
            })
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<CatalogItem>, CatalogError> {
        tracing::debug!(query = %query.describe(), path = query.path(), "searching catalog");
        let mut request = self.client.get(query.path());
        for (key, value) in query.params() {
            request = request.query(key, value);
        }
        let books: Vec<CatalogItem> = self.get_json(request).await?;
        tracing::debug!(results = books.len(), "search finished");
        Ok(books)
    }

    async fn recommended(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let books: Vec<CatalogItem> = self.get_json(self.client.get("/books/recommended")).await?;
        tracing::debug!(results = books.len(), "recommendations loaded");
        Ok(books)
    }
}

#[async_trait]
impl CheckoutGateway for StorefrontApi {
    async fn submit(
        &self,
        user_id: &UserId,
        request: &CheckoutRequest,
    ) -> Result<(), CheckoutError> {
        let token = self.current_token();
        let response = self
            .client
            .post("/purchase/checkout")
            .query("userId", user_id)
            .bearer_auth_opt(token.as_deref())
            .json(request)?
            .send()
            .await?;

        if response.is_success() {
            Ok(())
        } else {
            Err(CheckoutError::Rejected {
                status: response.status,
            })
        }
    }
}

#[async_trait]
impl AuthGateway for StorefrontApi {
    async fn login(&self, form: &LoginForm) -> Result<AuthToken, AuthError> {
        let response = self.client.post("/auth/login").json(form)?.send().await?;
        if !response.is_success() {
            tracing::warn!(status = response.status, username = %form.username, "login refused");
            return Err(AuthError::Rejected {
                status: response.status,
                message: response
                    .error_message()
                    .unwrap_or_else(|| LOGIN_FAILED.to_string()),
            });
        }

        let token: AuthToken = response.json()?;
        self.store_token(Some(token.clone()));
        tracing::info!(username = %form.username, "logged in");
        Ok(token)
    }

    async fn register(&self, form: &RegistrationForm) -> Result<(), AuthError> {
        form.validate()?;

        let response = self
            .client
            .post("/auth/register")
            .json(form)?
            .send()
            .await?;
        if response.is_success() {
            tracing::info!(username = %form.username, "account created");
            return Ok(());
        }

        tracing::warn!(status = response.status, username = %form.username, "signup refused");
        Err(AuthError::Rejected {
            status: response.status,
            message: signup_failure_message(&response),
        })
    }

    async fn me(&self) -> Result<User, AuthError> {
        let token = self.current_token().ok_or(AuthError::NotLoggedIn)?;
        let response = self
            .client
            .get("/auth/me")
            .bearer_auth_opt(Some(token.as_str()))
            .send()
            .await?;
        if !response.is_success() {
            return Err(AuthError::Rejected {
                status: response.status,
                message: response
                    .error_message()
                    .unwrap_or_else(|| PROFILE_FAILED.to_string()),
            });
        }
        Ok(response.json()?)
    }

    fn logout(&self) {
        self.store_token(None);
    }
}

fn signup_failure_message(response: &Response) -> String {
    if !response.is_json() {
        return NON_JSON_RESPONSE.to_string();
    }
    response
        .error_message()
        .unwrap_or_else(|| SIGNUP_FAILED.to_string())
}
