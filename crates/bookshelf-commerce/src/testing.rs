//! In-memory gateways for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bookshelf_data::FetchError;

use crate::auth::{AuthToken, LoginForm, RegistrationForm, User};
use crate::catalog::CatalogItem;
use crate::checkout::CheckoutRequest;
use crate::error::{AuthError, CatalogError, CheckoutError, LookupError};
use crate::gateway::{AuthGateway, CatalogGateway, CheckoutGateway};
use crate::ids::{ItemId, UserId};
use crate::search::SearchQuery;

/// Catalog backed by a map, with optional per-item latency.
#[derive(Default)]
pub(crate) struct FakeCatalog {
    items: Vec<CatalogItem>,
    recommended: Vec<ItemId>,
    delays: HashMap<String, Duration>,
    lookups: AtomicUsize,
    completions: Arc<Mutex<Vec<String>>>,
}

impl FakeCatalog {
    pub(crate) fn new(items: impl IntoIterator<Item = CatalogItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Make lookups of `id` answer after `delay`.
    pub(crate) fn with_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_string(), delay);
        self
    }

    /// Suggest these ids from `recommended`.
    pub(crate) fn with_recommended(mut self, ids: &[&str]) -> Self {
        self.recommended = ids.iter().map(|id| ItemId::new(*id)).collect();
        self
    }

    /// Ids in the order their lookups finished.
    pub(crate) fn completions(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.completions)
    }

    pub(crate) fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogGateway for FakeCatalog {
    async fn fetch_item(&self, id: &ItemId) -> Result<CatalogItem, LookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(id.as_str()) {
            tokio::time::sleep(*delay).await;
        }
        self.completions.lock().unwrap().push(id.to_string());

        self.items
            .iter()
            .find(|item| &item.id == id)
            .cloned()
            .ok_or_else(|| LookupError {
                item_id: id.clone(),
                source: FetchError::HttpError {
                    status: 404,
                    message: "Not Found".to_string(),
                },
            })
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<CatalogItem>, CatalogError> {
        let matches = |item: &CatalogItem| match query {
            SearchQuery::All => true,
            SearchQuery::Title(k) => item.title.to_lowercase().contains(&k.to_lowercase()),
            SearchQuery::Author(a) => item
                .author
                .as_deref()
                .is_some_and(|author| author.contains(a.as_str())),
            _ => false,
        };
        Ok(self.items.iter().filter(|i| matches(i)).cloned().collect())
    }

    async fn recommended(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        Ok(self
            .items
            .iter()
            .filter(|item| self.recommended.contains(&item.id))
            .cloned()
            .collect())
    }
}

/// How [`FakeCheckout`] answers.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Scripted {
    Accept,
    Reject(u16),
    Unreachable,
}

/// Checkout endpoint that records every submission body.
pub(crate) struct FakeCheckout {
    answer: Scripted,
    submissions: Mutex<Vec<(UserId, String)>>,
}

impl FakeCheckout {
    pub(crate) fn new(answer: Scripted) -> Self {
        Self {
            answer,
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn submissions(&self) -> Vec<(UserId, String)> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheckoutGateway for FakeCheckout {
    async fn submit(&self, user_id: &UserId, request: &CheckoutRequest) -> Result<(), CheckoutError> {
        let body = serde_json::to_string(request).unwrap();
        self.submissions
            .lock()
            .unwrap()
            .push((user_id.clone(), body));

        match self.answer {
            Scripted::Accept => Ok(()),
            Scripted::Reject(status) => Err(CheckoutError::Rejected { status }),
            Scripted::Unreachable => Err(CheckoutError::Transport(FetchError::RequestError(
                "connection refused".to_string(),
            ))),
        }
    }
}

/// Accepts one username/password pair. Registration does no validation of
/// its own, so callers must check forms first.
pub(crate) struct FakeAuth {
    username: String,
    password: String,
    token: Mutex<Option<AuthToken>>,
    registered: Mutex<Vec<String>>,
}

impl FakeAuth {
    pub(crate) fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            token: Mutex::new(None),
            registered: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn token(&self) -> Option<AuthToken> {
        self.token.lock().unwrap().clone()
    }

    pub(crate) fn registered(&self) -> Vec<String> {
        self.registered.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthGateway for FakeAuth {
    async fn login(&self, form: &LoginForm) -> Result<AuthToken, AuthError> {
        if form.username != self.username || form.password != self.password {
            return Err(AuthError::Rejected {
                status: 401,
                message: "Invalid credentials".to_string(),
            });
        }
        let token = AuthToken::new(format!("token-{}", form.username));
        *self.token.lock().unwrap() = Some(token.clone());
        Ok(token)
    }

    async fn register(&self, form: &RegistrationForm) -> Result<(), AuthError> {
        self.registered.lock().unwrap().push(form.username.clone());
        Ok(())
    }

    async fn me(&self) -> Result<User, AuthError> {
        if self.token().is_none() {
            return Err(AuthError::NotLoggedIn);
        }
        Ok(User {
            id: Some(1),
            username: self.username.clone(),
            first_name: None,
            last_name: None,
            email: None,
            role: Some("USER".to_string()),
        })
    }

    fn logout(&self) {
        *self.token.lock().unwrap() = None;
    }
}
