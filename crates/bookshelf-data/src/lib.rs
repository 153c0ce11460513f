//! HTTP client utilities for the Bookshelf storefront.
//!
//! Provides a small builder API over a pluggable [`Transport`] with automatic
//! JSON handling. The production transport is [`HttpTransport`] (reqwest);
//! tests substitute their own.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookshelf_data::{FetchClient, TimeoutConfig};
//!
//! let client = FetchClient::http(TimeoutConfig::default())?
//!     .with_base_url("http://localhost:8080/api");
//!
//! let books: Vec<Book> = client
//!     .get("/books/search")
//!     .query("keyword", "rust")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;
mod transport;

use std::collections::HashMap;
use std::sync::Arc;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use transport::{HttpTransport, TimeoutConfig, Transport};

/// HTTP client for making outbound requests.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers.keys())
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client over an arbitrary transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport,
        }
    }

    /// Create a client backed by [`HttpTransport`].
    pub fn http(timeouts: TimeoutConfig) -> Result<Self, FetchError> {
        Ok(Self::new(Arc::new(HttpTransport::new(timeouts)?)))
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.builder = self.builder.query_param(key, value);
        self
    }

    /// Append a percent-encoded path segment.
    pub fn path_segment(mut self, segment: &str) -> Result<Self, FetchError> {
        self.builder = self.builder.path_segment(segment)?;
        Ok(self)
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Add a bearer token authorization header when a token is present.
    pub fn bearer_auth_opt(mut self, token: Option<&str>) -> Self {
        if let Some(token) = token {
            self.builder = self.builder.bearer_auth(token);
        }
        self
    }

    /// Inspect the request as built so far.
    pub fn as_request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.transport.execute(self.builder).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Response, Transport};
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct EchoTransport {
        seen: Mutex<Vec<RequestBuilder>>,
    }

    #[async_trait]
    impl Transport for EchoTransport {
        async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
            self.seen.lock().unwrap().push(request);
            Ok(Response::new(204, HashMap::new(), Vec::new()))
        }
    }

    #[test]
    fn test_base_url_joined() {
        let client = FetchClient::new(Arc::new(EchoTransport::default()))
            .with_base_url("http://shop.test/api/");
        let req = client.get("/books");
        assert_eq!(req.as_request().url(), "http://shop.test/api/books");
    }

    #[test]
    fn test_absolute_url_bypasses_base() {
        let client = FetchClient::new(Arc::new(EchoTransport::default()))
            .with_base_url("http://shop.test/api");
        let req = client.get("https://cdn.test/cover.jpg");
        assert_eq!(req.as_request().url(), "https://cdn.test/cover.jpg");
    }

    #[tokio::test]
    async fn test_send_passes_request_to_transport() {
        let transport = Arc::new(EchoTransport::default());
        let client = FetchClient::new(transport.clone())
            .with_base_url("http://shop.test/api")
            .with_default_header("Accept", "application/json");

        let resp = client
            .post("/purchase/checkout")
            .query("userId", 1)
            .bearer_auth_opt(Some("tok"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status, 204);

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let req = &seen[0];
        assert_eq!(req.method(), Method::Post);
        assert_eq!(req.query(), &[("userId".to_string(), "1".to_string())]);
        assert_eq!(req.header_value("accept"), Some("application/json"));
        assert_eq!(req.header_value("authorization"), Some("Bearer tok"));
    }
}
