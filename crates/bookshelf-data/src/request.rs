//! HTTP request builder.

use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A builder for constructing HTTP requests.
///
/// The builder is also the finished request handed to a
/// [`Transport`](crate::Transport): it carries no connection state.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append a query parameter. Values are percent-encoded when the URL is built.
    pub fn query_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Set the request body as raw bytes.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Append one path segment to the URL.
    ///
    /// Reserved characters in `segment` are percent-encoded, so an id such as
    /// `a/b?c` stays a single segment instead of changing the route.
    pub fn path_segment(mut self, segment: &str) -> Result<Self, FetchError> {
        if matches!(segment, "" | "." | "..") {
            return Err(FetchError::InvalidUrl(format!(
                "{}: bad path segment {:?}",
                self.url, segment
            )));
        }
        let mut url = reqwest::Url::parse(&self.url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.url, e)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.url.clone()))?
            .pop_if_empty()
            .push(segment);
        self.url = url.into();
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// The request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The URL without query parameters.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Query parameters in insertion order, unencoded.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Get a header value (case-insensitive).
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// All headers set on the request.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// The raw request body, if any.
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Build the absolute URL including the encoded query string.
    pub fn full_url(&self) -> Result<reqwest::Url, FetchError> {
        let parsed = if self.query.is_empty() {
            reqwest::Url::parse(&self.url)
        } else {
            reqwest::Url::parse_with_params(&self.url, &self.query)
        };
        parsed.map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.url, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_body_sets_content_type() {
        let req = RequestBuilder::new(Method::Post, "http://shop.test/api/auth/login")
            .json(&serde_json::json!({"username": "ada"}))
            .unwrap();

        assert_eq!(req.header_value("content-type"), Some("application/json"));
        assert_eq!(req.body_bytes(), Some(br#"{"username":"ada"}"#.as_slice()));
    }

    #[test]
    fn test_full_url_encodes_query() {
        let req = RequestBuilder::new(Method::Get, "http://shop.test/api/books/search")
            .query_param("keyword", "war & peace");

        let url = req.full_url().unwrap();
        assert_eq!(
            url.as_str(),
            "http://shop.test/api/books/search?keyword=war+%26+peace"
        );
    }

    #[test]
    fn test_full_url_without_query() {
        let req = RequestBuilder::new(Method::Get, "http://shop.test/api/books");
        assert_eq!(req.full_url().unwrap().as_str(), "http://shop.test/api/books");
    }

    #[test]
    fn test_full_url_rejects_relative() {
        let req = RequestBuilder::new(Method::Get, "/books");
        assert!(matches!(req.full_url(), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_path_segment_is_encoded() {
        let req = RequestBuilder::new(Method::Get, "http://shop.test/api/books")
            .path_segment("../auth/me?x=1#frag")
            .unwrap();
        assert_eq!(
            req.url(),
            "http://shop.test/api/books/..%2Fauth%2Fme%3Fx=1%23frag"
        );

        let url = req.full_url().unwrap();
        assert!(url.path().starts_with("/api/books/"));
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_path_segment_rejects_dot_segments() {
        for segment in ["", ".", ".."] {
            let result =
                RequestBuilder::new(Method::Get, "http://shop.test/api/books").path_segment(segment);
            assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
        }
    }

    #[test]
    fn test_bearer_auth() {
        let req = RequestBuilder::new(Method::Get, "http://shop.test").bearer_auth("abc");
        assert_eq!(req.header_value("Authorization"), Some("Bearer abc"));
    }
}
