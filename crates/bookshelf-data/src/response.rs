//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a response with a JSON body and matching content type.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(status, headers, value.to_string().into_bytes())
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// Whether the server declared a JSON body.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| ct.contains("application/json"))
    }

    /// Pull a human-readable message out of a JSON error payload.
    ///
    /// Looks at `message` then `error`, skipping blank strings. Returns
    /// `None` for non-JSON bodies or payloads without a usable field.
    pub fn error_message(&self) -> Option<String> {
        if !self.is_json() {
            return None;
        }
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        ["message", "error"]
            .iter()
            .find_map(|key| {
                value
                    .get(key)
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.trim().is_empty())
            })
            .map(str::to_string)
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            let message = self
                .error_message()
                .or_else(|| self.text().ok().filter(|t| !t.is_empty()))
                .unwrap_or_else(|| "Unknown error".to_string());
            Err(FetchError::HttpError {
                status: self.status,
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    fn make_response_with_headers(
        status: u16,
        headers: Vec<(&str, &str)>,
        body: &[u8],
    ) -> Response {
        let headers: HashMap<String, String> = headers
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Response::new(status, headers, body.to_vec())
    }

    // === Status Check Tests ===

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(204, b"").is_success());
        assert!(!make_response(199, b"").is_success());
        assert!(!make_response(300, b"").is_success());
    }

    // === Body Tests ===

    #[test]
    fn test_response_json() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug, PartialEq)]
        struct Book {
            title: String,
        }

        let resp = make_response(200, br#"{"title": "Dune"}"#);
        let book: Book = resp.json().unwrap();
        assert_eq!(book.title, "Dune");
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(resp.text().is_err());
    }

    // === Header Tests ===

    #[test]
    fn test_response_header_case_insensitive() {
        let resp = make_response_with_headers(200, vec![("Content-Type", "text/html")], b"");
        assert_eq!(resp.header("content-type"), Some("text/html"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    #[test]
    fn test_is_json_with_charset() {
        let resp = make_response_with_headers(
            400,
            vec![("content-type", "application/json;charset=UTF-8")],
            b"{}",
        );
        assert!(resp.is_json());
    }

    // === Error Payload Tests ===

    #[test]
    fn test_error_message_prefers_message_field() {
        let resp = Response::json_body(
            409,
            &serde_json::json!({"message": "User already exists", "error": "Conflict"}),
        );
        assert_eq!(resp.error_message().as_deref(), Some("User already exists"));
    }

    #[test]
    fn test_error_message_falls_back_to_error_field() {
        let resp = Response::json_body(401, &serde_json::json!({"error": "Authorization failed"}));
        assert_eq!(resp.error_message().as_deref(), Some("Authorization failed"));
    }

    #[test]
    fn test_error_message_skips_blank_fields() {
        let resp = Response::json_body(400, &serde_json::json!({"message": "", "error": "Bad Request"}));
        assert_eq!(resp.error_message().as_deref(), Some("Bad Request"));

        let resp = Response::json_body(400, &serde_json::json!({"message": "  "}));
        assert_eq!(resp.error_message(), None);
    }

    #[test]
    fn test_error_message_absent_for_plain_text() {
        let resp = make_response(500, br#"{"message": "not declared as json"}"#);
        assert_eq!(resp.error_message(), None);
    }

    // === error_for_status Tests ===

    #[test]
    fn test_error_for_status_success() {
        assert!(make_response(200, b"OK").error_for_status().is_ok());
    }

    #[test]
    fn test_error_for_status_uses_body_text() {
        let err = make_response(404, b"Not Found").error_for_status().unwrap_err();
        match err {
            FetchError::HttpError { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_for_status_empty_body() {
        let err = make_response(502, b"").error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502: Unknown error");
        assert_eq!(err.status(), Some(502));
    }
}
