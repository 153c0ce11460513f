//! Newtype IDs for type-safe identifiers.
//!
//! Catalog identifiers are opaque strings handed out by the backend; the
//! newtypes keep an item id from being passed where a user id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a catalog entry (a book).
    ItemId
);
define_id!(
    /// Identifier of the shopper submitting a checkout.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_str() {
        let id: ItemId = "66f1c0ffee".into();
        assert_eq!(id.as_str(), "66f1c0ffee");
        assert_eq!(id.to_string(), "66f1c0ffee");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ItemId::new("B1");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""B1""#);
        let back: ItemId = serde_json::from_str(r#""B1""#).unwrap();
        assert_eq!(back, id);
    }
}
