//! Optional catalog price.

use serde::{Deserialize, Serialize};

use crate::money::{Currency, Money};

/// Text shown in place of a price the backend did not send.
pub const PRICE_NOT_AVAILABLE: &str = "Price not available";

/// A catalog price that may be missing.
///
/// Consumers choose their own policy for the missing case: listings show
/// [`PRICE_NOT_AVAILABLE`] via [`Price::display`], cart totals count it as
/// zero via [`Price::or_zero`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Price {
    /// The backend supplied a price.
    Listed(Money),
    /// No price on the record.
    #[default]
    Unlisted,
}

impl Price {
    /// The listed amount, if any.
    pub fn amount(&self) -> Option<Money> {
        match self {
            Price::Listed(m) => Some(*m),
            Price::Unlisted => None,
        }
    }

    /// Whether a price is present.
    pub fn is_listed(&self) -> bool {
        matches!(self, Price::Listed(_))
    }

    /// Catalog rendering policy: the amount, or "Price not available".
    pub fn display(&self) -> String {
        match self {
            Price::Listed(m) => m.display(),
            Price::Unlisted => PRICE_NOT_AVAILABLE.to_string(),
        }
    }

    /// Cart computation policy: the amount, or zero.
    pub fn or_zero(&self) -> Money {
        self.amount()
            .unwrap_or_else(|| Money::zero(Currency::default()))
    }
}

impl From<Option<f64>> for Price {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(amount) if amount.is_finite() => {
                Price::Listed(Money::from_decimal(amount, Currency::default()))
            }
            _ => Price::Unlisted,
        }
    }
}

impl From<Price> for Option<f64> {
    fn from(price: Price) -> Self {
        price.amount().map(|m| m.to_decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_policies_differ() {
        let unlisted = Price::Unlisted;
        assert_eq!(unlisted.display(), "Price not available");
        assert!(unlisted.or_zero().is_zero());

        let listed = Price::from(Some(12.5));
        assert_eq!(listed.display(), "$12.50");
        assert_eq!(listed.or_zero().amount_cents, 1250);
    }

    #[test]
    fn test_deserialize_null_and_number() {
        let p: Price = serde_json::from_str("null").unwrap();
        assert_eq!(p, Price::Unlisted);

        let p: Price = serde_json::from_str("9.99").unwrap();
        assert_eq!(p.amount().unwrap().amount_cents, 999);
    }

    #[test]
    fn test_zero_price_is_still_listed() {
        let p = Price::from(Some(0.0));
        assert!(p.is_listed());
        assert_eq!(p.display(), "$0.00");
    }
}
