//! Priced views of a cart.

use std::sync::Arc;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::CatalogItem;
use crate::error::ResolutionError;
use crate::gateway::CatalogGateway;
use crate::money::{Currency, Money};

/// A cart line joined with its catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedLine {
    /// The resolved book.
    pub item: CatalogItem,
    /// Requested copies.
    pub quantity: u32,
    /// Unit price times quantity, with an unlisted price counted as zero.
    pub line_total: Money,
}

impl PricedLine {
    /// Price a line. Fails only on overflow.
    pub fn new(item: CatalogItem, quantity: u32) -> Result<Self, ResolutionError> {
        let line_total = item
            .price
            .or_zero()
            .try_multiply(i64::from(quantity))
            .ok_or(ResolutionError::Overflow)?;
        Ok(Self {
            item,
            quantity,
            line_total,
        })
    }
}

/// A fully priced cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    /// Priced lines in cart order.
    pub lines: Vec<PricedLine>,
    /// Sum of quantities.
    pub total_quantity: u64,
    /// Sum of line totals.
    pub grand_total: Money,
}

/// Resolves cart lines against the catalog.
///
/// Holds no state of its own; every call works on the cart it is given.
#[derive(Clone)]
pub struct CartPresenter {
    catalog: Arc<dyn CatalogGateway>,
}

impl CartPresenter {
    /// Create a presenter over a catalog.
    pub fn new(catalog: Arc<dyn CatalogGateway>) -> Self {
        Self { catalog }
    }

    /// Look up every line concurrently and price it.
    ///
    /// All-or-nothing: the first failed lookup fails the whole call and no
    /// partial list is returned. The output follows the cart's line order
    /// whatever order the lookups complete in.
    pub async fn resolve(&self, cart: &Cart) -> Result<Vec<PricedLine>, ResolutionError> {
        let catalog = &self.catalog;
        let lookups = cart.lines().iter().map(|line| async move {
            let item = catalog.fetch_item(&line.item_id).await?;
            PricedLine::new(item, line.quantity)
        });

        let priced = try_join_all(lookups).await;
        match &priced {
            Ok(lines) => tracing::debug!(lines = lines.len(), "cart resolved"),
            Err(e) => tracing::warn!(error = %e, "cart resolution failed"),
        }
        priced
    }

    /// Sum the line totals.
    pub fn grand_total(lines: &[PricedLine]) -> Result<Money, ResolutionError> {
        let currency = lines
            .first()
            .map(|l| l.line_total.currency)
            .unwrap_or_default();
        Money::try_sum(lines.iter().map(|l| &l.line_total), currency)
            .ok_or(ResolutionError::Overflow)
    }

    /// Resolve and total a cart in one step.
    pub async fn summarize(&self, cart: &Cart) -> Result<CartSummary, ResolutionError> {
        let lines = self.resolve(cart).await?;
        let grand_total = Self::grand_total(&lines)?;
        Ok(CartSummary {
            lines,
            total_quantity: cart.total_quantity(),
            grand_total,
        })
    }
}

impl std::fmt::Debug for CartPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartPresenter").finish_non_exhaustive()
    }
}

impl Default for CartSummary {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            total_quantity: 0,
            grand_total: Money::zero(Currency::default()),
        }
    }
}
