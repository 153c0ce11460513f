//! Cart and cart line types.

use crate::ids::ItemId;
use serde::{Deserialize, Serialize};

/// One entry in the cart: a book and how many copies were requested.
///
/// Serializes as `{"bookId": "...", "quantity": n}`, the shape the checkout
/// endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartLine {
    /// The requested book.
    #[serde(rename = "bookId")]
    pub item_id: ItemId,
    /// Requested copies, always at least 1 while the line is in a cart.
    pub quantity: u32,
}

impl CartLine {
    /// Create a line.
    pub fn new(item_id: impl Into<ItemId>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
        }
    }
}

/// A shopping cart.
///
/// Holds at most one line per item, in order of first addition. Quantities
/// are never zero: a line that would drop to zero is removed. The cart knows
/// nothing about prices or availability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one copy of an item.
    ///
    /// Increments the existing line or appends a new one. Never fails; the
    /// quantity saturates at `u32::MAX`. Returns the line's new quantity.
    pub fn add(&mut self, item_id: impl Into<ItemId>) -> u32 {
        let item_id = item_id.into();
        if let Some(existing) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.quantity;
        }
        self.lines.push(CartLine::new(item_id, 1));
        1
    }

    /// Remove one copy of an item. The line goes away when it reaches zero.
    ///
    /// Returns false if the item was not in the cart.
    pub fn decrement(&mut self, item_id: &ItemId) -> bool {
        let Some(pos) = self.position(item_id) else {
            return false;
        };
        let line = &mut self.lines[pos];
        if line.quantity <= 1 {
            self.lines.remove(pos);
        } else {
            line.quantity -= 1;
        }
        true
    }

    /// Set an item's quantity outright.
    ///
    /// Zero removes the line. A positive quantity for an absent item appends
    /// a new line. Returns false only when asked to zero an absent item.
    pub fn set_quantity(&mut self, item_id: &ItemId, quantity: u32) -> bool {
        match (self.position(item_id), quantity) {
            (Some(pos), 0) => {
                self.lines.remove(pos);
                true
            }
            (Some(pos), q) => {
                self.lines[pos].quantity = q;
                true
            }
            (None, 0) => false,
            (None, q) => {
                self.lines.push(CartLine::new(item_id.clone(), q));
                true
            }
        }
    }

    /// Remove an item's line entirely.
    pub fn remove(&mut self, item_id: &ItemId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.item_id != item_id);
        self.lines.len() < len_before
    }

    /// Clear all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// The lines in order of first addition.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for an item.
    pub fn get(&self, item_id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.item_id == item_id)
    }

    fn position(&self, item_id: &ItemId) -> Option<usize> {
        self.lines.iter().position(|l| &l.item_id == item_id)
    }
}
