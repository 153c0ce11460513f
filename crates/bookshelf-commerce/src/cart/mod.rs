//! Shopping cart module.
//!
//! Contains the cart itself and the presenter that prices it against the
//! catalog.

mod cart;
mod presenter;

pub use cart::{Cart, CartLine};
pub use presenter::{CartPresenter, CartSummary, PricedLine};
