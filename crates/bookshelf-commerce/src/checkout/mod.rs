//! Checkout module.
//!
//! Contains the checkout attempt state machine and the coordinator that
//! submits a cart snapshot to the purchase endpoint.

mod attempt;
mod coordinator;

pub use attempt::{CheckoutAttempt, CheckoutState};
pub use coordinator::{CheckoutCoordinator, CheckoutOutcome, CheckoutRequest, EMPTY_CART};
