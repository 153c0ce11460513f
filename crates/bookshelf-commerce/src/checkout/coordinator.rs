//! Submitting a cart for purchase.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine};
use crate::checkout::CheckoutAttempt;
use crate::gateway::CheckoutGateway;
use crate::ids::UserId;
use crate::CommerceError;

/// Reason reported when checkout is attempted with nothing in the cart.
pub const EMPTY_CART: &str = "Your cart is empty.";

/// The body of a checkout submission: the cart's lines at call time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutRequest {
    lines: Vec<CartLine>,
}

impl CheckoutRequest {
    /// Copy the cart's lines. Later changes to the cart do not affect the request.
    pub fn snapshot(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().to_vec(),
        }
    }

    /// The captured lines.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Result of a checkout call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutOutcome {
    /// The server acknowledged the order. The caller should now clear the cart.
    Success,
    /// Nothing was ordered; the reason is fit to show the user.
    Failure(String),
}

impl CheckoutOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CheckoutOutcome::Success)
    }
}

/// Submits carts and reports how it went.
///
/// Never mutates the cart and never retries. Clearing the cart after a
/// [`CheckoutOutcome::Success`] is the caller's job.
#[derive(Clone)]
pub struct CheckoutCoordinator {
    gateway: Arc<dyn CheckoutGateway>,
}

impl CheckoutCoordinator {
    /// Create a coordinator over a checkout endpoint.
    pub fn new(gateway: Arc<dyn CheckoutGateway>) -> Self {
        Self { gateway }
    }

    /// Submit the cart once for `user_id`.
    pub async fn checkout(&self, cart: &Cart, user_id: &UserId) -> CheckoutOutcome {
        let mut attempt = CheckoutAttempt::new();
        match self.run(&mut attempt, cart, user_id).await {
            Ok(outcome) => outcome,
            Err(e) => CheckoutOutcome::Failure(e.to_string()),
        }
    }

    /// Drive a fresh attempt through submission.
    ///
    /// The cart is snapshotted before anything is sent. Errors only when the
    /// attempt was not idle.
    pub async fn run(
        &self,
        attempt: &mut CheckoutAttempt,
        cart: &Cart,
        user_id: &UserId,
    ) -> Result<CheckoutOutcome, CommerceError> {
        let request = CheckoutRequest::snapshot(cart);
        attempt.begin(request.lines().len())?;

        if request.is_empty() {
            attempt.fail(EMPTY_CART)?;
            return Ok(CheckoutOutcome::Failure(EMPTY_CART.to_string()));
        }

        tracing::debug!(%user_id, lines = request.lines().len(), "submitting checkout");

        match self.gateway.submit(user_id, &request).await {
            Ok(()) => {
                attempt.succeed()?;
                tracing::info!(%user_id, lines = request.lines().len(), "checkout succeeded");
                Ok(CheckoutOutcome::Success)
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!(%user_id, error = %reason, "checkout failed");
                attempt.fail(reason.clone())?;
                Ok(CheckoutOutcome::Failure(reason))
            }
        }
    }
}

impl std::fmt::Debug for CheckoutCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutCoordinator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::CheckoutState;
    use crate::testing::{FakeCheckout, Scripted};

    fn three_line_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add("B1");
        cart.add("B1");
        cart.add("B2");
        cart.add("B3");
        cart
    }

    #[tokio::test]
    async fn test_success_sends_exact_lines() {
        let gateway = Arc::new(FakeCheckout::new(Scripted::Accept));
        let coordinator = CheckoutCoordinator::new(gateway.clone());
        let cart = three_line_cart();

        let outcome = coordinator.checkout(&cart, &UserId::new("1")).await;
        assert_eq!(outcome, CheckoutOutcome::Success);

        let submissions = gateway.submissions();
        assert_eq!(submissions.len(), 1);
        let (user, body) = &submissions[0];
        assert_eq!(user.as_str(), "1");

        let decoded: Vec<CartLine> = serde_json::from_str(body).unwrap();
        assert_eq!(decoded, cart.lines());
    }

    #[tokio::test]
    async fn test_checkout_does_not_clear_cart() {
        let coordinator = CheckoutCoordinator::new(Arc::new(FakeCheckout::new(Scripted::Accept)));
        let mut cart = three_line_cart();

        let outcome = coordinator.checkout(&cart, &UserId::new("1")).await;
        assert!(outcome.is_success());
        assert_eq!(cart.len(), 3);

        cart.clear();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_rejected_leaves_cart_unchanged() {
        let coordinator =
            CheckoutCoordinator::new(Arc::new(FakeCheckout::new(Scripted::Reject(500))));
        let cart = three_line_cart();
        let before = cart.clone();

        let outcome = coordinator.checkout(&cart, &UserId::new("1")).await;
        assert_eq!(
            outcome,
            CheckoutOutcome::Failure("Checkout failed (HTTP 500).".to_string())
        );
        assert_eq!(cart, before);
        assert_eq!(cart.len(), 3);
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported_once() {
        let gateway = Arc::new(FakeCheckout::new(Scripted::Unreachable));
        let coordinator = CheckoutCoordinator::new(gateway.clone());

        let outcome = coordinator
            .checkout(&three_line_cart(), &UserId::new("1"))
            .await;
        match outcome {
            CheckoutOutcome::Failure(reason) => {
                assert!(reason.starts_with("An error occurred during checkout"))
            }
            CheckoutOutcome::Success => panic!("expected failure"),
        }
        assert_eq!(gateway.submissions().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_is_not_submitted() {
        let gateway = Arc::new(FakeCheckout::new(Scripted::Accept));
        let coordinator = CheckoutCoordinator::new(gateway.clone());

        let outcome = coordinator.checkout(&Cart::new(), &UserId::new("1")).await;
        assert_eq!(outcome, CheckoutOutcome::Failure(EMPTY_CART.to_string()));
        assert!(gateway.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_run_tracks_attempt_state() {
        let coordinator =
            CheckoutCoordinator::new(Arc::new(FakeCheckout::new(Scripted::Reject(409))));
        let cart = three_line_cart();
        let mut attempt = CheckoutAttempt::new();

        coordinator
            .run(&mut attempt, &cart, &UserId::new("1"))
            .await
            .unwrap();
        assert_eq!(attempt.state(), CheckoutState::Failed);
        assert_eq!(attempt.lines_submitted(), 3);

        // A finished attempt cannot be reused.
        assert!(coordinator
            .run(&mut attempt, &cart, &UserId::new("1"))
            .await
            .is_err());
    }

    #[test]
    fn test_snapshot_is_detached_from_cart() {
        let mut cart = three_line_cart();
        let request = CheckoutRequest::snapshot(&cart);
        cart.add("B4");
        assert_eq!(request.lines().len(), 3);
    }
}
