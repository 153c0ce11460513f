//! Checkout attempt state machine.

use serde::{Deserialize, Serialize};

use crate::CommerceError;

/// States of a single checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    /// Not yet submitted.
    #[default]
    Idle,
    /// Submission in flight.
    Submitting,
    /// Server acknowledged the order.
    Succeeded,
    /// Submission failed; the cart was left as it was.
    Failed,
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::Submitting => "submitting",
            CheckoutState::Succeeded => "succeeded",
            CheckoutState::Failed => "failed",
        }
    }

    /// Whether the attempt is over.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutState::Succeeded | CheckoutState::Failed)
    }
}

/// One `Idle -> Submitting -> {Succeeded, Failed}` run.
///
/// An attempt is used once. Retrying after a failure means starting a new
/// attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutAttempt {
    state: CheckoutState,
    lines_submitted: usize,
    failure: Option<String>,
}

impl CheckoutAttempt {
    /// Create an idle attempt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Number of cart lines in the submitted body.
    pub fn lines_submitted(&self) -> usize {
        self.lines_submitted
    }

    /// Why the attempt failed, once it has.
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// `Idle -> Submitting`.
    pub fn begin(&mut self, lines: usize) -> Result<(), CommerceError> {
        self.transition(CheckoutState::Idle, CheckoutState::Submitting)?;
        self.lines_submitted = lines;
        Ok(())
    }

    /// `Submitting -> Succeeded`.
    pub fn succeed(&mut self) -> Result<(), CommerceError> {
        self.transition(CheckoutState::Submitting, CheckoutState::Succeeded)
    }

    /// `Submitting -> Failed`.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), CommerceError> {
        self.transition(CheckoutState::Submitting, CheckoutState::Failed)?;
        self.failure = Some(reason.into());
        Ok(())
    }

    fn transition(
        &mut self,
        expected: CheckoutState,
        next: CheckoutState,
    ) -> Result<(), CommerceError> {
        if self.state != expected {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.state.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        self.state = next;
        Ok(())
    }
}
