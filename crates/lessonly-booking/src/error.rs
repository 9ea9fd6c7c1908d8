//! Error types for the booking flow.

use lessonly_client::ClientError;
use lessonly_core::BookingError;

use crate::flow::BookingStep;

/// Errors surfaced by the booking state machine.
///
/// Backend failures deliberately leave the session in its current step so
/// the user can retry without re-entering earlier steps' data.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The action does not belong to the session's current step.
    #[error("action not allowed in step {actual:?} (expected {expected:?})")]
    WrongStep {
        /// The step the action is valid in.
        expected: BookingStep,
        /// The session's actual step.
        actual: BookingStep,
    },

    /// A confirmation request is already in flight; the trigger must stay
    /// disabled until it resolves.
    #[error("a confirmation request is already in flight")]
    ConfirmationInFlight,

    /// Contact details were submitted with required fields missing.
    #[error("contact details are incomplete")]
    IncompleteContact,

    /// Confirmation was attempted before a learner was chosen.
    #[error("no learner selected for this booking")]
    MissingLearner,

    /// The referral-validation service rejected the code.
    #[error("referral code rejected: {reason}")]
    ReferralRejected {
        /// The service's rejection reason.
        reason: String,
    },

    /// A scheduling, pricing, or discount invariant was violated.
    #[error(transparent)]
    Engine(#[from] BookingError),

    /// An external call failed; the step was not advanced.
    #[error(transparent)]
    Backend(#[from] ClientError),
}
