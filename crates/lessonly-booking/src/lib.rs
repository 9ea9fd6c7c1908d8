//! Booking flow orchestration for the lessonly platform.
//!
//! This crate drives a booking from an established session to a created
//! invoice: an explicit finite state machine
//! (`auth → contact → student → confirmation → success`) over the pure
//! engine in `lessonly-core`, with an effect layer that runs the external
//! calls through [`BookingBackend`] strictly in sequence.
//!
//! The guarantees callers rely on:
//!
//! - a single user confirmation produces **at most one invoice**, across
//!   retries and re-entrancy;
//! - a failed external call never advances the step, so a retry resumes
//!   exactly where the user was;
//! - a window with no remaining lessons stops confirmation before anything
//!   is created.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod backend;
mod error;
mod flow;

pub use backend::BookingBackend;
pub use error::FlowError;
pub use flow::{
    AppliedReferral, BookingSession, BookingStep, ConfirmOutcome, ContactInfo, LearnerChoice,
    UserProfile,
};
