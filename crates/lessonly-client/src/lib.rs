//! Lessonly API client.
//!
//! Typed wrappers around the remote content store (courses, students,
//! invoices, referral codes) and the payment service. The engine in
//! `lessonly-core` computes what to submit; this crate moves it over the
//! wire.
//!
//! # Example
//!
//! ```no_run
//! use lessonly_client::SchoolClient;
//! use lessonly_core::CourseId;
//!
//! # async fn example() -> Result<(), lessonly_client::ClientError> {
//! let client = SchoolClient::new("https://api.lessonly.app", "session-token");
//! let course = client.fetch_course(&CourseId::new("course-1")).await?;
//! println!("{} meets on {} weekdays", course.name, course.pattern.weekdays.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, SchoolClient};
pub use error::ClientError;
pub use types::*;
