//! Core scheduling and billing engine for the lessonly booking platform.
//!
//! This crate computes everything the booking flow submits or displays:
//!
//! - **Schedules**: `WeekdaySet`, `RecurrencePattern` and on-demand
//!   lesson-date generation
//! - **Timezones**: DST-aware wall-clock conversion between IANA zones
//! - **Pricing**: `MonthlyPricing` and `ProRatedPricing` for full and
//!   partial months
//! - **Discounts**: referral-discount + wallet-bonus stacking with a
//!   zero floor
//! - **Payments**: interpretation of the gateway's return redirect
//! - **Identifiers**: typed ids for content-store entities
//!
//! # Money
//!
//! All amounts are `i64` integer minor currency units (kopecks, cents), so
//! `lessons × price` multiplication is exact and nothing accumulates
//! per-lesson rounding error. Division by 100 happens only when formatting
//! for display.
//!
//! Everything here is synchronous and side-effect-free: "now" and the
//! display timezone are always explicit parameters, never ambient reads.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod course;
pub mod discount;
pub mod error;
pub mod ids;
pub mod payment;
pub mod pricing;
pub mod schedule;
pub mod timezone;

pub use course::Course;
pub use discount::{final_price, validate_bonus, validate_discount, PriceBreakdown};
pub use error::{BookingError, Result};
pub use ids::{BookingId, CourseId, InvoiceId, StudentId, UserId};
pub use payment::PaymentReturn;
pub use pricing::{
    all_monthly_pricing, monthly_pricing, pro_rated_pricing, remaining_lesson_dates,
    MonthlyPricing, ProRatedPricing,
};
pub use schedule::{RecurrencePattern, WeekdaySet};
pub use timezone::{convert_time_of_day, is_valid_timezone};
