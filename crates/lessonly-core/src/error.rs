//! Error types for the lessonly engine.

use chrono::NaiveDate;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, BookingError>;

/// Errors that can occur in scheduling, pricing, and discount operations.
///
/// Unavailability (a month with no remaining lessons in a pricing query) is
/// not an error — it is a normal result value callers must check. The
/// variants here are genuine input rejections plus the one hard stop at
/// confirmation time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// A bookable course must meet on at least one weekday.
    #[error("recurrence pattern has no weekdays")]
    EmptyWeekdays,

    /// The recurrence range is inverted.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },

    /// A monetary amount that must be non-negative was negative.
    #[error("negative amount: {amount}")]
    NegativeAmount {
        /// The offending amount in minor units.
        amount: i64,
    },

    /// The referral discount is larger than the price it applies to.
    #[error("discount {discount} exceeds price {price}")]
    DiscountExceedsPrice {
        /// Discount amount in minor units.
        discount: i64,
        /// Base price in minor units.
        price: i64,
    },

    /// The requested bonus debit is larger than the wallet balance.
    #[error("bonus {requested} exceeds available balance {balance}")]
    BonusExceedsBalance {
        /// Requested bonus amount in minor units.
        requested: i64,
        /// Available wallet balance in minor units.
        balance: i64,
    },

    /// The requested bonus debit is larger than what is still owed after the
    /// discount.
    #[error("bonus {requested} exceeds remaining payable {payable}")]
    BonusExceedsPayable {
        /// Requested bonus amount in minor units.
        requested: i64,
        /// Price after discount in minor units.
        payable: i64,
    },

    /// Confirming a booking against a window with no lessons left.
    #[error("no lessons remaining in {year}-{month:02}")]
    NoLessonsRemaining {
        /// Queried year.
        year: i32,
        /// Queried month (1-12).
        month: u32,
    },
}
