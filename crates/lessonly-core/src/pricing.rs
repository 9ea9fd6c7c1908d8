//! Monthly and pro-rated pricing for a course.
//!
//! A month's price is the number of lesson dates falling inside the
//! intersection of the calendar month and the course's active range,
//! multiplied by the per-lesson price. Amounts are integer minor units, so
//! the multiplication is exact and there is no per-lesson rounding to
//! accumulate.
//!
//! Pro-rating moves the lower bound of that intersection from the first of
//! the month to an arbitrary cutoff date, so a student joining mid-month
//! pays only for the lessons still ahead of them.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::course::Course;

/// Price of one full calendar month of a course, clipped to the course's
/// active range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPricing {
    /// Calendar year.
    pub year: i32,

    /// Calendar month (1-12).
    pub month: u32,

    /// Number of lesson dates in the month.
    pub lessons_count: u32,

    /// Month total in minor units: `lessons_count * price_per_lesson`.
    pub total_minor: i64,

    /// English month name for pickers ("January").
    pub month_name: String,

    /// Whether the month has any lessons at all.
    pub is_available: bool,
}

/// Price of the remainder of a month from a cutoff date onward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProRatedPricing {
    /// The cutoff: only lessons on/after this date are counted.
    pub from_date: NaiveDate,

    /// Lessons remaining on/after the cutoff.
    pub remaining_lessons: u32,

    /// Price of the remaining lessons in minor units.
    pub pro_rated_minor: i64,

    /// Price of the full month in minor units, for comparison.
    pub full_minor: i64,

    /// Whether the cutoff actually cut anything off.
    pub is_partial: bool,
}

/// First and last day of a calendar month, if `month` is a real month.
fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}

/// Price a full calendar month of the course.
///
/// An out-of-range `month` or a month with no lessons yields the zero
/// pricing with `is_available = false`, not an error.
#[must_use]
pub fn monthly_pricing(course: &Course, year: i32, month: u32) -> MonthlyPricing {
    let Some((first, last)) = month_bounds(year, month) else {
        return MonthlyPricing {
            year,
            month,
            lessons_count: 0,
            total_minor: 0,
            month_name: String::new(),
            is_available: false,
        };
    };

    let lessons = course.pattern.lesson_dates(first, last);
    let count = u32::try_from(lessons.len()).unwrap_or(u32::MAX);

    MonthlyPricing {
        year,
        month,
        lessons_count: count,
        total_minor: i64::from(count) * course.price_per_lesson_minor,
        month_name: first.format("%B").to_string(),
        is_available: count > 0,
    }
}

/// The concrete lesson dates of a month on/after `from_date`.
///
/// This is the date list behind [`pro_rated_pricing`]; the booking flow
/// needs the first and last entry for the invoice period.
#[must_use]
pub fn remaining_lesson_dates(
    course: &Course,
    year: i32,
    month: u32,
    from_date: NaiveDate,
) -> Vec<NaiveDate> {
    let Some((first, last)) = month_bounds(year, month) else {
        return Vec::new();
    };
    course.pattern.lesson_dates(first.max(from_date), last)
}

/// Price the remainder of a month from `from_date` onward.
///
/// A cutoff past the month or past the course's end yields the zero-lesson,
/// zero-price result; callers treat that as "unavailable", not a defect.
#[must_use]
pub fn pro_rated_pricing(
    course: &Course,
    year: i32,
    month: u32,
    from_date: NaiveDate,
) -> ProRatedPricing {
    let full = monthly_pricing(course, year, month);
    let remaining = remaining_lesson_dates(course, year, month, from_date);
    let count = u32::try_from(remaining.len()).unwrap_or(u32::MAX);

    ProRatedPricing {
        from_date,
        remaining_lessons: count,
        pro_rated_minor: i64::from(count) * course.price_per_lesson_minor,
        full_minor: full.total_minor,
        is_partial: count < full.lessons_count,
    }
}

/// All bookable months of the course from `today` forward.
///
/// Enumerates every calendar month intersecting the course's active range,
/// starting at `today`'s month, and keeps the available ones. The month
/// containing `today` is kept only if lessons remain on/after `today` — the
/// picker must never offer a month with nothing left to attend.
#[must_use]
pub fn all_monthly_pricing(course: &Course, today: NaiveDate) -> Vec<MonthlyPricing> {
    let start = course.pattern.start_date.max(today);
    let end = course.pattern.end_date;
    if start > end {
        return Vec::new();
    }

    let mut months = Vec::new();
    let (mut year, mut month) = (start.year(), start.month());
    while (year, month) <= (end.year(), end.month()) {
        let pricing = monthly_pricing(course, year, month);
        let remaining = if (year, month) == (today.year(), today.month()) {
            pro_rated_pricing(course, year, month, today).remaining_lessons
        } else {
            pricing.lessons_count
        };
        if pricing.is_available && remaining > 0 {
            months.push(pricing);
        }
        (year, month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
    }
    months
}
