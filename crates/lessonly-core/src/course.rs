//! Course model.
//!
//! A course is owned by the remote content store; the engine treats it as an
//! immutable input. Prices are integer minor currency units (kopecks,
//! cents), so per-lesson multiplication stays exact.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ids::CourseId;
use crate::schedule::RecurrencePattern;

/// A course as seen by the scheduling and billing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Content-store identifier.
    pub id: CourseId,

    /// Display name.
    pub name: String,

    /// Weekly recurrence bounded by the course's active range.
    pub pattern: RecurrencePattern,

    /// Price of a single lesson in minor currency units.
    pub price_per_lesson_minor: i64,

    /// ISO currency code (e.g. "RUB").
    pub currency: String,

    /// IANA timezone the course's lesson times are expressed in.
    pub timezone: String,

    /// Minimum group size.
    pub min_students: u32,

    /// Maximum group size.
    pub max_students: u32,
}

impl Course {
    /// Check that the course can be booked at all: a non-empty weekday set
    /// and a non-inverted active range.
    ///
    /// # Errors
    ///
    /// Propagates the pattern validation error.
    pub fn validate(&self) -> Result<()> {
        self.pattern.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::WeekdaySet;
    use chrono::{NaiveDate, Weekday};

    fn sample() -> Course {
        Course {
            id: CourseId::new("course-1"),
            name: "Watercolor basics".into(),
            pattern: RecurrencePattern::new(
                [Weekday::Mon, Weekday::Wed, Weekday::Fri]
                    .into_iter()
                    .collect(),
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            ),
            price_per_lesson_minor: 1000,
            currency: "RUB".into(),
            timezone: "Europe/Moscow".into(),
            min_students: 1,
            max_students: 8,
        }
    }

    #[test]
    fn valid_course_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn course_without_weekdays_is_not_bookable() {
        let mut course = sample();
        course.pattern.weekdays = WeekdaySet::empty();
        assert!(course.validate().is_err());
    }

    #[test]
    fn course_serde_roundtrip() {
        let course = sample();
        let json = serde_json::to_string(&course).unwrap();
        let parsed: Course = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, course);
    }
}
