//! Weekly recurrence patterns and lesson-date generation.
//!
//! A course meets on a fixed set of weekdays between an overall start and
//! end date. Lesson dates are derived on demand by walking the calendar days
//! of a query window and keeping the days whose weekday is in the set; they
//! are never persisted.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{BookingError, Result};

/// All weekdays in Monday-first order, indexed by `num_days_from_monday`.
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A compact set of weekdays.
///
/// Serialized as a list of lowercase day names (`["monday", "wednesday"]`),
/// matching the content store's course records. Parsing accepts full names
/// and three-letter abbreviations in any case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Add a weekday to the set.
    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1u8 << day.num_days_from_monday();
    }

    /// Whether the set contains the given weekday.
    #[must_use]
    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & (1u8 << day.num_days_from_monday()) != 0
    }

    /// Whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of weekdays in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the weekdays in Monday-first order.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        WEEKDAYS.into_iter().filter(move |day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

/// Full lowercase name of a weekday, as stored in course records.
fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let names: Vec<&str> = self.iter().map(day_name).collect();
        names.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        let mut set = Self::empty();
        for name in &names {
            let day = Weekday::from_str(name)
                .map_err(|_| D::Error::custom(format!("unknown weekday: {name}")))?;
            set.insert(day);
        }
        Ok(set)
    }
}

/// The weekly recurrence of a course: which weekdays it meets on, bounded by
/// the course's overall active range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePattern {
    /// Weekdays the course meets on.
    pub weekdays: WeekdaySet,

    /// First day of the course's active range.
    pub start_date: NaiveDate,

    /// Last day of the course's active range (inclusive).
    pub end_date: NaiveDate,
}

impl RecurrencePattern {
    /// Create a pattern.
    #[must_use]
    pub const fn new(weekdays: WeekdaySet, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            weekdays,
            start_date,
            end_date,
        }
    }

    /// Check the pattern invariants for a bookable course.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::EmptyWeekdays`] if the weekday set is empty,
    /// or [`BookingError::InvalidDateRange`] if the range is inverted.
    pub fn validate(&self) -> Result<()> {
        if self.weekdays.is_empty() {
            return Err(BookingError::EmptyWeekdays);
        }
        if self.start_date > self.end_date {
            return Err(BookingError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Concrete lesson dates inside `[window_start, window_end]`.
    ///
    /// The effective range is the intersection of the window with the
    /// pattern's active range; an empty intersection (or an empty weekday
    /// set) yields an empty vector, not an error. The result is ascending,
    /// duplicate-free, and every element's weekday is in the set.
    #[must_use]
    pub fn lesson_dates(&self, window_start: NaiveDate, window_end: NaiveDate) -> Vec<NaiveDate> {
        let start = window_start.max(self.start_date);
        let end = window_end.min(self.end_date);
        if start > end || self.weekdays.is_empty() {
            return Vec::new();
        }

        start
            .iter_days()
            .take_while(|day| *day <= end)
            .filter(|day| self.weekdays.contains(day.weekday()))
            .collect()
    }

    /// The first lesson date inside `[window_start, window_end]`, if any.
    #[must_use]
    pub fn first_lesson_date(
        &self,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> Option<NaiveDate> {
        let start = window_start.max(self.start_date);
        let end = window_end.min(self.end_date);
        if start > end || self.weekdays.is_empty() {
            return None;
        }

        start
            .iter_days()
            .take_while(|day| *day <= end)
            .find(|day| self.weekdays.contains(day.weekday()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mwf() -> WeekdaySet {
        [Weekday::Mon, Weekday::Wed, Weekday::Fri]
            .into_iter()
            .collect()
    }

    #[test]
    fn weekday_set_insert_contains() {
        let mut set = WeekdaySet::empty();
        assert!(set.is_empty());
        set.insert(Weekday::Tue);
        set.insert(Weekday::Sun);
        assert!(set.contains(Weekday::Tue));
        assert!(set.contains(Weekday::Sun));
        assert!(!set.contains(Weekday::Mon));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn weekday_set_serde_roundtrip() {
        let set = mwf();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["monday","wednesday","friday"]"#);
        let parsed: WeekdaySet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, set);
    }

    #[test]
    fn weekday_set_accepts_abbreviations() {
        let parsed: WeekdaySet = serde_json::from_str(r#"["Mon","FRIDAY"]"#).unwrap();
        assert!(parsed.contains(Weekday::Mon));
        assert!(parsed.contains(Weekday::Fri));
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn weekday_set_rejects_garbage() {
        let parsed: std::result::Result<WeekdaySet, _> =
            serde_json::from_str(r#"["moonday"]"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn validate_rejects_empty_weekdays() {
        let pattern = RecurrencePattern::new(
            WeekdaySet::empty(),
            date(2025, 1, 1),
            date(2025, 3, 31),
        );
        assert_eq!(pattern.validate(), Err(BookingError::EmptyWeekdays));
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let pattern = RecurrencePattern::new(mwf(), date(2025, 4, 1), date(2025, 3, 31));
        assert!(matches!(
            pattern.validate(),
            Err(BookingError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn lesson_dates_all_in_window_and_set() {
        let pattern = RecurrencePattern::new(mwf(), date(2025, 1, 1), date(2025, 3, 31));
        let dates = pattern.lesson_dates(date(2025, 1, 10), date(2025, 2, 10));

        assert!(!dates.is_empty());
        for day in &dates {
            assert!(*day >= date(2025, 1, 10));
            assert!(*day <= date(2025, 2, 10));
            assert!(pattern.weekdays.contains(day.weekday()));
        }
        let mut sorted = dates.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted, dates);
    }

    #[test]
    fn lesson_dates_clipped_by_course_range() {
        // Course ends mid-window; nothing after the end date may appear.
        let pattern = RecurrencePattern::new(mwf(), date(2025, 1, 1), date(2025, 1, 15));
        let dates = pattern.lesson_dates(date(2025, 1, 1), date(2025, 1, 31));
        assert_eq!(dates.last(), Some(&date(2025, 1, 15))); // Wednesday
    }

    #[test]
    fn lesson_dates_empty_intersection_is_empty() {
        let pattern = RecurrencePattern::new(mwf(), date(2025, 1, 1), date(2025, 1, 31));
        assert!(pattern
            .lesson_dates(date(2025, 2, 1), date(2025, 2, 28))
            .is_empty());
    }

    #[test]
    fn lesson_dates_range_boundaries_inclusive() {
        // 2025-01-06 is a Monday, 2025-01-31 a Friday.
        let pattern = RecurrencePattern::new(mwf(), date(2025, 1, 6), date(2025, 1, 31));
        let dates = pattern.lesson_dates(date(2025, 1, 6), date(2025, 1, 31));
        assert_eq!(dates.first(), Some(&date(2025, 1, 6)));
        assert_eq!(dates.last(), Some(&date(2025, 1, 31)));
    }

    #[test]
    fn january_2025_mon_wed_fri_has_14_lessons() {
        let pattern = RecurrencePattern::new(mwf(), date(2025, 1, 1), date(2025, 3, 31));
        let dates = pattern.lesson_dates(date(2025, 1, 1), date(2025, 1, 31));
        assert_eq!(dates.len(), 14);
    }

    #[test]
    fn first_lesson_date_matches_head_of_list() {
        let pattern = RecurrencePattern::new(mwf(), date(2025, 1, 1), date(2025, 3, 31));
        let dates = pattern.lesson_dates(date(2025, 1, 18), date(2025, 1, 31));
        assert_eq!(
            pattern.first_lesson_date(date(2025, 1, 18), date(2025, 1, 31)),
            dates.first().copied()
        );
        // 2025-01-20 is the first Monday on/after the 18th.
        assert_eq!(dates.first(), Some(&date(2025, 1, 20)));
    }
}
