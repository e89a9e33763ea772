//! Weekly calendar model.
//!
//! A teaching week is a fixed grid of working days × numbered periods with
//! one designated lunch period. Periods are 1-based; the lunch period splits
//! each day into a pre-lunch and a post-lunch window.
//!
//! # Non-working days
//! Some cohorts do not attend on every weekday (e.g. final-year students
//! have two days reserved for project work). These are declared per
//! curriculum year and removed from that year's working days.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

/// Day of the teaching week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Day {
    /// Monday through Saturday.
    pub const ALL: [Day; 6] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri, Day::Sat];

    /// Short upper-case label ("MON", "TUE", ...).
    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "MON",
            Day::Tue => "TUE",
            Day::Wed => "WED",
            Day::Thu => "THU",
            Day::Fri => "FRI",
            Day::Sat => "SAT",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The weekly (day × period) grid shared by every section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekCalendar {
    /// Working days in week order.
    pub days: Vec<Day>,
    /// Number of periods per day, including lunch.
    pub periods_per_day: u8,
    /// The period reserved for lunch. Never receives an entry.
    pub lunch_period: u8,
    /// Days removed from the working week for a curriculum year.
    pub year_off_days: BTreeMap<u8, Vec<Day>>,
}

impl Default for WeekCalendar {
    /// MON–SAT, seven periods, lunch in period 5.
    fn default() -> Self {
        Self {
            days: Day::ALL.to_vec(),
            periods_per_day: 7,
            lunch_period: 5,
            year_off_days: BTreeMap::new(),
        }
    }
}

impl WeekCalendar {
    /// Creates a calendar over the given days.
    pub fn new(days: Vec<Day>, periods_per_day: u8, lunch_period: u8) -> Self {
        Self {
            days,
            periods_per_day,
            lunch_period,
            year_off_days: BTreeMap::new(),
        }
    }

    /// Marks days as non-working for a curriculum year.
    pub fn with_year_off_days(mut self, year: u8, days: Vec<Day>) -> Self {
        self.year_off_days.insert(year, days);
        self
    }

    /// All periods of a day, lunch included.
    #[inline]
    pub fn periods(&self) -> RangeInclusive<u8> {
        1..=self.periods_per_day
    }

    /// Teaching periods before lunch.
    pub fn pre_lunch(&self) -> impl Iterator<Item = u8> {
        1..self.lunch_period
    }

    /// Teaching periods after lunch.
    pub fn post_lunch(&self) -> impl Iterator<Item = u8> {
        self.periods().skip(usize::from(self.lunch_period))
    }

    /// Teaching periods in scan order: pre-lunch first, then post-lunch.
    pub fn teaching_periods(&self) -> impl Iterator<Item = u8> {
        self.pre_lunch().chain(self.post_lunch())
    }

    #[inline]
    pub fn is_lunch(&self, period: u8) -> bool {
        period == self.lunch_period
    }

    /// Whether `period` lies on the grid.
    #[inline]
    pub fn contains_period(&self, period: u8) -> bool {
        self.periods().contains(&period)
    }

    /// Working days for a curriculum year, in week order.
    pub fn working_days(&self, year: u8) -> Vec<Day> {
        let off = self.year_off_days.get(&year);
        self.days
            .iter()
            .copied()
            .filter(|d| off.is_none_or(|off| !off.contains(d)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let cal = WeekCalendar::default();
        assert_eq!(cal.days.len(), 6);
        assert_eq!(cal.pre_lunch().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(cal.post_lunch().collect::<Vec<_>>(), vec![6, 7]);
        assert!(cal.is_lunch(5));
        assert!(!cal.contains_period(8));
    }

    #[test]
    fn test_teaching_periods_skip_lunch() {
        let cal = WeekCalendar::default();
        let periods: Vec<u8> = cal.teaching_periods().collect();
        assert_eq!(periods, vec![1, 2, 3, 4, 6, 7]);
    }

    #[test]
    fn test_full_width_grid() {
        let cal = WeekCalendar::new(vec![Day::Mon], 255, 255);
        assert_eq!(cal.post_lunch().count(), 0);
        assert_eq!(cal.teaching_periods().count(), 254);

        let cal = WeekCalendar::new(vec![Day::Mon], 255, 1);
        assert_eq!(cal.pre_lunch().count(), 0);
        assert_eq!(cal.post_lunch().last(), Some(255));
    }

    #[test]
    fn test_year_off_days() {
        let cal = WeekCalendar::default().with_year_off_days(4, vec![Day::Fri, Day::Sat]);
        assert_eq!(
            cal.working_days(4),
            vec![Day::Mon, Day::Tue, Day::Wed, Day::Thu]
        );
        assert_eq!(cal.working_days(3).len(), 6);
    }

    #[test]
    fn test_day_serializes_upper_case() {
        let json = serde_json::to_string(&Day::Wed).unwrap();
        assert_eq!(json, "\"WED\"");
        assert_eq!(Day::Sat.to_string(), "SAT");
    }
}
