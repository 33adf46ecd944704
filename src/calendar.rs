//! Month grid for the event calendar
//!
//! Maps a calendar month onto week rows of seven cells and marks the days that
//! have at least one event. Everything here is a pure function of the month,
//! the week start and the event list.

use std::collections::HashSet;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};

use crate::catalog::Event;

/// First column of the calendar grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Parses `sunday`/`sun` or `monday`/`mon`
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Some(WeekStart::Sunday),
            "monday" | "mon" => Some(WeekStart::Monday),
            _ => None,
        }
    }

    /// Column of `date` in a week row (0-6)
    pub fn column(self, date: NaiveDate) -> u32 {
        match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        }
    }

    /// Short weekday names in column order
    pub fn labels(self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
        }
    }
}

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns `None` if `month` is not 1-12 or the year is out of range
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self { year, month })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// Day 1 of the month
    pub fn first_day(self) -> NaiveDate {
        // Validated in the constructors
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Number of days in the month
    pub fn days_in_month(self) -> u32 {
        (28..=31)
            .rev()
            .find(|&day| self.day(day).is_some())
            .unwrap_or(28)
    }

    /// Returns the date of `day` in this month, if it exists
    pub fn day(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// The month before this one, or this month at the start of the supported range
    pub fn previous(self) -> Self {
        let (year, month) = if self.month == 1 {
            (self.year.saturating_sub(1), 12)
        } else {
            (self.year, self.month - 1)
        };
        Self::new(year, month).unwrap_or(self)
    }

    /// The month after this one, or this month at the end of the supported range
    pub fn next(self) -> Self {
        let (year, month) = if self.month == 12 {
            (self.year.saturating_add(1), 1)
        } else {
            (self.year, self.month + 1)
        };
        Self::new(year, month).unwrap_or(self)
    }

    /// Whether `date` falls in this month
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day().format("%B %Y"))
    }
}

/// A day cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// Day of the month (1-based)
    pub day: u32,
    pub date: NaiveDate,
    /// Whether any event falls on this day
    pub has_event: bool,
}

/// One week row; `None` cells are blanks before day 1 or after the last day
pub type Week = [Option<DayCell>; 7];

/// A month laid out as week rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub week_start: WeekStart,
    /// Blank cells before day 1 in the first row
    pub leading_blanks: u32,
    pub days_in_month: u32,
    pub weeks: Vec<Week>,
}

impl MonthGrid {
    /// Finds the cell for `date`, returning (row, column)
    pub fn position_of(&self, date: NaiveDate) -> Option<(usize, usize)> {
        if !self.month.contains(date) {
            return None;
        }
        let index = (self.leading_blanks + date.day() - 1) as usize;
        Some((index / 7, index % 7))
    }

    /// Day cells in date order
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten().flatten()
    }
}

/// Lays out `month` and marks the days that have events
///
/// An event marks a day when its date string equals the day's ISO date
/// (`YYYY-MM-DD`) exactly.
pub fn month_grid(month: YearMonth, events: &[Event], week_start: WeekStart) -> MonthGrid {
    let event_dates: HashSet<&str> = events.iter().map(|e| e.date.as_str()).collect();

    let leading_blanks = week_start.column(month.first_day());
    let days_in_month = month.days_in_month();
    let week_count = (leading_blanks + days_in_month).div_ceil(7);

    let mut weeks = Vec::with_capacity(week_count as usize);
    for week in 0..week_count {
        let mut row: Week = [None; 7];
        for (column, cell) in row.iter_mut().enumerate() {
            let index = week * 7 + column as u32;
            if index < leading_blanks {
                continue;
            }
            let day = index - leading_blanks + 1;
            if let Some(date) = month.day(day) {
                let iso = date.format("%Y-%m-%d").to_string();
                *cell = Some(DayCell {
                    day,
                    date,
                    has_event: event_dates.contains(iso.as_str()),
                });
            }
        }
        weeks.push(row);
    }

    MonthGrid {
        month,
        week_start,
        leading_blanks,
        days_in_month,
        weeks,
    }
}

/// Events scheduled on `date`, in list order
pub fn events_on(events: &[Event], date: NaiveDate) -> Vec<&Event> {
    let iso = date.format("%Y-%m-%d").to_string();
    events.iter().filter(|e| e.date == iso).collect()
}

/// Moves `date` by `days`, saturating at the ends of the supported range
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(date: &str) -> Event {
        Event {
            title: format!("Event on {}", date),
            description: String::new(),
            date: date.to_string(),
            image: String::new(),
        }
    }

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_thirty_day_month_starting_wednesday() {
        // April 2026 starts on a Wednesday
        let grid = month_grid(ym(2026, 4), &[], WeekStart::Sunday);

        assert_eq!(grid.days_in_month, 30);
        assert_eq!(grid.leading_blanks, 3);
        assert_eq!(grid.weeks.len(), 5);
        assert!(grid.weeks[0][..3].iter().all(|c| c.is_none()));
        assert_eq!(grid.weeks[0][3].map(|c| c.day), Some(1));
    }

    #[test]
    fn test_monday_start_shifts_offset() {
        let grid = month_grid(ym(2026, 4), &[], WeekStart::Monday);

        assert_eq!(grid.leading_blanks, 2);
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.weeks[0][2].map(|c| c.day), Some(1));
    }

    #[test]
    fn test_february_without_blanks_fits_four_rows() {
        // February 2026 starts on a Sunday and has 28 days
        let grid = month_grid(ym(2026, 2), &[], WeekStart::Sunday);

        assert_eq!(grid.leading_blanks, 0);
        assert_eq!(grid.days_in_month, 28);
        assert_eq!(grid.weeks.len(), 4);
        assert!(grid.weeks.iter().flatten().all(|c| c.is_some()));
    }

    #[test]
    fn test_long_month_needs_six_rows() {
        // August 2026 starts on a Saturday and has 31 days
        let grid = month_grid(ym(2026, 8), &[], WeekStart::Sunday);

        assert_eq!(grid.leading_blanks, 6);
        assert_eq!(grid.weeks.len(), 6);
    }

    #[test]
    fn test_leap_february() {
        assert_eq!(ym(2028, 2).days_in_month(), 29);
        assert_eq!(ym(2026, 2).days_in_month(), 28);
        assert_eq!(ym(2026, 12).days_in_month(), 31);
    }

    #[test]
    fn test_every_day_appears_once_in_order() {
        let grid = month_grid(ym(2026, 10), &[], WeekStart::Monday);
        let days: Vec<u32> = grid.days().map(|c| c.day).collect();

        assert_eq!(days, (1..=31).collect::<Vec<_>>());
    }

    #[test]
    fn test_event_days_are_marked() {
        let events = vec![event("2026-04-15"), event("2026-04-15"), event("2026-05-01")];
        let grid = month_grid(ym(2026, 4), &events, WeekStart::Sunday);

        let marked: Vec<u32> = grid.days().filter(|c| c.has_event).map(|c| c.day).collect();

        assert_eq!(marked, vec![15]);
    }

    #[test]
    fn test_event_date_must_match_exactly() {
        let events = vec![event("2026-4-15"), event(" 2026-04-16")];
        let grid = month_grid(ym(2026, 4), &events, WeekStart::Sunday);

        assert!(grid.days().all(|c| !c.has_event));
    }

    #[test]
    fn test_position_of_date() {
        let grid = month_grid(ym(2026, 4), &[], WeekStart::Sunday);
        let first = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2026, 4, 30).unwrap();
        let elsewhere = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();

        assert_eq!(grid.position_of(first), Some((0, 3)));
        assert_eq!(grid.position_of(last), Some((4, 4)));
        assert_eq!(grid.position_of(elsewhere), None);
    }

    #[test]
    fn test_events_on_selects_matching_day() {
        let events = vec![event("2026-04-15"), event("2026-04-16"), event("2026-04-15")];
        let day = NaiveDate::from_ymd_opt(2026, 4, 15).unwrap();

        let selected = events_on(&events, day);

        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|e| e.date == "2026-04-15"));
    }

    #[test]
    fn test_month_navigation_wraps_years() {
        assert_eq!(ym(2026, 1).previous(), ym(2025, 12));
        assert_eq!(ym(2026, 12).next(), ym(2027, 1));
        assert_eq!(ym(2026, 6).next().previous(), ym(2026, 6));
    }

    #[test]
    fn test_month_navigation_stops_at_supported_range() {
        let last = YearMonth::from_date(NaiveDate::MAX);
        assert_eq!(last.next(), last);
        assert_eq!(last.days_in_month(), 31);

        let grid = month_grid(last, &[], WeekStart::Sunday);
        assert!(grid.weeks.len() <= 6);
        assert_eq!(grid.days().count(), 31);

        let first = YearMonth::from_date(NaiveDate::MIN);
        assert_eq!(first.previous(), first);
        assert_eq!(first.days_in_month(), 31);
    }

    #[test]
    fn test_year_month_rejects_invalid_month() {
        assert!(YearMonth::new(2026, 0).is_none());
        assert!(YearMonth::new(2026, 13).is_none());
    }

    #[test]
    fn test_year_month_display() {
        assert_eq!(ym(2026, 4).to_string(), "April 2026");
    }

    #[test]
    fn test_week_start_parsing_and_labels() {
        assert_eq!(WeekStart::from_str("Monday"), Some(WeekStart::Monday));
        assert_eq!(WeekStart::from_str("sun"), Some(WeekStart::Sunday));
        assert_eq!(WeekStart::from_str("friday"), None);
        assert_eq!(WeekStart::default(), WeekStart::Sunday);
        assert_eq!(WeekStart::Monday.labels()[0], "Mon");
        assert_eq!(WeekStart::Sunday.labels()[6], "Sat");
    }

    #[test]
    fn test_shift_days_crosses_month() {
        let date = NaiveDate::from_ymd_opt(2026, 4, 30).unwrap();
        assert_eq!(shift_days(date, 1), NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
        assert_eq!(shift_days(date, -7), NaiveDate::from_ymd_opt(2026, 4, 23).unwrap());
    }
}
