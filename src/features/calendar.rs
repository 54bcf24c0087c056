//! Calendar feature derivation
//!
//! Turns a date into six categorical/ordinal calendar fields. Pure; handles
//! any valid calendar date, including ISO-week year boundaries (Dec 31 may
//! belong to ISO week 1 of the following year).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar fields derived from a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFeatures {
    pub year: i32,
    /// 1-12
    pub month: u32,
    /// 1-4
    pub quarter: u32,
    /// Monday = 0 .. Sunday = 6
    pub day_of_week: u32,
    /// 1-31
    pub day_of_month: u32,
    /// ISO week number, 1-53
    pub week_of_year: u32,
}

impl CalendarFeatures {
    pub fn from_date(date: NaiveDate) -> Self {
        CalendarFeatures {
            year: date.year(),
            month: date.month(),
            quarter: (date.month() - 1) / 3 + 1,
            day_of_week: date.weekday().num_days_from_monday(),
            day_of_month: date.day(),
            week_of_year: date.iso_week().week(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_calendar_fields() {
        // 2024-01-01 is a Monday
        let f = CalendarFeatures::from_date(parse_date("2024-01-01"));
        assert_eq!(f.year, 2024);
        assert_eq!(f.month, 1);
        assert_eq!(f.quarter, 1);
        assert_eq!(f.day_of_week, 0);
        assert_eq!(f.day_of_month, 1);
        assert_eq!(f.week_of_year, 1);

        // 2024-08-23 is a Friday in Q3
        let f = CalendarFeatures::from_date(parse_date("2024-08-23"));
        assert_eq!(f.quarter, 3);
        assert_eq!(f.day_of_week, 4);
        assert_eq!(f.day_of_month, 23);
    }

    #[test]
    fn test_quarter_boundaries() {
        for (month, quarter) in [(1, 1), (3, 1), (4, 2), (6, 2), (7, 3), (9, 3), (10, 4), (12, 4)]
        {
            let date = NaiveDate::from_ymd_opt(2023, month, 15).unwrap();
            assert_eq!(CalendarFeatures::from_date(date).quarter, quarter);
        }
    }

    #[test]
    fn test_iso_week_year_boundary() {
        // 2024-12-31 is a Tuesday and belongs to ISO week 1 of 2025
        let f = CalendarFeatures::from_date(parse_date("2024-12-31"));
        assert_eq!(f.year, 2024);
        assert_eq!(f.week_of_year, 1);

        // 2021-01-01 is a Friday and belongs to ISO week 53 of 2020
        let f = CalendarFeatures::from_date(parse_date("2021-01-01"));
        assert_eq!(f.year, 2021);
        assert_eq!(f.week_of_year, 53);
    }
}
