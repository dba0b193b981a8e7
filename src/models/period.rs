//! Reporting periods
//!
//! Views are filtered by a period string: `"Total"` (everything), `"YYYY"`
//! (one calendar year) or `"YYYY-MM"` (one month). Aggregates are keyed by
//! month strings, so a period also knows which month keys it covers.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

/// A reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    /// All loaded data
    #[default]
    Total,
    /// A calendar year
    Year(i32),
    /// A calendar month (year, month 1-12)
    Month(i32, u32),
}

impl Period {
    /// Check whether a date falls inside this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Period::Total => true,
            Period::Year(year) => date.year() == year,
            Period::Month(year, month) => date.year() == year && date.month() == month,
        }
    }

    /// Check whether an aggregate month key ("YYYY-MM") belongs to this period
    pub fn covers_month_key(&self, month_key: &str) -> bool {
        match self {
            Period::Total => true,
            _ => month_key.starts_with(&self.to_string()),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Total => write!(f, "Total"),
            Period::Year(year) => write!(f, "{:04}", year),
            Period::Month(year, month) => write!(f, "{:04}-{:02}", year, month),
        }
    }
}

impl FromStr for Period {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || {
            TrackerError::Parse(format!(
                "Invalid period '{}': expected Total, YYYY or YYYY-MM",
                s
            ))
        };

        if s.eq_ignore_ascii_case("total") {
            return Ok(Period::Total);
        }

        let is_digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());

        match s.split_once('-') {
            None if s.len() == 4 && is_digits(s) => {
                Ok(Period::Year(s.parse().map_err(|_| invalid())?))
            }
            Some((year, month)) if year.len() == 4 && month.len() == 2 => {
                if !is_digits(year) || !is_digits(month) {
                    return Err(invalid());
                }
                let month: u32 = month.parse().map_err(|_| invalid())?;
                if !(1..=12).contains(&month) {
                    return Err(invalid());
                }
                Ok(Period::Month(year.parse().map_err(|_| invalid())?, month))
            }
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!("Total".parse::<Period>().unwrap(), Period::Total);
        assert_eq!("total".parse::<Period>().unwrap(), Period::Total);
        assert_eq!("2024".parse::<Period>().unwrap(), Period::Year(2024));
        assert_eq!("2024-03".parse::<Period>().unwrap(), Period::Month(2024, 3));
    }

    #[test]
    fn test_parse_invalid() {
        assert!("24".parse::<Period>().is_err());
        assert!("2024-13".parse::<Period>().is_err());
        assert!("2024-1".parse::<Period>().is_err());
        assert!("March".parse::<Period>().is_err());
        assert!("2024-0a".parse::<Period>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for raw in ["Total", "2023", "2023-07"] {
            assert_eq!(raw.parse::<Period>().unwrap().to_string(), raw);
        }
    }

    #[test]
    fn test_contains() {
        assert!(Period::Total.contains(date(1999, 1, 1)));
        assert!(Period::Year(2024).contains(date(2024, 12, 31)));
        assert!(!Period::Year(2024).contains(date(2023, 12, 31)));
        assert!(Period::Month(2024, 1).contains(date(2024, 1, 20)));
        assert!(!Period::Month(2024, 1).contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_covers_month_key() {
        assert!(Period::Total.covers_month_key("2020-05"));
        assert!(Period::Year(2024).covers_month_key("2024-05"));
        assert!(!Period::Year(2024).covers_month_key("2023-05"));
        assert!(Period::Month(2024, 5).covers_month_key("2024-05"));
        assert!(!Period::Month(2024, 5).covers_month_key("2024-06"));
    }
}
