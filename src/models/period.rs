//! Calendar month and (month, year) period representation
//!
//! EMIs and daily expenses are scoped to exactly one period. Months travel
//! as their full English names (`"January"`), which is what the browser
//! month selector submits.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Month from its 1-based number
    pub fn from_number(number: u32) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize).copied())
    }

    /// 1-based month number
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    /// Full English name
    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = PeriodParseError;

    /// Accepts full names and three-letter abbreviations, any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "sept" {
            return Ok(Month::September);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|m| {
                let name = m.name().to_lowercase();
                lower == name || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| PeriodParseError::InvalidMonthName(s.trim().to_string()))
    }
}

impl TryFrom<String> for Month {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A (month, year) pair selecting which time-scoped records count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: Month,
}

impl Period {
    /// Create a period
    pub fn new(month: Month, year: i32) -> Self {
        Self { year, month }
    }

    /// The current local month
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        let month = Month::from_number(today.month()).unwrap_or(Month::January);
        Self::new(month, today.year())
    }

    /// Check if a record's (month, year) falls in this period
    pub fn matches(&self, month: Month, year: i32) -> bool {
        self.month == month && self.year == year
    }

    /// Get the next period
    pub fn next(&self) -> Self {
        match self.month {
            Month::December => Self::new(Month::January, self.year + 1),
            m => Self::new(Month::ALL[m.number() as usize], self.year),
        }
    }

    /// Get the previous period
    pub fn prev(&self) -> Self {
        match self.month {
            Month::January => Self::new(Month::December, self.year - 1),
            m => Self::new(Month::ALL[m.number() as usize - 2], self.year),
        }
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - "2025-01"
    /// - "January 2025", "jan 2025"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        if let Some((year, month)) = s.split_once('-') {
            if let (Ok(year), Ok(month)) = (year.parse::<i32>(), month.parse::<u32>()) {
                let month = Month::from_number(month).ok_or(PeriodParseError::InvalidMonth(month))?;
                return Ok(Self::new(month, year));
            }
        }

        let mut parts = s.split_whitespace();
        if let (Some(month), Some(year), None) = (parts.next(), parts.next(), parts.next()) {
            let month: Month = month.parse()?;
            let year: i32 = year
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            return Ok(Self::new(month, year));
        }

        Err(PeriodParseError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidMonthName(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::InvalidMonthName(s) => write!(f, "Invalid month name: {}", s),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_round_trip_by_number() {
        for (i, month) in Month::ALL.iter().enumerate() {
            assert_eq!(month.number(), i as u32 + 1);
            assert_eq!(Month::from_number(month.number()), Some(*month));
        }
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn test_month_parsing() {
        assert_eq!("January".parse::<Month>().unwrap(), Month::January);
        assert_eq!("march".parse::<Month>().unwrap(), Month::March);
        assert_eq!("SEP".parse::<Month>().unwrap(), Month::September);
        assert_eq!("Sept".parse::<Month>().unwrap(), Month::September);
        assert!("Janu".parse::<Month>().is_err());
        assert!("Smarch".parse::<Month>().is_err());
    }

    #[test]
    fn test_month_serde_uses_full_name() {
        assert_eq!(serde_json::to_string(&Month::August).unwrap(), "\"August\"");
        let m: Month = serde_json::from_str("\"aug\"").unwrap();
        assert_eq!(m, Month::August);
        assert!(serde_json::from_str::<Month>("\"Augustus\"").is_err());
    }

    #[test]
    fn test_period_navigation() {
        let jan = Period::new(Month::January, 2025);
        assert_eq!(jan.next(), Period::new(Month::February, 2025));
        assert_eq!(jan.prev(), Period::new(Month::December, 2024));

        let dec = Period::new(Month::December, 2024);
        assert_eq!(dec.next(), jan);
        assert_eq!(jan.prev().next(), jan);
    }

    #[test]
    fn test_period_parse() {
        assert_eq!(
            Period::parse("2026-03").unwrap(),
            Period::new(Month::March, 2026)
        );
        assert_eq!(
            Period::parse("January 2026").unwrap(),
            Period::new(Month::January, 2026)
        );
        assert_eq!(
            Period::parse("dec 2025").unwrap(),
            Period::new(Month::December, 2025)
        );
        assert!(matches!(
            Period::parse("2026-13"),
            Err(PeriodParseError::InvalidMonth(13))
        ));
        assert!(Period::parse("sometime").is_err());
    }

    #[test]
    fn test_period_display_and_order() {
        let p = Period::new(Month::October, 2026);
        assert_eq!(p.to_string(), "October 2026");
        assert!(Period::new(Month::December, 2025) < Period::new(Month::January, 2026));
    }

    #[test]
    fn test_matches() {
        let p = Period::new(Month::May, 2026);
        assert!(p.matches(Month::May, 2026));
        assert!(!p.matches(Month::May, 2025));
        assert!(!p.matches(Month::June, 2026));
    }
}
