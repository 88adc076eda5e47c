//! Period selection service
//!
//! Turns the loose period strings accepted on the command line into a
//! concrete `Period`, relative to a reference month.

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Month, Period};

/// Service for resolving period arguments
pub struct PeriodService {
    today: Period,
}

impl PeriodService {
    /// Resolve relative to the current local month
    pub fn new() -> Self {
        Self::anchored(Period::current())
    }

    /// Resolve relative to a fixed month
    pub fn anchored(today: Period) -> Self {
        Self { today }
    }

    /// The reference month
    pub fn current_period(&self) -> Period {
        self.today
    }

    /// Parse a period string or fall back to the reference month
    pub fn parse_or_current(&self, period_str: Option<&str>) -> FinanceResult<Period> {
        match period_str {
            Some(s) => self.parse(s),
            None => Ok(self.current_period()),
        }
    }

    /// Parse a period string
    ///
    /// Formats supported: "2026-01", "January 2026", "jan 2026", "Jan"
    /// (reference year), "current", "last", "next".
    pub fn parse(&self, s: &str) -> FinanceResult<Period> {
        let lower = s.trim().to_lowercase();

        match lower.as_str() {
            "current" | "now" | "this" => return Ok(self.today),
            "last" | "previous" | "prev" => return Ok(self.today.prev()),
            "next" => return Ok(self.today.next()),
            _ => {}
        }

        // A bare month name means that month of the reference year
        if let Ok(month) = lower.parse::<Month>() {
            return Ok(Period::new(month, self.today.year));
        }

        Period::parse(&lower)
            .map_err(|_| FinanceError::Validation(format!("Invalid period format: {}", s.trim())))
    }
}

impl Default for PeriodService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> PeriodService {
        PeriodService::anchored(Period::new(Month::January, 2026))
    }

    #[test]
    fn test_relative_keywords() {
        let service = service();
        assert_eq!(
            service.parse("current").unwrap(),
            Period::new(Month::January, 2026)
        );
        assert_eq!(
            service.parse("LAST").unwrap(),
            Period::new(Month::December, 2025)
        );
        assert_eq!(
            service.parse("next").unwrap(),
            Period::new(Month::February, 2026)
        );
    }

    #[test]
    fn test_bare_month_uses_reference_year() {
        let service = service();
        assert_eq!(service.parse("Oct").unwrap(), Period::new(Month::October, 2026));
        assert_eq!(
            service.parse("march").unwrap(),
            Period::new(Month::March, 2026)
        );
    }

    #[test]
    fn test_explicit_formats() {
        let service = service();
        assert_eq!(
            service.parse("2025-07").unwrap(),
            Period::new(Month::July, 2025)
        );
        assert_eq!(
            service.parse("September 2024").unwrap(),
            Period::new(Month::September, 2024)
        );
    }

    #[test]
    fn test_invalid() {
        let service = service();
        let err = service.parse("someday").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Invalid period format: someday");
        assert!(service.parse("2025-13").is_err());
    }

    #[test]
    fn test_parse_or_current() {
        let service = service();
        assert_eq!(service.parse_or_current(None).unwrap(), service.current_period());
    }
}
