//! Date and billing-month helpers used across the services.

use chrono::NaiveDate;

use crate::domain::errors::{DomainError, DomainResult};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parse a `YYYY-MM` month key into `(year, month)`.
pub fn parse_month_key(key: &str) -> DomainResult<(i32, u32)> {
    let invalid = || DomainError::InvalidMonthKey(key.to_string());

    let (year_part, month_part) = key.split_once('-').ok_or_else(invalid)?;
    if year_part.len() != 4 {
        return Err(invalid());
    }
    let year: i32 = year_part.parse().map_err(|_| invalid())?;
    let month: u32 = month_part.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Normalize a `YYYY-MM` month key into the display form stored on challans,
/// e.g. `"2025-11"` -> `"November 2025"`.
pub fn month_display(key: &str) -> DomainResult<String> {
    let (year, month) = parse_month_key(key)?;
    Ok(format!("{} {}", MONTH_NAMES[(month - 1) as usize], year))
}

/// Parse a `YYYY-MM-DD` wire date.
pub fn parse_iso_date(value: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_display_normalizes_month_key() {
        assert_eq!(month_display("2025-11").unwrap(), "November 2025");
        assert_eq!(month_display("2026-01").unwrap(), "January 2026");
    }

    #[test]
    fn month_display_rejects_malformed_keys() {
        assert!(month_display("2025").is_err());
        assert!(month_display("2025-13").is_err());
        assert!(month_display("2025-00").is_err());
        assert!(month_display("25-11").is_err());
        assert!(month_display("November 2025").is_err());
    }

    #[test]
    fn parse_iso_date_accepts_only_dashed_dates() {
        assert_eq!(
            parse_iso_date("2025-11-30").unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 30).unwrap()
        );
        assert!(parse_iso_date("2025/11/30").is_err());
        assert!(parse_iso_date("30-11-2025").is_err());
    }
}
