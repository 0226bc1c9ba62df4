//! Input validation for the CLI-facing surface.

use chrono::NaiveDate;

use crate::error::SyncError;
use crate::extract::DateRange;

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;

/// Validate a sync year: must be within a plausible range.
pub fn validate_year(year: i32) -> Result<i32, SyncError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(SyncError::InvalidInput(format!(
            "year must be between {} and {}, got {}",
            MIN_YEAR, MAX_YEAR, year
        )));
    }
    Ok(year)
}

/// Validate a date in the source site's `DD/MM/YYYY` format.
pub fn validate_date_dmy(input: &str) -> Result<NaiveDate, SyncError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").map_err(|_| {
        SyncError::InvalidInput(format!(
            "invalid date '{}'. Expected format: DD/MM/YYYY (e.g., 01/06/2025)",
            trimmed
        ))
    })
}

/// Validate that a scrape window is ordered.
pub fn validate_date_range(from: NaiveDate, to: NaiveDate) -> Result<DateRange, SyncError> {
    if from > to {
        return Err(SyncError::InvalidInput(format!(
            "date range start {} is after its end {}",
            from, to
        )));
    }
    Ok(DateRange { from, to })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_bounds() {
        assert!(validate_year(2025).is_ok());
        assert!(validate_year(2000).is_ok());
        assert!(validate_year(2100).is_ok());
        assert!(validate_year(1999).is_err());
        assert!(validate_year(2101).is_err());
    }

    #[test]
    fn date_parsing() {
        let date = validate_date_dmy("03/06/2025").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 3).unwrap());
        assert!(validate_date_dmy("2025-06-03").is_err());
        assert!(validate_date_dmy("31/02/2025").is_err());
    }

    #[test]
    fn range_ordering() {
        let from = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert!(validate_date_range(from, to).is_ok());
        assert!(validate_date_range(to, from).is_err());
    }
}
