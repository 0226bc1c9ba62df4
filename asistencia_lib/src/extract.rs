//! Pure extraction helpers: slugs, percentages, counts, and date windows.
//!
//! No I/O and no failure modes beyond malformed input yielding `None`,
//! which callers tolerate rather than treat as fatal.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid regex: whitespace"));

/// An inclusive calendar window passed to the scraper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Lowercases, collapses whitespace runs into single hyphens, and strips
/// tildes. Used as the stable dedup key for party and politician names.
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    RE_WHITESPACE.replace_all(&lowered, "-").replace('~', "")
}

/// Parses a percentage cell like `"95,5%"` or `"100%"`. Decimal commas
/// are normalized to dots; unparseable input yields `None`.
pub fn parse_percentage(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace('%', "").replace(',', ".");
    cleaned.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Parses a non-negative count cell. Empty cells render as zero in the
/// source table.
pub fn parse_count(raw: &str) -> Option<u32> {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return Some(0);
    }
    cleaned.parse().ok()
}

/// Formats a date the way the chamber site expects: `DD/MM/YYYY`.
pub fn format_date_dmy(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// First and last day of the month containing `today`.
pub fn current_month_range(today: NaiveDate) -> DateRange {
    let from = today
        .with_day(1)
        .expect("day 1 is valid in every month");
    let (next_year, next_month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    let to = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("first of month is a valid date")
        .pred_opt()
        .expect("first of month has a predecessor");
    DateRange { from, to }
}

/// Jan 1 through Dec 31 of `year`.
pub fn year_range(year: i32) -> DateRange {
    DateRange {
        from: NaiveDate::from_ymd_opt(year, 1, 1).expect("Jan 1 is a valid date"),
        to: NaiveDate::from_ymd_opt(year, 12, 31).expect("Dec 31 is a valid date"),
    }
}

/// Year and month of `today` as plain integers, for the monthly upsert.
pub fn current_year_month(today: NaiveDate) -> (i32, u32) {
    (today.year(), today.month())
}
