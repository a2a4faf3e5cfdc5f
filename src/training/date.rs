//! Parsing and formatting of training dates.
//!
//! Users type dates as `DD.MM.YYYY`; records are keyed and sorted by the calendar
//! day itself, rendered canonically as `YYYY-MM-DD`. Dates are always built from
//! explicit day/month/year components, so no timezone is ever involved.

use std::sync::LazyLock;

use regex::Regex;
use time::{Date, Month, format_description::FormatItem, macros::format_description};

const CANONICAL_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DISPLAY_FORMAT: &[FormatItem<'static>] = format_description!("[day].[month].[year]");

// ASCII digits only; `\d` would also accept other Unicode digits.
static DISPLAY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2})\.([0-9]{2})\.([0-9]{4})$").expect("display date pattern compiles")
});

/// Parse a `DD.MM.YYYY` string into a calendar date.
///
/// Returns `None` when the text does not match the pattern or names a day that
/// does not exist (e.g. `31.02.2020`).
pub fn parse_display_date(text: &str) -> Option<Date> {
    let captures = DISPLAY_PATTERN.captures(text)?;
    let day: u8 = captures[1].parse().ok()?;
    let month: u8 = captures[2].parse().ok()?;
    let year: i32 = captures[3].parse().ok()?;
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}

/// True when `text` is a real calendar date written as `DD.MM.YYYY`.
pub fn is_valid_display_date(text: &str) -> bool {
    parse_display_date(text).is_some()
}

/// Normalize a `DD.MM.YYYY` string to its canonical `YYYY-MM-DD` form.
pub fn normalize_display_date(text: &str) -> Option<String> {
    parse_display_date(text).map(canonical_string)
}

/// Format a date as `YYYY-MM-DD`.
pub fn canonical_string(date: Date) -> String {
    date.format(CANONICAL_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Format a date as `DD.MM.YYYY`.
pub fn display_string(date: Date) -> String {
    date.format(DISPLAY_FORMAT).unwrap_or_else(|_| {
        format!("{:02}.{:02}.{:04}", date.day(), u8::from(date.month()), date.year())
    })
}

/// Parse a canonical `YYYY-MM-DD` string back into a date.
pub fn parse_canonical_date(text: &str) -> Option<Date> {
    Date::parse(text, CANONICAL_FORMAT).ok()
}
