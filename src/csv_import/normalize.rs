//! Parsers that turn raw CSV cell text into canonical values.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// The date formats accepted by [parse_date], tried in order.
///
/// Slash-separated dates are read month-first, so "05/01/2024" is the 1st of
/// May; day-first only applies when the first number cannot be a month.
const DATE_FORMATS: &[&[BorrowedFormatItem]] = &[
    format_description!("[year]-[month]-[day]"),
    format_description!("[year]/[month]/[day]"),
    format_description!("[month padding:none]/[day padding:none]/[year]"),
    format_description!("[day padding:none]/[month padding:none]/[year]"),
    format_description!("[day padding:none]-[month padding:none]-[year]"),
];

/// Parse a currency-formatted amount cell.
///
/// Strips thousands separators and the "R" and "$" currency symbols, trims
/// whitespace, then parses the rest as a decimal number. Returns `None` for
/// empty or non-numeric cells; an absent amount is not an error.
///
/// Every "R" in the cell is removed, not just a leading currency marker, so
/// "12R3" parses as 123.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned = raw.replace([',', 'R', '$'], "");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse().ok()
}

/// Parse a calendar-date cell, trying each format in [DATE_FORMATS].
///
/// Returns `None` when no format matches. An unparseable date is distinct
/// from a missing cell, which callers check for themselves.
pub(crate) fn parse_date(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();

    DATE_FORMATS
        .iter()
        .find_map(|format| Date::parse(trimmed, format).ok())
}
