//! Utilities for date formatting
//!
//! Records store dates as DD.MM.YYYY strings
use chrono::NaiveDate;

/// Format a calendar date as DD.MM.YYYY
/// Example: 2025-03-05 -> "05.03.2025"
pub fn format_ru_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}
