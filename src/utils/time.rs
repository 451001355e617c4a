//! Clock times of work periods (`HH:MM`).

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

/// `"09:00"`, `" 9:30 "`; anything else is `None`.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Like `parse_time`, for command-line arguments that must be valid.
pub fn require_time(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn parse_optional_time(input: Option<&str>) -> AppResult<Option<NaiveTime>> {
    input.map(require_time).transpose()
}
