use crate::errors::{AppError, AppResult};
use crate::utils::date::last_day_of_month;
use chrono::NaiveDate;

/// Parse a period expression into inclusive bounds.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidPeriod(r.to_string());

    let (start, end) = if let Some((start_raw, end_raw)) = r.split_once(':') {
        let start = start_raw.trim();
        let end = end_raw.trim();

        if start.len() != end.len() {
            return Err(AppError::InvalidPeriod(format!(
                "{r} (start and end must have the same format)"
            )));
        }

        (bounds_of(start).ok_or_else(invalid)?.0, bounds_of(end).ok_or_else(invalid)?.1)
    } else {
        bounds_of(r.trim()).ok_or_else(invalid)?
    };

    if end < start {
        return Err(AppError::InvalidPeriod(format!("{r} (end before start)")));
    }

    Ok((start, end))
}

/// First and last day covered by a single YYYY / YYYY-MM / YYYY-MM-DD token.
fn bounds_of(token: &str) -> Option<(NaiveDate, NaiveDate)> {
    match token.len() {
        // YYYY
        4 => {
            let y: i32 = token.parse().ok()?;
            Some((
                NaiveDate::from_ymd_opt(y, 1, 1)?,
                NaiveDate::from_ymd_opt(y, 12, 31)?,
            ))
        }
        // YYYY-MM
        7 => {
            let (ys, ms) = token.split_once('-')?;
            let y: i32 = ys.parse().ok()?;
            let m: u32 = ms.parse().ok()?;
            Some((NaiveDate::from_ymd_opt(y, m, 1)?, last_day_of_month(y, m)?))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(token, "%Y-%m-%d").ok()?;
            Some((d, d))
        }
        _ => None,
    }
}
