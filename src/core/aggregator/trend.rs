use super::period::summarize_period;
use crate::models::Schedule;
use crate::utils::date::{Clock, last_day_of_month, trailing_months};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const TREND_MONTHS: u32 = 12;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthPoint {
    pub month: String, // "YYYY-MM"
    pub revenue: i64,
    pub expense: i64,
    pub profit: i64,
}

/// One point per month for the trailing twelve months, oldest first and
/// ending with the clock's current month.
pub fn monthly_trend(schedules: &[Schedule], clock: &dyn Clock) -> Vec<MonthPoint> {
    trailing_months(clock.today(), TREND_MONTHS)
        .into_iter()
        .map(|first| {
            let last = month_end(first);
            let summary = summarize_period(schedules, first, last);
            MonthPoint {
                month: first.format("%Y-%m").to_string(),
                revenue: summary.revenue,
                expense: summary.expense,
                profit: summary.profit,
            }
        })
        .collect()
}

fn month_end(first: NaiveDate) -> NaiveDate {
    last_day_of_month(first.year(), first.month()).unwrap_or(first)
}
