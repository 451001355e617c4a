//! Read-only roll-ups of schedules and assignments for the report views.
//!
//! Every function here takes borrowed schedules and returns fresh report
//! rows; personal schedules are skipped everywhere.

pub mod category;
pub mod client;
pub mod period;
pub mod trend;
pub mod unpaid;

use crate::models::Schedule;

pub use category::{CategoryRevenue, by_category};
pub use client::{ClientAttribution, ClientRevenue, by_client};
pub use period::{PeriodSummary, ReportPeriod, ScheduleFinancials, by_schedule, summarize_period};
pub use trend::{MonthPoint, TREND_MONTHS, monthly_trend};
pub use unpaid::{UnpaidEntry, UnpaidGroup, UnpaidGrouping, group_unpaid, unpaid_entries};

/// Business schedules only.
pub fn business<'a>(
    schedules: impl IntoIterator<Item = &'a Schedule>,
) -> impl Iterator<Item = &'a Schedule> {
    schedules.into_iter().filter(|s| s.is_business())
}

/// Sum of won amounts, clamped at the `i64` bounds instead of overflowing.
pub fn won_total(amounts: impl IntoIterator<Item = i64>) -> i64 {
    amounts.into_iter().fold(0, i64::saturating_add)
}

/// Sort descending by `key`. `sort_by` is stable, so equal amounts keep
/// their encounter order.
pub fn rank_desc<T>(items: &mut [T], key: impl Fn(&T) -> i64) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

/// Keep the first `n` rows (all of them when `n` is `None`).
pub fn top_n<T>(mut items: Vec<T>, n: Option<usize>) -> Vec<T> {
    if let Some(n) = n {
        items.truncate(n);
    }
    items
}
