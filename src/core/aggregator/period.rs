use super::{business, won_total};
use crate::core::calculator::assignment_pay;
use crate::errors::{AppError, AppResult};
use crate::models::Schedule;
use crate::utils::date::{Clock, first_day_of_month, last_day_of_month, week_bounds};
use crate::utils::range::parse_range;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Reporting window. Week/Month/Year are relative to the clock's "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Week,
    Month,
    Year,
    Custom(NaiveDate, NaiveDate),
}

impl ReportPeriod {
    /// `week`, `month`, `year`, or any range expression (`2025`, `2025-06`,
    /// `2025-06-01:2025-06-30`, ...).
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "week" | "w" => Ok(ReportPeriod::Week),
            "month" | "m" => Ok(ReportPeriod::Month),
            "year" | "y" => Ok(ReportPeriod::Year),
            other => {
                let (start, end) = parse_range(other)?;
                Ok(ReportPeriod::Custom(start, end))
            }
        }
    }

    pub fn bounds(&self, clock: &dyn Clock) -> AppResult<(NaiveDate, NaiveDate)> {
        let today = clock.today();
        match *self {
            ReportPeriod::Week => Ok(week_bounds(today)),
            ReportPeriod::Month => {
                let start = first_day_of_month(today.year(), today.month());
                let end = last_day_of_month(today.year(), today.month());
                start
                    .zip(end)
                    .ok_or_else(|| AppError::InvalidPeriod(today.to_string()))
            }
            ReportPeriod::Year => {
                let start = NaiveDate::from_ymd_opt(today.year(), 1, 1);
                let end = NaiveDate::from_ymd_opt(today.year(), 12, 31);
                start
                    .zip(end)
                    .ok_or_else(|| AppError::InvalidPeriod(today.to_string()))
            }
            ReportPeriod::Custom(start, end) => Ok((start, end)),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub schedule_count: usize,
    pub revenue: i64,
    pub expense: i64,
    pub profit: i64,
}

/// Revenue, expense and profit of one schedule.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScheduleFinancials {
    pub schedule_id: i64,
    pub title: String,
    pub start_date: NaiveDate,
    pub category: String,
    pub worker_count: usize,
    pub revenue: i64,
    pub expense: i64,
    pub profit: i64,
}

/// Σ net pay of every assignment on the schedule; 0 for personal schedules.
pub fn schedule_expense(schedule: &Schedule) -> i64 {
    if !schedule.is_business() {
        return 0;
    }
    won_total(schedule.workers.iter().map(|w| assignment_pay(w).net_pay))
}

pub fn schedule_revenue(schedule: &Schedule) -> i64 {
    if schedule.is_business() {
        schedule.contract_amount
    } else {
        0
    }
}

fn starts_within(schedule: &Schedule, start: NaiveDate, end: NaiveDate) -> bool {
    schedule.start_date >= start && schedule.start_date <= end
}

/// Business schedules starting inside `[start, end]`, in input order.
pub fn by_schedule(schedules: &[Schedule], start: NaiveDate, end: NaiveDate) -> Vec<ScheduleFinancials> {
    business(schedules)
        .filter(|s| starts_within(s, start, end))
        .map(|s| {
            let revenue = schedule_revenue(s);
            let expense = schedule_expense(s);
            ScheduleFinancials {
                schedule_id: s.id,
                title: s.title.clone(),
                start_date: s.start_date,
                category: s.category.clone(),
                worker_count: s.workers.len(),
                revenue,
                expense,
                profit: revenue.saturating_sub(expense),
            }
        })
        .collect()
}

pub fn summarize_period(schedules: &[Schedule], start: NaiveDate, end: NaiveDate) -> PeriodSummary {
    let rows = by_schedule(schedules, start, end);
    let revenue = won_total(rows.iter().map(|r| r.revenue));
    let expense = won_total(rows.iter().map(|r| r.expense));

    PeriodSummary {
        start,
        end,
        schedule_count: rows.len(),
        revenue,
        expense,
        profit: revenue.saturating_sub(expense),
    }
}
