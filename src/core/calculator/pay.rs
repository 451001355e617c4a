//! Gross pay, withholding and net pay of one assignment.

use super::safe_number;
use crate::models::{ScheduleWorker, WorkPeriod};
use serde::Serialize;

/// Korean freelance / daily-worker withholding (3% income tax + 0.3% local).
pub const WITHHOLDING_RATE: f64 = 0.033;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PayBreakdown {
    pub total_minutes: i64,
    pub total_hours: f64,
    pub gross_pay: f64,
    pub tax: f64,
    pub net_pay: i64,
}

/// Worked minutes of a period: (end − start) − break, never below zero.
///
/// A period missing its date or either time, or ending before it starts,
/// counts as zero.
pub fn period_minutes(period: &WorkPeriod) -> i64 {
    let Some((start, end)) = period.bounds() else {
        return 0;
    };

    if end < start {
        return 0;
    }

    let worked = (end - start).num_minutes() - period.break_minutes.max(0);
    worked.max(0)
}

pub fn period_hours(period: &WorkPeriod) -> f64 {
    period_minutes(period) as f64 / 60.0
}

pub fn total_minutes(periods: &[WorkPeriod]) -> i64 {
    periods.iter().map(period_minutes).sum()
}

/// Pay for `periods` at `hourly_wage`, with 3.3% withheld when `tax_withheld`.
pub fn calculate_pay(hourly_wage: i64, periods: &[WorkPeriod], tax_withheld: bool) -> PayBreakdown {
    let minutes = total_minutes(periods);
    let hours = minutes as f64 / 60.0;

    let gross = safe_number(hourly_wage as f64 * hours);
    let tax = if tax_withheld {
        safe_number(gross * WITHHOLDING_RATE)
    } else {
        0.0
    };
    let net = safe_number((gross - tax).round());

    PayBreakdown {
        total_minutes: minutes,
        total_hours: hours,
        gross_pay: gross,
        tax,
        net_pay: net as i64,
    }
}

/// Pay of an assignment using its effective wage and its own withholding flag.
pub fn assignment_pay(worker: &ScheduleWorker) -> PayBreakdown {
    calculate_pay(
        worker.effective_hourly_wage(),
        &worker.periods,
        worker.tax_withheld,
    )
}

/// What the business owes for an assignment: net pay plus both allowances.
pub fn assignment_total(worker: &ScheduleWorker) -> i64 {
    assignment_pay(worker)
        .net_pay
        .saturating_add(worker.fuel_allowance)
        .saturating_add(worker.other_allowance)
}
