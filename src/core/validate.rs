//! Input checks run before any write reaches the database.

use crate::errors::{AppError, AppResult};
use crate::models::{
    Client, ClientContact, Contract, Schedule, ScheduleType, ScheduleWorker, WorkPeriod, Worker,
};

fn require(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn non_negative(value: i64, field: &str) -> AppResult<()> {
    if value < 0 {
        return Err(AppError::validation(format!("{field} cannot be negative")));
    }
    Ok(())
}

pub fn validate_client(c: &Client) -> AppResult<()> {
    require(&c.name, "client name")?;
    require(&c.phone, "client phone")?;
    non_negative(c.total_revenue, "total revenue")?;
    non_negative(c.unpaid_amount, "unpaid amount")
}

pub fn validate_contact(c: &ClientContact) -> AppResult<()> {
    require(&c.name, "contact name")
}

pub fn validate_worker(w: &Worker) -> AppResult<()> {
    require(&w.name, "worker name")?;
    non_negative(w.hourly_wage, "hourly wage")?;
    non_negative(w.fuel_allowance, "fuel allowance")?;
    non_negative(w.other_allowance, "other allowance")
}

/// Personal schedules carry no client and no contract amount.
pub fn validate_schedule(s: &Schedule) -> AppResult<()> {
    require(&s.title, "schedule title")?;
    non_negative(s.contract_amount, "contract amount")?;

    if s.end_date < s.start_date {
        return Err(AppError::validation(format!(
            "end date {} is before start date {}",
            s.end_date, s.start_date
        )));
    }

    if s.schedule_type == ScheduleType::Personal {
        if s.client_id.is_some() {
            return Err(AppError::validation("a personal schedule cannot have a client"));
        }
        if s.contract_amount != 0 {
            return Err(AppError::validation(
                "a personal schedule cannot have a contract amount",
            ));
        }
        if !s.workers.is_empty() || s.contract.is_some() {
            return Err(AppError::validation(
                "a personal schedule cannot carry workers or a contract",
            ));
        }
    }

    Ok(())
}

pub fn validate_assignment(sw: &ScheduleWorker) -> AppResult<()> {
    if let Some(wage) = sw.hourly_wage {
        non_negative(wage, "hourly wage")?;
    }
    non_negative(sw.fuel_allowance, "fuel allowance")?;
    non_negative(sw.other_allowance, "other allowance")
}

/// Periods written through the CLI must be complete and must not end before
/// they start; the calculator still tolerates bad rows already stored.
pub fn validate_period(p: &WorkPeriod) -> AppResult<()> {
    let (start, end) = p
        .bounds()
        .ok_or_else(|| AppError::validation("work date, start and end time are required"))?;

    if end < start {
        return Err(AppError::validation(format!(
            "end time {} is before start time {}",
            end.format("%H:%M"),
            start.format("%H:%M")
        )));
    }

    non_negative(p.break_minutes, "break duration")?;

    if !p.overtime_hours.is_finite() || p.overtime_hours < 0.0 {
        return Err(AppError::validation("overtime hours must be a non-negative number"));
    }
    Ok(())
}

pub fn validate_contract(c: &Contract) -> AppResult<()> {
    non_negative(c.contract_amount, "contract amount")
}
