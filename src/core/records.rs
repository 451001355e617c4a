//! Write paths shared by the CLI commands: each one validates, writes, and
//! leaves a line in the activity log.

use crate::core::aggregator::client::client_total_revenue;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db;
use crate::errors::{AppError, AppResult};
use crate::models::category::Category;
use crate::models::{
    Client, ClientContact, Contract, Schedule, ScheduleType, ScheduleWorker, WorkPeriod, Worker,
};
use chrono::{Days, NaiveDate, NaiveTime};

/// Per-assignment terms; `None` falls back to the worker's own defaults.
#[derive(Debug, Clone, Default)]
pub struct AssignmentTerms {
    pub hourly_wage: Option<i64>,
    pub fuel_allowance: Option<i64>,
    pub other_allowance: Option<i64>,
    pub tax_withheld: Option<bool>,
    pub uniform_time: bool,
}

impl AssignmentTerms {
    /// Build the assignment row for `worker`, copying its allowances and
    /// withholding flag unless overridden. The wage stays an override so
    /// that later wage changes on the worker still apply.
    pub fn to_assignment(&self, schedule_id: i64, worker: &Worker) -> ScheduleWorker {
        ScheduleWorker {
            id: 0,
            schedule_id,
            worker_id: worker.id,
            worker_name: worker.name.clone(),
            worker_hourly_wage: worker.hourly_wage,
            hourly_wage: self.hourly_wage,
            fuel_allowance: self.fuel_allowance.unwrap_or(worker.fuel_allowance),
            other_allowance: self.other_allowance.unwrap_or(worker.other_allowance),
            tax_withheld: self.tax_withheld.unwrap_or(worker.tax_withheld),
            uniform_time: self.uniform_time,
            ..Default::default()
        }
    }
}

/// Times shared by the periods created in one call.
#[derive(Debug, Clone, Copy)]
pub struct PeriodTemplate {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub break_minutes: i64,
    pub overtime_hours: f64,
}

impl PeriodTemplate {
    pub fn on(&self, schedule_worker_id: i64, date: NaiveDate) -> WorkPeriod {
        WorkPeriod {
            schedule_worker_id,
            overtime_hours: self.overtime_hours,
            ..WorkPeriod::new(date, self.start, self.end, self.break_minutes)
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssignmentDraft {
    pub worker_id: i64,
    pub terms: AssignmentTerms,
    /// Periods to create; with `uniform_time` one per schedule day.
    pub template: Option<PeriodTemplate>,
}

/// A schedule with everything that is created together with it.
#[derive(Debug, Clone)]
pub struct ScheduleDraft {
    pub schedule: Schedule,
    pub assignments: Vec<AssignmentDraft>,
    pub contract: Option<Contract>,
}

/// Every day from `start` to `end`, inclusive.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = start;
    while d <= end {
        out.push(d);
        match d.checked_add_days(Days::new(1)) {
            Some(next) => d = next,
            None => break,
        }
    }
    out
}

pub fn add_worker(pool: &mut DbPool, worker: &Worker) -> AppResult<i64> {
    let id = db::create_worker(&pool.conn, worker)?;
    ttlog_soft(&pool.conn, "worker_add", &format!("worker #{id}"), &worker.name);
    Ok(id)
}

pub fn edit_worker(pool: &mut DbPool, worker: &Worker) -> AppResult<()> {
    db::update_worker(&pool.conn, worker)?;
    ttlog_soft(&pool.conn, "worker_edit", &format!("worker #{}", worker.id), &worker.name);
    Ok(())
}

pub fn add_client(pool: &mut DbPool, client: &Client) -> AppResult<i64> {
    let id = db::create_client(&pool.conn, client)?;
    ttlog_soft(&pool.conn, "client_add", &format!("client #{id}"), &client.name);
    Ok(id)
}

pub fn edit_client(pool: &mut DbPool, client: &Client) -> AppResult<()> {
    db::update_client(&pool.conn, client)?;
    ttlog_soft(&pool.conn, "client_edit", &format!("client #{}", client.id), &client.name);
    Ok(())
}

pub fn add_contact(pool: &mut DbPool, contact: &ClientContact) -> AppResult<i64> {
    let id = db::add_client_contact(&pool.conn, contact)?;
    ttlog_soft(
        &pool.conn,
        "contact_add",
        &format!("client #{}", contact.client_id),
        &format!(
            "{}{}",
            contact.name,
            if contact.is_primary { " (primary)" } else { "" }
        ),
    );
    Ok(id)
}

pub fn make_primary_contact(pool: &mut DbPool, client_id: i64, contact_id: i64) -> AppResult<()> {
    db::set_primary_contact(&pool.conn, client_id, contact_id)?;
    ttlog_soft(
        &pool.conn,
        "primary_contact",
        &format!("client #{client_id}"),
        &format!("contact #{contact_id}"),
    );
    Ok(())
}

pub fn add_category(pool: &mut DbPool, category: &Category) -> AppResult<i64> {
    let id = db::create_category(&pool.conn, category)?;
    ttlog_soft(&pool.conn, "category_add", &category.name, &category.color);
    Ok(id)
}

/// Create the schedule, its assignments with their periods, and its
/// contract in one transaction. Nothing is left behind when any step fails.
pub fn save_schedule_draft(pool: &mut DbPool, draft: &ScheduleDraft) -> AppResult<i64> {
    if draft.schedule.schedule_type == ScheduleType::Personal
        && (!draft.assignments.is_empty() || draft.contract.is_some())
    {
        return Err(AppError::validation(
            "a personal schedule cannot carry workers or a contract",
        ));
    }

    let tx = pool.conn.transaction()?;

    let schedule_id = db::create_schedule(&tx, &draft.schedule)?;

    for a in &draft.assignments {
        let worker = db::get_worker(&tx, a.worker_id)?;
        let sw = a.terms.to_assignment(schedule_id, &worker);
        let sw_id = db::create_schedule_worker(&tx, &sw)?;

        if let Some(template) = &a.template {
            let dates = if a.terms.uniform_time {
                days_between(draft.schedule.start_date, draft.schedule.end_date)
            } else {
                vec![draft.schedule.start_date]
            };
            for d in dates {
                db::create_work_period(&tx, &template.on(sw_id, d))?;
            }
        }
    }

    if let Some(contract) = &draft.contract {
        let c = Contract {
            schedule_id,
            ..contract.clone()
        };
        db::create_schedule_contract(&tx, &c)?;
    }

    tx.commit()?;

    ttlog_soft(
        &pool.conn,
        "schedule_add",
        &format!("schedule #{schedule_id}"),
        &format!(
            "{} ({} workers)",
            draft.schedule.title,
            draft.assignments.len()
        ),
    );
    Ok(schedule_id)
}

pub fn assign_worker(
    pool: &mut DbPool,
    schedule_id: i64,
    worker_id: i64,
    terms: &AssignmentTerms,
) -> AppResult<i64> {
    let worker = db::get_worker(&pool.conn, worker_id)?;
    let sw = terms.to_assignment(schedule_id, &worker);
    let id = db::create_schedule_worker(&pool.conn, &sw)?;

    ttlog_soft(
        &pool.conn,
        "assign",
        &format!("schedule #{schedule_id}"),
        &format!("{} → assignment #{id}", worker.name),
    );
    Ok(id)
}

/// Add one period per date to an assignment, all in one transaction.
pub fn add_periods(
    pool: &mut DbPool,
    schedule_worker_id: i64,
    dates: &[NaiveDate],
    template: &PeriodTemplate,
) -> AppResult<Vec<i64>> {
    db::get_schedule_worker(&pool.conn, schedule_worker_id)?;

    let tx = pool.conn.transaction()?;
    let mut ids = Vec::with_capacity(dates.len());
    for d in dates {
        ids.push(db::create_work_period(&tx, &template.on(schedule_worker_id, *d))?);
    }
    tx.commit()?;

    ttlog_soft(
        &pool.conn,
        "period_add",
        &format!("assignment #{schedule_worker_id}"),
        &format!("{} period(s)", ids.len()),
    );
    Ok(ids)
}

pub fn add_contract(pool: &mut DbPool, contract: &Contract) -> AppResult<i64> {
    let id = db::create_schedule_contract(&pool.conn, contract)?;
    ttlog_soft(
        &pool.conn,
        "contract",
        &format!("schedule #{}", contract.schedule_id),
        &format!(
            "{} {} ({})",
            contract.contract_type.to_db_str(),
            contract.contract_amount,
            contract.status.to_db_str()
        ),
    );
    Ok(id)
}

/// Recompute `total_revenue` of one client from its business schedules.
pub fn refresh_client_totals(pool: &mut DbPool, client_id: i64) -> AppResult<i64> {
    let mut client = db::get_client(&pool.conn, client_id)?;
    let schedules = db::get_all_schedules(&pool.conn)?;

    client.total_revenue = client_total_revenue(&schedules, client_id);
    db::update_client(&pool.conn, &client)?;

    ttlog_soft(
        &pool.conn,
        "client_refresh",
        &format!("client #{client_id}"),
        &format!("total revenue {}", client.total_revenue),
    );
    Ok(client.total_revenue)
}
