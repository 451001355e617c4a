use crate::core::payment::PaymentStore;
use crate::core::validate::{validate_assignment, validate_period, validate_schedule};
use crate::db::contracts::load_contracts;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{PaymentFlags, Schedule, ScheduleType, ScheduleWorker, WorkPeriod};
use crate::utils::time::parse_time;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::HashMap;

const ASSIGNMENT_SELECT: &str = "SELECT sw.id, sw.schedule_id, sw.worker_id, sw.hourly_wage,
            sw.fuel_allowance, sw.other_allowance, sw.tax_withheld, sw.uniform_time,
            sw.wage_paid, sw.fuel_paid, sw.other_paid,
            w.name AS worker_name, w.hourly_wage AS worker_hourly_wage
     FROM schedule_workers sw
     JOIN workers w ON w.id = sw.worker_id";

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn map_schedule(row: &Row) -> Result<Schedule> {
    let start_str: String = row.get("start_date")?;
    let end_str: String = row.get("end_date")?;
    let type_str: String = row.get("schedule_type")?;

    let start_date = NaiveDate::parse_from_str(&start_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(start_str.clone())))?;
    let end_date = NaiveDate::parse_from_str(&end_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(end_str.clone())))?;
    let schedule_type = ScheduleType::from_db_str(&type_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidScheduleType(type_str.clone())))?;

    Ok(Schedule {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        start_date,
        end_date,
        category: row.get("category")?,
        address: row.get("address")?,
        schedule_type,
        client_id: row.get("client_id")?,
        contract_amount: row.get("contract_amount")?,
        memo: row.get("memo")?,
        workers: Vec::new(),
        contract: None,
    })
}

fn map_assignment(row: &Row) -> Result<ScheduleWorker> {
    let flag = |name: &str| -> Result<bool> { Ok(row.get::<_, i32>(name)? == 1) };

    Ok(ScheduleWorker {
        id: row.get("id")?,
        schedule_id: row.get("schedule_id")?,
        worker_id: row.get("worker_id")?,
        worker_name: row.get("worker_name")?,
        worker_hourly_wage: row.get("worker_hourly_wage")?,
        hourly_wage: row.get("hourly_wage")?,
        fuel_allowance: row.get("fuel_allowance")?,
        other_allowance: row.get("other_allowance")?,
        tax_withheld: flag("tax_withheld")?,
        uniform_time: flag("uniform_time")?,
        payment: PaymentFlags {
            wage_paid: flag("wage_paid")?,
            fuel_paid: flag("fuel_paid")?,
            other_paid: flag("other_paid")?,
        },
        periods: Vec::new(),
    })
}

/// Unparsable dates/times load as `None`; the pay calculator counts such a
/// period as zero hours instead of failing the whole report.
fn map_period(row: &Row) -> Result<WorkPeriod> {
    let date: Option<String> = row.get("work_date")?;
    let start: Option<String> = row.get("start_time")?;
    let end: Option<String> = row.get("end_time")?;

    Ok(WorkPeriod {
        id: row.get("id")?,
        schedule_worker_id: row.get("schedule_worker_id")?,
        work_date: date.and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        start_time: start.and_then(|t| parse_time(&t)),
        end_time: end.and_then(|t| parse_time(&t)),
        break_minutes: row.get("break_minutes")?,
        overtime_hours: row.get("overtime_hours")?,
    })
}

pub fn create_schedule(conn: &Connection, s: &Schedule) -> AppResult<i64> {
    validate_schedule(s)?;

    if let Some(client_id) = s.client_id {
        let exists: Option<i64> = conn
            .query_row("SELECT id FROM clients WHERE id = ?1", [client_id], |r| r.get(0))
            .optional()?;
        if exists.is_none() {
            return Err(AppError::NotFound {
                entity: "client",
                id: client_id,
            });
        }
    }

    conn.execute(
        "INSERT INTO schedules (title, description, start_date, end_date, category, address,
                                schedule_type, client_id, contract_amount, memo, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            s.title,
            s.description,
            s.start_date.format("%Y-%m-%d").to_string(),
            s.end_date.format("%Y-%m-%d").to_string(),
            s.category,
            s.address,
            s.schedule_type.to_db_str(),
            s.client_id,
            s.contract_amount,
            s.memo,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn schedule_type_of(conn: &Connection, schedule_id: i64) -> AppResult<ScheduleType> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT schedule_type FROM schedules WHERE id = ?1",
            [schedule_id],
            |r| r.get(0),
        )
        .optional()?;

    let raw = raw.ok_or(AppError::NotFound {
        entity: "schedule",
        id: schedule_id,
    })?;
    ScheduleType::from_db_str(&raw).ok_or(AppError::InvalidScheduleType(raw))
}

/// Whether the schedule exists and is a business schedule.
pub(crate) fn require_business_schedule(conn: &Connection, schedule_id: i64) -> AppResult<()> {
    match schedule_type_of(conn, schedule_id)? {
        ScheduleType::Business => Ok(()),
        ScheduleType::Personal => Err(AppError::validation(format!(
            "schedule #{schedule_id} is personal and cannot carry payroll or contracts"
        ))),
    }
}

pub fn create_schedule_worker(conn: &Connection, sw: &ScheduleWorker) -> AppResult<i64> {
    validate_assignment(sw)?;
    require_business_schedule(conn, sw.schedule_id)?;

    conn.execute(
        "INSERT INTO schedule_workers (schedule_id, worker_id, hourly_wage, fuel_allowance,
                                       other_allowance, tax_withheld, uniform_time,
                                       wage_paid, fuel_paid, other_paid)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            sw.schedule_id,
            sw.worker_id,
            sw.hourly_wage,
            sw.fuel_allowance,
            sw.other_allowance,
            sw.tax_withheld as i32,
            sw.uniform_time as i32,
            sw.payment.wage_paid as i32,
            sw.payment.fuel_paid as i32,
            sw.payment.other_paid as i32,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn create_work_period(conn: &Connection, p: &WorkPeriod) -> AppResult<i64> {
    validate_period(p)?;

    conn.execute(
        "INSERT INTO work_periods (schedule_worker_id, work_date, start_time, end_time,
                                   break_minutes, overtime_hours)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            p.schedule_worker_id,
            p.work_date.map(|d| d.format("%Y-%m-%d").to_string()),
            p.start_time.map(|t| t.format("%H:%M").to_string()),
            p.end_time.map(|t| t.format("%H:%M").to_string()),
            p.break_minutes,
            p.overtime_hours,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Every schedule with its assignments, their periods, and its contract,
/// ordered by start date.
pub fn get_all_schedules(conn: &Connection) -> AppResult<Vec<Schedule>> {
    let mut schedules = {
        let mut stmt = conn.prepare("SELECT * FROM schedules ORDER BY start_date ASC, id ASC")?;
        let rows = stmt.query_map([], map_schedule)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        out
    };

    let mut periods: HashMap<i64, Vec<WorkPeriod>> = HashMap::new();
    {
        let mut stmt = conn.prepare(
            "SELECT * FROM work_periods ORDER BY work_date ASC, start_time ASC, id ASC",
        )?;
        let rows = stmt.query_map([], map_period)?;
        for r in rows {
            let p = r?;
            periods.entry(p.schedule_worker_id).or_default().push(p);
        }
    }

    let mut assignments: HashMap<i64, Vec<ScheduleWorker>> = HashMap::new();
    {
        let mut stmt = conn.prepare(&format!("{ASSIGNMENT_SELECT} ORDER BY sw.id ASC"))?;
        let rows = stmt.query_map([], map_assignment)?;
        for r in rows {
            let mut sw = r?;
            sw.periods = periods.remove(&sw.id).unwrap_or_default();
            assignments.entry(sw.schedule_id).or_default().push(sw);
        }
    }

    let mut contracts = load_contracts(conn)?;

    for s in &mut schedules {
        s.workers = assignments.remove(&s.id).unwrap_or_default();
        s.contract = contracts.remove(&s.id);
    }

    Ok(schedules)
}

pub fn get_schedule(conn: &Connection, id: i64) -> AppResult<Schedule> {
    get_all_schedules(conn)?
        .into_iter()
        .find(|s| s.id == id)
        .ok_or(AppError::NotFound {
            entity: "schedule",
            id,
        })
}

/// One assignment with its periods.
pub fn get_schedule_worker(conn: &Connection, id: i64) -> AppResult<ScheduleWorker> {
    let mut sw = conn
        .query_row(
            &format!("{ASSIGNMENT_SELECT} WHERE sw.id = ?1"),
            [id],
            map_assignment,
        )
        .optional()?
        .ok_or(AppError::NotFound {
            entity: "assignment",
            id,
        })?;

    let mut stmt = conn.prepare(
        "SELECT * FROM work_periods WHERE schedule_worker_id = ?1
         ORDER BY work_date ASC, start_time ASC, id ASC",
    )?;
    let rows = stmt.query_map([id], map_period)?;
    for r in rows {
        sw.periods.push(r?);
    }

    Ok(sw)
}

pub fn save_payment_flags(conn: &Connection, schedule_worker_id: i64, flags: PaymentFlags) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE schedule_workers SET wage_paid = ?1, fuel_paid = ?2, other_paid = ?3
         WHERE id = ?4",
        params![
            flags.wage_paid as i32,
            flags.fuel_paid as i32,
            flags.other_paid as i32,
            schedule_worker_id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound {
            entity: "assignment",
            id: schedule_worker_id,
        });
    }
    Ok(())
}

impl PaymentStore for DbPool {
    fn save_payment_flags(&mut self, schedule_worker_id: i64, flags: PaymentFlags) -> AppResult<()> {
        save_payment_flags(&self.conn, schedule_worker_id, flags)
    }
}
