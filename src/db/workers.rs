use crate::core::validate::validate_worker;
use crate::errors::{AppError, AppResult};
use crate::models::Worker;
use crate::models::bank::Bank;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const WORKER_COLUMNS: &str = "id, name, phone, bank_account, bank, hourly_wage, fuel_allowance, \
                              other_allowance, tax_withheld, memo";

pub fn map_worker(row: &Row) -> Result<Worker> {
    let bank: Option<String> = row.get("bank")?;

    Ok(Worker {
        id: row.get("id")?,
        name: row.get("name")?,
        phone: row.get("phone")?,
        bank_account: row.get("bank_account")?,
        bank: bank.as_deref().and_then(Bank::from_db_str),
        hourly_wage: row.get("hourly_wage")?,
        fuel_allowance: row.get("fuel_allowance")?,
        other_allowance: row.get("other_allowance")?,
        tax_withheld: row.get::<_, i32>("tax_withheld")? == 1,
        memo: row.get("memo")?,
    })
}

/// Insert a worker and return its id.
pub fn create_worker(conn: &Connection, w: &Worker) -> AppResult<i64> {
    validate_worker(w)?;

    conn.execute(
        "INSERT INTO workers (name, phone, bank_account, bank, hourly_wage, fuel_allowance,
                              other_allowance, tax_withheld, memo, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            w.name,
            w.phone,
            w.bank_account,
            w.bank.map(|b| b.to_db_str()),
            w.hourly_wage,
            w.fuel_allowance,
            w.other_allowance,
            if w.tax_withheld { 1 } else { 0 },
            w.memo,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update a worker (all fields except id).
pub fn update_worker(conn: &Connection, w: &Worker) -> AppResult<()> {
    validate_worker(w)?;

    let changed = conn.execute(
        "UPDATE workers
         SET name = ?1, phone = ?2, bank_account = ?3, bank = ?4, hourly_wage = ?5,
             fuel_allowance = ?6, other_allowance = ?7, tax_withheld = ?8, memo = ?9
         WHERE id = ?10",
        params![
            w.name,
            w.phone,
            w.bank_account,
            w.bank.map(|b| b.to_db_str()),
            w.hourly_wage,
            w.fuel_allowance,
            w.other_allowance,
            if w.tax_withheld { 1 } else { 0 },
            w.memo,
            w.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound {
            entity: "worker",
            id: w.id,
        });
    }
    Ok(())
}

pub fn get_all_workers(conn: &Connection) -> AppResult<Vec<Worker>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {WORKER_COLUMNS} FROM workers ORDER BY name ASC, id ASC"
    ))?;

    let rows = stmt.query_map([], map_worker)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_worker(conn: &Connection, id: i64) -> AppResult<Worker> {
    let mut stmt = conn.prepare(&format!("SELECT {WORKER_COLUMNS} FROM workers WHERE id = ?1"))?;

    stmt.query_row([id], map_worker)
        .optional()?
        .ok_or(AppError::NotFound {
            entity: "worker",
            id,
        })
}
