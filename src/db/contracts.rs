use crate::core::validate::validate_contract;
use crate::db::schedules::require_business_schedule;
use crate::errors::{AppError, AppResult};
use crate::models::{Contract, ContractStatus, ContractType};
use rusqlite::{Connection, Result, Row, params};
use std::collections::HashMap;

fn map_contract(row: &Row) -> Result<Contract> {
    let type_str: String = row.get("contract_type")?;
    let status_str: String = row.get("status")?;

    let contract_type = ContractType::from_db_str(&type_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidContractType(type_str.clone())),
        )
    })?;
    let status = ContractStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidContractStatus(status_str.clone())),
        )
    })?;

    Ok(Contract {
        id: row.get("id")?,
        schedule_id: row.get("schedule_id")?,
        contract_type,
        contract_amount: row.get("contract_amount")?,
        content: row.get("content")?,
        status,
    })
}

/// Create (or replace) the contract of a business schedule.
pub fn create_schedule_contract(conn: &Connection, c: &Contract) -> AppResult<i64> {
    validate_contract(c)?;
    require_business_schedule(conn, c.schedule_id)?;

    conn.execute(
        "INSERT INTO contracts (schedule_id, contract_type, contract_amount, content, status)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(schedule_id) DO UPDATE SET
             contract_type = excluded.contract_type,
             contract_amount = excluded.contract_amount,
             content = excluded.content,
             status = excluded.status",
        params![
            c.schedule_id,
            c.contract_type.to_db_str(),
            c.contract_amount,
            c.content,
            c.status.to_db_str(),
        ],
    )?;

    let id = conn.query_row(
        "SELECT id FROM contracts WHERE schedule_id = ?1",
        [c.schedule_id],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Contracts keyed by schedule id.
pub(crate) fn load_contracts(conn: &Connection) -> AppResult<HashMap<i64, Contract>> {
    let mut stmt = conn.prepare("SELECT * FROM contracts")?;
    let rows = stmt.query_map([], map_contract)?;

    let mut out = HashMap::new();
    for r in rows {
        let c = r?;
        out.insert(c.schedule_id, c);
    }
    Ok(out)
}
