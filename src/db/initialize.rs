use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Bring the ledger schema up to date and make sure foreign keys are
/// enforced on this connection, since assignments, periods and contracts
/// rely on cascading deletes.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;

    let enforced: i64 = conn.query_row("PRAGMA foreign_keys", [], |r| r.get(0))?;
    if enforced != 1 {
        return Err(AppError::Migration(
            "foreign key enforcement is not available".to_string(),
        ));
    }
    Ok(())
}
