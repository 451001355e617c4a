use crate::ui::messages::success;
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists. It also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create every domain table with the current schema.
fn create_domain_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS workers (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            phone           TEXT NOT NULL DEFAULT '',
            bank_account    TEXT NOT NULL DEFAULT '',
            bank            TEXT,
            hourly_wage     INTEGER NOT NULL DEFAULT 0,
            fuel_allowance  INTEGER NOT NULL DEFAULT 0,
            other_allowance INTEGER NOT NULL DEFAULT 0,
            tax_withheld    INTEGER NOT NULL DEFAULT 0,
            memo            TEXT NOT NULL DEFAULT '',
            created_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS clients (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            phone           TEXT NOT NULL,
            total_revenue   INTEGER NOT NULL DEFAULT 0,
            unpaid_amount   INTEGER NOT NULL DEFAULT 0,
            address         TEXT NOT NULL DEFAULT '',
            business_number TEXT NOT NULL DEFAULT '',
            memo            TEXT NOT NULL DEFAULT '',
            created_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS client_contacts (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            client_id   INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
            name        TEXT NOT NULL,
            position    TEXT NOT NULL DEFAULT '',
            phone       TEXT NOT NULL DEFAULT '',
            memo        TEXT NOT NULL DEFAULT '',
            is_primary  INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS categories (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            name   TEXT NOT NULL UNIQUE,
            color  TEXT NOT NULL DEFAULT '#9E9E9E'
        );

        CREATE TABLE IF NOT EXISTS schedules (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            title           TEXT NOT NULL,
            description     TEXT NOT NULL DEFAULT '',
            start_date      TEXT NOT NULL,
            end_date        TEXT NOT NULL,
            category        TEXT NOT NULL DEFAULT '',
            address         TEXT NOT NULL DEFAULT '',
            schedule_type   TEXT NOT NULL DEFAULT 'business'
                            CHECK(schedule_type IN ('personal','business')),
            client_id       INTEGER REFERENCES clients(id) ON DELETE SET NULL,
            contract_amount INTEGER NOT NULL DEFAULT 0,
            memo            TEXT NOT NULL DEFAULT '',
            created_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS schedule_workers (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            schedule_id     INTEGER NOT NULL REFERENCES schedules(id) ON DELETE CASCADE,
            worker_id       INTEGER NOT NULL REFERENCES workers(id),
            hourly_wage     INTEGER,
            fuel_allowance  INTEGER NOT NULL DEFAULT 0,
            other_allowance INTEGER NOT NULL DEFAULT 0,
            tax_withheld    INTEGER NOT NULL DEFAULT 0,
            uniform_time    INTEGER NOT NULL DEFAULT 0,
            wage_paid       INTEGER NOT NULL DEFAULT 0,
            fuel_paid       INTEGER NOT NULL DEFAULT 0,
            other_paid      INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS work_periods (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            schedule_worker_id  INTEGER NOT NULL REFERENCES schedule_workers(id) ON DELETE CASCADE,
            work_date           TEXT,
            start_time          TEXT,
            end_time            TEXT,
            break_minutes       INTEGER NOT NULL DEFAULT 0,
            overtime_hours      REAL NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS contracts (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            schedule_id     INTEGER NOT NULL UNIQUE REFERENCES schedules(id) ON DELETE CASCADE,
            contract_type   TEXT NOT NULL CHECK(contract_type IN ('written','verbal','text')),
            contract_amount INTEGER NOT NULL DEFAULT 0,
            content         TEXT NOT NULL DEFAULT '',
            status          TEXT NOT NULL DEFAULT 'pending'
        );

        CREATE INDEX IF NOT EXISTS idx_schedules_start ON schedules(start_date);
        CREATE INDEX IF NOT EXISTS idx_sw_schedule ON schedule_workers(schedule_id);
        CREATE INDEX IF NOT EXISTS idx_periods_sw ON work_periods(schedule_worker_id);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Databases created before per-assignment "same hours every day" support
/// lack `schedule_workers.uniform_time`.
fn migrate_add_uniform_time_column(conn: &Connection) -> Result<(), Error> {
    let version = "20250412_0003_add_uniform_time";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    if !table_has_column(conn, "schedule_workers", "uniform_time")? {
        conn.execute(
            "ALTER TABLE schedule_workers ADD COLUMN uniform_time INTEGER NOT NULL DEFAULT 0;",
            [],
        )
        .map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to add 'uniform_time' column: {}", e)),
            )
        })?;

        success(format!(
            "Migration applied: {} → added 'uniform_time' to schedule_workers",
            version
        ));
    }

    mark_migration_applied(conn, version, "Added uniform_time flag to schedule_workers")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Tables (no-op when present)
    let fresh = !table_exists(conn, "schedules")?;
    create_domain_tables(conn)?;
    if fresh {
        success("Created database schema.");
    }

    // 3) Named column migrations for older files
    migrate_add_uniform_time_column(conn)?;

    Ok(())
}
