//! One handler per top-level subcommand.

pub mod backup;
pub mod category;
pub mod client;
pub mod config;
pub mod export;
pub mod init;
pub mod log;
pub mod pay;
pub mod report;
pub mod schedule;
pub mod worker;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the configured database and bring its schema up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}
