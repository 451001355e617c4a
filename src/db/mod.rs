//! Data access layer: thin CRUD over the SQLite tables.
//!
//! Functions take a `&Connection` so they run the same way on a plain
//! connection and inside a transaction.

pub mod categories;
pub mod clients;
pub mod contracts;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod schedules;
pub mod workers;

pub use categories::{create_category, get_all_categories};
pub use clients::{
    add_client_contact, create_client, get_all_clients, get_client, set_primary_contact,
    update_client,
};
pub use contracts::create_schedule_contract;
pub use schedules::{
    create_schedule, create_schedule_worker, create_work_period, get_all_schedules, get_schedule,
    get_schedule_worker, save_payment_flags,
};
pub use workers::{create_worker, get_all_workers, get_worker, update_worker};
