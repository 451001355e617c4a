pub mod bank;
pub mod category;
pub mod client;
pub mod contract;
pub mod schedule;
pub mod work_period;
pub mod worker;

pub use client::{Client, ClientContact};
pub use contract::{Contract, ContractStatus, ContractType};
pub use schedule::{PaymentFlags, PaymentKind, Schedule, ScheduleType, ScheduleWorker};
pub use work_period::WorkPeriod;
pub use worker::Worker;
