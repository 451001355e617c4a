pub mod aggregator;
pub mod backup;
pub mod calculator;
pub mod log;
pub mod payment;
pub mod records;
pub mod report;
pub mod validate;
