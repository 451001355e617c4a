use crate::core::aggregator::UnpaidEntry;
use chrono::NaiveDate;
use serde::Serialize;

/// Flat form of an unpaid entry; CSV records cannot nest the payment flags.
#[derive(Debug, Clone, Serialize)]
pub struct UnpaidRow {
    pub assignment_id: i64,
    pub schedule_id: i64,
    pub schedule_title: String,
    pub start_date: NaiveDate,
    pub worker_id: i64,
    pub worker_name: String,
    pub net_pay: i64,
    pub fuel_allowance: i64,
    pub other_allowance: i64,
    pub wage_paid: bool,
    pub fuel_paid: bool,
    pub other_paid: bool,
    pub total_amount: i64,
    pub outstanding: i64,
}

impl From<UnpaidEntry> for UnpaidRow {
    fn from(e: UnpaidEntry) -> Self {
        Self {
            assignment_id: e.schedule_worker_id,
            schedule_id: e.schedule_id,
            schedule_title: e.schedule_title,
            start_date: e.start_date,
            worker_id: e.worker_id,
            worker_name: e.worker_name,
            net_pay: e.net_pay,
            fuel_allowance: e.fuel_allowance,
            other_allowance: e.other_allowance,
            wage_paid: e.payment.wage_paid,
            fuel_paid: e.payment.fuel_paid,
            other_paid: e.payment.other_paid,
            total_amount: e.total_amount,
            outstanding: e.outstanding,
        }
    }
}
