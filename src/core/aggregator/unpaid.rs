use super::{business, rank_desc, won_total};
use crate::core::calculator::assignment_pay;
use crate::models::{PaymentFlags, Schedule, ScheduleWorker};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnpaidGrouping {
    #[default]
    ByWorker,
    BySchedule,
}

/// One assignment that is not fully paid.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UnpaidEntry {
    pub schedule_worker_id: i64,
    pub schedule_id: i64,
    pub schedule_title: String,
    pub start_date: NaiveDate,
    pub worker_id: i64,
    pub worker_name: String,
    pub net_pay: i64,
    pub fuel_allowance: i64,
    pub other_allowance: i64,
    pub payment: PaymentFlags,
    /// net pay + fuel + other, regardless of which parts are already paid.
    pub total_amount: i64,
    /// Only the parts still due.
    pub outstanding: i64,
}

impl UnpaidEntry {
    pub fn from_assignment(schedule: &Schedule, sw: &ScheduleWorker) -> Self {
        let net_pay = assignment_pay(sw).net_pay;
        let due = |paid: bool, amount: i64| if paid { 0 } else { amount };

        Self {
            schedule_worker_id: sw.id,
            schedule_id: schedule.id,
            schedule_title: schedule.title.clone(),
            start_date: schedule.start_date,
            worker_id: sw.worker_id,
            worker_name: sw.worker_name.clone(),
            net_pay,
            fuel_allowance: sw.fuel_allowance,
            other_allowance: sw.other_allowance,
            payment: sw.payment,
            total_amount: won_total([net_pay, sw.fuel_allowance, sw.other_allowance]),
            outstanding: won_total([
                due(sw.payment.wage_paid, net_pay),
                due(sw.payment.fuel_paid, sw.fuel_allowance),
                due(sw.payment.other_paid, sw.other_allowance),
            ]),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UnpaidGroup {
    pub key: i64, // worker id or schedule id, depending on the grouping
    pub label: String,
    pub entries: Vec<UnpaidEntry>,
    pub total_amount: i64,
    pub outstanding: i64,
}

/// Every business assignment whose `is_all_paid` is false, in schedule order.
pub fn unpaid_entries(schedules: &[Schedule]) -> Vec<UnpaidEntry> {
    business(schedules)
        .flat_map(|s| {
            s.workers
                .iter()
                .filter(|w| !w.is_all_paid())
                .map(move |w| UnpaidEntry::from_assignment(s, w))
        })
        .collect()
}

/// Group unpaid entries by worker or by schedule, largest total first.
pub fn group_unpaid(entries: Vec<UnpaidEntry>, grouping: UnpaidGrouping) -> Vec<UnpaidGroup> {
    let mut groups: Vec<UnpaidGroup> = Vec::new();

    for entry in entries {
        let (key, label) = match grouping {
            UnpaidGrouping::ByWorker => (entry.worker_id, entry.worker_name.clone()),
            UnpaidGrouping::BySchedule => (entry.schedule_id, entry.schedule_title.clone()),
        };

        let idx = match groups.iter().position(|g| g.key == key) {
            Some(i) => i,
            None => {
                groups.push(UnpaidGroup {
                    key,
                    label,
                    entries: Vec::new(),
                    total_amount: 0,
                    outstanding: 0,
                });
                groups.len() - 1
            }
        };

        let group = &mut groups[idx];
        group.total_amount = group.total_amount.saturating_add(entry.total_amount);
        group.outstanding = group.outstanding.saturating_add(entry.outstanding);
        group.entries.push(entry);
    }

    rank_desc(&mut groups, |g| g.total_amount);
    groups
}
