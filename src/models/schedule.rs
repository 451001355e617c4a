use super::contract::Contract;
use super::work_period::WorkPeriod;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScheduleType {
    Personal,
    Business,
}

impl ScheduleType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ScheduleType::Personal => "personal",
            ScheduleType::Business => "business",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "personal" => Some(ScheduleType::Personal),
            "business" => Some(ScheduleType::Business),
            _ => None,
        }
    }

    /// Helper: CLI input, case-insensitive, single-letter codes allowed.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "p" | "personal" => Some(ScheduleType::Personal),
            "b" | "business" => Some(ScheduleType::Business),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentKind {
    Wage,
    Fuel,
    Other,
}

impl PaymentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentKind::Wage => "wage",
            PaymentKind::Fuel => "fuel",
            PaymentKind::Other => "other",
        }
    }
}

/// The three independent paid/unpaid flags of an assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaymentFlags {
    pub wage_paid: bool,
    pub fuel_paid: bool,
    pub other_paid: bool,
}

impl PaymentFlags {
    pub fn get(&self, kind: PaymentKind) -> bool {
        match kind {
            PaymentKind::Wage => self.wage_paid,
            PaymentKind::Fuel => self.fuel_paid,
            PaymentKind::Other => self.other_paid,
        }
    }

    /// Copy with `kind` set to paid. There is no way back to unpaid.
    pub fn with_paid(self, kind: PaymentKind) -> Self {
        let mut next = self;
        match kind {
            PaymentKind::Wage => next.wage_paid = true,
            PaymentKind::Fuel => next.fuel_paid = true,
            PaymentKind::Other => next.other_paid = true,
        }
        next
    }
}

/// A worker assigned to a schedule, with per-assignment pay terms.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleWorker {
    pub id: i64,
    pub schedule_id: i64,
    pub worker_id: i64,
    pub worker_name: String,      // joined from workers.name
    pub worker_hourly_wage: i64,  // joined from workers.hourly_wage
    pub hourly_wage: Option<i64>, // per-assignment override
    pub fuel_allowance: i64,
    pub other_allowance: i64,
    pub tax_withheld: bool,
    pub uniform_time: bool,
    pub payment: PaymentFlags,
    pub periods: Vec<WorkPeriod>,
}

impl ScheduleWorker {
    pub fn effective_hourly_wage(&self) -> i64 {
        self.hourly_wage.unwrap_or(self.worker_hourly_wage)
    }

    /// An allowance of zero counts as paid.
    pub fn is_all_paid(&self) -> bool {
        self.payment.wage_paid
            && (self.fuel_allowance == 0 || self.payment.fuel_paid)
            && (self.other_allowance == 0 || self.payment.other_paid)
    }

    /// Whether `kind` is something that can still be owed on this assignment.
    pub fn is_applicable(&self, kind: PaymentKind) -> bool {
        match kind {
            PaymentKind::Wage => true,
            PaymentKind::Fuel => self.fuel_allowance != 0,
            PaymentKind::Other => self.other_allowance != 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Schedule {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category: String,
    pub address: String,
    pub schedule_type: ScheduleType,
    pub client_id: Option<i64>,
    pub contract_amount: i64,
    pub memo: String,
    pub workers: Vec<ScheduleWorker>,
    pub contract: Option<Contract>,
}

impl Schedule {
    pub fn new(title: &str, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: 0,
            title: title.trim().to_string(),
            description: String::new(),
            start_date,
            end_date,
            category: String::new(),
            address: String::new(),
            schedule_type: ScheduleType::Business,
            client_id: None,
            contract_amount: 0,
            memo: String::new(),
            workers: Vec::new(),
            contract: None,
        }
    }

    pub fn is_business(&self) -> bool {
        self.schedule_type == ScheduleType::Business
    }

    pub fn date_range_str(&self) -> String {
        if self.start_date == self.end_date {
            self.start_date.format("%Y-%m-%d").to_string()
        } else {
            format!(
                "{}~{}",
                self.start_date.format("%Y-%m-%d"),
                self.end_date.format("%Y-%m-%d")
            )
        }
    }
}
