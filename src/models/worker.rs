use super::bank::{Bank, detect_bank};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Worker {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub bank_account: String, // ⇔ workers.bank_account (free text, separators kept)
    pub bank: Option<Bank>,   // ⇔ workers.bank (detected, may be NULL)
    pub hourly_wage: i64,     // won / hour
    pub fuel_allowance: i64,
    pub other_allowance: i64,
    pub tax_withheld: bool,
    pub memo: String,
}

impl Worker {
    /// New worker (id = 0 until inserted). The bank is detected from the
    /// account number.
    pub fn new(name: &str, phone: &str, bank_account: &str, hourly_wage: i64) -> Self {
        Self {
            id: 0,
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            bank_account: bank_account.trim().to_string(),
            bank: detect_bank(bank_account),
            hourly_wage,
            fuel_allowance: 0,
            other_allowance: 0,
            tax_withheld: false,
            memo: String::new(),
        }
    }

    pub fn set_bank_account(&mut self, account: &str) {
        self.bank_account = account.trim().to_string();
        self.bank = detect_bank(account);
    }

    pub fn bank_name(&self) -> &'static str {
        self.bank.map(|b| b.name()).unwrap_or("")
    }
}
