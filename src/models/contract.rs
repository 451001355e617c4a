use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContractType {
    Written,
    Verbal,
    Text,
}

impl ContractType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ContractType::Written => "written",
            ContractType::Verbal => "verbal",
            ContractType::Text => "text",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "written" => Some(ContractType::Written),
            "verbal" => Some(ContractType::Verbal),
            "text" => Some(ContractType::Text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContractStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl ContractStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ContractStatus::Pending => "pending",
            ContractStatus::Active => "active",
            ContractStatus::Completed => "completed",
            ContractStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(ContractStatus::Pending),
            "active" => Some(ContractStatus::Active),
            "completed" => Some(ContractStatus::Completed),
            "cancelled" | "canceled" => Some(ContractStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Contract {
    pub id: i64,
    pub schedule_id: i64,
    pub contract_type: ContractType,
    pub contract_amount: i64,
    pub content: String,
    pub status: ContractStatus,
}
