use super::{business, rank_desc, won_total};
use crate::core::calculator::safe_ratio;
use crate::models::Schedule;
use serde::Serialize;

pub const UNCATEGORIZED: &str = "(uncategorized)";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryRevenue {
    pub category: String,
    pub schedule_count: usize,
    pub revenue: i64,
    pub percentage: f64,
}

/// Contract revenue per category with its share of the grand total,
/// highest first. Shares are all 0 when the grand total is 0.
pub fn by_category<'a>(schedules: impl IntoIterator<Item = &'a Schedule>) -> Vec<CategoryRevenue> {
    let mut rows: Vec<CategoryRevenue> = Vec::new();

    for s in business(schedules) {
        let name = if s.category.trim().is_empty() {
            UNCATEGORIZED
        } else {
            s.category.trim()
        };

        match rows.iter_mut().find(|r| r.category == name) {
            Some(row) => {
                row.revenue = row.revenue.saturating_add(s.contract_amount);
                row.schedule_count += 1;
            }
            None => rows.push(CategoryRevenue {
                category: name.to_string(),
                schedule_count: 1,
                revenue: s.contract_amount,
                percentage: 0.0,
            }),
        }
    }

    let total = won_total(rows.iter().map(|r| r.revenue));
    for row in &mut rows {
        row.percentage = safe_ratio(row.revenue as f64 * 100.0, total as f64);
    }

    rank_desc(&mut rows, |r| r.revenue);
    rows
}
