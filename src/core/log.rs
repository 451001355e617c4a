use crate::db::log::{Activity, recent_activities};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::formatting::strip_ansi;
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 48;

/// Colour of an operation name in the log listing.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "worker_add" | "client_add" | "category_add" | "schedule_add" | "assign"
        | "period_add" | "contact_add" => Colour::Green,
        "worker_edit" | "client_edit" | "primary_contact" | "client_refresh" => Colour::Yellow,
        "pay" => Colour::Cyan,
        "contract" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn op_target(a: &Activity) -> String {
    if a.target.is_empty() {
        a.operation.clone()
    } else {
        format!("{} ({})", a.operation, a.target)
    }
}

/// Cut to `MAX_OP_WIDTH` visible characters and colour only the operation word.
fn render_op(a: &Activity) -> String {
    let color = color_for_operation(&a.operation);
    let visible = strip_ansi(&op_target(a));

    let truncated = if visible.chars().count() > MAX_OP_WIDTH {
        let mut s: String = visible.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    match truncated.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(truncated.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Print the activity log, oldest first; `recent` keeps the last N rows.
    pub fn print_log(pool: &DbPool, recent: Option<usize>) -> AppResult<()> {
        let entries = recent_activities(&pool.conn, recent)?;

        if entries.is_empty() {
            info("The activity log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|a| op_target(a).chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|a| a.id.to_string().len())
            .max()
            .unwrap_or(1);

        println!("📜 Activity log:\n");

        for a in &entries {
            let date = chrono::DateTime::parse_from_rfc3339(&a.date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or_else(|_| a.date.clone());

            let op = render_op(a);
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&op).chars().count()));

            println!(
                "{:>id_w$}: {} | {}{} => {}",
                a.id,
                date,
                op,
                padding,
                a.message,
                id_w = id_w
            );
        }

        Ok(())
    }
}
