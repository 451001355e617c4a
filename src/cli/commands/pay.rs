use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::assignment_total;
use crate::core::payment::mark_paid;
use crate::db;
use crate::db::log::ttlog_soft;
use crate::errors::AppResult;
use crate::models::PaymentKind;
use crate::ui::messages::{info, success};
use crate::utils::formatting::format_won;

fn kinds_list(kinds: &[PaymentKind]) -> String {
    kinds
        .iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Pay {
        assignment,
        wage,
        fuel,
        other,
    } = cmd
    else {
        return Ok(());
    };

    let mut kinds = Vec::new();
    if *wage {
        kinds.push(PaymentKind::Wage);
    }
    if *fuel {
        kinds.push(PaymentKind::Fuel);
    }
    if *other {
        kinds.push(PaymentKind::Other);
    }
    if kinds.is_empty() {
        kinds = vec![PaymentKind::Wage, PaymentKind::Fuel, PaymentKind::Other];
    }

    let mut pool = open_pool(cfg)?;
    let mut sw = db::get_schedule_worker(&pool.conn, *assignment)?;

    let outcome = mark_paid(&mut pool, &mut sw, &kinds)?;

    if outcome.newly_paid.is_empty() {
        info(format!("Nothing to pay on assignment #{assignment}."));
    } else {
        ttlog_soft(
            &pool.conn,
            "pay",
            &format!("assignment #{assignment}"),
            &format!("{}: {}", sw.worker_name, kinds_list(&outcome.newly_paid)),
        );
        success(format!(
            "Assignment #{assignment} ({}): {} marked as paid.",
            sw.worker_name,
            kinds_list(&outcome.newly_paid)
        ));
    }

    if outcome.all_paid {
        success(format!(
            "Assignment #{assignment} is fully paid ({}).",
            format_won(assignment_total(&sw), &cfg.currency_suffix)
        ));
    }
    Ok(())
}
