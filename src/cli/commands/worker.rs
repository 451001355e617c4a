use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, WorkerCmd};
use crate::config::Config;
use crate::core::records::{add_worker, edit_worker};
use crate::db;
use crate::errors::AppResult;
use crate::models::Worker;
use crate::ui::messages::{info, success};
use crate::utils::formatting::{format_won, yes_no};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Worker { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_pool(cfg)?;

    match action {
        WorkerCmd::Add {
            name,
            phone,
            account,
            wage,
            fuel,
            other,
            tax,
            memo,
        } => {
            let worker = Worker {
                fuel_allowance: *fuel,
                other_allowance: *other,
                tax_withheld: *tax,
                memo: memo.clone(),
                ..Worker::new(name, phone, account, *wage)
            };
            let id = add_worker(&mut pool, &worker)?;

            let bank = match worker.bank {
                Some(b) => format!(" ({})", b.name()),
                None => String::new(),
            };
            success(format!("Worker #{id} {}{bank} added.", worker.name));
        }

        WorkerCmd::List => {
            let workers = db::get_all_workers(&pool.conn)?;
            if workers.is_empty() {
                info("No workers registered.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Name"),
                Column::left("Phone"),
                Column::left("Bank"),
                Column::left("Account"),
                Column::right("Wage/h"),
                Column::right("Fuel"),
                Column::right("Other"),
                Column::left("3.3%"),
            ]);
            for w in &workers {
                table.add_row(vec![
                    w.id.to_string(),
                    w.name.clone(),
                    w.phone.clone(),
                    w.bank_name().to_string(),
                    w.bank_account.clone(),
                    format_won(w.hourly_wage, &cfg.currency_suffix),
                    format_won(w.fuel_allowance, &cfg.currency_suffix),
                    format_won(w.other_allowance, &cfg.currency_suffix),
                    yes_no(w.tax_withheld).to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        WorkerCmd::Edit {
            id,
            name,
            phone,
            account,
            wage,
            fuel,
            other,
            tax,
            memo,
        } => {
            let mut w = db::get_worker(&pool.conn, *id)?;

            if let Some(v) = name {
                w.name = v.trim().to_string();
            }
            if let Some(v) = phone {
                w.phone = v.trim().to_string();
            }
            if let Some(v) = account {
                w.set_bank_account(v);
            }
            if let Some(v) = wage {
                w.hourly_wage = *v;
            }
            if let Some(v) = fuel {
                w.fuel_allowance = *v;
            }
            if let Some(v) = other {
                w.other_allowance = *v;
            }
            if let Some(v) = tax {
                w.tax_withheld = *v;
            }
            if let Some(v) = memo {
                w.memo = v.clone();
            }

            edit_worker(&mut pool, &w)?;
            success(format!("Worker #{id} updated."));
        }
    }

    Ok(())
}
