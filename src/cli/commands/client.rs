use crate::cli::commands::open_pool;
use crate::cli::parser::{ClientCmd, Commands};
use crate::config::Config;
use crate::core::records::{
    add_client, add_contact, edit_client, make_primary_contact, refresh_client_totals,
};
use crate::db;
use crate::errors::AppResult;
use crate::models::{Client, ClientContact};
use crate::ui::messages::{info, success};
use crate::utils::formatting::format_won;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Client { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_pool(cfg)?;
    let won = |v: i64| format_won(v, &cfg.currency_suffix);

    match action {
        ClientCmd::Add {
            name,
            phone,
            address,
            business_number,
            memo,
        } => {
            let client = Client {
                address: address.clone(),
                business_number: business_number.clone(),
                memo: memo.clone(),
                ..Client::new(name, phone)
            };
            let id = add_client(&mut pool, &client)?;
            success(format!("Client #{id} {} added.", client.name));
        }

        ClientCmd::List { contacts } => {
            let clients = db::get_all_clients(&pool.conn)?;
            if clients.is_empty() {
                info("No clients registered.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Name"),
                Column::left("Phone"),
                Column::left("Primary contact"),
                Column::right("Revenue"),
                Column::right("Unpaid"),
            ]);
            for c in &clients {
                let primary = c
                    .primary_contact()
                    .map(|p| format!("{} {}", p.name, p.phone).trim().to_string())
                    .unwrap_or_default();
                table.add_row(vec![
                    c.id.to_string(),
                    c.name.clone(),
                    c.phone.clone(),
                    primary,
                    won(c.total_revenue),
                    won(c.unpaid_amount),
                ]);
            }
            print!("{}", table.render());

            if *contacts {
                let mut table = Table::new(vec![
                    Column::right("ID"),
                    Column::left("Client"),
                    Column::left("Name"),
                    Column::left("Position"),
                    Column::left("Phone"),
                    Column::left("Primary"),
                ]);
                for c in &clients {
                    for p in &c.contacts {
                        table.add_row(vec![
                            p.id.to_string(),
                            c.name.clone(),
                            p.name.clone(),
                            p.position.clone(),
                            p.phone.clone(),
                            if p.is_primary { "*".into() } else { String::new() },
                        ]);
                    }
                }
                if !table.is_empty() {
                    println!();
                    print!("{}", table.render());
                }
            }
        }

        ClientCmd::Edit {
            id,
            name,
            phone,
            address,
            business_number,
            memo,
            unpaid,
        } => {
            let mut c = db::get_client(&pool.conn, *id)?;

            if let Some(v) = name {
                c.name = v.trim().to_string();
            }
            if let Some(v) = phone {
                c.phone = v.trim().to_string();
            }
            if let Some(v) = address {
                c.address = v.clone();
            }
            if let Some(v) = business_number {
                c.business_number = v.clone();
            }
            if let Some(v) = memo {
                c.memo = v.clone();
            }
            if let Some(v) = unpaid {
                c.unpaid_amount = *v;
            }

            edit_client(&mut pool, &c)?;
            success(format!("Client #{id} updated."));
        }

        ClientCmd::Contact {
            client,
            name,
            position,
            phone,
            memo,
            primary,
        } => {
            let contact = ClientContact {
                client_id: *client,
                name: name.trim().to_string(),
                position: position.clone(),
                phone: phone.clone(),
                memo: memo.clone(),
                is_primary: *primary,
                ..Default::default()
            };
            let id = add_contact(&mut pool, &contact)?;
            success(format!("Contact #{id} {} added to client #{client}.", contact.name));
        }

        ClientCmd::Primary { client, contact } => {
            make_primary_contact(&mut pool, *client, *contact)?;
            success(format!("Contact #{contact} is now the primary contact of client #{client}."));
        }

        ClientCmd::Refresh { client } => {
            let ids: Vec<i64> = match client {
                Some(id) => vec![*id],
                None => db::get_all_clients(&pool.conn)?
                    .into_iter()
                    .map(|c| c.id)
                    .collect(),
            };
            for id in ids {
                let total = refresh_client_totals(&mut pool, id)?;
                success(format!("Client #{id}: total revenue {}", won(total)));
            }
        }
    }

    Ok(())
}
