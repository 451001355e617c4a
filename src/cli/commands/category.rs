use crate::cli::commands::open_pool;
use crate::cli::parser::{CategoryCmd, Commands};
use crate::config::Config;
use crate::core::records::add_category;
use crate::db;
use crate::errors::AppResult;
use crate::models::category::Category;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Category { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_pool(cfg)?;

    match action {
        CategoryCmd::Add { name, color } => {
            let category = Category::new(name, color)?;
            add_category(&mut pool, &category)?;
            success(format!("Category '{}' saved ({}).", category.name, category.color));
        }
        CategoryCmd::List => {
            let categories = db::get_all_categories(&pool.conn)?;
            if categories.is_empty() {
                info("No categories defined.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Name"),
                Column::left("Colour"),
            ]);
            for c in categories {
                table.add_row(vec![c.id.to_string(), c.name, c.color]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
