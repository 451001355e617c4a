use crate::errors::{AppError, AppResult};
use crate::models::category::Category;
use rusqlite::{Connection, params};

pub fn create_category(conn: &Connection, c: &Category) -> AppResult<i64> {
    if c.name.is_empty() {
        return Err(AppError::validation("category name is required"));
    }

    conn.execute(
        "INSERT INTO categories (name, color) VALUES (?1, ?2)
         ON CONFLICT(name) DO UPDATE SET color = excluded.color",
        params![c.name, c.color],
    )?;

    let id = conn.query_row(
        "SELECT id FROM categories WHERE name = ?1",
        [&c.name],
        |row| row.get(0),
    )?;
    Ok(id)
}

pub fn get_all_categories(conn: &Connection) -> AppResult<Vec<Category>> {
    let mut stmt = conn.prepare("SELECT id, name, color FROM categories ORDER BY name ASC")?;

    let rows = stmt.query_map([], |row| {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
            color: row.get(2)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
