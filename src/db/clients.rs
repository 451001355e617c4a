use crate::core::validate::{validate_client, validate_contact};
use crate::errors::{AppError, AppResult};
use crate::models::{Client, ClientContact};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn map_client(row: &Row) -> Result<Client> {
    Ok(Client {
        id: row.get("id")?,
        name: row.get("name")?,
        phone: row.get("phone")?,
        contacts: Vec::new(),
        total_revenue: row.get("total_revenue")?,
        unpaid_amount: row.get("unpaid_amount")?,
        address: row.get("address")?,
        business_number: row.get("business_number")?,
        memo: row.get("memo")?,
    })
}

fn map_contact(row: &Row) -> Result<ClientContact> {
    Ok(ClientContact {
        id: row.get("id")?,
        client_id: row.get("client_id")?,
        name: row.get("name")?,
        position: row.get("position")?,
        phone: row.get("phone")?,
        memo: row.get("memo")?,
        is_primary: row.get::<_, i32>("is_primary")? == 1,
    })
}

pub fn create_client(conn: &Connection, c: &Client) -> AppResult<i64> {
    validate_client(c)?;

    conn.execute(
        "INSERT INTO clients (name, phone, total_revenue, unpaid_amount, address,
                              business_number, memo, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            c.name,
            c.phone,
            c.total_revenue,
            c.unpaid_amount,
            c.address,
            c.business_number,
            c.memo,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update the client row. Contacts are managed separately.
pub fn update_client(conn: &Connection, c: &Client) -> AppResult<()> {
    validate_client(c)?;

    let changed = conn.execute(
        "UPDATE clients
         SET name = ?1, phone = ?2, total_revenue = ?3, unpaid_amount = ?4,
             address = ?5, business_number = ?6, memo = ?7
         WHERE id = ?8",
        params![
            c.name,
            c.phone,
            c.total_revenue,
            c.unpaid_amount,
            c.address,
            c.business_number,
            c.memo,
            c.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::NotFound {
            entity: "client",
            id: c.id,
        });
    }
    Ok(())
}

/// Clients with their contacts, by name.
pub fn get_all_clients(conn: &Connection) -> AppResult<Vec<Client>> {
    let mut clients = {
        let mut stmt = conn.prepare("SELECT * FROM clients ORDER BY name ASC, id ASC")?;
        let rows = stmt.query_map([], map_client)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        out
    };

    let mut stmt = conn.prepare("SELECT * FROM client_contacts ORDER BY client_id ASC, id ASC")?;
    let rows = stmt.query_map([], map_contact)?;
    for r in rows {
        let contact = r?;
        if let Some(c) = clients.iter_mut().find(|c| c.id == contact.client_id) {
            c.contacts.push(contact);
        }
    }

    Ok(clients)
}

pub fn get_client(conn: &Connection, id: i64) -> AppResult<Client> {
    let mut client = conn
        .query_row("SELECT * FROM clients WHERE id = ?1", [id], map_client)
        .optional()?
        .ok_or(AppError::NotFound {
            entity: "client",
            id,
        })?;

    let mut stmt = conn.prepare("SELECT * FROM client_contacts WHERE client_id = ?1 ORDER BY id ASC")?;
    let rows = stmt.query_map([id], map_contact)?;
    for r in rows {
        client.contacts.push(r?);
    }

    Ok(client)
}

/// Insert a contact; when it is primary, every other contact of the client
/// is demoted in the same transaction.
pub fn add_client_contact(conn: &Connection, contact: &ClientContact) -> AppResult<i64> {
    validate_contact(contact)?;
    get_client(conn, contact.client_id)?;

    let tx = conn.unchecked_transaction()?;

    if contact.is_primary {
        tx.execute(
            "UPDATE client_contacts SET is_primary = 0 WHERE client_id = ?1",
            [contact.client_id],
        )?;
    }

    tx.execute(
        "INSERT INTO client_contacts (client_id, name, position, phone, memo, is_primary)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            contact.client_id,
            contact.name,
            contact.position,
            contact.phone,
            contact.memo,
            if contact.is_primary { 1 } else { 0 },
        ],
    )?;
    let id = tx.last_insert_rowid();

    tx.commit()?;
    Ok(id)
}

/// Make `contact_id` the only primary contact of `client_id`.
pub fn set_primary_contact(conn: &Connection, client_id: i64, contact_id: i64) -> AppResult<()> {
    let belongs: Option<i64> = conn
        .query_row(
            "SELECT id FROM client_contacts WHERE id = ?1 AND client_id = ?2",
            [contact_id, client_id],
            |row| row.get(0),
        )
        .optional()?;

    if belongs.is_none() {
        return Err(AppError::NotFound {
            entity: "contact",
            id: contact_id,
        });
    }

    conn.execute(
        "UPDATE client_contacts SET is_primary = CASE WHEN id = ?1 THEN 1 ELSE 0 END
         WHERE client_id = ?2",
        [contact_id, client_id],
    )?;
    Ok(())
}
