use crate::domain::lead::{Lead, NewLead};
use crate::errors::ServerError;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use std::collections::BTreeMap;

pub fn insert(
    conn: &Connection,
    new: &NewLead,
    source: &str,
    now: NaiveDateTime,
) -> Result<i64, ServerError> {
    let utm_json = match &new.utm {
        Some(utm) => Some(serde_json::to_string(utm).unwrap_or_else(|_| "{}".into())),
        None => None,
    };

    conn.execute(
        "INSERT INTO leads (name, email, phone, message, source, utm, property_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![new.name, new.email, new.phone, new.message, source, utm_json, new.property_id, now],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Leads newest first, with the listing title joined in when the lead
/// came from a property page.
pub fn list_with_property(conn: &Connection) -> Result<Vec<Lead>, ServerError> {
    let mut stmt = conn.prepare(
        "SELECT l.id, l.name, l.email, l.phone, l.message, l.source, l.utm,
                l.property_id, p.title AS property_title, l.created_at
         FROM leads l
         LEFT JOIN properties p ON p.id = l.property_id
         ORDER BY l.created_at DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        let utm_json: Option<String> = row.get("utm")?;
        let utm: Option<BTreeMap<String, String>> =
            utm_json.and_then(|s| serde_json::from_str(&s).ok());
        Ok(Lead {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            message: row.get("message")?,
            source: row.get("source")?,
            utm,
            property_id: row.get("property_id")?,
            property_title: row.get("property_title")?,
            created_at: row.get("created_at")?,
        })
    })?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn count(conn: &Connection) -> Result<i64, ServerError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM leads", [], |r| r.get(0))?)
}
