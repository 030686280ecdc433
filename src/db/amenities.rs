use crate::errors::ServerError;
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub struct Amenity {
    pub id: i64,
    pub name: String,
}

pub fn all(conn: &Connection) -> Result<Vec<Amenity>, ServerError> {
    let mut stmt = conn.prepare("SELECT id, name FROM amenities ORDER BY name")?;
    let rows = stmt.query_map([], |row| Ok(Amenity { id: row.get(0)?, name: row.get(1)? }))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
