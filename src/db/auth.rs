use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub is_admin: bool,
}

pub fn get_or_create_user(conn: &Connection, email: &str, now: i64) -> Result<User, ServerError> {
    let existing = find_user_by_email(conn, email)?;
    if let Some(user) = existing {
        return Ok(user);
    }

    conn.execute(
        "INSERT INTO users (email, is_admin, created_at) VALUES (?1, 0, ?2)",
        params![email, now],
    )?;
    Ok(User {
        id: conn.last_insert_rowid(),
        email: email.to_string(),
        name: None,
        is_admin: false,
    })
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>, ServerError> {
    Ok(conn
        .query_row(
            "SELECT id, email, name, is_admin FROM users WHERE email = ?",
            params![email],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    name: row.get(2)?,
                    is_admin: row.get(3)?,
                })
            },
        )
        .optional()?)
}

pub fn set_admin(conn: &Connection, email: &str, is_admin: bool) -> Result<(), ServerError> {
    let changed = conn.execute(
        "UPDATE users SET is_admin = ?1 WHERE email = ?2",
        params![is_admin, email],
    )?;
    if changed == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}

pub fn insert_magic_link(
    conn: &Connection,
    user_id: i64,
    token_hash: &[u8],
    now: i64,
    expires_at: i64,
) -> Result<(), ServerError> {
    conn.execute(
        "INSERT INTO magic_links (user_id, token_hash, created_at, expires_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![user_id, token_hash, now, expires_at],
    )?;
    Ok(())
}

/// Burn a magic link: valid only when unexpired and never used before.
/// Returns the user id the link belongs to.
pub fn consume_magic_link(
    conn: &mut Connection,
    token_hash: &[u8],
    now: i64,
) -> Result<Option<i64>, ServerError> {
    let tx = conn.transaction()?;

    let row: Option<(i64, i64)> = tx
        .query_row(
            "SELECT id, user_id FROM magic_links
             WHERE token_hash = ?1 AND used_at IS NULL AND expires_at > ?2",
            params![token_hash, now],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let Some((link_id, user_id)) = row else {
        tx.rollback().ok();
        return Ok(None);
    };

    tx.execute("UPDATE magic_links SET used_at = ?1 WHERE id = ?2", params![now, link_id])?;
    tx.execute("UPDATE users SET last_login_at = ?1 WHERE id = ?2", params![now, user_id])?;

    tx.commit()?;
    Ok(Some(user_id))
}

pub fn create_session(
    conn: &Connection,
    user_id: i64,
    token_hash: &[u8],
    now: i64,
    expires_at: i64,
) -> Result<(), ServerError> {
    conn.execute(
        "INSERT INTO sessions (user_id, token_hash, created_at, expires_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![user_id, token_hash, now, expires_at],
    )?;
    Ok(())
}

/// Resolve a session cookie to its user, ignoring expired or revoked rows.
pub fn load_user_from_session(
    conn: &Connection,
    token_hash: &[u8],
    now: i64,
) -> Result<Option<User>, ServerError> {
    Ok(conn
        .query_row(
            "SELECT u.id, u.email, u.name, u.is_admin
             FROM sessions s
             JOIN users u ON u.id = s.user_id
             WHERE s.token_hash = ?1 AND s.revoked_at IS NULL AND s.expires_at > ?2",
            params![token_hash, now],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    name: row.get(2)?,
                    is_admin: row.get(3)?,
                })
            },
        )
        .optional()?)
}

pub fn revoke_session(conn: &Connection, token_hash: &[u8], now: i64) -> Result<(), ServerError> {
    conn.execute(
        "UPDATE sessions SET revoked_at = ?1 WHERE token_hash = ?2 AND revoked_at IS NULL",
        params![now, token_hash],
    )?;
    Ok(())
}
