use crate::auth::token::{generate_token_default, hash_token};
use crate::db::auth::{self as db_auth, User};
use crate::errors::ServerError;
use rusqlite::Connection;

pub const SESSION_COOKIE: &str = "session";
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7; // 7 days

/// Create a session row and return the raw token for the cookie.
pub fn create_session(conn: &Connection, user_id: i64, now: i64) -> Result<String, ServerError> {
    let raw_token = generate_token_default();
    let hash = hash_token(&raw_token);
    db_auth::create_session(conn, user_id, &hash, now, now + SESSION_TTL_SECS)?;
    Ok(raw_token)
}

pub fn load_user_from_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<User>, ServerError> {
    let hash = hash_token(raw_token);
    db_auth::load_user_from_session(conn, &hash, now)
}

pub fn revoke_session(conn: &Connection, raw_token: &str, now: i64) -> Result<(), ServerError> {
    let hash = hash_token(raw_token);
    db_auth::revoke_session(conn, &hash, now)
}

/// Pull the session token out of a Cookie header value.
pub fn session_token_from_cookies(cookie_header: &str) -> Option<&str> {
    cookie_header.split(';').find_map(|part| {
        let (name, value) = part.trim().split_once('=')?;
        if name == SESSION_COOKIE && !value.is_empty() {
            Some(value)
        } else {
            None
        }
    })
}

/// Set-Cookie value for a fresh session.
pub fn session_cookie(raw_token: &str) -> String {
    format!(
        "{SESSION_COOKIE}={raw_token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_TTL_SECS}"
    )
}

/// Set-Cookie value that clears the session.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
