pub mod magic;
pub mod sessions;
pub mod token;

use crate::db::auth::User;
use crate::db::Database;
use crate::errors::ServerError;
use astra::Request;

/// The user attached to the current request, if the session cookie checks out.
pub fn current_user(req: &Request, db: &Database, now: i64) -> Result<Option<User>, ServerError> {
    let Some(cookie_header) = req
        .headers()
        .get("cookie")
        .and_then(|v| v.to_str().ok())
    else {
        return Ok(None);
    };
    let Some(token) = sessions::session_token_from_cookies(cookie_header) else {
        return Ok(None);
    };
    let token = token.to_string();
    db.with_conn(|conn| sessions::load_user_from_session(conn, &token, now))
}

/// Gate for /admin routes. Non-admins get Unauthorized; the router turns
/// that into a redirect to the login page for HTML requests.
pub fn require_admin(req: &Request, db: &Database, now: i64) -> Result<User, ServerError> {
    match current_user(req, db, now)? {
        Some(user) if user.is_admin => Ok(user),
        _ => Err(ServerError::Unauthorized("faça login para continuar".into())),
    }
}
