use crate::auth::token::{generate_token_default, hash_token};
use crate::db::auth as db_auth;
use crate::errors::ServerError;
use rusqlite::Connection;

#[derive(Debug, Clone)]
pub struct MagicLinkConfig {
    /// TTL for magic links in seconds.
    pub ttl_secs: i64,
    /// Relative path used when building links, e.g. "/auth/magic".
    pub magic_path: String,
}

impl Default for MagicLinkConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 15 * 60,
            magic_path: "/auth/magic".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IssuedMagicLink {
    pub email: String,
    pub user_id: i64,
    /// Raw token (never stored).
    pub token: String,
    pub expires_at: i64,
    /// Relative URL like "/auth/magic?token=..."
    pub link: String,
}

#[derive(Debug, Clone)]
pub struct RedeemedMagicLink {
    pub user_id: i64,
    pub email: String,
}

pub struct MagicLinkService {
    cfg: MagicLinkConfig,
}

impl MagicLinkService {
    pub fn new(cfg: MagicLinkConfig) -> Self {
        Self { cfg }
    }

    /// Trim + lowercase, minimal sanity check.
    pub fn normalize_email(email: &str) -> Result<String, ServerError> {
        let e = email.trim().to_lowercase();
        if e.is_empty() || !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
            return Err(ServerError::BadRequest("E-mail inválido".into()));
        }
        Ok(e)
    }

    fn build_link(&self, token: &str) -> String {
        format!("{}?token={}", self.cfg.magic_path, token)
    }

    /// Request a magic link. Only existing admin accounts get one: the
    /// back office is invite-only, so an unknown or non-admin email is
    /// rejected instead of provisioning a user.
    ///
    /// Email delivery is out of band; the caller logs `issued.link`.
    pub fn request_link(
        &self,
        conn: &Connection,
        email: &str,
        now: i64,
    ) -> Result<IssuedMagicLink, ServerError> {
        let email = Self::normalize_email(email)?;

        let user = db_auth::find_user_by_email(conn, &email)?
            .filter(|u| u.is_admin)
            .ok_or_else(|| ServerError::Unauthorized("acesso restrito".into()))?;

        let token = generate_token_default();
        let token_hash = hash_token(&token);
        let expires_at = now + self.cfg.ttl_secs;

        db_auth::insert_magic_link(conn, user.id, &token_hash, now, expires_at)?;

        Ok(IssuedMagicLink {
            email,
            user_id: user.id,
            token: token.clone(),
            expires_at,
            link: self.build_link(&token),
        })
    }

    /// Redeem a magic link: hash the token, consume it transactionally
    /// (single use), return the user.
    pub fn redeem(
        &self,
        conn: &mut Connection,
        token: &str,
        now: i64,
    ) -> Result<RedeemedMagicLink, ServerError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ServerError::BadRequest("token ausente".into()));
        }

        let token_hash = hash_token(token);
        let Some(user_id) = db_auth::consume_magic_link(conn, &token_hash, now)? else {
            return Err(ServerError::Unauthorized("link inválido ou expirado".into()));
        };

        let email: String = conn
            .query_row(
                "select email from users where id = ?",
                rusqlite::params![user_id],
                |r| r.get(0),
            )
            .map_err(|e| ServerError::DbError(format!("select user email failed: {e}")))?;

        Ok(RedeemedMagicLink { user_id, email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::{params, Connection};

    fn apply_schema(conn: &Connection) {
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            create table if not exists users (
              id            integer primary key,
              email         text not null unique,
              name          text,
              is_admin      integer not null default 0,
              created_at    integer not null,
              last_login_at integer
            );

            create table if not exists magic_links (
              id          integer primary key,
              user_id     integer not null,
              token_hash  blob not null,
              created_at  integer not null,
              expires_at  integer not null,
              used_at     integer,
              foreign key(user_id) references users(id) on delete cascade
            );
            "#,
        )
        .unwrap();
    }

    fn admin(conn: &Connection, email: &str) {
        conn.execute(
            "insert into users (email, is_admin, created_at) values (?1, 1, 0)",
            params![email],
        )
        .unwrap();
    }

    fn svc() -> MagicLinkService {
        MagicLinkService::new(MagicLinkConfig {
            ttl_secs: 60,
            magic_path: "/auth/magic".to_string(),
        })
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let e = MagicLinkService::normalize_email("  Admin@Example.COM ").unwrap();
        assert_eq!(e, "admin@example.com");
    }

    #[test]
    fn normalize_email_rejects_invalid() {
        assert!(MagicLinkService::normalize_email("").is_err());
        assert!(MagicLinkService::normalize_email("no-at-symbol").is_err());
        assert!(MagicLinkService::normalize_email("@example.com").is_err());
        assert!(MagicLinkService::normalize_email("test@").is_err());
    }

    #[test]
    fn request_link_requires_admin_account() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);
        let service = svc();

        // unknown email
        match service.request_link(&conn, "ghost@example.com", 1000) {
            Err(ServerError::Unauthorized(_)) => {}
            other => panic!("expected Unauthorized, got: {other:?}"),
        }

        // known but not admin
        conn.execute(
            "insert into users (email, is_admin, created_at) values ('user@example.com', 0, 0)",
            [],
        )
        .unwrap();
        match service.request_link(&conn, "user@example.com", 1000) {
            Err(ServerError::Unauthorized(_)) => {}
            other => panic!("expected Unauthorized, got: {other:?}"),
        }
    }

    #[test]
    fn request_link_stores_hash_only() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);
        admin(&conn, "admin@example.com");
        let service = svc();

        let now = 1000;
        let issued = service.request_link(&conn, "Admin@Example.com", now).unwrap();

        let expected_hash = crate::auth::token::hash_token(&issued.token);
        let stored: Vec<u8> = conn
            .query_row(
                "select token_hash from magic_links where user_id = ? order by id desc limit 1",
                params![issued.user_id],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(stored.as_slice(), expected_hash.as_slice());
        assert!(issued.link.starts_with("/auth/magic?token="));
        assert_eq!(issued.expires_at, now + 60);
    }

    #[test]
    fn redeem_succeeds_once_then_fails() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);
        admin(&conn, "a@b.com");
        let service = svc();

        let issued = service.request_link(&conn, "a@b.com", 1000).unwrap();

        let redeemed = service.redeem(&mut conn, &issued.token, 1001).unwrap();
        assert_eq!(redeemed.user_id, issued.user_id);
        assert_eq!(redeemed.email, "a@b.com");

        match service.redeem(&mut conn, &issued.token, 1002) {
            Err(ServerError::Unauthorized(_)) => {}
            other => panic!("expected Unauthorized, got: {other:?}"),
        }
    }

    #[test]
    fn redeem_fails_if_expired() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);
        admin(&conn, "x@y.com");

        let service = MagicLinkService::new(MagicLinkConfig {
            ttl_secs: 1,
            magic_path: "/auth/magic".to_string(),
        });

        let issued = service.request_link(&conn, "x@y.com", 1000).unwrap();
        match service.redeem(&mut conn, &issued.token, 1002) {
            Err(ServerError::Unauthorized(_)) => {}
            other => panic!("expected Unauthorized, got: {other:?}"),
        }
    }

    #[test]
    fn redeem_rejects_missing_token() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn);
        let service = svc();

        match service.redeem(&mut conn, "   ", 1000) {
            Err(ServerError::BadRequest(_)) => {}
            other => panic!("expected BadRequest, got: {other:?}"),
        }
    }
}
