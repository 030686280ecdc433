use crate::config::SiteConfig;
use crate::db::connection::{init_db, Database};
use crate::responses::{error_to_response, with_security_headers};
use crate::router::handle;
use astra::Server;

mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod feeds;
mod forms;
mod responses;
mod router;
mod seo;
mod spreadsheets;
mod templates;
mod uploads;

#[cfg(test)]
mod tests;

/// Make sure the ADMIN_EMAIL account exists and can enter the back office.
fn bootstrap_admin(db: &Database, email: &str) -> Result<(), errors::ServerError> {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;
    db.with_conn(|conn| {
        let user = db::auth::get_or_create_user(conn, email, now)?;
        if !user.is_admin {
            db::auth::set_admin(conn, email, true)?;
        }
        Ok(())
    })?;
    tracing::info!(email, "admin account ready");
    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cfg = SiteConfig::from_env();
    let db = Database::new(cfg.database_path.clone());

    if let Err(e) = init_db(&db, "sql/schema.sql", "sql/seed.sql") {
        tracing::error!("database initialization failed: {e}");
        std::process::exit(1);
    }

    if let Some(email) = &cfg.admin_email {
        if let Err(e) = bootstrap_admin(&db, email) {
            tracing::error!("admin bootstrap failed: {e}");
            std::process::exit(1);
        }
    }

    let addr = cfg.bind_addr;
    tracing::info!(%addr, site = %cfg.site_name, "starting server");

    let server = Server::bind(addr).max_workers(8);

    let result = server.serve(move |req, _info| {
        let resp = match handle(req, &db, &cfg) {
            Ok(resp) => resp,
            Err(err) => error_to_response(err),
        };
        with_security_headers(resp)
    });

    if let Err(e) = result {
        tracing::error!("server ended with error: {e}");
    }
}
