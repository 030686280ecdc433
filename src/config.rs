use std::env;
use std::net::SocketAddr;

/// Site-wide settings, read once at startup after `dotenvy::dotenv()`.
/// Everything has a development default so `cargo run` works on a clean checkout.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub bind_addr: SocketAddr,
    pub database_path: String,
    /// Public origin used in canonical URLs, sitemap, RSS and JSON-LD.
    /// No trailing slash.
    pub base_url: String,
    pub site_name: String,
    pub site_description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub whatsapp_number: String,
    pub upload_dir: String,
    /// TTL for admin magic links in seconds.
    pub magic_link_ttl_secs: i64,
    /// When set, this account is created (if needed) and flagged admin at
    /// startup. The back office is invite-only, so the first admin has to
    /// come from somewhere.
    pub admin_email: Option<String>,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("BIND_ADDR", "127.0.0.1:3000")
                .parse()
                .unwrap_or_else(|_| "127.0.0.1:3000".parse().unwrap()),
            database_path: env_or("DATABASE_PATH", "imovia.sqlite3"),
            base_url: env_or("BASE_URL", "http://localhost:3000")
                .trim_end_matches('/')
                .to_string(),
            site_name: env_or("SITE_NAME", "Imovia Imóveis"),
            site_description: env_or(
                "SITE_DESCRIPTION",
                "Imóveis em São Paulo: apartamentos, lançamentos e guias de bairros.",
            ),
            contact_email: env_or("CONTACT_EMAIL", "contato@imovia.com.br"),
            contact_phone: env_or("CONTACT_PHONE", "(11) 99999-0000"),
            whatsapp_number: env_or("WHATSAPP_NUMBER", "5511999990000"),
            upload_dir: env_or("UPLOAD_DIR", "uploads"),
            magic_link_ttl_secs: env::var("MAGIC_LINK_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15 * 60),
            admin_email: env::var("ADMIN_EMAIL")
                .ok()
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty()),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
