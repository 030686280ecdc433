use crate::auth::sessions;
use crate::config::SiteConfig;
use crate::db::connection::{apply_schema, Database};
use crate::domain::property::{NewAddress, NewProperty, PropertyImage, PropertyPurpose, PropertyStatus};
use chrono::NaiveDateTime;
use rusqlite::params;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_DB: AtomicU32 = AtomicU32::new(0);

/// Fresh database with the production schema and seed data, on a
/// unique temp path so parallel tests never share state.
pub fn init_test_db() -> Database {
    let path = std::env::temp_dir().join(format!(
        "imovia_test_{}_{}.sqlite3",
        std::process::id(),
        NEXT_DB.fetch_add(1, Ordering::SeqCst)
    ));
    let _ = std::fs::remove_file(&path);

    let db = Database::new(path.to_string_lossy().to_string());
    apply_schema(&db, include_str!("../../sql/schema.sql")).expect("schema failed");
    apply_schema(&db, include_str!("../../sql/seed.sql")).expect("seed failed");
    db
}

pub fn test_config() -> SiteConfig {
    let mut cfg = SiteConfig::from_env();
    cfg.base_url = "https://imovia.test".to_string();
    cfg.site_name = "Imovia Imóveis".to_string();
    cfg.upload_dir = std::env::temp_dir()
        .join(format!("imovia_uploads_{}", std::process::id()))
        .to_string_lossy()
        .to_string();
    cfg
}

pub fn now() -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// São Paulo (state is seeded) plus one city and one neighborhood.
/// Returns (city_id, neighborhood_id).
pub fn seed_location(db: &Database) -> (i64, i64) {
    db.with_conn(|conn| {
        let state_id: i64 = conn
            .query_row("SELECT id FROM states WHERE code = 'SP'", [], |r| r.get(0))
            .expect("SP seeded");
        conn.execute(
            "INSERT INTO cities (state_id, name, slug) VALUES (?1, 'São Paulo', 'sao-paulo')",
            params![state_id],
        )
        .unwrap();
        let city_id = conn.last_insert_rowid();
        conn.execute(
            "INSERT INTO neighborhoods
                (city_id, name, slug, description, lat, lng, published, created_at, updated_at)
             VALUES (?1, 'Jardins', 'jardins', 'Bairro arborizado', -23.5615, -46.6693, 1, ?2, ?2)",
            params![city_id, now()],
        )
        .unwrap();
        Ok((city_id, conn.last_insert_rowid()))
    })
    .unwrap()
}

pub fn sample_property(neighborhood_id: i64, title: &str) -> NewProperty {
    NewProperty {
        title: title.to_string(),
        description: "Apartamento amplo com varanda.".to_string(),
        status: PropertyStatus::Pronto,
        purpose: PropertyPurpose::Venda,
        price: Some(850_000),
        condo_fee: Some(1_200),
        iptu_yearly: Some(4_800),
        area_total: Some(110.0),
        area_private: Some(92.0),
        bedrooms: Some(3),
        suites: Some(1),
        bathrooms: Some(2),
        parking_spots: Some(2),
        floor: Some(7),
        year_built: Some(2019),
        delivery_date: None,
        allow_airbnb: false,
        highlights: vec!["Varanda gourmet".to_string()],
        developer: None,
        realtor_name: None,
        canonical_url: None,
        og_image: None,
        featured: true,
        published: true,
        address: NewAddress {
            street: "Rua Augusta".to_string(),
            street_number: Some("1500".to_string()),
            complement: None,
            postal_code: "01304-001".to_string(),
            neighborhood_id,
            lat: Some(-23.5615),
            lng: Some(-46.6693),
        },
        images: vec![PropertyImage {
            url: "/uploads/properties/capa.jpg".to_string(),
            alt: Some("Fachada".to_string()),
            width: Some(1200),
            height: Some(800),
            position: 0,
        }],
        amenity_ids: vec![1, 2],
    }
}

/// Admin user with a live session. Returns (user_id, raw session token).
pub fn create_admin_session(db: &Database, email: &str) -> (i64, String) {
    let now_unix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;
    let user_id = db
        .with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (email, is_admin, created_at) VALUES (?1, 1, ?2)",
                params![email, now_unix],
            )
            .unwrap();
            Ok(conn.last_insert_rowid())
        })
        .unwrap();

    let token = db
        .with_conn(|conn| sessions::create_session(conn, user_id, now_unix))
        .expect("session");
    (user_id, token)
}
