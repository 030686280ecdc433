use crate::domain::geo::{haversine_m, BoundingBox};
use crate::domain::location::FullAddress;
use crate::domain::property::{
    NewProperty, Property, PropertyImage, PropertyStatus, PropertyPurpose, PropertySummary,
};
use crate::domain::slug::{slugify, unique_slug};
use crate::errors::ServerError;
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

/// Sort orders offered by the catalog page. Unknown values fall back to newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertySort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    AreaDesc,
}

impl PropertySort {
    pub fn parse(s: &str) -> Self {
        match s {
            "price-asc" => PropertySort::PriceAsc,
            "price-desc" => PropertySort::PriceDesc,
            "area-desc" => PropertySort::AreaDesc,
            _ => PropertySort::Newest,
        }
    }

    fn order_clause(&self) -> &'static str {
        match self {
            PropertySort::Newest => "p.created_at DESC",
            PropertySort::PriceAsc => "p.price ASC",
            PropertySort::PriceDesc => "p.price DESC",
            PropertySort::AreaDesc => "p.area_private DESC",
        }
    }
}

/// Catalog filters, straight from the query string. Every field is optional;
/// invalid values are dropped by the caller rather than surfaced as errors.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub status: Option<PropertyStatus>,
    pub purpose: Option<PropertyPurpose>,
    pub min_bedrooms: Option<i64>,
    pub allow_airbnb: bool,
    pub neighborhood: Option<String>,
    pub region: Option<String>,
    pub street: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort: PropertySort,
}

const SUMMARY_SELECT: &str = r#"
    SELECT
        p.id, p.slug, p.title, p.status, p.purpose, p.price,
        p.bedrooms, p.bathrooms, p.parking_spots, p.area_private, p.allow_airbnb,
        n.name AS neighborhood, c.name AS city,
        (SELECT url FROM property_images i WHERE i.property_id = p.id ORDER BY i.position ASC LIMIT 1) AS cover_image,
        (SELECT alt FROM property_images i WHERE i.property_id = p.id ORDER BY i.position ASC LIMIT 1) AS cover_alt
    FROM properties p
    JOIN addresses a ON a.id = p.address_id
    JOIN neighborhoods n ON n.id = a.neighborhood_id
    JOIN cities c ON c.id = n.city_id
    LEFT JOIN regions r ON r.id = n.region_id
"#;

fn summary_from_row(row: &Row) -> rusqlite::Result<PropertySummary> {
    let status: String = row.get("status")?;
    let purpose: String = row.get("purpose")?;
    Ok(PropertySummary {
        id: row.get("id")?,
        slug: row.get("slug")?,
        title: row.get("title")?,
        status: PropertyStatus::parse(&status).unwrap_or(PropertyStatus::Pronto),
        purpose: PropertyPurpose::parse(&purpose).unwrap_or(PropertyPurpose::Venda),
        price: row.get("price")?,
        bedrooms: row.get("bedrooms")?,
        bathrooms: row.get("bathrooms")?,
        parking_spots: row.get("parking_spots")?,
        area_private: row.get("area_private")?,
        allow_airbnb: row.get("allow_airbnb")?,
        neighborhood: row.get("neighborhood")?,
        city: row.get("city")?,
        cover_image: row.get("cover_image")?,
        cover_alt: row.get("cover_alt")?,
    })
}

/// Published catalog with the user's filters applied. Capped at 50 rows.
pub fn list_published(
    conn: &Connection,
    filter: &PropertyFilter,
) -> Result<Vec<PropertySummary>, ServerError> {
    let mut sql = String::from(SUMMARY_SELECT);
    sql.push_str(" WHERE p.published = 1");
    let mut values: Vec<Value> = Vec::new();

    if let Some(status) = filter.status {
        sql.push_str(" AND p.status = ?");
        values.push(Value::from(status.as_str().to_string()));
    }
    if let Some(purpose) = filter.purpose {
        sql.push_str(" AND p.purpose = ?");
        values.push(Value::from(purpose.as_str().to_string()));
    }
    if let Some(bedrooms) = filter.min_bedrooms {
        sql.push_str(" AND p.bedrooms >= ?");
        values.push(Value::from(bedrooms));
    }
    if filter.allow_airbnb {
        sql.push_str(" AND p.allow_airbnb = 1");
    }
    if let Some(min) = filter.min_price {
        sql.push_str(" AND p.price >= ?");
        values.push(Value::from(min));
    }
    if let Some(max) = filter.max_price {
        sql.push_str(" AND p.price <= ?");
        values.push(Value::from(max));
    }

    // Location conditions are OR-ed together: a match on any of
    // neighborhood, region, street or free text keeps the row.
    let mut location_conds: Vec<&'static str> = Vec::new();
    if let Some(neighborhood) = &filter.neighborhood {
        location_conds.push("n.name LIKE ?");
        values.push(Value::from(format!("%{neighborhood}%")));
    }
    if let Some(region) = &filter.region {
        location_conds.push("r.name LIKE ?");
        values.push(Value::from(format!("%{region}%")));
    }
    if let Some(street) = &filter.street {
        location_conds.push("a.street LIKE ?");
        values.push(Value::from(format!("%{street}%")));
    }
    if let Some(search) = &filter.search {
        location_conds.push("(a.street LIKE ? OR n.name LIKE ? OR p.title LIKE ?)");
        let pattern = format!("%{search}%");
        values.push(Value::from(pattern.clone()));
        values.push(Value::from(pattern.clone()));
        values.push(Value::from(pattern));
    }
    if !location_conds.is_empty() {
        sql.push_str(" AND (");
        sql.push_str(&location_conds.join(" OR "));
        sql.push(')');
    }

    sql.push_str(" ORDER BY ");
    sql.push_str(filter.sort.order_clause());
    sql.push_str(" LIMIT 50");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), summary_from_row)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Featured listings for the home page.
pub fn featured(conn: &Connection, limit: i64) -> Result<Vec<PropertySummary>, ServerError> {
    let sql = format!(
        "{SUMMARY_SELECT} WHERE p.published = 1 AND p.featured = 1 ORDER BY p.created_at DESC LIMIT ?"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![limit], summary_from_row)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Published listings in a neighborhood, newest first.
pub fn in_neighborhood(
    conn: &Connection,
    neighborhood_id: i64,
) -> Result<Vec<PropertySummary>, ServerError> {
    let sql = format!(
        "{SUMMARY_SELECT} WHERE p.published = 1 AND n.id = ? ORDER BY p.created_at DESC LIMIT 50"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![neighborhood_id], summary_from_row)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

const DETAIL_SELECT: &str = r#"
    SELECT
        p.id, p.slug, p.title, p.description, p.status, p.purpose,
        p.price, p.condo_fee, p.iptu_yearly, p.area_total, p.area_private,
        p.bedrooms, p.suites, p.bathrooms, p.parking_spots, p.floor,
        p.year_built, p.delivery_date, p.allow_airbnb, p.highlights,
        p.developer, p.realtor_name, p.canonical_url, p.og_image,
        p.featured, p.published, p.views, p.created_at, p.updated_at,
        a.id AS address_id, a.street, a.street_number, a.complement,
        a.postal_code, a.lat, a.lng,
        n.id AS neighborhood_id, n.name AS neighborhood, n.slug AS neighborhood_slug,
        r.name AS region, c.name AS city, s.code AS state_code
    FROM properties p
    JOIN addresses a ON a.id = p.address_id
    JOIN neighborhoods n ON n.id = a.neighborhood_id
    LEFT JOIN regions r ON r.id = n.region_id
    JOIN cities c ON c.id = n.city_id
    JOIN states s ON s.id = c.state_id
"#;

fn detail_from_row(row: &Row) -> rusqlite::Result<Property> {
    let status: String = row.get("status")?;
    let purpose: String = row.get("purpose")?;
    let highlights_json: String = row.get("highlights")?;
    let highlights: Vec<String> = serde_json::from_str(&highlights_json).unwrap_or_default();

    Ok(Property {
        id: row.get("id")?,
        slug: row.get("slug")?,
        title: row.get("title")?,
        description: row.get("description")?,
        status: PropertyStatus::parse(&status).unwrap_or(PropertyStatus::Pronto),
        purpose: PropertyPurpose::parse(&purpose).unwrap_or(PropertyPurpose::Venda),
        price: row.get("price")?,
        condo_fee: row.get("condo_fee")?,
        iptu_yearly: row.get("iptu_yearly")?,
        area_total: row.get("area_total")?,
        area_private: row.get("area_private")?,
        bedrooms: row.get("bedrooms")?,
        suites: row.get("suites")?,
        bathrooms: row.get("bathrooms")?,
        parking_spots: row.get("parking_spots")?,
        floor: row.get("floor")?,
        year_built: row.get("year_built")?,
        delivery_date: row.get("delivery_date")?,
        allow_airbnb: row.get("allow_airbnb")?,
        highlights,
        developer: row.get("developer")?,
        realtor_name: row.get("realtor_name")?,
        canonical_url: row.get("canonical_url")?,
        og_image: row.get("og_image")?,
        featured: row.get("featured")?,
        published: row.get("published")?,
        views: row.get("views")?,
        address: FullAddress {
            street: row.get("street")?,
            street_number: row.get("street_number")?,
            complement: row.get("complement")?,
            postal_code: row.get("postal_code")?,
            lat: row.get("lat")?,
            lng: row.get("lng")?,
            neighborhood_id: row.get("neighborhood_id")?,
            neighborhood: row.get("neighborhood")?,
            neighborhood_slug: row.get("neighborhood_slug")?,
            region: row.get("region")?,
            city: row.get("city")?,
            state_code: row.get("state_code")?,
        },
        images: Vec::new(),
        amenities: Vec::new(),
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn load_images(conn: &Connection, property_id: i64) -> Result<Vec<PropertyImage>, ServerError> {
    let mut stmt = conn.prepare(
        "SELECT url, alt, width, height, position
         FROM property_images WHERE property_id = ? ORDER BY position ASC",
    )?;
    let rows = stmt.query_map(params![property_id], |row| {
        Ok(PropertyImage {
            url: row.get(0)?,
            alt: row.get(1)?,
            width: row.get(2)?,
            height: row.get(3)?,
            position: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

fn load_amenities(conn: &Connection, property_id: i64) -> Result<Vec<String>, ServerError> {
    let mut stmt = conn.prepare(
        "SELECT am.name FROM property_amenities pa
         JOIN amenities am ON am.id = pa.amenity_id
         WHERE pa.property_id = ? ORDER BY am.name",
    )?;
    let rows = stmt.query_map(params![property_id], |row| row.get(0))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Amenity ids linked to a listing, for pre-checking the edit form.
pub fn amenity_ids(conn: &Connection, property_id: i64) -> Result<Vec<i64>, ServerError> {
    let mut stmt =
        conn.prepare("SELECT amenity_id FROM property_amenities WHERE property_id = ?")?;
    let rows = stmt.query_map(params![property_id], |row| row.get(0))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

fn attach_relations(conn: &Connection, mut prop: Property) -> Result<Property, ServerError> {
    prop.images = load_images(conn, prop.id)?;
    prop.amenities = load_amenities(conn, prop.id)?;
    Ok(prop)
}

/// Full listing for the public detail page. Unpublished rows stay hidden.
pub fn find_published_by_slug(
    conn: &Connection,
    slug: &str,
) -> Result<Option<Property>, ServerError> {
    let sql = format!("{DETAIL_SELECT} WHERE p.slug = ? AND p.published = 1");
    let prop = conn
        .query_row(&sql, params![slug], detail_from_row)
        .optional()?;

    match prop {
        Some(p) => Ok(Some(attach_relations(conn, p)?)),
        None => Ok(None),
    }
}

/// Full listing for the admin edit form, published or not.
pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Property>, ServerError> {
    let sql = format!("{DETAIL_SELECT} WHERE p.id = ?");
    let prop = conn.query_row(&sql, params![id], detail_from_row).optional()?;

    match prop {
        Some(p) => Ok(Some(attach_relations(conn, p)?)),
        None => Ok(None),
    }
}

pub fn slug_exists(conn: &Connection, slug: &str) -> Result<bool, ServerError> {
    let found: Option<i64> = conn
        .query_row("SELECT id FROM properties WHERE slug = ?", params![slug], |r| r.get(0))
        .optional()?;
    Ok(found.is_some())
}

/// Create a listing: slug from the title, address row, property row,
/// ordered images and amenity links, all in one transaction.
pub fn insert(
    conn: &mut Connection,
    new: &NewProperty,
    now: NaiveDateTime,
) -> Result<(i64, String), ServerError> {
    let base = slugify(&new.title);
    if base.is_empty() {
        return Err(ServerError::BadRequest("Título inválido".into()));
    }
    let slug = unique_slug(&base, |candidate| slug_exists(conn, candidate))?;

    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO addresses (neighborhood_id, street, street_number, complement, postal_code, lat, lng)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.address.neighborhood_id,
            new.address.street,
            new.address.street_number,
            new.address.complement,
            new.address.postal_code,
            new.address.lat,
            new.address.lng,
        ],
    )?;
    let address_id = tx.last_insert_rowid();

    tx.execute(
        r#"
        INSERT INTO properties (
            slug, title, description, status, purpose, price, condo_fee, iptu_yearly,
            area_total, area_private, bedrooms, suites, bathrooms, parking_spots,
            floor, year_built, delivery_date, allow_airbnb, highlights, developer,
            realtor_name, canonical_url, og_image, featured, published,
            address_id, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                  ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28)
        "#,
        params![
            slug,
            new.title,
            new.description,
            new.status.as_str(),
            new.purpose.as_str(),
            new.price,
            new.condo_fee,
            new.iptu_yearly,
            new.area_total,
            new.area_private,
            new.bedrooms,
            new.suites,
            new.bathrooms,
            new.parking_spots,
            new.floor,
            new.year_built,
            new.delivery_date,
            new.allow_airbnb,
            serde_json::to_string(&new.highlights).unwrap_or_else(|_| "[]".into()),
            new.developer,
            new.realtor_name,
            new.canonical_url,
            new.og_image,
            new.featured,
            new.published,
            address_id,
            now,
            now,
        ],
    )?;
    let property_id = tx.last_insert_rowid();

    replace_images(&tx, property_id, &new.images)?;
    replace_amenities(&tx, property_id, &new.amenity_ids)?;

    tx.commit()?;
    Ok((property_id, slug))
}

/// Update a listing in place. The slug is stable across edits; images and
/// amenity links are replace-sets.
pub fn update(
    conn: &mut Connection,
    id: i64,
    new: &NewProperty,
    now: NaiveDateTime,
) -> Result<(), ServerError> {
    let tx = conn.transaction()?;

    let address_id: i64 = tx
        .query_row("SELECT address_id FROM properties WHERE id = ?", params![id], |r| r.get(0))
        .optional()?
        .ok_or(ServerError::NotFound)?;

    tx.execute(
        "UPDATE addresses SET neighborhood_id = ?1, street = ?2, street_number = ?3,
         complement = ?4, postal_code = ?5, lat = ?6, lng = ?7 WHERE id = ?8",
        params![
            new.address.neighborhood_id,
            new.address.street,
            new.address.street_number,
            new.address.complement,
            new.address.postal_code,
            new.address.lat,
            new.address.lng,
            address_id,
        ],
    )?;

    tx.execute(
        r#"
        UPDATE properties SET
            title = ?1, description = ?2, status = ?3, purpose = ?4, price = ?5,
            condo_fee = ?6, iptu_yearly = ?7, area_total = ?8, area_private = ?9,
            bedrooms = ?10, suites = ?11, bathrooms = ?12, parking_spots = ?13,
            floor = ?14, year_built = ?15, delivery_date = ?16, allow_airbnb = ?17,
            highlights = ?18, developer = ?19, realtor_name = ?20,
            canonical_url = ?21, og_image = ?22, featured = ?23, published = ?24,
            updated_at = ?25
        WHERE id = ?26
        "#,
        params![
            new.title,
            new.description,
            new.status.as_str(),
            new.purpose.as_str(),
            new.price,
            new.condo_fee,
            new.iptu_yearly,
            new.area_total,
            new.area_private,
            new.bedrooms,
            new.suites,
            new.bathrooms,
            new.parking_spots,
            new.floor,
            new.year_built,
            new.delivery_date,
            new.allow_airbnb,
            serde_json::to_string(&new.highlights).unwrap_or_else(|_| "[]".into()),
            new.developer,
            new.realtor_name,
            new.canonical_url,
            new.og_image,
            new.featured,
            new.published,
            now,
            id,
        ],
    )?;

    replace_images(&tx, id, &new.images)?;
    replace_amenities(&tx, id, &new.amenity_ids)?;

    tx.commit()?;
    Ok(())
}

fn replace_images(
    tx: &Connection,
    property_id: i64,
    images: &[PropertyImage],
) -> Result<(), ServerError> {
    tx.execute("DELETE FROM property_images WHERE property_id = ?", params![property_id])?;

    let mut stmt = tx.prepare(
        "INSERT INTO property_images (property_id, url, alt, width, height, position)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for (index, img) in images.iter().enumerate() {
        let position = if img.position > 0 { img.position } else { index as i64 };
        stmt.execute(params![property_id, img.url, img.alt, img.width, img.height, position])?;
    }
    Ok(())
}

fn replace_amenities(
    tx: &Connection,
    property_id: i64,
    amenity_ids: &[i64],
) -> Result<(), ServerError> {
    tx.execute(
        "DELETE FROM property_amenities WHERE property_id = ?",
        params![property_id],
    )?;

    let mut stmt = tx.prepare(
        "INSERT OR IGNORE INTO property_amenities (property_id, amenity_id) VALUES (?1, ?2)",
    )?;
    for amenity_id in amenity_ids {
        stmt.execute(params![property_id, amenity_id])?;
    }
    Ok(())
}

/// Delete a listing and its address. Images and amenity links cascade;
/// leads referencing the listing are kept with property_id set to NULL.
pub fn delete(conn: &mut Connection, id: i64) -> Result<(), ServerError> {
    let tx = conn.transaction()?;

    let address_id: Option<i64> = tx
        .query_row("SELECT address_id FROM properties WHERE id = ?", params![id], |r| r.get(0))
        .optional()?;
    let Some(address_id) = address_id else {
        tx.rollback().ok();
        return Err(ServerError::NotFound);
    };

    tx.execute("DELETE FROM properties WHERE id = ?", params![id])?;
    tx.execute("DELETE FROM addresses WHERE id = ?", params![address_id])?;

    tx.commit()?;
    Ok(())
}

pub fn record_view(conn: &Connection, id: i64) -> Result<(), ServerError> {
    conn.execute("UPDATE properties SET views = views + 1 WHERE id = ?", params![id])?;
    Ok(())
}

/// Published listings within `radius_m` of a point, nearest first.
/// Bounding-box prefilter in SQL, exact Haversine ordering in Rust.
pub fn nearby(
    conn: &Connection,
    lat: f64,
    lng: f64,
    radius_m: f64,
    exclude_id: Option<i64>,
    limit: usize,
) -> Result<Vec<(PropertySummary, f64)>, ServerError> {
    let bbox = BoundingBox::around(lat, lng, radius_m);

    let sql = r#"
        SELECT
            p.id, p.slug, p.title, p.status, p.purpose, p.price,
            p.bedrooms, p.bathrooms, p.parking_spots, p.area_private, p.allow_airbnb,
            n.name AS neighborhood, c.name AS city,
            (SELECT url FROM property_images i WHERE i.property_id = p.id ORDER BY i.position ASC LIMIT 1) AS cover_image,
            (SELECT alt FROM property_images i WHERE i.property_id = p.id ORDER BY i.position ASC LIMIT 1) AS cover_alt,
            a.lat, a.lng
        FROM properties p
        JOIN addresses a ON a.id = p.address_id
        JOIN neighborhoods n ON n.id = a.neighborhood_id
        JOIN cities c ON c.id = n.city_id
        WHERE p.published = 1
          AND a.lat IS NOT NULL AND a.lng IS NOT NULL
          AND a.lat BETWEEN ?1 AND ?2
          AND a.lng BETWEEN ?3 AND ?4
    "#;
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(
        params![bbox.min_lat, bbox.max_lat, bbox.min_lng, bbox.max_lng],
        |row| {
            let summary = summary_from_row(row)?;
            let plat: f64 = row.get("lat")?;
            let plng: f64 = row.get("lng")?;
            Ok((summary, plat, plng))
        },
    )?;

    let mut candidates: Vec<(PropertySummary, f64)> = Vec::new();
    for row in rows {
        let (summary, plat, plng) = row?;
        if Some(summary.id) == exclude_id {
            continue;
        }
        let distance = haversine_m(lat, lng, plat, plng);
        if distance <= radius_m {
            candidates.push((summary, distance));
        }
    }

    candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.truncate(limit);
    Ok(candidates)
}

/// (slug, updated_at) pairs for the sitemap.
pub fn sitemap_entries(conn: &Connection) -> Result<Vec<(String, NaiveDateTime)>, ServerError> {
    let mut stmt = conn.prepare(
        "SELECT slug, updated_at FROM properties WHERE published = 1 ORDER BY updated_at DESC",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// One row per listing for the back-office table.
#[derive(Debug, Clone)]
pub struct AdminPropertyRow {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub status: PropertyStatus,
    pub purpose: PropertyPurpose,
    pub price: Option<i64>,
    pub featured: bool,
    pub published: bool,
    pub views: i64,
    pub created_at: NaiveDateTime,
}

pub fn admin_list(conn: &Connection) -> Result<Vec<AdminPropertyRow>, ServerError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, slug, status, purpose, price, featured, published, views, created_at
         FROM properties ORDER BY created_at DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        let status: String = row.get("status")?;
        let purpose: String = row.get("purpose")?;
        Ok(AdminPropertyRow {
            id: row.get("id")?,
            title: row.get("title")?,
            slug: row.get("slug")?,
            status: PropertyStatus::parse(&status).unwrap_or(PropertyStatus::Pronto),
            purpose: PropertyPurpose::parse(&purpose).unwrap_or(PropertyPurpose::Venda),
            price: row.get("price")?,
            featured: row.get("featured")?,
            published: row.get("published")?,
            views: row.get("views")?,
            created_at: row.get("created_at")?,
        })
    })?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn count(conn: &Connection, published_only: bool) -> Result<i64, ServerError> {
    let sql = if published_only {
        "SELECT COUNT(*) FROM properties WHERE published = 1"
    } else {
        "SELECT COUNT(*) FROM properties"
    };
    Ok(conn.query_row(sql, [], |r| r.get(0))?)
}
