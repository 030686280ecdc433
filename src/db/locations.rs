use crate::domain::geo::{haversine_m, BoundingBox};
use crate::domain::location::{
    City, NearbyNeighborhood, Neighborhood, NeighborhoodSummary, Region, State,
};
use crate::errors::ServerError;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

pub fn states(conn: &Connection) -> Result<Vec<State>, ServerError> {
    let mut stmt = conn.prepare("SELECT id, name, code FROM states ORDER BY name")?;
    let rows = stmt.query_map([], |row| {
        Ok(State { id: row.get(0)?, name: row.get(1)?, code: row.get(2)? })
    })?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn cities_of_state(conn: &Connection, state_id: i64) -> Result<Vec<City>, ServerError> {
    let mut stmt =
        conn.prepare("SELECT id, state_id, name, slug FROM cities WHERE state_id = ? ORDER BY name")?;
    let rows = stmt.query_map(params![state_id], |row| {
        Ok(City {
            id: row.get(0)?,
            state_id: row.get(1)?,
            name: row.get(2)?,
            slug: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn regions_of_city(conn: &Connection, city_id: i64) -> Result<Vec<Region>, ServerError> {
    let mut stmt =
        conn.prepare("SELECT id, city_id, name, slug FROM regions WHERE city_id = ? ORDER BY name")?;
    let rows = stmt.query_map(params![city_id], |row| {
        Ok(Region {
            id: row.get(0)?,
            city_id: row.get(1)?,
            name: row.get(2)?,
            slug: row.get(3)?,
        })
    })?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

fn neighborhood_from_row(row: &rusqlite::Row) -> rusqlite::Result<Neighborhood> {
    Ok(Neighborhood {
        id: row.get("id")?,
        city_id: row.get("city_id")?,
        region_id: row.get("region_id")?,
        name: row.get("name")?,
        slug: row.get("slug")?,
        description: row.get("description")?,
        cover_image: row.get("cover_image")?,
        lat: row.get("lat")?,
        lng: row.get("lng")?,
        published: row.get("published")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn neighborhoods_of_city(
    conn: &Connection,
    city_id: i64,
) -> Result<Vec<Neighborhood>, ServerError> {
    let mut stmt = conn.prepare(
        "SELECT id, city_id, region_id, name, slug, description, cover_image,
                lat, lng, published, updated_at
         FROM neighborhoods WHERE city_id = ? ORDER BY name",
    )?;
    let rows = stmt.query_map(params![city_id], neighborhood_from_row)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Guide index: published neighborhoods with their published-listing counts.
pub fn neighborhoods_published(conn: &Connection) -> Result<Vec<NeighborhoodSummary>, ServerError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT n.id, n.name, n.slug, n.description, n.cover_image, c.name AS city,
            (SELECT COUNT(*) FROM properties p
             JOIN addresses a ON a.id = p.address_id
             WHERE a.neighborhood_id = n.id AND p.published = 1) AS property_count
        FROM neighborhoods n
        JOIN cities c ON c.id = n.city_id
        WHERE n.published = 1
        ORDER BY n.name
        "#,
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(NeighborhoodSummary {
            id: row.get("id")?,
            name: row.get("name")?,
            slug: row.get("slug")?,
            description: row.get("description")?,
            cover_image: row.get("cover_image")?,
            city: row.get("city")?,
            property_count: row.get("property_count")?,
        })
    })?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Guide page lookup. Unpublished guides stay hidden.
pub fn neighborhood_by_slug(
    conn: &Connection,
    slug: &str,
) -> Result<Option<Neighborhood>, ServerError> {
    let sql = "SELECT id, city_id, region_id, name, slug, description, cover_image,
                      lat, lng, published, updated_at
               FROM neighborhoods WHERE slug = ? AND published = 1";
    Ok(conn.query_row(sql, params![slug], neighborhood_from_row).optional()?)
}

pub fn neighborhood_city_name(conn: &Connection, city_id: i64) -> Result<String, ServerError> {
    Ok(conn.query_row("SELECT name FROM cities WHERE id = ?", params![city_id], |r| r.get(0))?)
}

/// Published neighborhoods within `radius_m` of a point, nearest first,
/// excluding the neighborhood itself. Bounding box in SQL, Haversine in Rust.
pub fn nearby_neighborhoods(
    conn: &Connection,
    lat: f64,
    lng: f64,
    radius_m: f64,
    exclude_id: i64,
    limit: usize,
) -> Result<Vec<NearbyNeighborhood>, ServerError> {
    let bbox = BoundingBox::around(lat, lng, radius_m);

    let mut stmt = conn.prepare(
        r#"
        SELECT n.id, n.name, n.slug, n.lat, n.lng, c.name AS city,
            (SELECT COUNT(*) FROM properties p
             JOIN addresses a ON a.id = p.address_id
             WHERE a.neighborhood_id = n.id AND p.published = 1) AS property_count
        FROM neighborhoods n
        JOIN cities c ON c.id = n.city_id
        WHERE n.published = 1
          AND n.id != ?1
          AND n.lat IS NOT NULL AND n.lng IS NOT NULL
          AND n.lat BETWEEN ?2 AND ?3
          AND n.lng BETWEEN ?4 AND ?5
        "#,
    )?;
    let rows = stmt.query_map(
        params![exclude_id, bbox.min_lat, bbox.max_lat, bbox.min_lng, bbox.max_lng],
        |row| {
            let nlat: f64 = row.get("lat")?;
            let nlng: f64 = row.get("lng")?;
            Ok((
                NearbyNeighborhood {
                    name: row.get("name")?,
                    slug: row.get("slug")?,
                    city: row.get("city")?,
                    distance_m: 0.0,
                    property_count: row.get("property_count")?,
                },
                nlat,
                nlng,
            ))
        },
    )?;

    let mut candidates = Vec::new();
    for row in rows {
        let (mut nb, nlat, nlng) = row?;
        let distance = haversine_m(lat, lng, nlat, nlng);
        if distance <= radius_m {
            nb.distance_m = distance;
            candidates.push(nb);
        }
    }

    candidates.sort_by(|a, b| {
        a.distance_m.partial_cmp(&b.distance_m).unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(limit);
    Ok(candidates)
}

/// (id, "Bairro / Cidade") options for the admin listing form.
pub fn neighborhood_options(conn: &Connection) -> Result<Vec<(i64, String)>, ServerError> {
    let mut stmt = conn.prepare(
        "SELECT n.id, n.name || ' / ' || c.name
         FROM neighborhoods n JOIN cities c ON c.id = n.city_id
         ORDER BY c.name, n.name",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// (slug, updated_at) pairs for the sitemap.
pub fn sitemap_entries(conn: &Connection) -> Result<Vec<(String, NaiveDateTime)>, ServerError> {
    let mut stmt = conn.prepare(
        "SELECT slug, updated_at FROM neighborhoods WHERE published = 1 ORDER BY updated_at DESC",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
