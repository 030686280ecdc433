//! Parsing and validation of urlencoded form bodies and query strings.

use crate::db::properties::{PropertyFilter, PropertySort};
use crate::domain::blog::{estimate_reading_time, excerpt_of, BlogCategory, FaqEntry, NewBlogPost};
use crate::domain::lead::NewLead;
use crate::domain::property::{
    NewAddress, NewProperty, PropertyImage, PropertyStatus, PropertyPurpose,
};
use crate::domain::slug::slugify;
use crate::errors::ServerError;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// A parsed application/x-www-form-urlencoded body. Repeated keys
/// (checkbox groups) keep every value.
#[derive(Debug, Default)]
pub struct FormData {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormData {
    pub fn parse(body: &[u8]) -> Self {
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, value) in url::form_urlencoded::parse(body) {
            fields.entry(key.into_owned()).or_default().push(value.into_owned());
        }
        FormData { fields }
    }

    /// First value for a key, trimmed, None when absent or blank.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(|v| v.first())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.fields
            .get(key)
            .map(|v| v.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    pub fn checkbox(&self, key: &str) -> bool {
        matches!(self.get(key), Some("on" | "1" | "true"))
    }

    fn required(&self, key: &str, label: &str) -> Result<String, ServerError> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| ServerError::BadRequest(format!("Campo obrigatório: {label}")))
    }

    fn opt_i64(&self, key: &str) -> Result<Option<i64>, ServerError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ServerError::BadRequest(format!("Número inválido: {key}"))),
        }
    }

    fn opt_f64(&self, key: &str) -> Result<Option<f64>, ServerError> {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .replace(',', ".")
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ServerError::BadRequest(format!("Número inválido: {key}"))),
        }
    }
}

/// Admin listing form -> validated NewProperty.
///
/// Images arrive as a JSON array in a hidden `images` field, maintained
/// by the upload widget; highlights as one item per line.
pub fn property_from_form(form: &FormData) -> Result<NewProperty, ServerError> {
    let title = form.required("title", "título")?;
    if title.chars().count() < 5 {
        return Err(ServerError::BadRequest(
            "Título deve ter pelo menos 5 caracteres".into(),
        ));
    }
    let description = form.required("description", "descrição")?;

    let status = form
        .get("status")
        .and_then(PropertyStatus::parse)
        .ok_or_else(|| ServerError::BadRequest("Status inválido".into()))?;
    let purpose = form
        .get("purpose")
        .and_then(PropertyPurpose::parse)
        .ok_or_else(|| ServerError::BadRequest("Finalidade inválida".into()))?;

    let delivery_date = match form.get("delivery_date") {
        None => None,
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| ServerError::BadRequest("Data de entrega inválida".into()))?,
        ),
    };

    let highlights: Vec<String> = form
        .get("highlights")
        .map(|raw| {
            raw.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let images: Vec<PropertyImage> = match form.get("images") {
        None => Vec::new(),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|_| ServerError::BadRequest("Lista de imagens inválida".into()))?,
    };

    let mut amenity_ids = Vec::new();
    for raw in form.get_all("amenities") {
        let id = raw
            .parse::<i64>()
            .map_err(|_| ServerError::BadRequest("Comodidade inválida".into()))?;
        amenity_ids.push(id);
    }

    let neighborhood_id = form
        .opt_i64("neighborhood_id")?
        .ok_or_else(|| ServerError::BadRequest("Campo obrigatório: bairro".into()))?;

    let address = NewAddress {
        street: form.required("street", "rua")?,
        street_number: form.get("street_number").map(str::to_string),
        complement: form.get("complement").map(str::to_string),
        postal_code: form.required("postal_code", "CEP")?,
        neighborhood_id,
        lat: form.opt_f64("lat")?,
        lng: form.opt_f64("lng")?,
    };

    Ok(NewProperty {
        title,
        description,
        status,
        purpose,
        price: form.opt_i64("price")?,
        condo_fee: form.opt_i64("condo_fee")?,
        iptu_yearly: form.opt_i64("iptu_yearly")?,
        area_total: form.opt_f64("area_total")?,
        area_private: form.opt_f64("area_private")?,
        bedrooms: form.opt_i64("bedrooms")?,
        suites: form.opt_i64("suites")?,
        bathrooms: form.opt_i64("bathrooms")?,
        parking_spots: form.opt_i64("parking_spots")?,
        floor: form.opt_i64("floor")?,
        year_built: form.opt_i64("year_built")?,
        delivery_date,
        allow_airbnb: form.checkbox("allow_airbnb"),
        highlights,
        developer: form.get("developer").map(str::to_string),
        realtor_name: form.get("realtor_name").map(str::to_string),
        canonical_url: form.get("canonical_url").map(str::to_string),
        og_image: form.get("og_image").map(str::to_string),
        featured: form.checkbox("featured"),
        published: form.checkbox("published"),
        address,
        images,
        amenity_ids,
    })
}

/// Admin blog form -> validated NewBlogPost.
///
/// The slug defaults to a slugified title; excerpt and reading time are
/// derived from the content when left blank. published_at is stamped the
/// first time the post goes out (the caller passes the previous value).
pub fn blog_post_from_form(
    form: &FormData,
    previous_published_at: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> Result<NewBlogPost, ServerError> {
    let title = form.required("title", "título")?;
    let content = form.required("content", "conteúdo")?;

    let slug = match form.get("slug") {
        Some(raw) => slugify(raw),
        None => slugify(&title),
    };
    if slug.is_empty() {
        return Err(ServerError::BadRequest("Slug inválido".into()));
    }

    let category = form
        .get("category")
        .and_then(BlogCategory::parse)
        .ok_or_else(|| ServerError::BadRequest("Categoria inválida".into()))?;

    let excerpt = match form.get("excerpt") {
        Some(e) => e.to_string(),
        None => excerpt_of(&content, 160),
    };

    let keywords: Vec<String> = form
        .get("keywords")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let faq: Vec<FaqEntry> = match form.get("faq") {
        None => Vec::new(),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|_| ServerError::BadRequest("FAQ inválido".into()))?,
    };

    let reading_time = match form.opt_i64("reading_time")? {
        Some(m) => Some(m),
        None => Some(estimate_reading_time(&content)),
    };

    let published = form.checkbox("published");
    let published_at = if published {
        previous_published_at.or(Some(now))
    } else {
        previous_published_at
    };

    Ok(NewBlogPost {
        title,
        slug,
        excerpt,
        content,
        category,
        cover_image: form.get("cover_image").map(str::to_string),
        meta_title: form.get("meta_title").map(str::to_string),
        meta_description: form.get("meta_description").map(str::to_string),
        keywords,
        canonical_url: form.get("canonical_url").map(str::to_string),
        og_image: form.get("og_image").map(str::to_string),
        author: form.get("author").unwrap_or("Equipe Imovia").to_string(),
        author_bio: form.get("author_bio").map(str::to_string),
        reading_time,
        faq,
        featured: form.checkbox("featured"),
        published,
        published_at,
    })
}

/// Public contact form -> validated NewLead.
pub fn lead_from_form(form: &FormData) -> Result<NewLead, ServerError> {
    let property_id = form.opt_i64("property_id")?;
    NewLead::validate(
        form.get("name").unwrap_or(""),
        form.get("email"),
        form.get("phone"),
        form.get("message"),
        property_id,
    )
    .map_err(ServerError::BadRequest)
}

#[derive(serde::Deserialize)]
struct LeadPayload {
    #[serde(default)]
    name: String,
    email: Option<String>,
    phone: Option<String>,
    message: Option<String>,
    property_id: Option<i64>,
}

/// JSON lead submission, same fields and rules as the form post.
pub fn lead_from_json(body: &[u8]) -> Result<NewLead, ServerError> {
    let payload: LeadPayload = serde_json::from_slice(body)
        .map_err(|e| ServerError::BadRequest(format!("JSON inválido: {e}")))?;
    NewLead::validate(
        &payload.name,
        payload.email.as_deref(),
        payload.phone.as_deref(),
        payload.message.as_deref(),
        payload.property_id,
    )
    .map_err(ServerError::BadRequest)
}

/// Catalog query string -> PropertyFilter. Unknown or malformed values
/// are ignored so a shared link never errors.
pub fn filter_from_query(query: &str) -> PropertyFilter {
    let mut filter = PropertyFilter::default();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "status" => filter.status = PropertyStatus::parse(value),
            "finalidade" => filter.purpose = PropertyPurpose::parse(value),
            "quartos" => filter.min_bedrooms = value.parse().ok(),
            "airbnb" => filter.allow_airbnb = matches!(value, "1" | "true" | "on"),
            "bairro" => filter.neighborhood = Some(value.to_string()),
            "regiao" => filter.region = Some(value.to_string()),
            "rua" => filter.street = Some(value.to_string()),
            "busca" => filter.search = Some(value.to_string()),
            "preco-min" => filter.min_price = value.parse().ok(),
            "preco-max" => filter.max_price = value.parse().ok(),
            "ordem" => filter.sort = PropertySort::parse(value),
            _ => {}
        }
    }
    filter
}

/// Single query parameter, percent-decoded.
pub fn query_param(query: &str, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}
