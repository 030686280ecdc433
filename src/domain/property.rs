use crate::domain::location::FullAddress;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Construction status of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyStatus {
    Lancamento,
    EmObras,
    Pronto,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Lancamento => "LANCAMENTO",
            PropertyStatus::EmObras => "EM_OBRAS",
            PropertyStatus::Pronto => "PRONTO",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LANCAMENTO" => Some(PropertyStatus::Lancamento),
            "EM_OBRAS" => Some(PropertyStatus::EmObras),
            "PRONTO" => Some(PropertyStatus::Pronto),
            _ => None,
        }
    }

    /// Display label for cards and badges.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyStatus::Lancamento => "Lançamento",
            PropertyStatus::EmObras => "Em Obras",
            PropertyStatus::Pronto => "Pronto",
        }
    }

    pub fn all() -> [PropertyStatus; 3] {
        [
            PropertyStatus::Lancamento,
            PropertyStatus::EmObras,
            PropertyStatus::Pronto,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyPurpose {
    Venda,
    Aluguel,
}

impl PropertyPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyPurpose::Venda => "VENDA",
            PropertyPurpose::Aluguel => "ALUGUEL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "VENDA" => Some(PropertyPurpose::Venda),
            "ALUGUEL" => Some(PropertyPurpose::Aluguel),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyPurpose::Venda => "Venda",
            PropertyPurpose::Aluguel => "Aluguel",
        }
    }

    pub fn all() -> [PropertyPurpose; 2] {
        [PropertyPurpose::Venda, PropertyPurpose::Aluguel]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyImage {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub position: i64,
}

/// A fully loaded listing: the detail page view of the `properties` row
/// plus its address hierarchy, images and amenities.
#[derive(Debug, Clone)]
pub struct Property {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub status: PropertyStatus,
    pub purpose: PropertyPurpose,
    pub price: Option<i64>,
    pub condo_fee: Option<i64>,
    pub iptu_yearly: Option<i64>,
    pub area_total: Option<f64>,
    pub area_private: Option<f64>,
    pub bedrooms: Option<i64>,
    pub suites: Option<i64>,
    pub bathrooms: Option<i64>,
    pub parking_spots: Option<i64>,
    pub floor: Option<i64>,
    pub year_built: Option<i64>,
    pub delivery_date: Option<NaiveDate>,
    pub allow_airbnb: bool,
    pub highlights: Vec<String>,
    pub developer: Option<String>,
    pub realtor_name: Option<String>,
    pub canonical_url: Option<String>,
    pub og_image: Option<String>,
    pub featured: bool,
    pub published: bool,
    pub views: i64,
    pub address: FullAddress,
    pub images: Vec<PropertyImage>,
    pub amenities: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Card data for list pages: one row per listing with its cover image
/// and the neighborhood/city names already joined in.
#[derive(Debug, Clone)]
pub struct PropertySummary {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub status: PropertyStatus,
    pub purpose: PropertyPurpose,
    pub price: Option<i64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub parking_spots: Option<i64>,
    pub area_private: Option<f64>,
    pub allow_airbnb: bool,
    pub neighborhood: String,
    pub city: String,
    pub cover_image: Option<String>,
    pub cover_alt: Option<String>,
}

/// Validated output of the admin property form, ready for insert/update.
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub status: PropertyStatus,
    pub purpose: PropertyPurpose,
    pub price: Option<i64>,
    pub condo_fee: Option<i64>,
    pub iptu_yearly: Option<i64>,
    pub area_total: Option<f64>,
    pub area_private: Option<f64>,
    pub bedrooms: Option<i64>,
    pub suites: Option<i64>,
    pub bathrooms: Option<i64>,
    pub parking_spots: Option<i64>,
    pub floor: Option<i64>,
    pub year_built: Option<i64>,
    pub delivery_date: Option<NaiveDate>,
    pub allow_airbnb: bool,
    pub highlights: Vec<String>,
    pub developer: Option<String>,
    pub realtor_name: Option<String>,
    pub canonical_url: Option<String>,
    pub og_image: Option<String>,
    pub featured: bool,
    pub published: bool,
    pub address: NewAddress,
    pub images: Vec<PropertyImage>,
    pub amenity_ids: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct NewAddress {
    pub street: String,
    pub street_number: Option<String>,
    pub complement: Option<String>,
    pub postal_code: String,
    pub neighborhood_id: i64,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Price formatted as "R$ 1.234.567", or "Consulte" when unset.
pub fn format_price(price: Option<i64>) -> String {
    match price {
        None => "Consulte".to_string(),
        Some(v) => {
            let digits = v.abs().to_string();
            let mut grouped = String::new();
            for (i, c) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    grouped.push('.');
                }
                grouped.push(c);
            }
            if v < 0 {
                format!("-R$ {grouped}")
            } else {
                format!("R$ {grouped}")
            }
        }
    }
}

/// Area formatted as "123 m²", or "-" when unset.
pub fn format_area(area: Option<f64>) -> String {
    match area {
        None => "-".to_string(),
        Some(v) if v.fract() == 0.0 => format!("{} m²", v as i64),
        Some(v) => format!("{v:.1} m²"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip_and_labels() {
        for status in PropertyStatus::all() {
            assert_eq!(PropertyStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PropertyStatus::parse("DEMOLIDO"), None);
        assert_eq!(PropertyStatus::Lancamento.label(), "Lançamento");
    }

    #[test]
    fn purpose_roundtrip() {
        for purpose in PropertyPurpose::all() {
            assert_eq!(PropertyPurpose::parse(purpose.as_str()), Some(purpose));
        }
        assert_eq!(PropertyPurpose::parse("venda"), None);
    }

    #[test]
    fn price_formatting_groups_thousands() {
        assert_eq!(format_price(Some(2_500_000)), "R$ 2.500.000");
        assert_eq!(format_price(Some(450)), "R$ 450");
        assert_eq!(format_price(None), "Consulte");
    }

    #[test]
    fn area_formatting() {
        assert_eq!(format_area(Some(180.0)), "180 m²");
        assert_eq!(format_area(Some(75.5)), "75.5 m²");
        assert_eq!(format_area(None), "-");
    }
}
