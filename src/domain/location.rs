use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct State {
    pub id: i64,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone)]
pub struct City {
    pub id: i64,
    pub state_id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct Region {
    pub id: i64,
    pub city_id: i64,
    pub name: String,
    pub slug: String,
}

/// A neighborhood guide entry, hierarchy parent of addresses.
#[derive(Debug, Clone)]
pub struct Neighborhood {
    pub id: i64,
    pub city_id: i64,
    pub region_id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub published: bool,
    pub updated_at: NaiveDateTime,
}

/// Neighborhood card data for the guide index: the guide fields plus
/// the city name and a count of published listings.
#[derive(Debug, Clone)]
pub struct NeighborhoodSummary {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub city: String,
    pub property_count: i64,
}

/// A nearby-neighborhood result with the distance already computed.
#[derive(Debug, Clone)]
pub struct NearbyNeighborhood {
    pub name: String,
    pub slug: String,
    pub city: String,
    pub distance_m: f64,
    pub property_count: i64,
}

/// The address of a listing with the full location hierarchy joined in.
#[derive(Debug, Clone)]
pub struct FullAddress {
    pub street: String,
    pub street_number: Option<String>,
    pub complement: Option<String>,
    pub postal_code: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub neighborhood_id: i64,
    pub neighborhood: String,
    pub neighborhood_slug: String,
    pub region: Option<String>,
    pub city: String,
    pub state_code: String,
}

impl FullAddress {
    /// "Rua Augusta, 1500 - Jardins, São Paulo/SP"
    pub fn display_line(&self) -> String {
        let mut line = self.street.clone();
        if let Some(n) = &self.street_number {
            line.push_str(", ");
            line.push_str(n);
        }
        line.push_str(" - ");
        line.push_str(&self.neighborhood);
        line.push_str(", ");
        line.push_str(&self.city);
        line.push('/');
        line.push_str(&self.state_code);
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> FullAddress {
        FullAddress {
            street: "Rua Augusta".into(),
            street_number: Some("1500".into()),
            complement: None,
            postal_code: "01304-001".into(),
            lat: Some(-23.5615),
            lng: Some(-46.6693),
            neighborhood_id: 1,
            neighborhood: "Jardins".into(),
            neighborhood_slug: "jardins".into(),
            region: Some("Centro-Oeste".into()),
            city: "São Paulo".into(),
            state_code: "SP".into(),
        }
    }

    #[test]
    fn display_line_with_number() {
        assert_eq!(addr().display_line(), "Rua Augusta, 1500 - Jardins, São Paulo/SP");
    }

    #[test]
    fn display_line_without_number() {
        let mut a = addr();
        a.street_number = None;
        assert_eq!(a.display_line(), "Rua Augusta - Jardins, São Paulo/SP");
    }
}
