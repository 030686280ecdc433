/// Earth radius in meters, matching the spatial queries the listing
/// search is built on.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points, in meters.
pub fn haversine_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Rectangular prefilter for radius queries. One degree of latitude is
/// roughly 111 km; longitude shrinks with cos(latitude). The box is a
/// superset of the circle, so callers still check exact distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub fn around(lat: f64, lng: f64, radius_m: f64) -> Self {
        let radius_km = radius_m / 1000.0;
        let lat_delta = radius_km / 111.0;
        let lng_delta = radius_km / (111.0 * lat.to_radians().cos());
        Self {
            min_lat: lat - lat_delta,
            max_lat: lat + lat_delta,
            min_lng: lng - lng_delta,
            max_lng: lng + lng_delta,
        }
    }

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }
}
