//! Great-circle distance helpers (linear scans only, no spatial index)

/// Mean Earth radius in kilometres (IUGG)
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Haversine distance between two WGS84 points, in kilometres
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Round metres to 2 decimal places
pub fn round_metres(km: f64) -> f64 {
    (km * 1000.0 * 100.0).round() / 100.0
}
