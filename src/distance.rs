//! Great-circle distance between two points.

/// Mean radius of the Earth, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.;

/// Haversine distance in kilometers between two points given in decimal degrees. The inputs are
/// not validated.
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.).sin().powi(2);
    let c = 2. * a.sqrt().atan2((1. - a).sqrt());
    EARTH_RADIUS_KM * c
}
