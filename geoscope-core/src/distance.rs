//! Great-circle distance between dataset coordinates.

use crate::address::{Address, Coordinates};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers at full precision.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let phi_from = from.latitude.to_radians();
    let phi_to = to.latitude.to_radians();
    let delta_phi = (to.latitude - from.latitude).to_radians();
    let delta_lambda = (to.longitude - from.longitude).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi_from.cos() * phi_to.cos() * (delta_lambda / 2.0).sin().powi(2);

    // Rounding can push `a` a hair above 1 for antipodal points.
    let c = 2.0 * a.sqrt().clamp(0.0, 1.0).asin();

    c * EARTH_RADIUS_KM
}

pub fn distance_between(from: &Address, to: &Address) -> f64 {
    haversine_km(from.coordinates(), to.coordinates())
}

/// Rounds kilometers to three decimal places (meter resolution).
pub fn round_km(km: f64) -> f64 {
    (km * 1000.0).round() / 1000.0
}
