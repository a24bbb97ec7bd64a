//! Great-circle distance
//!
//! Haversine formula on a spherical Earth. Inputs are assumed to be in
//! valid lat/lng ranges; callers validate with [`Coordinates::validate`]
//! before calling.

use crate::constants::geo::EARTH_RADIUS_METERS;
use crate::geo::Coordinates;

/// Calculate the distance between two points in meters (Haversine formula)
///
/// Symmetric, zero for identical points, and at most `π·R` (antipodes).
pub fn distance(a: Coordinates, b: Coordinates) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lng - a.lng).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_same_point_is_zero() {
        for (lat, lng) in [(0.0, 0.0), (19.4326, -99.1332), (-89.9, 179.9), (90.0, 0.0)] {
            let p = Coordinates::new(lat, lng);
            assert_eq!(distance(p, p), 0.0);
        }
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ((40.7128, -74.0060), (51.5074, -0.1278)),
            ((-33.8688, 151.2093), (35.6762, 139.6503)),
            ((19.4326, -99.1332), (19.4500, -99.1300)),
        ];

        for ((lat1, lng1), (lat2, lng2)) in pairs {
            let a = Coordinates::new(lat1, lng1);
            let b = Coordinates::new(lat2, lng2);
            assert_eq!(distance(a, b), distance(b, a));
        }
    }

    #[test]
    fn test_antipodal_points() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 180.0);

        let expected = PI * EARTH_RADIUS_METERS;
        assert_abs_diff_eq!(distance(a, b), expected, epsilon = 1.0);
        assert_abs_diff_eq!(distance(a, b), 20_015_086.0, epsilon = 1.0);
    }

    #[test]
    fn test_nearby_mexico_city_points() {
        let zocalo = Coordinates::new(19.4326, -99.1332);
        let north = Coordinates::new(19.4500, -99.1300);

        let d = distance(zocalo, north);
        assert!(d > 0.0);
        assert!(d < 2000.0, "distance {} should be under 2km", d);
        // ~0.0174 deg of latitude plus a small longitude offset
        assert_abs_diff_eq!(d, 1962.0, epsilon = 10.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let nyc = Coordinates::new(40.7128, -74.0060);
        let north = Coordinates::new(41.7128, -74.0060);

        assert_abs_diff_eq!(distance(nyc, north), 111_195.0, epsilon = 1.0);
    }
}
