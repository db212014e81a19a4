use crate::coordinate::Coordinate;

/// Mean Earth radius (statute miles). All distances in this workspace are miles.
pub const EARTH_RADIUS_MI: f64 = 3958.8;
/// Mean Earth radius (kilometers).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates, in miles (haversine).
///
/// Symmetric bit-for-bit, zero for coincident points, finite for antipodes.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    central_angle(a, b) * EARTH_RADIUS_MI
}

/// Same as [`distance`] but in kilometers.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    central_angle(a, b) * EARTH_RADIUS_KM
}

/// Central angle in radians between two coordinates.
fn central_angle(a: Coordinate, b: Coordinate) -> f64 {
    // Absolute deltas keep the result identical when a and b are swapped.
    let d_lat = (b.latitude - a.latitude).abs().to_radians();
    let d_lon = (b.longitude - a.longitude).abs().to_radians();

    let sin_lat = (d_lat / 2.0).sin();
    let sin_lon = (d_lon / 2.0).sin();
    let h = sin_lat * sin_lat
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * sin_lon * sin_lon;

    // Rounding can push h just past 1 near antipodes.
    let h = h.clamp(0.0, 1.0);
    2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::{EARTH_RADIUS_MI, distance, distance_km};
    use crate::coordinate::Coordinate;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn coincident_points_are_zero() {
        for c in [
            Coordinate::new(0.0, 0.0),
            Coordinate::new(37.7749, -122.4194),
            Coordinate::new(-89.9, 179.9),
        ] {
            assert_eq!(distance(c, c), 0.0);
        }
    }

    #[test]
    fn symmetric() {
        let pairs = [
            (Coordinate::new(37.7749, -122.4194), Coordinate::new(34.0522, -118.2437)),
            (Coordinate::new(-33.86, 151.21), Coordinate::new(51.5, -0.12)),
            (Coordinate::new(10.0, 179.0), Coordinate::new(-10.0, -179.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(distance(a, b), distance(b, a));
        }
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let d = distance(a, b);
        assert!(!d.is_nan());
        assert_close(d, std::f64::consts::PI * EARTH_RADIUS_MI, 1e-6);

        let pole_n = Coordinate::new(90.0, 0.0);
        let pole_s = Coordinate::new(-90.0, 0.0);
        assert!(!distance(pole_n, pole_s).is_nan());
    }

    #[test]
    fn san_francisco_to_los_angeles() {
        let sf = Coordinate::new(37.7749, -122.4194);
        let la = Coordinate::new(34.0522, -118.2437);
        // ~347 mi / ~559 km
        assert_close(distance(sf, la), 347.4, 1.0);
        assert_close(distance_km(sf, la), 559.1, 1.5);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = distance(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert_close(d, 69.09, 0.05);
    }
}
