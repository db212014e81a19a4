use serde::{Deserialize, Serialize};

/// WGS84 position in decimal degrees.
///
/// Values come straight from the backend or the device location provider and
/// are not range-checked.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::Coordinate;

    #[test]
    fn deserializes_from_backend_shape() {
        let c: Coordinate =
            serde_json::from_str(r#"{"latitude": 37.77, "longitude": -122.42}"#).unwrap();
        assert_eq!(c, Coordinate::new(37.77, -122.42));
    }

    #[test]
    fn from_tuple_is_lat_lng() {
        let c: Coordinate = (1.5, -2.5).into();
        assert_eq!(c.latitude, 1.5);
        assert_eq!(c.longitude, -2.5);
    }
}
