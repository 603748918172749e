// src/models/coordinates.rs

use serde::Deserialize;
use validator::Validate;

/// Request coordinates in WGS84 decimal degrees.
///
/// Used as a JSON body for `/locate` and as query parameters for
/// `/available-levels`.
#[derive(Debug, Deserialize, Validate)]
pub struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_latitude() {
        let coords = Coordinates {
            latitude: 95.0,
            longitude: 36.8,
        };
        assert!(coords.validate().is_err());
    }

    #[test]
    fn accepts_boundary_values() {
        let coords = Coordinates {
            latitude: -90.0,
            longitude: 180.0,
        };
        assert!(coords.validate().is_ok());
    }
}
