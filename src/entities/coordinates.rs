use geo_types::{Geometry, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{malformed_response_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Both axes finite and inside the WGS84/GCJ-02 value range.
    pub fn is_valid(&self) -> bool {
        self.lng.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lng)
            && (-90.0..=90.0).contains(&self.lat)
    }

    /// Planar distance on raw degrees. Only meaningful for ordering nearby points.
    pub fn planar_distance(&self, other: &Coordinates) -> f64 {
        ((self.lng - other.lng).powi(2) + (self.lat - other.lat).powi(2)).sqrt()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lng, self.lat)
    }
}

/// Parses the provider's `"lng,lat"` form.
impl FromStr for Coordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lng, lat) = s
            .trim()
            .split_once(',')
            .ok_or_else(|| malformed_response_error(format!("coordinate pair {:?}", s)))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| malformed_response_error(format!("coordinate pair {:?}", s)))
        };

        let coordinates = Coordinates::new(parse(lng)?, parse(lat)?);

        if !coordinates.is_valid() {
            return Err(malformed_response_error(format!(
                "coordinate pair out of range {:?}",
                s
            )));
        }

        Ok(coordinates)
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Point::new(coordinates.lng, coordinates.lat)
    }
}

impl From<Coordinates> for Geometry<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Geometry::Point(coordinates.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_pair() {
        let c: Coordinates = "116.397455,39.909187".parse().unwrap();

        assert_eq!(c, Coordinates::new(116.397455, 39.909187));
        assert_eq!(c.to_string(), "116.397455,39.909187");
    }

    #[test]
    fn rejects_garbage_and_out_of_range() {
        assert!("".parse::<Coordinates>().is_err());
        assert!("116.39".parse::<Coordinates>().is_err());
        assert!("abc,39.9".parse::<Coordinates>().is_err());
        assert!("NaN,39.9".parse::<Coordinates>().is_err());
        assert!("200.0,39.9".parse::<Coordinates>().is_err());
    }

    #[test]
    fn point_uses_lng_as_x() {
        let point: Point<f64> = Coordinates::new(116.0, 39.0).into();

        assert_eq!(point.x(), 116.0);
        assert_eq!(point.y(), 39.0);
    }
}
