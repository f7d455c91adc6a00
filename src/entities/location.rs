use serde::{Deserialize, Serialize};

use crate::{
    entities::{Coordinates, Poi},
    error::{malformed_response_error, Error},
};

/// A resolved point. Coordinates are always valid; anything that fails to
/// resolve never becomes a `Location`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub coordinates: Coordinates,
    pub formatted_address: String,
    pub city: Option<String>,
    pub poi: Option<Poi>,
}

impl Location {
    pub fn new(coordinates: Coordinates, formatted_address: String) -> Result<Self, Error> {
        if !coordinates.is_valid() {
            return Err(malformed_response_error(format!(
                "invalid coordinates for {}",
                formatted_address
            )));
        }

        Ok(Self {
            coordinates,
            formatted_address,
            city: None,
            poi: None,
        })
    }

    pub fn with_city(mut self, city: Option<String>) -> Self {
        self.city = city.filter(|c| !c.is_empty());
        self
    }

    pub fn with_poi(mut self, poi: Poi) -> Self {
        self.poi = Some(poi);
        self
    }

    /// Short display name: the POI name when known, the address otherwise.
    pub fn label(&self) -> &str {
        match &self.poi {
            Some(poi) if !poi.name.is_empty() => &poi.name,
            _ => &self.formatted_address,
        }
    }

    /// Category tag and name, used for icon lookup.
    pub fn category_hint(&self) -> String {
        match &self.poi {
            Some(poi) => format!("{} {}", poi.kind, poi.name),
            None => self.formatted_address.clone(),
        }
    }
}

#[test]
fn rejects_non_finite_coordinates() {
    let result = Location::new(Coordinates::new(f64::NAN, 39.9), "nowhere".into());

    assert!(result.is_err());
}
