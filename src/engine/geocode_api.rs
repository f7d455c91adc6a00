use super::Engine;

use async_trait::async_trait;

use crate::{
    api::GeocodeAPI,
    entities::{Coordinates, Location, Poi},
    error::{not_found_error, upstream_error, Error},
};

#[async_trait]
impl GeocodeAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn geocode_address(&self, address: &str) -> Result<Location, Error> {
        let response = self.provider.geocode(address).await?;

        if response.status != "1" {
            tracing::warn!(info = %response.info, "geocoding failed");
            return Err(upstream_error());
        }

        let first = match response.geocodes.first() {
            Some(first) if response.count.trim() != "0" => first,
            _ => return Err(not_found_error(address)),
        };

        let coordinates: Coordinates = first.location.parse()?;

        let formatted_address = if first.formatted_address.is_empty() {
            address.to_string()
        } else {
            first.formatted_address.clone()
        };

        let city = if first.city.is_empty() {
            first.province.clone()
        } else {
            first.city.clone()
        };

        Ok(Location::new(coordinates, formatted_address)?.with_city(Some(city)))
    }

    #[tracing::instrument(skip(self), fields(name = %poi.name))]
    async fn geocode_poi(&self, poi: Poi) -> Result<Location, Error> {
        if let Some(coordinates) = poi.coordinates.filter(Coordinates::is_valid) {
            let location = Location::new(coordinates, poi.address.clone())?
                .with_city(Some(poi.city.clone()));
            return Ok(location.with_poi(poi));
        }

        let location = self.geocode_address(&poi.address).await?;
        Ok(location.with_poi(poi))
    }

    #[tracing::instrument(skip(self))]
    async fn infer_city(&self, coordinates: Coordinates) -> String {
        let component = match self.provider.reverse_geocode(coordinates).await {
            Ok(response) if response.status == "1" => response
                .regeocode
                .map(|regeocode| regeocode.address_component),
            Ok(response) => {
                tracing::warn!(info = %response.info, "reverse geocoding failed");
                None
            }
            Err(err) => {
                tracing::warn!(%err, "reverse geocoding failed");
                None
            }
        };

        // Municipalities report an empty city and carry the name in the province.
        component
            .and_then(|c| [c.city, c.province].into_iter().find(|s| !s.is_empty()))
            .unwrap_or_else(|| self.config.default_city.clone())
    }

    #[tracing::instrument(skip(self, location), fields(at = %location.coordinates))]
    async fn static_map(&self, location: &Location) -> Result<Vec<u8>, Error> {
        self.provider.static_map(location.coordinates).await
    }
}
