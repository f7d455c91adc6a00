mod amap;
#[cfg(test)]
pub(crate) mod stub;
pub mod types;

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    entities::{Coordinates, TransportMode},
    error::Error,
};

pub use amap::AmapClient;
pub use types::{
    CyclingResponse, GeocodeResponse, PathResponse, PlaceSearchResponse, ReverseGeocodeResponse,
    TransitResponse,
};

/// Outbound calls to the mapping provider. Each call returns the provider's
/// own response shape; interpreting it is the engine's job.
#[async_trait]
pub trait MapProvider {
    async fn search_places(&self, keyword: &str) -> Result<PlaceSearchResponse, Error>;

    async fn geocode(&self, address: &str) -> Result<GeocodeResponse, Error>;

    async fn reverse_geocode(&self, coordinates: Coordinates)
        -> Result<ReverseGeocodeResponse, Error>;

    /// Driving or walking directions.
    async fn path_directions(
        &self,
        mode: TransportMode,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<PathResponse, Error>;

    async fn transit_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        city: &str,
    ) -> Result<TransitResponse, Error>;

    async fn cycling_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<CyclingResponse, Error>;

    /// PNG preview of the area around a point, with one marker on it.
    async fn static_map(&self, coordinates: Coordinates) -> Result<Vec<u8>, Error>;
}

pub type DynProvider = Arc<dyn MapProvider + Send + Sync>;
