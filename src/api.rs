use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entities::{Coordinates, Location, Poi, RouteSegment, TransportMode, TripPlan};
use crate::error::Error;

#[async_trait]
pub trait PlaceAPI {
    async fn resolve_place(&self, candidate: &str) -> Result<Poi, Error>;
    async fn resolve_or_synthesize(&self, candidate: &str) -> Result<Poi, Error>;
}

#[async_trait]
pub trait GeocodeAPI {
    async fn geocode_address(&self, address: &str) -> Result<Location, Error>;
    async fn geocode_poi(&self, poi: Poi) -> Result<Location, Error>;
    async fn infer_city(&self, coordinates: Coordinates) -> String;
    async fn static_map(&self, location: &Location) -> Result<Vec<u8>, Error>;
}

#[async_trait]
pub trait RouteAPI {
    async fn route(
        &self,
        origin: &Location,
        destination: &Location,
        mode: TransportMode,
        city: Option<&str>,
    ) -> RouteSegment;
}

#[async_trait]
pub trait TripAPI {
    async fn locate(&self, name: &str) -> Result<Location, Error>;
    async fn compose_trip(
        &self,
        locations: Vec<Location>,
        mode: TransportMode,
        optimize: bool,
    ) -> TripPlan;
    async fn plan(&self, request: PlanRequest) -> PlanResponse;
}

pub trait API: PlaceAPI + GeocodeAPI + RouteAPI + TripAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;

/// Either free text or an explicit pair of place names.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanRequest {
    Endpoints {
        origin: String,
        destination: String,
        #[serde(default)]
        mode: TransportMode,
    },
    Text {
        text: String,
        #[serde(default)]
        mode: TransportMode,
        #[serde(default)]
        optimize: bool,
    },
}

/// What the caller displays. All three text fields are always populated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanResponse {
    pub summary: String,
    pub map_html: String,
    pub steps: String,
    pub plan: Option<TripPlan>,
}
