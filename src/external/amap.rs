use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    config::Config,
    entities::{Coordinates, TransportMode},
    error::{invalid_input_error, upstream_error, Error},
    external::{
        CyclingResponse, GeocodeResponse, MapProvider, PathResponse, PlaceSearchResponse,
        ReverseGeocodeResponse, TransitResponse,
    },
};

const PLACE_SEARCH_PATH: &str = "/v3/place/text";
const GEOCODE_PATH: &str = "/v3/geocode/geo";
const REVERSE_GEOCODE_PATH: &str = "/v3/geocode/regeo";
const DRIVING_PATH: &str = "/v3/direction/driving";
const WALKING_PATH: &str = "/v3/direction/walking";
const TRANSIT_PATH: &str = "/v3/direction/transit/integrated";
const CYCLING_PATH: &str = "/v4/direction/bicycling";
const STATIC_MAP_PATH: &str = "/v3/staticmap";

const PLACE_SEARCH_LIMIT: &str = "10";
const STATIC_MAP_ZOOM: &str = "10";
const STATIC_MAP_SIZE: &str = "600*400";

/// REST client for an AMap-compatible provider.
pub struct AmapClient {
    client: reqwest::Client,
    config: Config,
}

impl AmapClient {
    pub fn new(config: Config) -> Result<Self, Error> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self { client, config })
    }

    /// Sends a signed GET and checks the HTTP status.
    #[tracing::instrument(skip(self, params))]
    async fn send(
        &self,
        path: &str,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> Result<reqwest::Response, Error> {
        let res = self
            .client
            .get(self.config.endpoint(path))
            .query(&[("key", self.config.api_key.as_str()), ("output", "json")])
            .query(params)
            .timeout(timeout)
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            tracing::warn!(status_code, "provider returned an error status");
            return Err(upstream_error());
        }

        Ok(res)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        timeout: Duration,
    ) -> Result<T, Error> {
        let body = self.send(path, params, timeout).await?.text().await?;

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MapProvider for AmapClient {
    async fn search_places(&self, keyword: &str) -> Result<PlaceSearchResponse, Error> {
        let params = [
            ("keywords", keyword.to_string()),
            ("offset", PLACE_SEARCH_LIMIT.to_string()),
            ("extensions", "all".to_string()),
        ];

        self.get(PLACE_SEARCH_PATH, &params, self.config.timeouts.search)
            .await
    }

    async fn geocode(&self, address: &str) -> Result<GeocodeResponse, Error> {
        let params = [("address", address.to_string())];

        self.get(GEOCODE_PATH, &params, self.config.timeouts.geocode)
            .await
    }

    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> Result<ReverseGeocodeResponse, Error> {
        let params = [("location", coordinates.to_string())];

        self.get(
            REVERSE_GEOCODE_PATH,
            &params,
            self.config.timeouts.reverse_geocode,
        )
        .await
    }

    async fn path_directions(
        &self,
        mode: TransportMode,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<PathResponse, Error> {
        let path = match mode {
            TransportMode::Driving => DRIVING_PATH,
            TransportMode::Walking => WALKING_PATH,
            _ => return Err(invalid_input_error()),
        };

        let params = [
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("extensions", "all".to_string()),
        ];

        self.get(path, &params, self.config.timeouts.directions)
            .await
    }

    async fn transit_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        city: &str,
    ) -> Result<TransitResponse, Error> {
        let params = [
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("city", city.to_string()),
            ("strategy", "0".to_string()),
        ];

        self.get(TRANSIT_PATH, &params, self.config.timeouts.directions)
            .await
    }

    async fn cycling_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<CyclingResponse, Error> {
        let params = [
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
        ];

        self.get(CYCLING_PATH, &params, self.config.timeouts.directions)
            .await
    }

    async fn static_map(&self, coordinates: Coordinates) -> Result<Vec<u8>, Error> {
        let params = [
            ("location", coordinates.to_string()),
            ("zoom", STATIC_MAP_ZOOM.to_string()),
            ("size", STATIC_MAP_SIZE.to_string()),
            ("markers", format!("mid,,A:{}", coordinates)),
        ];

        let res = self
            .send(STATIC_MAP_PATH, &params, self.config.timeouts.geocode)
            .await?;

        Ok(res.bytes().await?.to_vec())
    }
}
