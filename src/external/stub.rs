//! Canned provider answers for engine tests.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::{
    entities::{Coordinates, TransportMode},
    error::Error,
    external::{
        CyclingResponse, GeocodeResponse, MapProvider, PathResponse, PlaceSearchResponse,
        ReverseGeocodeResponse, TransitResponse,
    },
};

#[derive(Default)]
pub(crate) struct StubProvider {
    places: HashMap<String, Value>,
    geocodes: HashMap<String, Value>,
    regeocodes: HashMap<String, Value>,
    directions: HashMap<String, Value>,
    static_maps: HashMap<String, Vec<u8>>,
    transit_cities: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

fn directions_key(mode: TransportMode, origin: Coordinates, destination: Coordinates) -> String {
    format!("{}:{}->{}", mode, origin, destination)
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, keyword: &str, body: Value) -> Self {
        self.places.insert(keyword.into(), body);
        self
    }

    pub fn with_geocode(mut self, address: &str, body: Value) -> Self {
        self.geocodes.insert(address.into(), body);
        self
    }

    pub fn with_regeocode(mut self, coordinates: Coordinates, body: Value) -> Self {
        self.regeocodes.insert(coordinates.to_string(), body);
        self
    }

    pub fn with_directions(
        mut self,
        mode: TransportMode,
        origin: Coordinates,
        destination: Coordinates,
        body: Value,
    ) -> Self {
        self.directions
            .insert(directions_key(mode, origin, destination), body);
        self
    }

    pub fn with_static_map(mut self, coordinates: Coordinates, image: &[u8]) -> Self {
        self.static_maps.insert(coordinates.to_string(), image.to_vec());
        self
    }

    /// Cities sent with transit requests, oldest first.
    pub fn transit_cities(&self) -> Vec<String> {
        self.transit_cities.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer<T: DeserializeOwned>(
        &self,
        table: &HashMap<String, Value>,
        key: &str,
    ) -> Result<T, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let body = table
            .get(key)
            .ok_or_else(|| Error::new(3, format!("network error: no answer for {}", key)))?;

        Ok(serde_json::from_value(body.clone())?)
    }
}

#[async_trait]
impl MapProvider for StubProvider {
    async fn search_places(&self, keyword: &str) -> Result<PlaceSearchResponse, Error> {
        self.answer(&self.places, keyword)
    }

    async fn geocode(&self, address: &str) -> Result<GeocodeResponse, Error> {
        self.answer(&self.geocodes, address)
    }

    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> Result<ReverseGeocodeResponse, Error> {
        self.answer(&self.regeocodes, &coordinates.to_string())
    }

    async fn path_directions(
        &self,
        mode: TransportMode,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<PathResponse, Error> {
        self.answer(&self.directions, &directions_key(mode, origin, destination))
    }

    async fn transit_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        city: &str,
    ) -> Result<TransitResponse, Error> {
        self.transit_cities.lock().unwrap().push(city.to_string());

        let key = directions_key(TransportMode::Transit, origin, destination);
        self.answer(&self.directions, &key)
    }

    async fn cycling_directions(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<CyclingResponse, Error> {
        let key = directions_key(TransportMode::Cycling, origin, destination);
        self.answer(&self.directions, &key)
    }

    async fn static_map(&self, coordinates: Coordinates) -> Result<Vec<u8>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        self.static_maps
            .get(&coordinates.to_string())
            .cloned()
            .ok_or_else(|| Error::new(3, "network error: no static map"))
    }
}

pub fn place_hit(name: &str, kind: &str, location: &str, rating: &str) -> Value {
    place_hit_in(name, kind, location, rating, "")
}

pub fn place_hit_in(name: &str, kind: &str, location: &str, rating: &str, city: &str) -> Value {
    json!({
        "status": "1",
        "info": "OK",
        "count": "1",
        "pois": [{
            "name": name,
            "address": [],
            "type": kind,
            "location": location,
            "tel": [],
            "cityname": city,
            "biz_ext": { "rating": rating, "cost": [] }
        }]
    })
}

pub fn no_places() -> Value {
    json!({ "status": "1", "info": "OK", "count": "0", "pois": [] })
}

pub fn geocode_hit(formatted_address: &str, location: &str, city: &str) -> Value {
    json!({
        "status": "1",
        "info": "OK",
        "count": "1",
        "geocodes": [{
            "formatted_address": formatted_address,
            "province": city,
            "city": city,
            "location": location
        }]
    })
}

pub fn no_geocodes() -> Value {
    json!({ "status": "1", "info": "OK", "count": "0", "geocodes": [] })
}

pub fn path_ok(distance: &str, duration: &str, steps: &[(&str, &str)]) -> Value {
    let steps: Vec<Value> = steps
        .iter()
        .map(|(instruction, polyline)| {
            json!({
                "instruction": instruction,
                "road": [],
                "distance": "100",
                "polyline": polyline
            })
        })
        .collect();

    json!({
        "status": "1",
        "info": "OK",
        "route": { "paths": [{ "distance": distance, "duration": duration, "steps": steps }] }
    })
}

pub fn status_failure() -> Value {
    json!({ "status": "0", "info": "INVALID_USER_KEY", "infocode": "10001" })
}
