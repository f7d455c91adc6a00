use super::helpers::{coerce_count, non_empty, parse_count, parse_decimal};
use super::Engine;

use async_trait::async_trait;

use crate::{
    api::{GeocodeAPI, RouteAPI},
    entities::{Confidence, Location, RouteSegment, Step, TransportMode},
    error::{routing_unsuccessful_error, Error},
    external::{
        types::{PathRoute, WireStep, WireTransit},
        CyclingResponse, PathResponse, TransitResponse,
    },
};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(
        skip(self, origin, destination),
        fields(from = origin.label(), to = destination.label())
    )]
    async fn route(
        &self,
        origin: &Location,
        destination: &Location,
        mode: TransportMode,
        city: Option<&str>,
    ) -> RouteSegment {
        let mut segment = RouteSegment::new(origin.clone(), destination.clone(), mode);

        if origin.coordinates == destination.coordinates {
            tracing::info!("origin and destination coincide, nothing to route");
            return segment;
        }

        let result = match mode {
            TransportMode::Driving | TransportMode::Walking => self
                .provider
                .path_directions(mode, origin.coordinates, destination.coordinates)
                .await
                .and_then(|response| fill_from_path_response(&mut segment, response)),
            TransportMode::Transit => {
                let city = self.transit_city(origin, city).await;
                self.provider
                    .transit_directions(origin.coordinates, destination.coordinates, &city)
                    .await
                    .and_then(|response| fill_from_transit_response(&mut segment, response))
            }
            TransportMode::Cycling => self
                .provider
                .cycling_directions(origin.coordinates, destination.coordinates)
                .await
                .and_then(|response| fill_from_cycling_response(&mut segment, response)),
        };

        match result {
            Ok(()) => segment,
            Err(err) => {
                tracing::warn!(%err, %mode, "routing failed");
                RouteSegment::failed(origin.clone(), destination.clone(), mode, err.message)
            }
        }
    }
}

impl Engine {
    async fn transit_city(&self, origin: &Location, city: Option<&str>) -> String {
        if let Some(city) = city.filter(|c| !c.trim().is_empty()) {
            return city.to_string();
        }

        if let Some(city) = &origin.city {
            return city.clone();
        }

        // falls back to the configured default on its own
        self.infer_city(origin.coordinates).await
    }
}

fn fill_from_path_response(
    segment: &mut RouteSegment,
    response: PathResponse,
) -> Result<(), Error> {
    if response.status != "1" {
        return Err(routing_unsuccessful_error(format!(
            "{} routing failed: {}",
            segment.mode, response.info
        )));
    }

    let route = response
        .route
        .ok_or_else(|| routing_unsuccessful_error("response has no route"))?;

    fill_from_path(segment, route)
}

fn fill_from_cycling_response(
    segment: &mut RouteSegment,
    response: CyclingResponse,
) -> Result<(), Error> {
    if response.errcode != "0" {
        return Err(routing_unsuccessful_error(format!(
            "cycling routing failed: {} ({})",
            response.errmsg, response.errcode
        )));
    }

    let route = response
        .data
        .ok_or_else(|| routing_unsuccessful_error("response has no route"))?;

    fill_from_path(segment, route)
}

fn fill_from_path(segment: &mut RouteSegment, route: PathRoute) -> Result<(), Error> {
    let path = route
        .paths
        .into_iter()
        .next()
        .ok_or_else(|| routing_unsuccessful_error("no path found"))?;

    let mut confidence = Confidence::Reported;
    segment.distance = coerce_count(&path.distance, "distance", &mut confidence);
    segment.duration = coerce_count(&path.duration, "duration", &mut confidence);
    segment.confidence = confidence;

    segment.encoded_path = if path.polyline.trim().is_empty() {
        join_polylines(path.steps.iter().map(|s| s.polyline.as_str()))
    } else {
        path.polyline
    };

    segment.steps = path.steps.into_iter().map(to_step).collect();

    Ok(())
}

fn fill_from_transit_response(
    segment: &mut RouteSegment,
    response: TransitResponse,
) -> Result<(), Error> {
    if response.status != "1" {
        return Err(routing_unsuccessful_error(format!(
            "transit routing failed: {}",
            response.info
        )));
    }

    let transit = response
        .route
        .and_then(|route| route.transits.into_iter().next())
        .ok_or_else(|| routing_unsuccessful_error("no transit route found"))?;

    fill_from_transit(segment, transit);

    Ok(())
}

fn fill_from_transit(segment: &mut RouteSegment, transit: WireTransit) {
    let mut confidence = Confidence::Reported;
    segment.distance = coerce_count(&transit.distance, "distance", &mut confidence);
    segment.duration = coerce_count(&transit.duration, "duration", &mut confidence);
    segment.confidence = confidence;
    segment.cost = parse_decimal(&transit.cost);
    segment.walking_distance = parse_count(&transit.walking_distance);

    let mut polylines: Vec<String> = vec![];

    for part in transit.segments {
        if let Some(walking) = part.walking {
            for step in walking.steps {
                if !step.polyline.trim().is_empty() {
                    polylines.push(step.polyline.clone());
                }
                segment.steps.push(to_step(step));
            }
        }

        let ride = part.bus.and_then(|bus| bus.buslines.into_iter().next());

        if let Some(line) = ride {
            if !line.polyline.trim().is_empty() {
                polylines.push(line.polyline.clone());
            }

            segment.steps.push(Step {
                instruction: format!(
                    "Take {} from {} to {}",
                    line.name, line.departure_stop.name, line.arrival_stop.name
                ),
                road: None,
                distance: parse_count(&line.distance).unwrap_or(0),
                polyline: non_empty(line.polyline),
                line: non_empty(line.name),
            });
        }
    }

    segment.encoded_path = join_polylines(polylines.iter().map(String::as_str));
}

fn join_polylines<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(";")
}

fn to_step(step: WireStep) -> Step {
    Step {
        instruction: step.instruction,
        road: non_empty(step.road),
        distance: parse_count(&step.distance).unwrap_or(0),
        polyline: non_empty(step.polyline),
        line: None,
    }
}
