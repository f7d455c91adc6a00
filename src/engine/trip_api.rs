use super::Engine;

use async_trait::async_trait;

use crate::{
    api::{GeocodeAPI, PlaceAPI, PlanRequest, PlanResponse, RouteAPI, TripAPI},
    entities::{Location, SkippedCandidate, TransportMode, TripPlan},
    error::{extraction_empty_error, Error},
    extract::extract,
    render,
};

const NO_ADDRESS: &str = "No address found in the input text.";
const NOTHING_RESOLVED: &str = "No location could be resolved.";
const NOTHING_TO_ROUTE: &str = "Nothing to route.";

/// Greedy nearest-neighbour ordering starting from the first location.
///
/// Distances are planar on raw lng/lat degrees, so this is neither geodesic
/// nor optimal; it only avoids obvious back-and-forth. Ties keep input order.
pub fn optimize_order(mut locations: Vec<Location>) -> Vec<Location> {
    if locations.len() < 3 {
        return locations;
    }

    let mut ordered = vec![locations.remove(0)];

    while !locations.is_empty() {
        let current = ordered[ordered.len() - 1].coordinates;

        let mut nearest = 0;
        for (index, location) in locations.iter().enumerate().skip(1) {
            if current.planar_distance(&location.coordinates)
                < current.planar_distance(&locations[nearest].coordinates)
            {
                nearest = index;
            }
        }

        ordered.push(locations.remove(nearest));
    }

    ordered
}

#[async_trait]
impl TripAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn locate(&self, name: &str) -> Result<Location, Error> {
        let poi = self.resolve_or_synthesize(name).await?;

        self.geocode_poi(poi).await
    }

    #[tracing::instrument(skip(self, locations), fields(count = locations.len()))]
    async fn compose_trip(
        &self,
        locations: Vec<Location>,
        mode: TransportMode,
        optimize: bool,
    ) -> TripPlan {
        let locations = if optimize {
            optimize_order(locations)
        } else {
            locations
        };

        let mut segments = vec![];

        for pair in locations.windows(2) {
            let segment = self.route(&pair[0], &pair[1], mode, None).await;

            if !segment.success {
                tracing::warn!(
                    from = pair[0].label(),
                    to = pair[1].label(),
                    error = ?segment.error,
                    "segment unreachable"
                );
            }

            segments.push(segment);
        }

        let mut plan = TripPlan::new(mode, locations);
        plan.segments = segments;

        plan
    }

    #[tracing::instrument(skip(self))]
    async fn plan(&self, request: PlanRequest) -> PlanResponse {
        let (candidates, mode, optimize) = match request {
            PlanRequest::Text {
                text,
                mode,
                optimize,
            } => (extract(&text), mode, optimize),
            PlanRequest::Endpoints {
                origin,
                destination,
                mode,
            } => {
                let candidates = [origin, destination]
                    .into_iter()
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect();
                (candidates, mode, false)
            }
        };

        if candidates.is_empty() {
            tracing::info!(error = %extraction_empty_error(), "nothing to plan");
            return failure(NO_ADDRESS.into());
        }

        let (locations, skipped) = self.locate_all(&candidates).await;

        if locations.is_empty() {
            let mut summary = vec![NOTHING_RESOLVED.to_string()];
            summary.extend(
                skipped
                    .iter()
                    .map(|s| format!("Skipped {}: {}", s.name, s.reason)),
            );
            return failure(summary.join("\n"));
        }

        let mut plan = self.compose_trip(locations, mode, optimize).await;
        plan.skipped = skipped;

        let map_html = match render::render_map(&plan).to_html() {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(%err, "map rendering failed");
                render::placeholder_html(&err.message)
            }
        };

        let mut steps = render::step_script(&plan);
        if steps.is_empty() {
            steps = NOTHING_TO_ROUTE.into();
        }

        tracing::info!(
            id = %plan.id,
            locations = plan.locations.len(),
            unreachable = plan.unreachable_count(),
            "plan ready"
        );

        PlanResponse {
            summary: render::summary(&plan),
            map_html,
            steps,
            plan: Some(plan),
        }
    }
}

impl Engine {
    /// Resolves candidates one after another. Failures are recorded and
    /// dropped; the rest keep their input order.
    async fn locate_all(
        &self,
        candidates: &[String],
    ) -> (Vec<Location>, Vec<SkippedCandidate>) {
        let mut locations = vec![];
        let mut skipped = vec![];

        for name in candidates {
            match self.locate(name).await {
                Ok(location) => locations.push(location),
                Err(err) => {
                    tracing::info!(name = name.as_str(), %err, "skipping candidate");
                    skipped.push(SkippedCandidate {
                        name: name.clone(),
                        reason: err.message,
                    });
                }
            }
        }

        (locations, skipped)
    }
}

fn failure(message: String) -> PlanResponse {
    PlanResponse {
        map_html: render::placeholder_html(&message),
        steps: NOTHING_TO_ROUTE.into(),
        summary: message,
        plan: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_engine;
    use crate::entities::Coordinates;
    use crate::external::stub::{
        no_places, path_ok, place_hit, place_hit_in, status_failure, StubProvider,
    };
    use crate::polyline;
    use serde_json::json;
    use tokio_test::block_on;

    fn at(name: &str, lng: f64, lat: f64) -> Location {
        Location::new(Coordinates::new(lng, lat), name.into())
            .unwrap()
            .with_city(Some("北京市".into()))
    }

    fn names(locations: &[Location]) -> Vec<&str> {
        locations.iter().map(Location::label).collect()
    }

    #[test]
    fn greedy_order_visits_nearest_first() {
        let ordered = optimize_order(vec![
            at("A", 100.0, 30.0),
            at("B", 110.0, 30.0),
            at("C", 101.0, 30.0),
        ]);

        assert_eq!(names(&ordered), vec!["A", "C", "B"]);
    }

    #[test]
    fn greedy_ties_keep_input_order() {
        let ordered = optimize_order(vec![
            at("A", 100.0, 30.0),
            at("B", 101.0, 30.0),
            at("C", 99.0, 30.0),
        ]);

        assert_eq!(names(&ordered), vec!["A", "B", "C"]);
    }

    #[test]
    fn three_stops_with_a_failed_middle_leg() {
        let a = at("故宫", 116.397, 39.918);
        let b = at("景山", 116.396, 39.925);
        let c = at("北海", 116.389, 39.925);

        let stub = StubProvider::new()
            .with_directions(
                TransportMode::Driving,
                a.coordinates,
                b.coordinates,
                path_ok("1200", "300", &[("向北", "116.397,39.918;116.396,39.925")]),
            )
            .with_directions(
                TransportMode::Driving,
                b.coordinates,
                c.coordinates,
                status_failure(),
            );
        let (engine, _) = test_engine(stub);

        let plan = block_on(engine.compose_trip(vec![a, b, c], TransportMode::Driving, false));
        let map = render::render_map(&plan);

        assert_eq!(plan.segments.len(), 2);
        assert!(plan.segments[0].success);
        assert!(!plan.segments[1].success);
        assert_eq!(plan.total_distance(), 1200);

        assert_eq!(map.markers.len(), 3);
        assert_eq!(map.polylines.len(), 1);
        assert!(render::summary(&plan).contains("1 unreachable segment"));
    }

    #[test]
    fn transit_failure_stays_on_its_segment() {
        let a = at("天安门", 116.397455, 39.909187);
        let b = at("西单", 116.374, 39.907);
        let c = at("复兴门", 116.356, 39.907);

        let stub = StubProvider::new()
            .with_directions(
                TransportMode::Transit,
                a.coordinates,
                b.coordinates,
                json!({ "status": "1", "route": { "transits": [] } }),
            )
            .with_directions(
                TransportMode::Transit,
                b.coordinates,
                c.coordinates,
                json!({ "status": "1", "route": { "transits": [{
                    "distance": "2000", "duration": "600", "segments": []
                }]}}),
            );
        let (engine, _) = test_engine(stub);

        let plan = block_on(engine.compose_trip(vec![a, b, c], TransportMode::Transit, false));

        assert_eq!(
            plan.segments[0].error.as_deref(),
            Some("no transit route found")
        );
        assert!(plan.segments[1].success);
        assert_eq!(plan.segments[1].distance, 2000);
    }

    #[test]
    fn text_to_driving_plan() {
        let tiananmen = Coordinates::new(116.397455, 39.909187);
        let summer_palace = Coordinates::new(116.275179, 39.999617);

        let stub = StubProvider::new()
            .with_place(
                "北京天安门",
                place_hit("天安门", "风景名胜;风景名胜;国家级景点", "116.397455,39.909187", "4.9"),
            )
            .with_place(
                "北京颐和园",
                place_hit("颐和园", "风景名胜;公园广场;公园", "116.275179,39.999617", "4.8"),
            )
            .with_directions(
                TransportMode::Driving,
                tiananmen,
                summer_palace,
                path_ok(
                    "18000",
                    "2700",
                    &[
                        ("沿长安街向西", "116.397455,39.909187;116.320000,39.907000"),
                        ("沿西四环向北", "116.320000,39.907000;116.275179,39.999617"),
                    ],
                ),
            );
        let (engine, _) = test_engine(stub);

        let response = block_on(engine.plan(PlanRequest::Text {
            text: "从北京天安门到北京颐和园".into(),
            mode: TransportMode::Driving,
            optimize: false,
        }));

        let plan = response.plan.unwrap();
        let segment = &plan.segments[0];

        assert_eq!(plan.locations.len(), 2);
        assert!(segment.success);
        assert!(segment.distance > 0);
        assert!(!polyline::decode(&segment.encoded_path).is_empty());
        assert!(response.summary.contains("Total distance: 18.00 km"));
        assert!(response.map_html.contains("L.map"));
        assert!(response.steps.contains("Leg 1: 天安门 → 颐和园"));
    }

    #[test]
    fn searched_places_carry_their_cities_into_the_summary() {
        let tiananmen = Coordinates::new(116.397455, 39.909187);
        let bund = Coordinates::new(121.490317, 31.241701);

        let stub = StubProvider::new()
            .with_place(
                "北京天安门",
                place_hit_in("天安门", "风景名胜", "116.397455,39.909187", "4.9", "北京市"),
            )
            .with_place(
                "上海外滩",
                place_hit_in("外滩", "风景名胜", "121.490317,31.241701", "4.8", "上海市"),
            )
            .with_directions(
                TransportMode::Driving,
                tiananmen,
                bund,
                path_ok(
                    "1200000",
                    "43200",
                    &[("沿京沪高速行驶", "116.397455,39.909187;121.490317,31.241701")],
                ),
            );
        let (engine, stub) = test_engine(stub);

        let response = block_on(engine.plan(PlanRequest::Text {
            text: "从北京天安门到上海外滩".into(),
            mode: TransportMode::Driving,
            optimize: false,
        }));

        let plan = response.plan.unwrap();

        assert_eq!(plan.cities(), vec!["北京市".to_string(), "上海市".to_string()]);
        assert!(response.summary.contains("Spans several cities: 北京市, 上海市"));
        // two searches and one route, no geocoding
        assert_eq!(stub.calls(), 3);
    }

    #[test]
    fn greeting_gives_no_address_and_no_map() {
        let (engine, stub) = test_engine(StubProvider::new());

        let response = block_on(engine.plan(PlanRequest::Text {
            text: "你好".into(),
            mode: TransportMode::Driving,
            optimize: false,
        }));

        assert!(response.plan.is_none());
        assert_eq!(response.summary, "No address found in the input text.");
        assert!(response.map_html.starts_with("<div"));
        assert!(!response.steps.is_empty());
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn nothing_resolved_lists_reasons() {
        let stub = StubProvider::new()
            .with_place("火星基地", no_places())
            .with_place("月球背面", no_places());
        let (engine, _) = test_engine(stub);

        let response = block_on(engine.plan(PlanRequest::Endpoints {
            origin: "火星基地".into(),
            destination: "月球背面".into(),
            mode: TransportMode::Walking,
        }));

        assert!(response.plan.is_none());
        assert!(response.summary.starts_with("No location could be resolved."));
        assert!(response.summary.contains("Skipped 火星基地: no result for 火星基地"));
        assert!(response.map_html.contains("No location could be resolved."));
    }

    #[test]
    fn single_location_is_a_one_marker_map() {
        let stub = StubProvider::new()
            .with_place(
                "故宫",
                place_hit("故宫博物院", "风景名胜;博物馆", "116.397,39.918", "4.9"),
            )
            .with_place("火星基地", no_places());
        let (engine, _) = test_engine(stub);

        let response = block_on(engine.plan(PlanRequest::Endpoints {
            origin: "故宫".into(),
            destination: "火星基地".into(),
            mode: TransportMode::Driving,
        }));

        let plan = response.plan.unwrap();

        assert_eq!(plan.locations.len(), 1);
        assert!(plan.segments.is_empty());
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(response.steps, "Nothing to route.");
        assert!(response.summary.contains("nothing to route"));
    }
}
