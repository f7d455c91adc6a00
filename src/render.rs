//! Turns a composed trip into something a person can look at: a Leaflet map
//! page (or GeoJSON), a plain-text summary and a numbered step script.

use geo_types::{Geometry, LineString};
use geozero::ToJson;
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    entities::{Coordinates, Location, RouteSegment, TransportMode, TripPlan},
    error::Error,
    polyline,
};

const TILES: &str =
    "https://webrd02.is.autonavi.com/appmaptile?lang=zh_cn&size=1&scale=1&style=8&x={x}&y={y}&z={z}";
const ATTRIBUTION: &str = "高德地图";
const DEFAULT_ZOOM: u8 = 12;
// Tiananmen, used only when there is nothing to center on.
const FALLBACK_CENTER: Coordinates = Coordinates {
    lng: 116.397455,
    lat: 39.909187,
};

const START_COLOR: &str = "green";
const END_COLOR: &str = "red";
const STOP_COLOR: &str = "blue";

const TRANSIT_PALETTE: [&str; 5] = ["#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7"];
const TRANSIT_WALK_COLOR: &str = "#666666";
const DASHED: &str = "5, 5";

// First match wins, so more specific words come first.
const ICONS: &[(&str, &str)] = &[
    ("博物", "landmark"),
    ("纪念馆", "landmark"),
    ("寺", "place-of-worship"),
    ("庙", "place-of-worship"),
    ("宗教", "place-of-worship"),
    ("公园", "tree"),
    ("风景", "mountain"),
    ("景区", "mountain"),
    ("山", "mountain"),
    ("湖", "water"),
    ("机场", "plane"),
    ("火车站", "train"),
    ("地铁", "subway"),
    ("交通", "bus"),
    ("酒店", "bed"),
    ("宾馆", "bed"),
    ("住宿", "bed"),
    ("餐饮", "utensils"),
    ("购物", "shopping-bag"),
    ("大学", "graduation-cap"),
    ("学校", "graduation-cap"),
    ("医院", "hospital"),
];
const DEFAULT_ICON: &str = "map-marker";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub position: Coordinates,
    pub title: String,
    /// Pre-escaped HTML.
    pub popup: String,
    pub icon: String,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Polyline {
    /// `(lat, lng)` pairs in drawing order.
    pub points: Vec<(f64, f64)>,
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    pub dash_array: Option<String>,
    pub tooltip: String,
}

impl Polyline {
    fn new(points: Vec<(f64, f64)>, color: &str, weight: u32) -> Self {
        Self {
            points,
            color: color.into(),
            weight,
            opacity: 0.8,
            dash_array: None,
            tooltip: String::new(),
        }
    }

    fn dashed(mut self) -> Self {
        self.dash_array = Some(DASHED.into());
        self
    }

    fn tooltip(mut self, tooltip: String) -> Self {
        self.tooltip = tooltip;
        self
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MapArtifact {
    pub center: Coordinates,
    pub zoom: u8,
    pub tiles: String,
    pub attribution: String,
    pub markers: Vec<Marker>,
    pub polylines: Vec<Polyline>,
}

pub fn render_map(plan: &TripPlan) -> MapArtifact {
    let last = plan.locations.len().saturating_sub(1);

    let markers: Vec<Marker> = plan
        .locations
        .iter()
        .enumerate()
        .map(|(index, location)| {
            let color = match index {
                0 => START_COLOR,
                i if i == last => END_COLOR,
                _ => STOP_COLOR,
            };
            marker(location, color)
        })
        .collect();

    let polylines = plan
        .successful_segments()
        .flat_map(segment_polylines)
        .collect();

    MapArtifact {
        center: center_of(&markers),
        zoom: DEFAULT_ZOOM,
        tiles: TILES.into(),
        attribution: ATTRIBUTION.into(),
        markers,
        polylines,
    }
}

fn marker(location: &Location, color: &str) -> Marker {
    let mut popup = format!("<b>{}</b>", escape_html(location.label()));

    if location.formatted_address != location.label() {
        popup.push_str(&format!("<br>{}", escape_html(&location.formatted_address)));
    }

    if let Some(poi) = &location.poi {
        if let Some(rating) = poi.rating {
            popup.push_str(&format!("<br>rating {:.1}", rating));
        }
        if !poi.phone.is_empty() {
            popup.push_str(&format!("<br>{}", escape_html(&poi.phone)));
        }
        if poi.is_low_confidence() {
            popup.push_str("<br><i>placed from the literal address</i>");
        }
    }

    Marker {
        position: location.coordinates,
        title: location.label().to_string(),
        popup,
        icon: icon_for(&location.category_hint()).into(),
        color: color.into(),
    }
}

/// Icon name for a category tag or place name.
pub fn icon_for(hint: &str) -> &'static str {
    ICONS
        .iter()
        .find(|(keyword, _)| hint.contains(keyword))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}

fn center_of(markers: &[Marker]) -> Coordinates {
    if markers.is_empty() {
        return FALLBACK_CENTER;
    }

    let n = markers.len() as f64;
    let lng = markers.iter().map(|m| m.position.lng).sum::<f64>() / n;
    let lat = markers.iter().map(|m| m.position.lat).sum::<f64>() / n;

    Coordinates::new(lng, lat)
}

fn segment_polylines(segment: &RouteSegment) -> Vec<Polyline> {
    let tooltip = format!(
        "{} → {}: {:.2} km, {} min",
        segment.origin.label(),
        segment.destination.label(),
        segment.distance_km(),
        segment.duration_minutes()
    );

    let line = match segment.mode {
        TransportMode::Driving => Polyline::new(path_points(segment), "#1890FF", 5),
        TransportMode::Walking => Polyline::new(path_points(segment), "#52C41A", 4).dashed(),
        TransportMode::Cycling => Polyline::new(path_points(segment), "#FA8C16", 4),
        TransportMode::Transit => return transit_polylines(segment, tooltip),
    };

    vec![line.tooltip(tooltip)]
}

/// Ride legs cycle through the palette; walking legs are thin grey dashes.
fn transit_polylines(segment: &RouteSegment, tooltip: String) -> Vec<Polyline> {
    let mut rides = 0;
    let mut lines = vec![];

    for step in &segment.steps {
        let points = match &step.polyline {
            Some(encoded) => polyline::decode(encoded),
            None => continue,
        };

        if points.is_empty() {
            continue;
        }

        match &step.line {
            Some(line) => {
                let color = TRANSIT_PALETTE[rides % TRANSIT_PALETTE.len()];
                rides += 1;

                let mut ride = Polyline::new(points, color, 4).tooltip(line.clone());
                ride.opacity = 0.7;
                lines.push(ride);
            }
            None => lines.push(Polyline::new(points, TRANSIT_WALK_COLOR, 2).dashed()),
        }
    }

    if lines.is_empty() {
        let mut whole =
            Polyline::new(path_points(segment), TRANSIT_PALETTE[0], 4).tooltip(tooltip);
        whole.opacity = 0.7;
        lines.push(whole);
    }

    lines
}

/// Decoded path, or a straight line between the endpoints when the
/// provider sent no usable geometry.
fn path_points(segment: &RouteSegment) -> Vec<(f64, f64)> {
    let points = polyline::decode(&segment.encoded_path);

    if !points.is_empty() {
        return points;
    }

    [&segment.origin, &segment.destination]
        .iter()
        .map(|l| (l.coordinates.lat, l.coordinates.lng))
        .collect()
}

impl MapArtifact {
    /// A self-contained Leaflet page.
    pub fn to_html(&self) -> Result<String, Error> {
        // keep "</script>" inside strings from closing the tag early
        let data = serde_json::to_string(self)?.replace('<', "\\u003c");

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
const data = {data};
const map = L.map('map').setView([data.center.lat, data.center.lng], data.zoom);
L.tileLayer(data.tiles, {{ attribution: data.attribution, maxZoom: 18 }}).addTo(map);
for (const p of data.polylines) {{
  const line = L.polyline(p.points, {{ color: p.color, weight: p.weight, opacity: p.opacity, dashArray: p.dash_array }}).addTo(map);
  if (p.tooltip) line.bindTooltip(p.tooltip);
}}
for (const m of data.markers) {{
  const icon = L.divIcon({{
    className: '',
    html: `<i class="fa-solid fa-${{m.icon}}" style="color:${{m.color}};font-size:24px"></i>`,
    iconSize: [24, 24],
  }});
  L.marker([m.position.lat, m.position.lng], {{ icon: icon, title: m.title }}).bindPopup(m.popup).addTo(map);
}}
</script>
</body>
</html>
"#
        ))
    }

    /// Markers as points and polylines as line strings, lng/lat order.
    pub fn to_geojson(&self) -> Result<Value, Error> {
        let mut features = vec![];

        for marker in &self.markers {
            let geometry: Geometry<f64> = marker.position.into();
            features.push(json!({
                "type": "Feature",
                "geometry": serde_json::from_str::<Value>(&geometry.to_json()?)?,
                "properties": {
                    "title": marker.title,
                    "icon": marker.icon,
                    "color": marker.color,
                },
            }));
        }

        for line in &self.polylines {
            let coords: Vec<(f64, f64)> =
                line.points.iter().map(|&(lat, lng)| (lng, lat)).collect();
            let geometry = Geometry::LineString(LineString::from(coords));
            features.push(json!({
                "type": "Feature",
                "geometry": serde_json::from_str::<Value>(&geometry.to_json()?)?,
                "properties": {
                    "color": line.color,
                    "weight": line.weight,
                    "tooltip": line.tooltip,
                },
            }));
        }

        Ok(json!({ "type": "FeatureCollection", "features": features }))
    }
}

pub fn summary(plan: &TripPlan) -> String {
    let mut lines = vec![];

    let names: Vec<&str> = plan.locations.iter().map(Location::label).collect();
    lines.push(format!("Route: {}", names.join(" → ")));
    lines.push(format!("Mode: {}", plan.mode));

    if plan.locations.len() < 2 {
        lines.push("Only one location was resolved; there is nothing to route.".into());
    } else {
        lines.push(format!(
            "Total distance: {:.2} km",
            plan.total_distance() as f64 / 1000.0
        ));
        lines.push(format!("Estimated time: {} min", plan.total_duration() / 60));
    }

    match plan.unreachable_count() {
        0 => {}
        1 => lines.push("1 unreachable segment".into()),
        n => lines.push(format!("{} unreachable segments", n)),
    }

    let low_confidence = plan.low_confidence_count();
    if low_confidence > 0 {
        lines.push(format!(
            "{} segment(s) have estimated distance or time",
            low_confidence
        ));
    }

    let synthesized = plan
        .locations
        .iter()
        .filter(|l| l.poi.as_ref().map_or(false, |p| p.is_low_confidence()))
        .count();
    if synthesized > 0 {
        lines.push(format!(
            "{} location(s) placed from the literal address",
            synthesized
        ));
    }

    let cities = plan.cities();
    if cities.len() > 1 {
        lines.push(format!("Spans several cities: {}", cities.join(", ")));
    }

    for skipped in &plan.skipped {
        lines.push(format!("Skipped {}: {}", skipped.name, skipped.reason));
    }

    lines.join("\n")
}

pub fn step_script(plan: &TripPlan) -> String {
    let mut out = vec![];

    for (index, segment) in plan.segments.iter().enumerate() {
        let from = segment.origin.label();
        let to = segment.destination.label();

        if !segment.success {
            out.push(format!("Leg {}: {} → {} ({})", index + 1, from, to, segment.mode));
            out.push(format!(
                "  unreachable: {}",
                segment.error.as_deref().unwrap_or("unknown error")
            ));
            continue;
        }

        out.push(format!(
            "Leg {}: {} → {} ({}, {:.2} km, {} min)",
            index + 1,
            from,
            to,
            segment.mode,
            segment.distance_km(),
            segment.duration_minutes()
        ));

        for (n, step) in segment.steps.iter().enumerate() {
            out.push(format!("  {}. {}", n + 1, step.instruction));
        }
    }

    out.join("\n")
}

pub fn placeholder_html(message: &str) -> String {
    format!(
        "<div style='color:red; padding:20px; text-align:center;'>{}</div>",
        escape_html(message)
    )
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }

    out
}
