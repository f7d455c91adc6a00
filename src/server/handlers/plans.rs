use axum::extract::{Extension, Json};
use axum::response::Html;
use serde_json::Value;

use crate::api::{DynAPI, PlanRequest, PlanResponse, TripAPI};
use crate::error::{routing_unsuccessful_error, Error};
use crate::render;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(request): Json<PlanRequest>,
) -> Json<PlanResponse> {
    let response = api.plan(request).await;

    response.into()
}

pub async fn map(
    Extension(api): Extension<DynAPI>,
    Json(request): Json<PlanRequest>,
) -> Html<String> {
    let response = api.plan(request).await;

    Html(response.map_html)
}

/// The same map as a GeoJSON FeatureCollection. A request that yields no
/// plan answers with its summary as the error message.
pub async fn geojson(
    Extension(api): Extension<DynAPI>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<Value>, Error> {
    let response = api.plan(request).await;

    let plan = response
        .plan
        .ok_or_else(|| routing_unsuccessful_error(response.summary))?;

    Ok(render::render_map(&plan).to_geojson()?.into())
}
