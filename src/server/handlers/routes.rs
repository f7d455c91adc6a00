use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{DynAPI, RouteAPI, TripAPI};
use crate::entities::{RouteSegment, TransportMode};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    origin: String,
    destination: String,
    #[serde(default)]
    mode: TransportMode,
    city: Option<String>,
}

/// Routes between two place names. An unroutable pair is still a 200 with
/// `success: false`; only unresolvable names are errors.
pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<RouteSegment>, Error> {
    let origin = api.locate(&params.origin).await?;
    let destination = api.locate(&params.destination).await?;

    let segment = api
        .route(&origin, &destination, params.mode, params.city.as_deref())
        .await;

    Ok(segment.into())
}
