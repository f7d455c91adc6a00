use axum::extract::{Extension, Json, Query};
use axum::http::header::{HeaderName, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::api::{DynAPI, GeocodeAPI, TripAPI};
use crate::entities::Location;
use crate::error::{invalid_input_error, Error};

#[derive(Serialize, Deserialize)]
pub struct FindParams {
    query: String,
}

impl FindParams {
    fn query(&self) -> Result<&str, Error> {
        match self.query.trim() {
            "" => Err(invalid_input_error()),
            query => Ok(query),
        }
    }
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<FindParams>,
) -> Result<Json<Location>, Error> {
    let location = api.locate(params.query()?).await?;

    Ok(location.into())
}

/// Static preview image, fetched here so the provider key never leaves the
/// server.
pub async fn map(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<FindParams>,
) -> Result<([(HeaderName, &'static str); 1], Vec<u8>), Error> {
    let location = api.locate(params.query()?).await?;
    let image = api.static_map(&location).await?;

    Ok(([(CONTENT_TYPE, "image/png")], image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_engine;
    use crate::entities::Coordinates;
    use crate::external::stub::{place_hit, StubProvider};
    use std::sync::Arc;
    use tokio_test::block_on;

    fn api(stub: StubProvider) -> DynAPI {
        let (engine, _) = test_engine(stub);
        Arc::new(engine)
    }

    fn temple_of_heaven() -> StubProvider {
        StubProvider::new().with_place(
            "天坛",
            place_hit("天坛公园", "风景名胜;公园广场", "116.410829,39.881913", "4.8"),
        )
    }

    fn params(query: &str) -> Query<FindParams> {
        Query(FindParams {
            query: query.into(),
        })
    }

    #[test]
    fn blank_query_is_rejected() {
        let result = block_on(find(Extension(api(StubProvider::new())), params("  ")));

        assert_eq!(result.err().map(|e| e.code), Some(100));
    }

    #[test]
    fn found_location_does_not_expose_the_api_key() {
        let Json(location) = block_on(find(Extension(api(temple_of_heaven())), params("天坛")))
            .unwrap();

        let body = serde_json::to_string(&location).unwrap();

        assert_eq!(location.label(), "天坛公园");
        assert!(!body.contains("test-key"));
        assert!(!body.contains("key="));
    }

    #[test]
    fn map_streams_the_image_bytes() {
        let stub = temple_of_heaven()
            .with_static_map(Coordinates::new(116.410829, 39.881913), b"\x89PNG");

        let (headers, image) =
            block_on(map(Extension(api(stub)), params("天坛"))).unwrap();

        assert_eq!(headers[0].1, "image/png");
        assert_eq!(image, b"\x89PNG".to_vec());
    }

    #[test]
    fn map_for_an_unknown_place_is_an_error() {
        let result = block_on(map(Extension(api(StubProvider::new())), params("天坛")));

        assert!(result.is_err());
    }
}
