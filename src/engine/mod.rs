mod geocode_api;
mod helpers;
mod place_api;
mod route_api;
mod trip_api;

pub use place_api::{looks_like_address, score, select_best, CATEGORY_PRIORITIES};
pub use trip_api::optimize_order;

use crate::{api::API, config::Config, external::DynProvider};

pub struct Engine {
    provider: DynProvider,
    config: Config,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(provider: DynProvider, config: Config) -> Self {
        tracing::info!(api_base = %config.api_base, "engine ready");

        Self { provider, config }
    }
}

impl API for Engine {}

#[cfg(test)]
pub(crate) fn test_engine(
    stub: crate::external::stub::StubProvider,
) -> (Engine, std::sync::Arc<crate::external::stub::StubProvider>) {
    let stub = std::sync::Arc::new(stub);
    let engine = Engine::new(stub.clone(), Config::new("test-key"));

    (engine, stub)
}
