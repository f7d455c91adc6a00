use std::sync::Arc;

use wayfarer::config::Config;
use wayfarer::engine::Engine;
use wayfarer::error::Error;
use wayfarer::external::AmapClient;
use wayfarer::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let provider = Arc::new(AmapClient::new(config.clone())?);
    let engine = Engine::new(provider, config.clone());

    serve(engine, config.bind).await
}
