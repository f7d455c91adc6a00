use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{invalid_input_error, Error};

/// Per-call timeouts for outbound provider requests.
#[derive(Clone, Debug)]
pub struct Timeouts {
    pub search: Duration,
    pub geocode: Duration,
    pub reverse_geocode: Duration,
    pub directions: Duration,
}

/// Process-wide settings, built once at startup and handed to every
/// component that talks to the map provider.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub default_city: String,
    pub bind: SocketAddr,
    pub timeouts: Timeouts,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: "restapi.amap.com".into(),
            default_city: "北京".into(),
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            timeouts: Self::default_timeouts(),
        }
    }

    pub fn default_timeouts() -> Timeouts {
        Timeouts {
            search: Duration::from_secs(10),
            geocode: Duration::from_secs(5),
            reverse_geocode: Duration::from_secs(5),
            directions: Duration::from_secs(15),
        }
    }

    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::new(env::var("AMAP_API_KEY")?);

        if let Ok(api_base) = env::var("AMAP_API_BASE") {
            config.api_base = api_base;
        }

        if let Ok(city) = env::var("WAYFARER_DEFAULT_CITY") {
            config.default_city = city;
        }

        if let Ok(bind) = env::var("WAYFARER_BIND") {
            config.bind = bind.parse().map_err(|_| invalid_input_error())?;
        }

        Ok(config)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("https://{}{}", self.api_base, path)
    }
}

#[test]
fn endpoint_joins_base_and_path() {
    let config = Config::new("key");

    assert_eq!(
        config.endpoint("/v3/geocode/geo"),
        "https://restapi.amap.com/v3/geocode/geo"
    );
    assert_eq!(config.timeouts.directions, Duration::from_secs(15));
}
