//! Wire shapes of the provider's REST responses.
//!
//! The provider sends `[]` where a string is empty and quotes most numbers,
//! so every field goes through a lenient deserializer and missing data
//! becomes an empty value instead of a parse failure.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn optional_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PlaceSearchResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub info: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub count: String,
    #[serde(default, deserialize_with = "lenient")]
    pub pois: Vec<WirePoi>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WirePoi {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tel: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cityname: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pname: String,
    #[serde(default, deserialize_with = "lenient")]
    pub biz_ext: BizExt,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BizExt {
    #[serde(default, deserialize_with = "lenient_string")]
    pub rating: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cost: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub info: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub count: String,
    #[serde(default, deserialize_with = "lenient")]
    pub geocodes: Vec<WireGeocode>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WireGeocode {
    #[serde(default, deserialize_with = "lenient_string")]
    pub formatted_address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub province: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReverseGeocodeResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub info: String,
    #[serde(default, deserialize_with = "optional_object")]
    pub regeocode: Option<Regeocode>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Regeocode {
    #[serde(default, deserialize_with = "lenient_string")]
    pub formatted_address: String,
    #[serde(rename = "addressComponent", default, deserialize_with = "lenient")]
    pub address_component: AddressComponent,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AddressComponent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub province: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
}

/// Driving and walking directions.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PathResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub info: String,
    #[serde(default, deserialize_with = "optional_object")]
    pub route: Option<PathRoute>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PathRoute {
    #[serde(default, deserialize_with = "lenient")]
    pub paths: Vec<WirePath>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WirePath {
    #[serde(default, deserialize_with = "lenient_string")]
    pub distance: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub polyline: String,
    #[serde(default, deserialize_with = "lenient")]
    pub steps: Vec<WireStep>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WireStep {
    #[serde(default, deserialize_with = "lenient_string")]
    pub instruction: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub road: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub distance: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub polyline: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TransitResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub info: String,
    #[serde(default, deserialize_with = "optional_object")]
    pub route: Option<TransitRoute>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TransitRoute {
    #[serde(default, deserialize_with = "lenient")]
    pub transits: Vec<WireTransit>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WireTransit {
    #[serde(default, deserialize_with = "lenient_string")]
    pub distance: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cost: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub walking_distance: String,
    #[serde(default, deserialize_with = "lenient")]
    pub segments: Vec<WireTransitSegment>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WireTransitSegment {
    #[serde(default, deserialize_with = "optional_object")]
    pub walking: Option<WireWalking>,
    #[serde(default, deserialize_with = "optional_object")]
    pub bus: Option<WireBus>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WireWalking {
    #[serde(default, deserialize_with = "lenient_string")]
    pub distance: String,
    #[serde(default, deserialize_with = "lenient")]
    pub steps: Vec<WireStep>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WireBus {
    #[serde(default, deserialize_with = "lenient")]
    pub buslines: Vec<WireBusline>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WireBusline {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub distance: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub polyline: String,
    #[serde(default, deserialize_with = "lenient")]
    pub departure_stop: WireStop,
    #[serde(default, deserialize_with = "lenient")]
    pub arrival_stop: WireStop,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WireStop {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
}

/// Cycling directions come from a newer API version with its own envelope.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CyclingResponse {
    #[serde(default = "missing_errcode", deserialize_with = "lenient_string")]
    pub errcode: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub errmsg: String,
    #[serde(default, deserialize_with = "optional_object")]
    pub data: Option<PathRoute>,
}

fn missing_errcode() -> String {
    "-1".into()
}
