use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{
    entities::Location,
    error::{invalid_input_error, Error},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TransportMode {
    Driving,
    Transit,
    Walking,
    Cycling,
}

impl TransportMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Transit => "transit",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
        }
    }
}

impl Default for TransportMode {
    fn default() -> Self {
        Self::Driving
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the English names and the labels used by the trip form.
impl FromStr for TransportMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving" | "drive" | "car" | "驾车" => Ok(Self::Driving),
            "transit" | "bus" | "公交" | "公共交通" => Ok(Self::Transit),
            "walking" | "walk" | "步行" => Ok(Self::Walking),
            "cycling" | "bike" | "bicycling" | "骑行" => Ok(Self::Cycling),
            _ => Err(invalid_input_error()),
        }
    }
}

impl TryFrom<String> for TransportMode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Whether distance and duration came from the provider or were coerced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Reported,
    /// A numeric field was missing or unparsable and now reads 0.
    Defaulted,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub instruction: String,
    pub road: Option<String>,
    pub distance: u64,
    pub polyline: Option<String>,
    /// Bus or rail line name for transit ride legs.
    pub line: Option<String>,
}

impl Step {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            ..Default::default()
        }
    }
}

/// Result of one pairwise routing call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub origin: Location,
    pub destination: Location,
    pub mode: TransportMode,
    pub distance: u64,
    pub duration: u64,
    pub steps: Vec<Step>,
    pub encoded_path: String,
    pub success: bool,
    pub error: Option<String>,
    pub confidence: Confidence,
    pub cost: Option<f64>,
    pub walking_distance: Option<u64>,
}

impl RouteSegment {
    pub fn new(origin: Location, destination: Location, mode: TransportMode) -> Self {
        Self {
            origin,
            destination,
            mode,
            distance: 0,
            duration: 0,
            steps: vec![],
            encoded_path: String::new(),
            success: true,
            error: None,
            confidence: Confidence::Reported,
            cost: None,
            walking_distance: None,
        }
    }

    pub fn failed(
        origin: Location,
        destination: Location,
        mode: TransportMode,
        error: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::new(origin, destination, mode)
        }
    }

    pub fn is_low_confidence(&self) -> bool {
        self.success && self.confidence == Confidence::Defaulted
    }

    pub fn distance_km(&self) -> f64 {
        self.distance as f64 / 1000.0
    }

    pub fn duration_minutes(&self) -> u64 {
        self.duration / 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Coordinates;

    #[test]
    fn mode_parses_form_labels() {
        assert_eq!("驾车".parse::<TransportMode>().unwrap(), TransportMode::Driving);
        assert_eq!("Transit".parse::<TransportMode>().unwrap(), TransportMode::Transit);
        assert_eq!("骑行".parse::<TransportMode>().unwrap(), TransportMode::Cycling);
        assert!("teleport".parse::<TransportMode>().is_err());
    }

    #[test]
    fn mode_deserializes_from_either_label() {
        let modes: Vec<TransportMode> = serde_json::from_str(r#"["walking", "公交"]"#).unwrap();

        assert_eq!(modes, vec![TransportMode::Walking, TransportMode::Transit]);
        assert_eq!(serde_json::to_string(&TransportMode::Cycling).unwrap(), r#""cycling""#);
    }

    #[test]
    fn failed_segment_is_not_low_confidence() {
        let a = Location::new(Coordinates::new(116.0, 39.0), "a".into()).unwrap();
        let segment = RouteSegment::failed(a.clone(), a, TransportMode::Walking, "nope");

        assert!(!segment.success);
        assert_eq!(segment.error.as_deref(), Some("nope"));
        assert!(segment.encoded_path.is_empty());
        assert!(!segment.is_low_confidence());
    }
}
