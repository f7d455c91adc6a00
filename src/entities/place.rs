use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiConfidence {
    /// Won the category scoring.
    Scored,
    /// No categorized result scored; the first raw result was taken.
    FirstResult,
    /// Built from the literal candidate text after search found nothing.
    Synthesized,
}

/// A point of interest returned by place search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub name: String,
    pub address: String,
    pub kind: String,
    pub coordinates: Option<Coordinates>,
    /// City the provider filed the POI under; empty when unknown.
    pub city: String,
    pub phone: String,
    pub rating: Option<f64>,
    pub cost: Option<f64>,
    pub confidence: PoiConfidence,
}

impl Poi {
    pub fn synthesized(candidate: &str) -> Self {
        Self {
            name: candidate.into(),
            address: candidate.into(),
            kind: String::new(),
            coordinates: None,
            city: String::new(),
            phone: String::new(),
            rating: None,
            cost: None,
            confidence: PoiConfidence::Synthesized,
        }
    }

    pub fn is_low_confidence(&self) -> bool {
        self.confidence == PoiConfidence::Synthesized
    }
}
