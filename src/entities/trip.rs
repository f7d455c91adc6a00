use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Location, RouteSegment, TransportMode};

/// A candidate that was dropped before it became a `Location`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub name: String,
    pub reason: String,
}

/// Ordered locations plus one segment per consecutive pair that was attempted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripPlan {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub mode: TransportMode,
    pub locations: Vec<Location>,
    pub segments: Vec<RouteSegment>,
    pub skipped: Vec<SkippedCandidate>,
}

impl TripPlan {
    pub fn new(mode: TransportMode, locations: Vec<Location>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            mode,
            locations,
            segments: vec![],
            skipped: vec![],
        }
    }

    pub fn successful_segments(&self) -> impl Iterator<Item = &RouteSegment> {
        self.segments.iter().filter(|s| s.success)
    }

    pub fn total_distance(&self) -> u64 {
        self.successful_segments().map(|s| s.distance).sum()
    }

    pub fn total_duration(&self) -> u64 {
        self.successful_segments().map(|s| s.duration).sum()
    }

    pub fn unreachable_count(&self) -> usize {
        self.segments.iter().filter(|s| !s.success).count()
    }

    pub fn low_confidence_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_low_confidence()).count()
    }

    /// Distinct cities of the locations, in visiting order.
    pub fn cities(&self) -> Vec<String> {
        let mut cities: Vec<String> = vec![];

        for city in self.locations.iter().filter_map(|l| l.city.as_ref()) {
            if !cities.contains(city) {
                cities.push(city.clone());
            }
        }

        cities
    }
}
