mod coordinates;
mod location;
mod place;
mod route;
mod trip;

pub use coordinates::Coordinates;
pub use location::Location;
pub use place::{Poi, PoiConfidence};
pub use route::{Confidence, RouteSegment, Step, TransportMode};
pub use trip::{SkippedCandidate, TripPlan};
