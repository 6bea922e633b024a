//! Value Objects - Immutable, identity-less domain primitives

mod geo_point;
mod geocode_candidate;
mod route_result;
mod trip_parameters;

pub use geo_point::GeoPoint;
pub use geocode_candidate::GeocodeCandidate;
pub use route_result::RouteResult;
pub use trip_parameters::TripParameters;
