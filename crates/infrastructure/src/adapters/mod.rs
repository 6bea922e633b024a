//! Adapters implementing application ports

mod geocoding_adapter;
mod routing_adapter;

pub use geocoding_adapter::{GEOCODING_PROVIDER, GeocodingAdapter};
pub use routing_adapter::{ROUTE_NOT_FOUND_HINT, ROUTING_PROVIDER, RoutingAdapter};
