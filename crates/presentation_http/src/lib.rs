//! Trip cost planner HTTP presentation layer
//!
//! JSON endpoints for address search, driving routes and trip cost
//! calculation, plus the authentication and error mapping around them.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse, RouteDebug};
pub use middleware::{ApiJson, ApiKeyAuthLayer, RequestIdLayer, ValidatedJson};
pub use routes::create_router;
pub use state::AppState;
