//! Application services
//!
//! Services orchestrate domain objects and ports to implement use cases.

mod route_planning_service;

pub use route_planning_service::RoutePlanningService;
