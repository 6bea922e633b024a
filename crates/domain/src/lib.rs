//! Domain layer for tripcost
//!
//! Contains the trip cost engine, the trip record, geographic value objects
//! and domain errors. This crate performs no I/O, so the same cost formula
//! can be linked into the HTTP service, the CLI and a browser build.

pub mod cost_engine;
pub mod entities;
pub mod errors;
pub mod rounding;
pub mod value_objects;

pub use cost_engine::{CostBreakdown, CostResult, calculate};
pub use entities::*;
pub use errors::{DomainError, violation_messages};
pub use rounding::round_half_up;
pub use value_objects::*;
