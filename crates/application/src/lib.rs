//! Application layer - Use cases and orchestration
//!
//! Contains the route planning use cases, the port definitions they depend
//! on, and the error taxonomy presentation layers map to responses.

pub mod authenticated_caller;
pub mod error;
pub mod ports;
pub mod services;

pub use authenticated_caller::{ANONYMOUS_CALLER_ID, AuthenticatedCaller};
pub use error::{ApplicationError, ErrorKind};
pub use ports::*;
pub use services::*;
