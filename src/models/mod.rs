//! Data transfer objects
//!
//! User records exchanged with the upstream API and the bodies of this
//! service's own endpoints.

pub mod responses;
pub mod user;

pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
pub use user::{UserEnvelope, UserId, UserRecord};
