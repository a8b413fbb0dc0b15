//! API Module
//!
//! HTTP handlers and routing for the user cache service.
//!
//! # Endpoints
//! - `GET /getUsers/:page?` - List users
//! - `GET /getUser/:id` - Get a user
//! - `POST /createUser` - Create a user
//! - `PUT /updateUser` - Update a user
//! - `DELETE /deleteUser/:id` - Delete a user
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
