//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{
    create_user_handler, delete_user_handler, get_user_handler, health_handler,
    list_users_handler, stats_handler, update_user_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /getUsers/:page?` - List a page of users (never cached)
/// - `GET /getUser/:id` - Read a user through the cache
/// - `POST /createUser` - Create a user and cache it
/// - `PUT /updateUser` - Update a user and refresh its cache entry
/// - `DELETE /deleteUser/:id` - Delete a user and drop its cache entry
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check
///
/// # Middleware
/// - CORS: only `allowed_origins`, methods GET/POST/PUT/DELETE
/// - Tracing: logs all requests
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/getUsers", get(list_users_handler))
        .route("/getUsers/:page", get(list_users_handler))
        .route("/getUser/:id", get(get_user_handler))
        .route("/createUser", post(create_user_handler))
        .route("/updateUser", put(update_user_handler))
        .route("/deleteUser/:id", delete(delete_user_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
}
