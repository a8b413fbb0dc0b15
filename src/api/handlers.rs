//! API Handlers
//!
//! HTTP request handlers mapping routes onto [`UserService`] operations.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::Result;
use crate::models::{HealthResponse, StatsResponse, UserId, UserRecord};
use crate::service::UserService;
use crate::upstream::UserApi;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<UserService>,
}

impl AppState {
    pub fn new(service: UserService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Builds the service and its cache from configuration.
    pub fn from_config(config: &Config, upstream: Arc<dyn UserApi>) -> Self {
        Self::new(UserService::from_config(config, upstream))
    }

    pub fn cache(&self) -> SharedCache {
        self.service.cache().clone()
    }
}

/// Handler for GET /getUsers and GET /getUsers/:page
///
/// Relays the upstream page body unchanged.
pub async fn list_users_handler(
    State(state): State<AppState>,
    page: Option<Path<u32>>,
) -> Result<Response> {
    let body = state.service.list_users(page.map(|Path(p)| p)).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Handler for GET /getUser/:id
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<UserRecord>> {
    let user = state.service.get_user(id).await?;
    Ok(Json(user))
}

/// Handler for POST /createUser
///
/// Responds 201 with a `Location` pointing at the new user.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(user): Json<UserRecord>,
) -> Result<Response> {
    let created = state.service.create_user(user).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, created.location)],
        Json(created.user),
    )
        .into_response())
}

/// Handler for PUT /updateUser
///
/// The body is read leniently: an empty or non-object body counts as a
/// missing payload rather than a rejected request.
pub async fn update_user_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UserRecord>> {
    let user = state.service.update_user(UserRecord::from_slice(&body)).await?;
    Ok(Json(user))
}

/// Handler for DELETE /deleteUser/:id
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<StatusCode> {
    state.service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.service.cache().read().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
