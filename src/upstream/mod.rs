//! Upstream Module
//!
//! Access to the remote user API that holds the authoritative records.
//!
//! # Endpoints used
//! - `GET /api/users?page={page}` - List a page of users
//! - `GET /api/users/{id}` - Fetch one user, wrapped in `{ "data": ... }`
//! - `POST /api/users` - Create a user
//! - `PUT /api/users/{id}` - Replace a user
//! - `DELETE /api/users/{id}` - Delete a user

mod client;

use async_trait::async_trait;
use axum::http::StatusCode;

use crate::error::UpstreamError;
use crate::models::{UserId, UserRecord};

pub use client::HttpUserApi;

/// Status and raw body of an upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: String,
}

impl UpstreamReply {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Operations against the upstream user API.
///
/// Implementations make a single attempt per call. `Err` means no response
/// was obtained at all; any received status is returned as a reply.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn list_users(&self, page: Option<u32>) -> Result<UpstreamReply, UpstreamError>;

    async fn get_user(&self, id: UserId) -> Result<UpstreamReply, UpstreamError>;

    async fn create_user(&self, user: &UserRecord) -> Result<UpstreamReply, UpstreamError>;

    async fn update_user(
        &self,
        id: UserId,
        user: &UserRecord,
    ) -> Result<UpstreamReply, UpstreamError>;

    async fn delete_user(&self, id: UserId) -> Result<UpstreamReply, UpstreamError>;
}
