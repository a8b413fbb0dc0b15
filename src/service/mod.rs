//! User Service
//!
//! Read-through/write-through policy around the upstream user API.
//!
//! - Reads by id are served from the cache when a live entry exists, and
//!   populate it after a successful upstream fetch.
//! - Creates and updates refresh the cache entry once upstream accepts them.
//! - Deletes drop the cache entry once upstream confirms.
//! - Listing pages always goes upstream.
//!
//! The cache lock is never held across an upstream call. Concurrent misses on
//! the same id may each fetch and store; the last store wins.


use std::sync::Arc;

use axum::http::StatusCode;
use tracing::{debug, warn};

use crate::cache::{self, PutOutcome, RecordStore, SharedCache};
use crate::config::Config;
use crate::error::{Result, ServiceError, UpstreamError};
use crate::models::{UserEnvelope, UserId, UserRecord};
use crate::upstream::UserApi;

/// A record created upstream, with the path it can be read back from.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedUser {
    pub location: String,
    pub user: UserRecord,
}

/// Orchestrates user operations between callers, the cache, and upstream.
pub struct UserService {
    cache: SharedCache,
    upstream: Arc<dyn UserApi>,
    entry_weight: u64,
}

impl UserService {
    /// Creates a service over an existing cache.
    pub fn new(cache: SharedCache, upstream: Arc<dyn UserApi>, entry_weight: u64) -> Self {
        Self {
            cache,
            upstream,
            entry_weight,
        }
    }

    /// Creates a service with a fresh cache sized from configuration.
    pub fn from_config(config: &Config, upstream: Arc<dyn UserApi>) -> Self {
        let store = RecordStore::new(config.cache_capacity, config.ttl());
        Self::new(cache::shared(store), upstream, config.entry_weight)
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    // == List Users ==
    /// Relays one page of users. Pages are never cached.
    pub async fn list_users(&self, page: Option<u32>) -> Result<String> {
        let reply = self
            .upstream
            .list_users(page)
            .await
            .map_err(internal)?;

        if reply.status != StatusCode::OK {
            return Err(ServiceError::NotFound(format!(
                "user page {} not available",
                page.map_or_else(|| "default".to_string(), |p| p.to_string())
            )));
        }

        Ok(reply.body)
    }

    // == Get User ==
    /// Returns a user from the cache, or fetches and caches it.
    pub async fn get_user(&self, id: UserId) -> Result<UserRecord> {
        let cached = self.cache.write().await.get(id);
        if let Some(user) = cached {
            debug!(id, "cache hit");
            return Ok(user);
        }
        debug!(id, "cache miss");

        let reply = self.upstream.get_user(id).await.map_err(internal)?;

        if reply.status != StatusCode::OK {
            return Err(ServiceError::NotFound(format!("user {} not found", id)));
        }

        let user = serde_json::from_str::<UserEnvelope>(&reply.body)
            .ok()
            .and_then(|envelope| envelope.data)
            .ok_or_else(|| ServiceError::NotFound(format!("user {} not found", id)))?;

        self.store(id, user.clone()).await;
        Ok(user)
    }

    // == Create User ==
    /// Creates a user upstream and caches the record upstream returns.
    pub async fn create_user(&self, user: UserRecord) -> Result<CreatedUser> {
        let reply = self.upstream.create_user(&user).await.map_err(internal)?;

        if !reply.is_success() {
            return Err(ServiceError::Internal(format!(
                "upstream rejected create with {}",
                reply.status
            )));
        }

        let created = UserRecord::from_slice(reply.body.as_bytes()).ok_or_else(|| {
            ServiceError::Internal("upstream returned an unreadable user".to_string())
        })?;
        let id = created.id().ok_or_else(|| {
            ServiceError::Internal("upstream assigned no id to the new user".to_string())
        })?;

        self.store(id, created.clone()).await;
        Ok(CreatedUser {
            location: format!("/getUser/{}", id),
            user: created,
        })
    }

    // == Update User ==
    /// Replaces a user upstream and caches the submitted record.
    ///
    /// A missing payload or id is reported as not found.
    pub async fn update_user(&self, user: Option<UserRecord>) -> Result<UserRecord> {
        let user = user.ok_or_else(|| ServiceError::NotFound("missing user payload".to_string()))?;
        let id = user
            .id()
            .ok_or_else(|| ServiceError::NotFound("missing user id".to_string()))?;

        let reply = self
            .upstream
            .update_user(id, &user)
            .await
            .map_err(internal)?;

        if !reply.is_success() {
            return Err(ServiceError::UpstreamStatus(reply.status));
        }

        self.store(id, user.clone()).await;
        Ok(user)
    }

    // == Delete User ==
    /// Deletes a user upstream, then drops any cached copy.
    ///
    /// A transport failure is reported as a bad request carrying its detail.
    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        let reply = self.upstream.delete_user(id).await.map_err(|err| {
            warn!(id, error = %err, "upstream delete failed");
            ServiceError::BadRequest(err.to_string())
        })?;

        if !reply.is_success() {
            return Err(ServiceError::UpstreamStatus(reply.status));
        }

        let mut cache = self.cache.write().await;
        if cache.is_empty() {
            return Ok(());
        }
        if cache.remove(id) {
            debug!(id, "cache entry removed");
        }
        Ok(())
    }

    /// Caches `user` under `id`; a full cache is logged and otherwise ignored.
    async fn store(&self, id: UserId, user: UserRecord) {
        let outcome = self.cache.write().await.put(id, user, self.entry_weight);
        match outcome {
            PutOutcome::Inserted => debug!(id, "cache populated"),
            PutOutcome::RejectedCapacity => {
                warn!(id, weight = self.entry_weight, "cache full, serving without caching")
            }
        }
    }
}

fn internal(err: UpstreamError) -> ServiceError {
    warn!(error = %err, "upstream call failed");
    ServiceError::Internal(err.to_string())
}
