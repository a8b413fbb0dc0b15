//! User Cache - a caching proxy for a remote user API
//!
//! Serves user records through a weighted, time-limited in-memory cache and
//! keeps it consistent with the writes it forwards upstream.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use service::UserService;
pub use tasks::spawn_cleanup_task;
pub use upstream::{HttpUserApi, UserApi};
