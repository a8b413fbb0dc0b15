//! Background Tasks Module
//!
//! # Tasks
//! - Expiry sweeper: drops expired cache entries at a configured interval,
//!   enabled when `CLEANUP_INTERVAL` is non-zero

mod cleanup;

pub use cleanup::spawn_cleanup_task;
