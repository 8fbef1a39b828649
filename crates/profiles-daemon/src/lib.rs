//! Profiles Daemon library
//!
//! This module provides the core components for the profiles daemon:
//! - Profile store and cache layer
//! - Profile and cache services, permission validation
//! - Background parameter updater
//! - REST API handlers
//! - Server lifecycle management

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod server;
pub mod service;
pub mod storage;
pub mod updater;

pub use cache::{InMemoryProfileCache, ProfileCache};
pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError, ServiceError, StorageError};
pub use server::Server;
pub use service::{ProfileCacheService, ProfileService};
pub use storage::{InMemoryProfileStore, ProfileStore};
pub use updater::{ProfileUpdater, TickReport, ValuePolicy};
