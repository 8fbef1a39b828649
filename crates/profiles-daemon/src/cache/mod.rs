//! Cache layer for profile parameters
//!
//! The cache is an availability layer beside the store, not a write-through
//! cache: nothing here is invalidated when the store changes. Keeping the two
//! in agreement is the job of whoever writes to both.

mod memory;

pub use memory::{InMemoryProfileCache, DEFAULT_CACHE_TTL};

use crate::error::StorageResult;
use async_trait::async_trait;
use profiles_types::{ProfileName, ProfileParameter};
use std::collections::HashMap;

/// Bulk view of every cached profile
pub type ParameterMap = HashMap<ProfileName, ProfileParameter>;

/// Cache of profile parameters keyed by profile name
#[async_trait]
pub trait ProfileCache: Send + Sync {
    /// Get a cached profile; absent when missing or expired
    async fn get(&self, name: &str) -> StorageResult<Option<ProfileParameter>>;

    /// Insert or replace one cached profile
    async fn set(&self, name: &str, parameter: ProfileParameter) -> StorageResult<()>;

    /// Get every cached profile
    async fn get_all(&self) -> StorageResult<ParameterMap>;

    /// Replace the whole cached map
    async fn set_all(&self, parameters: ParameterMap) -> StorageResult<()>;

    /// Remove one cached profile
    async fn remove(&self, name: &str) -> StorageResult<()>;

    /// Drop everything
    async fn clear(&self) -> StorageResult<()>;
}
