//! In-memory cache implementation

use super::{ParameterMap, ProfileCache};
use crate::error::StorageResult;
use async_trait::async_trait;
use profiles_types::{ProfileName, ProfileParameter};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Default absolute lifetime of the cached map
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug)]
struct CacheEntry {
    profiles: ParameterMap,
    expires_at: Instant,
}

/// Single-entry in-memory cache
///
/// The whole map lives under one entry with an absolute expiry counted from
/// the last bulk write. `set` and `remove` rewrite the bulk entry, so each
/// of them restarts the expiry window.
#[derive(Debug)]
pub struct InMemoryProfileCache {
    entry: RwLock<Option<CacheEntry>>,
    ttl: Duration,
}

impl Default for InMemoryProfileCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl InMemoryProfileCache {
    /// Create a cache whose entry lives for `ttl` after each write
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: RwLock::new(None),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Live map, or empty when missing or expired
    fn live(entry: &Option<CacheEntry>) -> Option<&ParameterMap> {
        entry
            .as_ref()
            .filter(|e| e.expires_at > Instant::now())
            .map(|e| &e.profiles)
    }

    fn store(&self, slot: &mut Option<CacheEntry>, profiles: ParameterMap) {
        *slot = Some(CacheEntry {
            profiles,
            expires_at: Instant::now() + self.ttl,
        });
    }
}

#[async_trait]
impl ProfileCache for InMemoryProfileCache {
    async fn get(&self, name: &str) -> StorageResult<Option<ProfileParameter>> {
        let entry = self.entry.read().await;
        Ok(Self::live(&entry).and_then(|profiles| profiles.get(&ProfileName::new(name)).cloned()))
    }

    async fn set(&self, name: &str, parameter: ProfileParameter) -> StorageResult<()> {
        let mut entry = self.entry.write().await;
        let mut profiles = Self::live(&entry).cloned().unwrap_or_default();
        profiles.insert(ProfileName::new(name), parameter);
        self.store(&mut entry, profiles);
        Ok(())
    }

    async fn get_all(&self) -> StorageResult<ParameterMap> {
        let entry = self.entry.read().await;
        Ok(Self::live(&entry).cloned().unwrap_or_default())
    }

    async fn set_all(&self, parameters: ParameterMap) -> StorageResult<()> {
        let mut entry = self.entry.write().await;
        self.store(&mut entry, parameters);
        Ok(())
    }

    async fn remove(&self, name: &str) -> StorageResult<()> {
        let mut entry = self.entry.write().await;
        let mut profiles = Self::live(&entry).cloned().unwrap_or_default();
        if profiles.remove(&ProfileName::new(name)).is_some() {
            self.store(&mut entry, profiles);
        }
        Ok(())
    }

    async fn clear(&self) -> StorageResult<()> {
        let mut entry = self.entry.write().await;
        *entry = None;
        Ok(())
    }
}
