//! Storage trait definitions

use crate::error::StorageResult;
use async_trait::async_trait;
use profiles_types::{Parameters, Profile};

/// Function computing a profile's new parameters from its current ones
pub type ParameterRewrite = dyn Fn(&Parameters) -> Parameters + Send + Sync;

/// Storage for profiles
///
/// Lookups are case-insensitive. The store never raises domain errors:
/// absence is reported as `None` or `false`, and it is up to the caller to
/// turn that into a not-found or conflict.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// List all profiles in insertion order
    async fn list(&self) -> StorageResult<Vec<Profile>>;

    /// Get a profile by name
    async fn get_by_name(&self, name: &str) -> StorageResult<Option<Profile>>;

    /// Insert a profile, replacing any profile with the same name
    async fn add(&self, profile: Profile) -> StorageResult<()>;

    /// Insert a profile only if no profile with the same name exists
    ///
    /// Returns `false` and leaves the store untouched when the name is taken.
    async fn add_if_absent(&self, profile: Profile) -> StorageResult<bool>;

    /// Replace the parameters of an existing profile
    ///
    /// Returns `false` without inserting when no profile matches.
    async fn update(&self, profile: Profile) -> StorageResult<bool>;

    /// Atomically rewrite the parameters of an existing profile
    ///
    /// Returns the updated profile, or `None` when no profile matches.
    async fn rewrite(
        &self,
        name: &str,
        rewrite: &ParameterRewrite,
    ) -> StorageResult<Option<Profile>>;

    /// Delete a profile by name
    async fn delete(&self, name: &str) -> StorageResult<bool>;

    /// Number of stored profiles
    async fn len(&self) -> StorageResult<usize> {
        Ok(self.list().await?.len())
    }
}
