//! Cache-backed profile access

use super::profiles::{require_name, require_validation_input, ProfileService};
use super::validator;
use crate::cache::{ParameterMap, ProfileCache};
use crate::error::{ServiceError, ServiceResult};
use crate::storage::ProfileStore;
use profiles_types::{Profile, ProfileName, ProfileParameter, ValidationResult};
use std::sync::Arc;

/// Coordinates the profile cache with the store
///
/// Reads consult the cache first and populate it from the store on a miss.
/// `add_parameter` writes through to the store, while `remove_parameter`
/// only evicts from the cache and leaves the store alone.
#[derive(Clone)]
pub struct ProfileCacheService {
    cache: Arc<dyn ProfileCache>,
    store: Arc<dyn ProfileStore>,
    profiles: ProfileService,
}

impl ProfileCacheService {
    pub fn new(
        cache: Arc<dyn ProfileCache>,
        store: Arc<dyn ProfileStore>,
        profiles: ProfileService,
    ) -> Self {
        Self {
            cache,
            store,
            profiles,
        }
    }

    /// Get a profile's parameters, populating the cache on a miss
    pub async fn get_parameter(&self, name: &str) -> ServiceResult<ProfileParameter> {
        require_name(name)?;

        if let Some(cached) = self.cache.get(name).await? {
            tracing::debug!(profile = %name, "Profile found in cache");
            return Ok(cached);
        }

        tracing::debug!(profile = %name, "Profile not in cache, reading from store");
        let profile = self
            .store
            .list()
            .await?
            .into_iter()
            .find(|p| p.name.matches(name))
            .ok_or_else(ServiceError::profile_not_found)?;

        let parameter = ProfileParameter::from(profile);
        self.cache.set(name, parameter.clone()).await?;
        tracing::debug!(profile = %name, "Profile added to cache");

        Ok(parameter)
    }

    /// Get every profile's parameters, rebuilding the cache when it is empty
    pub async fn get_all_parameters(&self) -> ServiceResult<ParameterMap> {
        let cached = self.cache.get_all().await?;
        if !cached.is_empty() {
            return Ok(cached);
        }

        let rebuilt: ParameterMap = self
            .store
            .list()
            .await?
            .into_iter()
            .map(|p| (p.name.clone(), ProfileParameter::from(p)))
            .collect();

        self.cache.set_all(rebuilt.clone()).await?;
        tracing::debug!(count = rebuilt.len(), "Rebuilt profile cache from store");

        Ok(rebuilt)
    }

    /// Add a profile to the store, then to the cache
    ///
    /// The cache is only written once the store accepted the profile. A
    /// store failure is logged and returned.
    pub async fn add_parameter(&self, parameter: ProfileParameter) -> ServiceResult<ProfileParameter> {
        let name = parameter.profile_name.clone();

        if let Err(err) = self.store.add(Profile::from(parameter.clone())).await {
            tracing::error!(profile = %name, error = %err, "Failed to add profile parameter");
            return Err(err.into());
        }

        self.cache.set(name.as_str(), parameter.clone()).await?;
        tracing::info!(profile = %name, "Profile parameter added to cache");

        Ok(parameter)
    }

    /// Write a profile's parameters to the cache only
    pub async fn set_parameter(&self, parameter: ProfileParameter) -> ServiceResult<ProfileParameter> {
        self.cache
            .set(parameter.profile_name.as_str(), parameter.clone())
            .await?;
        tracing::debug!(profile = %parameter.profile_name, "Profile updated in cache");
        Ok(parameter)
    }

    /// Evict a profile from the cache; the store is not touched
    pub async fn remove_parameter(&self, name: &str) -> bool {
        tracing::debug!(profile = %name, "Removing profile parameter from cache");
        match self.cache.remove(name).await {
            Ok(()) => {
                tracing::info!(profile = %name, "Profile parameter removed from cache");
                true
            }
            Err(err) => {
                tracing::error!(profile = %name, error = %err, "Failed to remove profile parameter from cache");
                false
            }
        }
    }

    /// Repopulate the cache with every stored profile
    pub async fn refresh_cache(&self) -> ServiceResult<usize> {
        tracing::info!("Starting full profile cache refresh");

        let mut count = 0;
        for profile in self.store.list().await? {
            let name: ProfileName = profile.name.clone();
            self.cache
                .set(name.as_str(), ProfileParameter::from(profile))
                .await?;
            count += 1;
        }

        tracing::info!(count, "Profile cache refresh completed");
        Ok(count)
    }

    /// Empty the cache
    pub async fn clear(&self) -> ServiceResult<()> {
        tracing::info!("Clearing profile cache");
        Ok(self.cache.clear().await?)
    }

    /// Validate actions, from the cache when possible
    ///
    /// A cached profile is evaluated locally without touching the store;
    /// otherwise the request is handed to [`ProfileService`].
    pub async fn validate_permissions(
        &self,
        name: &str,
        actions: &[String],
    ) -> ServiceResult<ValidationResult> {
        require_validation_input(name, actions)?;

        let Some(cached) = self.cache.get(name).await? else {
            tracing::debug!(profile = %name, "Profile not in cache, validating against store");
            return self.profiles.validate_permissions(name, actions).await;
        };

        let result = validator::validate(&cached.profile_name, &cached.parameters, actions);
        tracing::info!(profile = %name, "Permission validation completed from cache");
        Ok(result)
    }
}
