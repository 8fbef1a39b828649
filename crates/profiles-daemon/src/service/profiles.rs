//! Validating profile service

use super::validator;
use crate::error::{ServiceError, ServiceResult};
use crate::storage::ProfileStore;
use profiles_types::{Parameters, Profile, ValidationResult};
use std::sync::Arc;

/// Longest accepted profile name, in characters
pub const MAX_PROFILE_NAME_LEN: usize = 50;

/// CRUD and permission checks over the profile store
///
/// This is where input is validated and where store absence becomes
/// [`ServiceError::NotFound`] or [`ServiceError::Conflict`].
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// List all profiles
    pub async fn list_profiles(&self) -> ServiceResult<Vec<Profile>> {
        tracing::debug!("Getting all profiles");
        Ok(self.store.list().await?)
    }

    /// Get a profile by name
    pub async fn get_profile(&self, name: &str) -> ServiceResult<Profile> {
        tracing::debug!(profile = %name, "Finding profile by name");
        require_name(name)?;

        let profile = self.store.get_by_name(name).await?.ok_or_else(|| {
            tracing::warn!(profile = %name, "Profile not found");
            ServiceError::profile_not_found()
        })?;

        tracing::info!(profile = %profile.name, "Profile found");
        Ok(profile)
    }

    /// Create a new profile
    pub async fn add_profile(&self, profile: Profile) -> ServiceResult<Profile> {
        tracing::debug!(profile = %profile.name, "Starting profile creation");

        require_name(profile.name.as_str())?;
        if profile.name.as_str().chars().count() > MAX_PROFILE_NAME_LEN {
            return Err(ServiceError::bad_request(format!(
                "Profile name must be at most {} characters",
                MAX_PROFILE_NAME_LEN
            )));
        }
        require_parameters(&profile.parameters, profile.name.as_str())?;

        if !self.store.add_if_absent(profile.clone()).await? {
            tracing::warn!(profile = %profile.name, "Attempt to add profile with existing name");
            return Err(ServiceError::profile_exists());
        }

        tracing::info!(profile = %profile.name, "Profile created successfully");
        Ok(profile)
    }

    /// Replace the parameters of an existing profile
    pub async fn update_profile(&self, name: &str, parameters: Parameters) -> ServiceResult<Profile> {
        tracing::debug!(profile = %name, "Starting profile update");

        require_name(name)?;
        require_parameters(&parameters, name)?;

        let mut profile = self.store.get_by_name(name).await?.ok_or_else(|| {
            tracing::warn!(profile = %name, "Attempt to update non-existing profile");
            ServiceError::profile_not_found()
        })?;

        profile.parameters = parameters;
        if !self.store.update(profile.clone()).await? {
            // Deleted between the lookup and the write
            return Err(ServiceError::profile_not_found());
        }

        tracing::info!(profile = %profile.name, "Profile updated successfully");
        Ok(profile)
    }

    /// Delete a profile
    pub async fn delete_profile(&self, name: &str) -> ServiceResult<()> {
        tracing::debug!(profile = %name, "Starting profile deletion");
        require_name(name)?;

        if !self.store.delete(name).await? {
            tracing::warn!(profile = %name, "Attempt to remove non-existing profile");
            return Err(ServiceError::profile_not_found());
        }

        tracing::info!(profile = %name, "Profile deleted successfully");
        Ok(())
    }

    /// Validate a list of actions against a stored profile
    pub async fn validate_permissions(
        &self,
        name: &str,
        actions: &[String],
    ) -> ServiceResult<ValidationResult> {
        tracing::info!(profile = %name, "Validating permissions");
        require_validation_input(name, actions)?;

        let profile = self.store.get_by_name(name).await?.ok_or_else(|| {
            tracing::warn!(profile = %name, "Attempt to validate permissions for non-existing profile");
            ServiceError::profile_not_found()
        })?;

        let result = validator::validate(&profile.name, &profile.parameters, actions);
        tracing::info!(
            profile = %name,
            results = result.results.len(),
            "Permission validation completed"
        );
        Ok(result)
    }
}

pub(crate) fn require_name(name: &str) -> ServiceResult<()> {
    if name.trim().is_empty() {
        tracing::warn!("Rejected request with empty profile name");
        return Err(ServiceError::bad_request("Invalid profile name"));
    }
    Ok(())
}

pub(crate) fn require_validation_input(name: &str, actions: &[String]) -> ServiceResult<()> {
    require_name(name)?;
    if actions.is_empty() {
        tracing::warn!(profile = %name, "Empty action list for profile validation");
        return Err(ServiceError::bad_request("Action list cannot be empty"));
    }
    Ok(())
}

fn require_parameters(parameters: &Parameters, name: &str) -> ServiceResult<()> {
    if parameters.is_empty() {
        tracing::warn!(profile = %name, "Rejected profile without parameters");
        return Err(ServiceError::bad_request("Parameter list cannot be empty"));
    }
    if parameters.keys().any(|key| key.trim().is_empty()) {
        tracing::warn!(profile = %name, "Parameter with empty name");
        return Err(ServiceError::invalid_parameter(
            "Parameter name cannot be empty",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryProfileStore;
    use profiles_types::Verdict;

    fn params(entries: &[(&str, bool)]) -> Parameters {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn service() -> (ProfileService, Arc<InMemoryProfileStore>) {
        let store = Arc::new(InMemoryProfileStore::new());
        (ProfileService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_add_then_get_round_trip() {
        let (service, _) = service();
        service
            .add_profile(Profile::new("A", params(&[("p", true)])))
            .await
            .unwrap();

        let profile = service.get_profile("A").await.unwrap();
        assert_eq!(profile.parameters, params(&[("p", true)]));
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let (service, store) = service();
        service
            .add_profile(Profile::new("Admin", params(&[("p", true)])))
            .await
            .unwrap();

        let err = service
            .add_profile(Profile::new("ADMIN", params(&[("p", false)])))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(_)));
        let kept = store.get_by_name("admin").await.unwrap().unwrap();
        assert_eq!(kept.parameters, params(&[("p", true)]));
    }

    #[tokio::test]
    async fn test_empty_parameters_rejected() {
        let (service, _) = service();
        let err = service
            .add_profile(Profile::new("X", Parameters::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest { .. }));

        service
            .add_profile(Profile::new("X", params(&[("p", true)])))
            .await
            .unwrap();
        let err = service
            .update_profile("X", Parameters::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_blank_inputs_rejected() {
        let (service, _) = service();

        let err = service
            .add_profile(Profile::new("  ", params(&[("p", true)])))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ERR-BR-001");

        let err = service
            .add_profile(Profile::new("X", params(&[(" ", true)])))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ERR-BR-002");

        let err = service.get_profile("").await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_overlong_name_rejected() {
        let (service, _) = service();
        let name = "n".repeat(MAX_PROFILE_NAME_LEN + 1);
        let err = service
            .add_profile(Profile::new(name, params(&[("p", true)])))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_profile_not_found() {
        let (service, store) = service();
        let err = service
            .update_profile("ghost", params(&[("p", true)]))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_parameters_wholesale() {
        let (service, _) = service();
        service
            .add_profile(Profile::new("A", params(&[("p", true), ("q", true)])))
            .await
            .unwrap();

        let updated = service
            .update_profile("a", params(&[("r", false)]))
            .await
            .unwrap();

        assert_eq!(updated.name.as_str(), "A");
        assert_eq!(updated.parameters, params(&[("r", false)]));
    }

    #[tokio::test]
    async fn test_delete_missing_profile_not_found() {
        let (service, store) = service();
        service
            .add_profile(Profile::new("A", params(&[("p", true)])))
            .await
            .unwrap();

        let err = service.delete_profile("B").await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_validate_permissions() {
        let (service, _) = service();
        service
            .add_profile(Profile::new("A", params(&[("p1", true), ("p2", false)])))
            .await
            .unwrap();

        let actions: Vec<String> = vec!["p1".into(), "p2".into(), "p3".into()];
        let result = service.validate_permissions("A", &actions).await.unwrap();

        assert_eq!(result.results["p1"], Verdict::Allowed);
        assert_eq!(result.results["p2"], Verdict::Denied);
        assert_eq!(result.results["p3"], Verdict::Undefined);

        let err = service.validate_permissions("A", &[]).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest { .. }));

        let err = service
            .validate_permissions("missing", &actions)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_concurrent_add_and_update_keep_both_writes() {
        let (service, store) = service();

        let adder = {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .add_profile(Profile::new("shared", params(&[("p", true)])))
                    .await
            })
        };
        let updater = {
            let service = service.clone();
            tokio::spawn(async move {
                // Retry until the create is visible
                loop {
                    match service.update_profile("shared", params(&[("p", false)])).await {
                        Err(ServiceError::NotFound(_)) => tokio::task::yield_now().await,
                        other => return other,
                    }
                }
            })
        };

        adder.await.unwrap().unwrap();
        updater.await.unwrap().unwrap();

        // The update observed the create and landed on top of it
        let profile = store.get_by_name("shared").await.unwrap().unwrap();
        assert_eq!(profile.parameters, params(&[("p", false)]));
        assert_eq!(store.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_exactly_one_wins() {
        let (service, store) = service();

        let mut handles = Vec::new();
        for i in 0..16 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                let name = if i % 2 == 0 { "race" } else { "RACE" };
                service
                    .add_profile(Profile::new(name, params(&[("p", true)])))
                    .await
            }));
        }

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(ServiceError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(store.len().await.unwrap(), 1);
    }
}
