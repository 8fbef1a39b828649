//! In-memory storage implementation

use super::traits::*;
use crate::error::StorageResult;
use async_trait::async_trait;
use profiles_types::Profile;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory profile store
///
/// Every operation runs under one lock over the whole set, so a
/// read-modify-write never interleaves with another writer.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<Vec<Profile>>>,
}

impl InMemoryProfileStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with profiles
    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let mut seeded: Vec<Profile> = Vec::new();
        for profile in profiles {
            upsert(&mut seeded, profile);
        }
        Self {
            profiles: Arc::new(RwLock::new(seeded)),
        }
    }
}

fn position(profiles: &[Profile], name: &str) -> Option<usize> {
    profiles.iter().position(|p| p.name.matches(name))
}

fn upsert(profiles: &mut Vec<Profile>, profile: Profile) {
    match position(profiles, profile.name.as_str()) {
        Some(idx) => profiles[idx] = profile,
        None => profiles.push(profile),
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn list(&self) -> StorageResult<Vec<Profile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.clone())
    }

    async fn get_by_name(&self, name: &str) -> StorageResult<Option<Profile>> {
        let profiles = self.profiles.read().await;
        Ok(position(&profiles, name).map(|idx| profiles[idx].clone()))
    }

    async fn add(&self, profile: Profile) -> StorageResult<()> {
        let mut profiles = self.profiles.write().await;
        upsert(&mut profiles, profile);
        Ok(())
    }

    async fn add_if_absent(&self, profile: Profile) -> StorageResult<bool> {
        let mut profiles = self.profiles.write().await;
        if position(&profiles, profile.name.as_str()).is_some() {
            return Ok(false);
        }
        profiles.push(profile);
        Ok(true)
    }

    async fn update(&self, profile: Profile) -> StorageResult<bool> {
        let mut profiles = self.profiles.write().await;
        match position(&profiles, profile.name.as_str()) {
            Some(idx) => {
                profiles[idx].parameters = profile.parameters;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn rewrite(
        &self,
        name: &str,
        rewrite: &ParameterRewrite,
    ) -> StorageResult<Option<Profile>> {
        let mut profiles = self.profiles.write().await;
        let Some(idx) = position(&profiles, name) else {
            return Ok(None);
        };

        let updated = rewrite(&profiles[idx].parameters);
        profiles[idx].parameters = updated;
        Ok(Some(profiles[idx].clone()))
    }

    async fn delete(&self, name: &str) -> StorageResult<bool> {
        let mut profiles = self.profiles.write().await;
        match position(&profiles, name) {
            Some(idx) => {
                profiles.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn len(&self) -> StorageResult<usize> {
        Ok(self.profiles.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profiles_types::Parameters;

    fn params(entries: &[(&str, bool)]) -> Parameters {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[tokio::test]
    async fn test_profile_crud() {
        let storage = InMemoryProfileStore::new();

        // Create
        storage
            .add(Profile::new("A", params(&[("p", true)])))
            .await
            .unwrap();

        // Read
        let retrieved = storage.get_by_name("A").await.unwrap().unwrap();
        assert_eq!(retrieved.parameters, params(&[("p", true)]));

        // Update
        let updated = storage
            .update(Profile::new("A", params(&[("q", false)])))
            .await
            .unwrap();
        assert!(updated);
        let retrieved = storage.get_by_name("A").await.unwrap().unwrap();
        assert_eq!(retrieved.parameters, params(&[("q", false)]));

        // Delete
        assert!(storage.delete("A").await.unwrap());
        assert!(storage.get_by_name("A").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let storage = InMemoryProfileStore::new();
        storage
            .add(Profile::new("Admin", params(&[("p", true)])))
            .await
            .unwrap();

        let found = storage.get_by_name("aDMIN").await.unwrap().unwrap();
        assert_eq!(found.name.as_str(), "Admin");
        assert!(storage.delete("ADMIN").await.unwrap());
        assert_eq!(storage.len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_overwrites_silently() {
        let storage = InMemoryProfileStore::new();
        storage
            .add(Profile::new("A", params(&[("p", true)])))
            .await
            .unwrap();
        storage
            .add(Profile::new("a", params(&[("p", false)])))
            .await
            .unwrap();

        let profiles = storage.list().await.unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].parameters, params(&[("p", false)]));
    }

    #[tokio::test]
    async fn test_add_if_absent_refuses_duplicates() {
        let storage = InMemoryProfileStore::new();
        assert!(storage
            .add_if_absent(Profile::new("A", params(&[("p", true)])))
            .await
            .unwrap());
        assert!(!storage
            .add_if_absent(Profile::new("a", params(&[("p", false)])))
            .await
            .unwrap());

        let kept = storage.get_by_name("A").await.unwrap().unwrap();
        assert_eq!(kept.parameters, params(&[("p", true)]));
    }

    #[tokio::test]
    async fn test_update_missing_is_noop() {
        let storage = InMemoryProfileStore::new();
        let updated = storage
            .update(Profile::new("ghost", params(&[("p", true)])))
            .await
            .unwrap();

        assert!(!updated);
        assert!(storage.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let storage = InMemoryProfileStore::with_profiles([Profile::new("A", params(&[("p", true)]))]);
        assert!(!storage.delete("B").await.unwrap());
        assert_eq!(storage.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let storage = InMemoryProfileStore::new();
        for name in ["c", "a", "b"] {
            storage
                .add(Profile::new(name, params(&[("p", true)])))
                .await
                .unwrap();
        }

        let names: Vec<_> = storage
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name.into_inner())
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_rewrite_applies_under_lock() {
        let storage = InMemoryProfileStore::with_profiles([Profile::new(
            "A",
            params(&[("p", true), ("q", false)]),
        )]);

        let flip = |current: &Parameters| -> Parameters {
            current.iter().map(|(k, v)| (k.clone(), !v)).collect()
        };
        let updated = storage.rewrite("a", &flip).await.unwrap().unwrap();

        assert_eq!(updated.parameters, params(&[("p", false), ("q", true)]));
        assert!(storage.rewrite("missing", &flip).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_writers_do_not_lose_updates() {
        let storage = Arc::new(InMemoryProfileStore::with_profiles([Profile::new(
            "counter",
            params(&[]),
        )]));

        let mut handles = Vec::new();
        for i in 0..32 {
            let storage = storage.clone();
            handles.push(tokio::spawn(async move {
                let key = format!("k{}", i);
                let add_key = move |current: &Parameters| -> Parameters {
                    let mut next = current.clone();
                    next.insert(key.clone(), true);
                    next
                };
                storage.rewrite("counter", &add_key).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let profile = storage.get_by_name("counter").await.unwrap().unwrap();
        assert_eq!(profile.parameters.len(), 32);
    }
}
