//! Instrumented store for tests

use super::{InMemoryProfileStore, ParameterRewrite, ProfileStore};
use crate::error::{StorageError, StorageResult};
use async_trait::async_trait;
use profiles_types::Profile;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Store wrapper that counts reads and can fail writes for one profile
#[derive(Debug, Default)]
pub(crate) struct InstrumentedStore {
    inner: InMemoryProfileStore,
    fail_writes_for: Option<String>,
    list_calls: AtomicUsize,
    get_calls: AtomicUsize,
}

impl InstrumentedStore {
    pub(crate) fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        Self {
            inner: InMemoryProfileStore::with_profiles(profiles),
            ..Default::default()
        }
    }

    /// Fail every write touching `name`
    pub(crate) fn failing_writes_for(mut self, name: &str) -> Self {
        self.fail_writes_for = Some(name.to_string());
        self
    }

    /// Number of store reads (list and lookup) so far
    pub(crate) fn reads(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst) + self.get_calls.load(Ordering::SeqCst)
    }

    fn check(&self, name: &str) -> StorageResult<()> {
        match &self.fail_writes_for {
            Some(failing) if failing.eq_ignore_ascii_case(name) => Err(StorageError::Backend(
                format!("injected write failure for {}", name),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ProfileStore for InstrumentedStore {
    async fn list(&self) -> StorageResult<Vec<Profile>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list().await
    }

    async fn get_by_name(&self, name: &str) -> StorageResult<Option<Profile>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_by_name(name).await
    }

    async fn add(&self, profile: Profile) -> StorageResult<()> {
        self.check(profile.name.as_str())?;
        self.inner.add(profile).await
    }

    async fn add_if_absent(&self, profile: Profile) -> StorageResult<bool> {
        self.check(profile.name.as_str())?;
        self.inner.add_if_absent(profile).await
    }

    async fn update(&self, profile: Profile) -> StorageResult<bool> {
        self.check(profile.name.as_str())?;
        self.inner.update(profile).await
    }

    async fn rewrite(
        &self,
        name: &str,
        rewrite: &ParameterRewrite,
    ) -> StorageResult<Option<Profile>> {
        self.check(name)?;
        self.inner.rewrite(name, rewrite).await
    }

    async fn delete(&self, name: &str) -> StorageResult<bool> {
        self.check(name)?;
        self.inner.delete(name).await
    }
}
