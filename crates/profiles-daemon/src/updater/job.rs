//! Periodic rewrite of every stored parameter value

use crate::cache::ProfileCache;
use crate::config::UpdaterConfig;
use crate::storage::ProfileStore;
use profiles_types::{Parameters, Profile, ProfileParameter};
use rand::rngs::OsRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Duration;

/// How the updater derives a parameter's next value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuePolicy {
    /// Independent draw from the operating system's CSPRNG
    #[default]
    Random,
    /// Logical negation of the current value
    Negate,
}

impl ValuePolicy {
    /// Compute new values for every existing key; the key set is unchanged
    pub fn apply(self, current: &Parameters) -> Parameters {
        current
            .iter()
            .map(|(key, value)| {
                let next = match self {
                    ValuePolicy::Random => OsRng.gen_bool(0.5),
                    ValuePolicy::Negate => !value,
                };
                (key.clone(), next)
            })
            .collect()
    }
}

/// Outcome of one pass over the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub updated: usize,
    pub failed: usize,
}

/// Background job rewriting profile parameters on a fixed interval
pub struct ProfileUpdater {
    config: UpdaterConfig,
    store: Arc<dyn ProfileStore>,
    cache: Option<Arc<dyn ProfileCache>>,
}

impl ProfileUpdater {
    /// Create an updater; `cache` is only written when mirroring is enabled
    pub fn new(
        config: UpdaterConfig,
        store: Arc<dyn ProfileStore>,
        cache: Option<Arc<dyn ProfileCache>>,
    ) -> Self {
        let cache = if config.mirror_to_cache { cache } else { None };
        Self {
            config,
            store,
            cache,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.config.interval_secs)
    }

    /// Run until the shutdown signal flips to `true` or its sender is dropped
    ///
    /// Shutdown is checked before every tick and while sleeping; a signal
    /// during the sleep exits without starting another tick.
    pub async fn run(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            interval_secs = self.config.interval_secs,
            policy = ?self.config.policy,
            "Profile updater started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            let report = self.tick().await;
            tracing::info!(
                updated = report.updated,
                failed = report.failed,
                next_in_secs = self.config.interval_secs,
                "Profile update iteration completed"
            );

            tokio::select! {
                _ = tokio::time::sleep(self.interval()) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Profile updater stopped");
    }

    /// Perform one pass over every stored profile
    ///
    /// A failure on one profile is logged and counted; the remaining
    /// profiles are still processed.
    pub async fn tick(&self) -> TickReport {
        let mut report = TickReport::default();

        let profiles = match self.store.list().await {
            Ok(profiles) => profiles,
            Err(e) => {
                tracing::error!(error = %e, "Error during profile update execution");
                return report;
            }
        };

        if profiles.is_empty() {
            tracing::info!("No profiles to update");
            return report;
        }

        tracing::debug!(count = profiles.len(), "Updating profiles");
        let policy = self.config.policy;
        let rewrite = move |current: &Parameters| policy.apply(current);

        for profile in profiles {
            let name = profile.name;
            let updated = match self.store.rewrite(name.as_str(), &rewrite).await {
                Ok(Some(updated)) => updated,
                Ok(None) => {
                    // Deleted since the listing
                    tracing::debug!(profile = %name, "Profile vanished before update");
                    continue;
                }
                Err(e) => {
                    tracing::error!(profile = %name, error = %e, "Error updating profile");
                    report.failed += 1;
                    continue;
                }
            };

            if let Some(cache) = &self.cache {
                if !self.mirror(cache.as_ref(), updated).await {
                    tracing::debug!(profile = %name, "Profile deleted during update");
                    continue;
                }
            }

            tracing::info!(profile = %name, "Profile successfully updated");
            report.updated += 1;
        }

        report
    }

    /// Write an updated profile into the cache
    ///
    /// The store is consulted again after the write: a profile deleted
    /// since its rewrite is evicted so the cache never resurrects it.
    /// Returns `false` when the profile is gone from the store.
    async fn mirror(&self, cache: &dyn ProfileCache, updated: Profile) -> bool {
        let name = updated.name.clone();
        if let Err(e) = cache.set(name.as_str(), ProfileParameter::from(updated)).await {
            tracing::warn!(profile = %name, error = %e, "Failed to mirror profile into cache");
        }

        match self.store.get_by_name(name.as_str()).await {
            Ok(Some(_)) => true,
            Ok(None) => {
                if let Err(e) = cache.remove(name.as_str()).await {
                    tracing::warn!(profile = %name, error = %e, "Failed to evict deleted profile from cache");
                }
                false
            }
            Err(e) => {
                tracing::warn!(profile = %name, error = %e, "Could not confirm profile after mirroring");
                true
            }
        }
    }
}
