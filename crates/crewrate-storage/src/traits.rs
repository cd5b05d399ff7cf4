//! Repository traits -- the public API for rate persistence.
//!
//! Backends implement the small [`KvStore`] trait; every key-value store
//! then gets the typed [`RateRepository`] API for free. Consumers depend on
//! `RateRepository` so that alternative backends (in-memory, failing test
//! doubles) can be injected.

use crewrate_core::{RateConfig, RateSnapshot, ServiceType};
use serde::Serialize;
use tracing::warn;

use crate::error::{Result, StorageError};
use crate::keys::{self, PROFILE_PREFIX, RATE_PREFIX};

/// A raw string key-value store with last-write-wins semantics.
pub trait KvStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Returns `true` if it existed.
    fn remove(&self, key: &str) -> Result<bool>;

    /// Returns every entry whose key starts with `prefix`, ordered by key.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, String)>>;
}

/// A persisted rate record together with its key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredRate {
    pub key: String,
    pub snapshot: RateSnapshot,
}

/// Typed access to persisted rates and calculator profiles.
pub trait RateRepository {
    /// Stores the latest rate for `service`, or for one of its crews.
    fn save(&self, service: &ServiceType, crew: Option<&str>, snapshot: &RateSnapshot)
    -> Result<()>;

    /// Loads the latest rate for `service` (or crew). `None` means no rate
    /// has been computed yet.
    fn load(&self, service: &ServiceType, crew: Option<&str>) -> Result<Option<RateSnapshot>>;

    /// Deletes a rate record. Returns `true` if one existed.
    fn delete(&self, service: &ServiceType, crew: Option<&str>) -> Result<bool>;

    /// Lists every rate record, ordered by key. Corrupt records are skipped.
    fn list(&self) -> Result<Vec<StoredRate>>;

    /// Stores the calculator inputs last used for `service`.
    fn save_profile(&self, service: &ServiceType, config: &RateConfig) -> Result<()>;

    /// Loads the calculator inputs last used for `service`.
    fn load_profile(&self, service: &ServiceType) -> Result<Option<RateConfig>>;

    /// Lists the services that have a saved profile.
    fn list_profiles(&self) -> Result<Vec<ServiceType>>;
}

impl<S: KvStore + ?Sized> RateRepository for S {
    fn save(
        &self,
        service: &ServiceType,
        crew: Option<&str>,
        snapshot: &RateSnapshot,
    ) -> Result<()> {
        let value = serde_json::to_string(snapshot)?;
        self.put(&keys::rate_key(service, crew), &value)
    }

    fn load(&self, service: &ServiceType, crew: Option<&str>) -> Result<Option<RateSnapshot>> {
        let key = keys::rate_key(service, crew);
        match self.get(&key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StorageError::corrupt(key, e)),
            None => Ok(None),
        }
    }

    fn delete(&self, service: &ServiceType, crew: Option<&str>) -> Result<bool> {
        self.remove(&keys::rate_key(service, crew))
    }

    fn list(&self) -> Result<Vec<StoredRate>> {
        let mut rates = Vec::new();
        for (key, raw) in self.scan(RATE_PREFIX)? {
            match serde_json::from_str::<RateSnapshot>(&raw) {
                Ok(snapshot) => rates.push(StoredRate { key, snapshot }),
                Err(e) => warn!(%key, error = %e, "skipping corrupt rate record"),
            }
        }
        Ok(rates)
    }

    fn save_profile(&self, service: &ServiceType, config: &RateConfig) -> Result<()> {
        let value = serde_json::to_string(config)?;
        self.put(&keys::profile_key(service), &value)
    }

    fn load_profile(&self, service: &ServiceType) -> Result<Option<RateConfig>> {
        let key = keys::profile_key(service);
        match self.get(&key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StorageError::corrupt(key, e)),
            None => Ok(None),
        }
    }

    fn list_profiles(&self) -> Result<Vec<ServiceType>> {
        Ok(self
            .scan(PROFILE_PREFIX)?
            .into_iter()
            .filter_map(|(key, _)| {
                key.strip_prefix(PROFILE_PREFIX)
                    .map(ServiceType::from)
            })
            .collect())
    }
}
