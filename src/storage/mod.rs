// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token persistence.
//!
//! [`SessionStore`] owns the single persisted token. It sits on top of a
//! [`KeyValueStore`] chosen from [`ClientConfig`] at startup: in-process
//! storage for web hosts, a JSON file everywhere else. Read failures are
//! logged and reported as "no token" so a broken store logs the user out
//! instead of crashing a screen.

pub mod file;

pub use file::FileStore;

use crate::config::{ClientConfig, StorageBackend};
use crate::error::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Minimal string key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage. Never suspends.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Owner of the persisted session token.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Build the store selected by configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        let backend: Arc<dyn KeyValueStore> = match &config.storage_backend {
            // Process-lifetime only; see `StorageBackend::Local`
            StorageBackend::Local => Arc::new(MemoryStore::new()),
            StorageBackend::File { path } => Arc::new(FileStore::new(path.clone())),
        };
        tracing::debug!(
            backend = ?config.storage_backend,
            key = %config.session_key,
            "Session store configured"
        );
        Self::new(backend, config.session_key.clone())
    }

    /// Read the stored token. Storage failures and blank values read as absent.
    pub async fn get(&self) -> Option<String> {
        match self.backend.get(&self.key).await {
            Ok(Some(token)) if !token.trim().is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session token, treating as logged out");
                None
            }
        }
    }

    /// Persist a token, replacing any previous one.
    pub async fn set(&self, token: &str) -> Result<(), StorageError> {
        self.backend.put(&self.key, token).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to persist session token");
        })
    }

    /// Remove the stored token. Idempotent; failures are logged.
    pub async fn clear(&self) {
        if let Err(e) = self.backend.remove(&self.key).await {
            tracing::warn!(error = %e, "Failed to clear session token");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }
        async fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }
        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk on fire".to_string()))
        }
    }

    #[tokio::test]
    async fn test_memory_roundtrip_and_clear() {
        let store = SessionStore::new(Arc::new(MemoryStore::new()), "authToken");

        assert_eq!(store.get().await, None);
        store.set("abc.def.ghi").await.unwrap();
        assert_eq!(store.get().await.as_deref(), Some("abc.def.ghi"));

        store.clear().await;
        assert_eq!(store.get().await, None);
        store.clear().await;
        assert_eq!(store.get().await, None);
    }

    #[tokio::test]
    async fn test_broken_backend_reads_as_absent() {
        let store = SessionStore::new(Arc::new(BrokenStore), "authToken");

        assert_eq!(store.get().await, None);
        assert!(store.set("token").await.is_err());
        store.clear().await;
    }

    #[tokio::test]
    async fn test_blank_token_reads_as_absent() {
        let store = SessionStore::new(Arc::new(MemoryStore::new()), "authToken");
        store.set("   ").await.unwrap();
        assert_eq!(store.get().await, None);
    }
}
