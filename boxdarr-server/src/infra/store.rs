//! Small key/value persistence used by the X OAuth flow and the publisher.

use std::{collections::HashMap, fmt};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

/// Keys shared between the OAuth handlers and [`crate::notify::XPublisher`].
pub mod keys {
    pub const ACCESS_TOKEN: &str = "twitterAccessToken";
    pub const REFRESH_TOKEN: &str = "twitterRefreshToken";
    pub const STATE: &str = "twitterState";
    pub const CODE_VERIFIER: &str = "twitterCodeVerifier";

    pub const ALL: [&str; 4] = [ACCESS_TOKEN, REFRESH_TOKEN, STATE, CODE_VERIFIER];
}

#[derive(Debug, Error)]
#[error("store operation failed: {0}")]
pub struct StoreError(pub String);

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;
}

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.entries.write().await.clear();
        Ok(())
    }
}
