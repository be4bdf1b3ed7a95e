//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends must implement this trait so the upload orchestrator
/// can work against any backend without coupling to implementation details.
///
/// **Key format:** keys are namespaced by folder and optional owner:
/// `{folder}/{filename}` or `{folder}/{owner}/{filename}`. See [`crate::keys`].
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a file under the given key and return its public URL.
    async fn upload(&self, key: &str, content_type: &str, data: Vec<u8>)
        -> StorageResult<String>;

    /// Delete files by key. Idempotent: keys that no longer exist are
    /// treated as already deleted.
    async fn delete(&self, keys: &[String]) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Publicly reachable URL for a stored key.
    fn public_url(&self, key: &str) -> String;
}
