//! Types for the upload flow.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A file handed to the upload orchestrator.
#[derive(Clone, Debug)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Outcome of one upload attempt. Immutable once produced; one per input
/// file. A failed upload carries an error message and empty URL/key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadResult {
    pub url: String,
    pub storage_key: String,
    pub error: Option<String>,
}

impl UploadResult {
    pub fn success(url: String, storage_key: String) -> Self {
        Self {
            url,
            storage_key,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            url: String::new(),
            storage_key: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
