//! Upload orchestrator: validate → store, one file at a time.
//!
//! Files are processed strictly sequentially; the serialization exists for
//! progress reporting, not correctness. Every input file produces exactly one
//! [`UploadResult`]: local validation failures and storage failures yield an
//! error result with an empty URL and the batch continues. There is no retry.

use plaza_core::{UploadFile, UploadPolicy, UploadResult};
use plaza_processing::ImageValidator;
use plaza_storage::{generate_object_key, Storage, StorageResult};
use std::sync::Arc;

/// Progress callback: receives the cumulative percentage after each file
/// completes (success or failure). Monotone, exactly 100.0 after the last.
pub type ProgressFn<'a> = &'a mut dyn FnMut(f32);

pub struct UploadOrchestrator {
    storage: Arc<dyn Storage>,
    validator: ImageValidator,
}

impl UploadOrchestrator {
    pub fn new(storage: Arc<dyn Storage>, policy: &UploadPolicy) -> Self {
        Self {
            storage,
            validator: ImageValidator::new(policy),
        }
    }

    /// Upload a batch of files under `folder[/owner]/`, one at a time.
    ///
    /// Returns one result per input file, in input order. A failed file never
    /// aborts the batch.
    pub async fn upload_many(
        &self,
        files: Vec<UploadFile>,
        folder: &str,
        owner: Option<&str>,
        mut on_progress: Option<ProgressFn<'_>>,
    ) -> Vec<UploadResult> {
        let total = files.len();
        let mut results = Vec::with_capacity(total);

        for (index, file) in files.into_iter().enumerate() {
            let result = self.upload_one(&file, folder, owner).await;

            if let Some(err) = &result.error {
                tracing::warn!(
                    filename = %file.filename,
                    error = %err,
                    "Upload failed, continuing with remaining files"
                );
            }
            results.push(result);

            if let Some(progress) = on_progress.as_deref_mut() {
                progress((index + 1) as f32 / total as f32 * 100.0);
            }
        }

        results
    }

    async fn upload_one(
        &self,
        file: &UploadFile,
        folder: &str,
        owner: Option<&str>,
    ) -> UploadResult {
        if let Err(e) =
            self.validator
                .validate_all(&file.filename, &file.content_type, file.data.len())
        {
            return UploadResult::failure(e.to_string());
        }

        let key = generate_object_key(folder, owner, &file.filename);

        match self
            .storage
            .upload(&key, &file.content_type, file.data.to_vec())
            .await
        {
            Ok(url) => {
                tracing::info!(key = %key, "Upload successful");
                UploadResult::success(url, key)
            }
            Err(e) => UploadResult::failure(e.to_string()),
        }
    }

    /// Remove stored files by key. Idempotent via the storage backend:
    /// deleting an absent key succeeds.
    pub async fn delete_many(&self, keys: &[String]) -> StorageResult<()> {
        self.storage.delete(keys).await
    }
}
