use std::sync::Arc;

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::{
    BatchItem, BatchOutcome, BatchSettings, Clock, FrontError, HistoryEntry, HistoryStore,
    RecognizedText, Recognizer, ResultCache, StatsStore, UploadLimits, UploadedFile,
};
use crate::use_cases::optimize::optimize_image;

pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "pdf"];

// Batch recognition use case with injected ports.
pub struct ProcessBatchUseCase {
    pub recognizer: Arc<dyn Recognizer>,
    pub cache: Arc<dyn ResultCache>,
    pub history: Arc<dyn HistoryStore>,
    pub stats: Arc<dyn StatsStore>,
    pub clock: Arc<dyn Clock>,
    pub limits: UploadLimits,
}

impl ProcessBatchUseCase {
    // Results are returned in upload order; a failing file never stops the rest.
    pub async fn execute(
        &self,
        files: Vec<UploadedFile>,
        settings: &BatchSettings,
    ) -> Result<Vec<BatchItem>, FrontError> {
        let total: usize = files.iter().map(|file| file.bytes.len()).sum();
        if total > self.limits.max_batch_bytes {
            return Err(FrontError::BatchTooLarge {
                total,
                limit: self.limits.max_batch_bytes,
            });
        }

        let mut items = Vec::with_capacity(files.len());
        // One upstream request at a time.
        for file in files {
            let outcome = match self.process_one(&file, settings).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::warn!(file_name = %file.file_name, error = %err, "file not recognized");
                    BatchOutcome::Failed {
                        error: err.to_string(),
                    }
                }
            };
            items.push(BatchItem {
                file_name: file.file_name,
                outcome,
            });
        }

        Ok(items)
    }

    async fn process_one(
        &self,
        file: &UploadedFile,
        settings: &BatchSettings,
    ) -> Result<BatchOutcome, FrontError> {
        if !is_allowed_file(&file.file_name) {
            return Err(FrontError::DisallowedExtension(file.file_name.clone()));
        }
        self.check_size(&file.file_name, file.bytes.len())?;

        let key = cache_key(&file.bytes, &settings.language);
        if settings.use_cache {
            match self.cache.get(&key).await {
                Ok(Some(result)) => {
                    tracing::debug!(file_name = %file.file_name, "cache hit");
                    let history_id = self.save_history(file, &result).await;
                    return Ok(BatchOutcome::Recognized {
                        result,
                        from_cache: true,
                        history_id,
                    });
                }
                Ok(None) => {}
                Err(err) => tracing::warn!(error = %err, "cache lookup failed"),
            }
        }

        let (upload_name, payload) = match settings.optimize.then(|| optimize_image(&file.bytes)) {
            Some(Some(optimized)) => (jpeg_name(&file.file_name), optimized),
            _ => (file.file_name.clone(), file.bytes.clone()),
        };
        self.check_size(&file.file_name, payload.len())?;

        let original_size = file.bytes.len() as u64;
        match self
            .recognizer
            .recognize(&upload_name, payload, &settings.language)
            .await
        {
            Ok(result) => {
                if let Err(err) = self.cache.put(&key, &result).await {
                    tracing::warn!(error = %err, "failed to cache result");
                }
                self.record_stats(true, original_size).await;
                let history_id = self.save_history(file, &result).await;
                Ok(BatchOutcome::Recognized {
                    result,
                    from_cache: false,
                    history_id,
                })
            }
            Err(err) => {
                self.record_stats(false, original_size).await;
                Err(err)
            }
        }
    }

    fn check_size(&self, file_name: &str, size: usize) -> Result<(), FrontError> {
        if size > self.limits.max_file_bytes {
            return Err(FrontError::FileTooLarge {
                file_name: file_name.to_string(),
                size,
                limit: self.limits.max_file_bytes,
            });
        }
        Ok(())
    }

    // Stats are best-effort; a write failure is logged, not shown.
    async fn record_stats(&self, success: bool, bytes: u64) {
        if let Err(err) = self.stats.record(success, bytes, self.clock.now()).await {
            tracing::warn!(error = %err, "failed to update stats");
        }
    }

    // History is best-effort too; the text is still shown when saving fails.
    async fn save_history(&self, file: &UploadedFile, result: &RecognizedText) -> Option<String> {
        let id = Uuid::new_v4().to_string();
        let entry = HistoryEntry {
            id: id.clone(),
            timestamp: self.clock.now(),
            file_name: file.file_name.clone(),
            text: result.text.clone(),
            language: result.language_code.clone(),
            processing_time: result.processing_time.clone(),
            image_file: format!("{id}.{}", extension_of(&file.file_name).unwrap_or("img")),
        };

        match self.history.append(entry, &file.bytes).await {
            Ok(()) => Some(id),
            Err(err) => {
                tracing::warn!(error = %err, "failed to save history entry");
                None
            }
        }
    }
}

pub fn is_allowed_file(file_name: &str) -> bool {
    extension_of(file_name).is_some_and(|ext| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    })
}

// Cache key over the original bytes and the language they were read in.
pub fn cache_key(bytes: &[u8], language: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.update([0u8]);
    hasher.update(language.as_bytes());
    hex::encode(hasher.finalize())
}

fn extension_of(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

fn jpeg_name(file_name: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);
    format!("{stem}.jpg")
}
