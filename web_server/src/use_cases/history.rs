use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{Comparison, FrontError, HistoryEntry, HistoryStore};
use crate::use_cases::compare::compare_texts;

// History browsing and maintenance on top of the history store.
pub struct HistoryUseCase {
    pub store: Arc<dyn HistoryStore>,
}

impl HistoryUseCase {
    // Newest first, optionally limited to one calendar day.
    pub async fn list(&self, date: Option<NaiveDate>) -> Result<Vec<HistoryEntry>, FrontError> {
        let entries = self.store.list().await.map_err(FrontError::StorageFailure)?;
        Ok(entries
            .into_iter()
            .rev()
            .filter(|entry| date.is_none_or(|date| entry.timestamp.date() == date))
            .collect())
    }

    pub async fn get(&self, id: &str) -> Result<HistoryEntry, FrontError> {
        self.store
            .get(id)
            .await
            .map_err(FrontError::StorageFailure)?
            .ok_or_else(|| FrontError::HistoryNotFound(id.to_string()))
    }

    pub async fn image(&self, id: &str) -> Result<(HistoryEntry, Vec<u8>), FrontError> {
        let entry = self.get(id).await?;
        let image = self
            .store
            .read_image(id)
            .await
            .map_err(FrontError::StorageFailure)?
            .ok_or_else(|| FrontError::HistoryNotFound(id.to_string()))?;
        Ok((entry, image))
    }

    pub async fn delete(&self, id: &str) -> Result<(), FrontError> {
        let removed = self
            .store
            .remove(id)
            .await
            .map_err(FrontError::StorageFailure)?;
        if !removed {
            return Err(FrontError::HistoryNotFound(id.to_string()));
        }
        tracing::info!(%id, "history entry deleted");
        Ok(())
    }

    pub async fn clear(&self) -> Result<usize, FrontError> {
        let removed = self.store.clear().await.map_err(FrontError::StorageFailure)?;
        tracing::info!(removed, "history cleared");
        Ok(removed)
    }

    pub async fn compare(
        &self,
        left_id: &str,
        right_id: &str,
    ) -> Result<(HistoryEntry, HistoryEntry, Comparison), FrontError> {
        let left = self.get(left_id).await?;
        let right = self.get(right_id).await?;
        let comparison = compare_texts(&left.text, &right.text);
        Ok((left, right, comparison))
    }
}
