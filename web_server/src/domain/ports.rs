use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::domain::entities::{HistoryEntry, RecognizedText, Stats};
use crate::domain::errors::FrontError;

// Port for the OCR gateway.
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        language: &str,
    ) -> Result<RecognizedText, FrontError>;

    // Language code and display name pairs.
    async fn languages(&self) -> Result<Vec<(String, String)>, FrontError>;
}

// Port for cached recognition results keyed by image content.
#[async_trait]
pub trait ResultCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<RecognizedText>, String>;
    async fn put(&self, key: &str, value: &RecognizedText) -> Result<(), String>;
}

// Port for the recognition history and its stored images.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, entry: HistoryEntry, image: &[u8]) -> Result<(), String>;
    // Entries in insertion order (oldest first).
    async fn list(&self) -> Result<Vec<HistoryEntry>, String>;
    async fn get(&self, id: &str) -> Result<Option<HistoryEntry>, String>;
    async fn read_image(&self, id: &str) -> Result<Option<Vec<u8>>, String>;
    async fn remove(&self, id: &str) -> Result<bool, String>;
    // Returns how many entries were removed.
    async fn clear(&self) -> Result<usize, String>;
}

// Port for persisted processing statistics.
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn record(&self, success: bool, bytes: u64, at: NaiveDateTime) -> Result<Stats, String>;
    async fn snapshot(&self) -> Result<Stats, String>;
}

// Port for retrieving the current local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
