use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{
    Clock, FrontError, HistoryEntry, HistoryStore, RecognizedText, Recognizer, ResultCache,
    Stats, StatsStore,
};

pub(crate) fn timestamp(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .expect("valid timestamp")
}

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

// What the fake recognizer was asked to do.
#[derive(Debug, Clone)]
pub(crate) struct RecognizeCall {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub language: String,
}

// Fake recognizer: echoes "text of <file>" unless the file is listed as failing.
#[derive(Clone, Default)]
pub(crate) struct RecordingRecognizer {
    calls: Arc<Mutex<Vec<RecognizeCall>>>,
    failures: Arc<Mutex<HashMap<String, String>>>,
    languages_unavailable: bool,
}

impl RecordingRecognizer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_for(self, file_name: &str, message: &str) -> Self {
        self.failures
            .lock()
            .expect("failures mutex poisoned")
            .insert(file_name.to_string(), message.to_string());
        self
    }

    pub(crate) fn without_languages(mut self) -> Self {
        self.languages_unavailable = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecognizeCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait]
impl Recognizer for RecordingRecognizer {
    async fn recognize(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        language: &str,
    ) -> Result<RecognizedText, FrontError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(RecognizeCall {
                file_name: file_name.to_string(),
                bytes,
                language: language.to_string(),
            });

        let failure = self
            .failures
            .lock()
            .expect("failures mutex poisoned")
            .get(file_name)
            .cloned();
        if let Some(message) = failure {
            return Err(FrontError::Recognition(message));
        }

        Ok(RecognizedText {
            text: format!("text of {file_name}"),
            language_code: language.to_string(),
            language_name: "German".to_string(),
            processing_time: "0.50 seconds".to_string(),
        })
    }

    async fn languages(&self) -> Result<Vec<(String, String)>, FrontError> {
        if self.languages_unavailable {
            return Err(FrontError::Recognition("connection refused".to_string()));
        }
        Ok(vec![
            ("de".to_string(), "German".to_string()),
            ("en".to_string(), "English".to_string()),
        ])
    }
}

#[derive(Clone, Default)]
pub(crate) struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, RecognizedText>>>,
}

impl MemoryCache {
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().expect("cache mutex poisoned").len()
    }
}

#[async_trait]
impl ResultCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<RecognizedText>, String> {
        Ok(self.entries.lock().expect("cache mutex poisoned").get(key).cloned())
    }

    async fn put(&self, key: &str, value: &RecognizedText) -> Result<(), String> {
        self.entries
            .lock()
            .expect("cache mutex poisoned")
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub(crate) struct MemoryHistory {
    entries: Arc<Mutex<Vec<(HistoryEntry, Vec<u8>)>>>,
    fail_append: bool,
}

impl MemoryHistory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_appends(mut self) -> Self {
        self.fail_append = true;
        self
    }

    pub(crate) fn entries(&self) -> Vec<HistoryEntry> {
        self.entries
            .lock()
            .expect("history mutex poisoned")
            .iter()
            .map(|(entry, _)| entry.clone())
            .collect()
    }

    pub(crate) fn insert_test_entry(&self, entry: HistoryEntry) {
        self.entries
            .lock()
            .expect("history mutex poisoned")
            .push((entry, b"image".to_vec()));
    }
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn append(&self, entry: HistoryEntry, image: &[u8]) -> Result<(), String> {
        if self.fail_append {
            return Err("append failed".to_string());
        }
        self.entries
            .lock()
            .expect("history mutex poisoned")
            .push((entry, image.to_vec()));
        Ok(())
    }

    async fn list(&self) -> Result<Vec<HistoryEntry>, String> {
        Ok(self.entries())
    }

    async fn get(&self, id: &str) -> Result<Option<HistoryEntry>, String> {
        Ok(self.entries().into_iter().find(|entry| entry.id == id))
    }

    async fn read_image(&self, id: &str) -> Result<Option<Vec<u8>>, String> {
        let guard = self.entries.lock().expect("history mutex poisoned");
        Ok(guard
            .iter()
            .find(|(entry, _)| entry.id == id)
            .map(|(_, image)| image.clone()))
    }

    async fn remove(&self, id: &str) -> Result<bool, String> {
        let mut guard = self.entries.lock().expect("history mutex poisoned");
        let before = guard.len();
        guard.retain(|(entry, _)| entry.id != id);
        Ok(guard.len() != before)
    }

    async fn clear(&self) -> Result<usize, String> {
        let mut guard = self.entries.lock().expect("history mutex poisoned");
        let removed = guard.len();
        guard.clear();
        Ok(removed)
    }
}

#[derive(Clone, Default)]
pub(crate) struct MemoryStats {
    stats: Arc<Mutex<Stats>>,
}

#[async_trait]
impl StatsStore for MemoryStats {
    async fn record(&self, success: bool, bytes: u64, at: NaiveDateTime) -> Result<Stats, String> {
        let mut guard = self.stats.lock().expect("stats mutex poisoned");
        guard.record(success, bytes, at);
        Ok(guard.clone())
    }

    async fn snapshot(&self) -> Result<Stats, String> {
        Ok(self.stats.lock().expect("stats mutex poisoned").clone())
    }
}

pub(crate) fn history_entry(id: &str, at: NaiveDateTime, text: &str) -> HistoryEntry {
    HistoryEntry {
        id: id.to_string(),
        timestamp: at,
        file_name: format!("{id}.png"),
        text: text.to_string(),
        language: "de".to_string(),
        processing_time: "0.50 seconds".to_string(),
        image_file: format!("{id}.png"),
    }
}
