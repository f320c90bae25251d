use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// A file picked in the upload form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

// Options chosen alongside the upload.
#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub language: String,
    pub optimize: bool,
    pub use_cache: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_file_bytes: usize,
    pub max_batch_bytes: usize,
}

// Recognized text as returned by the OCR gateway; also the cache record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedText {
    pub text: String,
    pub language_code: String,
    pub language_name: String,
    pub processing_time: String,
}

// Result for one file of a batch, in upload order.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub file_name: String,
    pub outcome: BatchOutcome,
}

#[derive(Debug, Clone)]
pub enum BatchOutcome {
    Recognized {
        result: RecognizedText,
        from_cache: bool,
        // Absent when the history entry could not be written.
        history_id: Option<String>,
    },
    Failed {
        error: String,
    },
}

// One recognized upload kept for later viewing and export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: NaiveDateTime,
    pub file_name: String,
    pub text: String,
    pub language: String,
    pub processing_time: String,
    // Stored image file name, relative to the history directory.
    pub image_file: String,
}

// Running counters shown next to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_processed: u64,
    pub total_success: u64,
    pub total_failed: u64,
    pub total_size: u64,
    pub last_processed: Option<NaiveDateTime>,
}

impl Stats {
    pub fn record(&mut self, success: bool, bytes: u64, at: NaiveDateTime) {
        self.total_processed += 1;
        if success {
            self.total_success += 1;
        } else {
            self.total_failed += 1;
        }
        self.total_size += bytes;
        self.last_processed = Some(at);
    }

    pub fn total_size_mib(&self) -> f64 {
        self.total_size as f64 / 1024.0 / 1024.0
    }
}

// Word-level comparison of two recognized texts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub similarity: f64,
    pub common_words: Vec<String>,
    pub only_left: Vec<String>,
    pub only_right: Vec<String>,
}
