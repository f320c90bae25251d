pub mod entities;
pub mod errors;
pub mod ports;

// Re-export the domain boundary types and ports.
pub use entities::{
    BatchItem, BatchOutcome, BatchSettings, Comparison, HistoryEntry, RecognizedText, Stats,
    UploadLimits, UploadedFile,
};
pub use errors::FrontError;
pub use ports::{Clock, HistoryStore, Recognizer, ResultCache, StatsStore};
