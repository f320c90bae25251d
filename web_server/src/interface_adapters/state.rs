use std::sync::Arc;

use chrono::{Local, NaiveDateTime};

use crate::domain::{Clock, HistoryStore, Recognizer, ResultCache, StatsStore, UploadLimits};
use crate::use_cases::{HistoryUseCase, ProcessBatchUseCase};

// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    // We use Arc<dyn Trait> to hold any implementation (dependency injection).
    pub recognizer: Arc<dyn Recognizer>,
    pub cache: Arc<dyn ResultCache>,
    pub history: Arc<dyn HistoryStore>,
    pub stats: Arc<dyn StatsStore>,
    pub clock: Arc<dyn Clock>,
    pub limits: UploadLimits,
    pub default_language: String,
}

impl AppState {
    pub fn batch_use_case(&self) -> ProcessBatchUseCase {
        ProcessBatchUseCase {
            recognizer: self.recognizer.clone(),
            cache: self.cache.clone(),
            history: self.history.clone(),
            stats: self.stats.clone(),
            clock: self.clock.clone(),
            limits: self.limits,
        }
    }

    pub fn history_use_case(&self) -> HistoryUseCase {
        HistoryUseCase {
            store: self.history.clone(),
        }
    }
}

// Local wall clock; history dates are shown in the user's time zone.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
