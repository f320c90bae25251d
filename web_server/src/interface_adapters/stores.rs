use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::domain::{HistoryEntry, HistoryStore, RecognizedText, ResultCache, Stats, StatsStore};

const HISTORY_FILE: &str = "history.json";

// File-backed result cache: one pretty-printed JSON file per key.
#[derive(Clone)]
pub struct FsResultCache {
    dir: PathBuf,
}

impl FsResultCache {
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, String> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|err| format!("create cache dir {}: {err}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, String> {
        if !is_plain_file_name(key) {
            return Err(format!("invalid cache key: {key}"));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl ResultCache for FsResultCache {
    async fn get(&self, key: &str) -> Result<Option<RecognizedText>, String> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|err| format!("corrupt cache file {}: {err}", path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("read {}: {err}", path.display())),
        }
    }

    async fn put(&self, key: &str, value: &RecognizedText) -> Result<(), String> {
        let path = self.path_for(key)?;
        write_json(&path, value).await
    }
}

// History index in `history.json` next to the stored images.
pub struct FsHistoryStore {
    dir: PathBuf,
    entries: Mutex<Vec<HistoryEntry>>,
}

impl FsHistoryStore {
    // An unreadable index is logged and replaced by an empty history.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, String> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|err| format!("create history dir {}: {err}", dir.display()))?;

        let index = dir.join(HISTORY_FILE);
        let entries = match tokio::fs::read(&index).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|err| {
                tracing::warn!(error = %err, path = %index.display(), "could not load history");
                Vec::new()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, path = %index.display(), "could not load history");
                Vec::new()
            }
        };

        Ok(Self {
            dir,
            entries: Mutex::new(entries),
        })
    }

    async fn persist(&self, entries: &[HistoryEntry]) -> Result<(), String> {
        write_json(&self.dir.join(HISTORY_FILE), &entries).await
    }

    async fn remove_image(&self, image_file: &str) {
        if !is_plain_file_name(image_file) {
            return;
        }
        let path = self.dir.join(image_file);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "could not delete image");
            }
        }
    }
}

#[async_trait]
impl HistoryStore for FsHistoryStore {
    async fn append(&self, entry: HistoryEntry, image: &[u8]) -> Result<(), String> {
        if !is_plain_file_name(&entry.image_file) {
            return Err(format!("invalid image file name: {}", entry.image_file));
        }

        let mut entries = self.entries.lock().await;
        let image_path = self.dir.join(&entry.image_file);
        tokio::fs::write(&image_path, image)
            .await
            .map_err(|err| format!("write {}: {err}", image_path.display()))?;

        // The shared list only changes once the index on disk agrees with it.
        let mut updated = entries.clone();
        updated.push(entry);
        if let Err(err) = self.persist(&updated).await {
            let image_file = updated.pop().map(|entry| entry.image_file);
            if let Some(image_file) = image_file {
                self.remove_image(&image_file).await;
            }
            return Err(err);
        }

        *entries = updated;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<HistoryEntry>, String> {
        Ok(self.entries.lock().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<HistoryEntry>, String> {
        let entries = self.entries.lock().await;
        Ok(entries.iter().find(|entry| entry.id == id).cloned())
    }

    async fn read_image(&self, id: &str) -> Result<Option<Vec<u8>>, String> {
        let Some(entry) = self.get(id).await? else {
            return Ok(None);
        };
        if !is_plain_file_name(&entry.image_file) {
            return Ok(None);
        }

        let path = self.dir.join(&entry.image_file);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!("read {}: {err}", path.display())),
        }
    }

    async fn remove(&self, id: &str) -> Result<bool, String> {
        let mut entries = self.entries.lock().await;
        let Some(position) = entries.iter().position(|entry| entry.id == id) else {
            return Ok(false);
        };

        let mut updated = entries.clone();
        let removed = updated.remove(position);
        self.persist(&updated).await?;

        *entries = updated;
        self.remove_image(&removed.image_file).await;
        Ok(true)
    }

    async fn clear(&self) -> Result<usize, String> {
        let mut entries = self.entries.lock().await;

        let index = self.dir.join(HISTORY_FILE);
        match tokio::fs::remove_file(&index).await {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(format!("remove {}: {err}", index.display())),
        }

        let removed = std::mem::take(&mut *entries);
        for entry in &removed {
            self.remove_image(&entry.image_file).await;
        }
        Ok(removed.len())
    }
}

// Stats counters persisted to a single JSON file after every update.
pub struct FsStatsStore {
    path: PathBuf,
    stats: Mutex<Stats>,
}

impl FsStatsStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, String> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| format!("create stats dir {}: {err}", parent.display()))?;
        }

        let stats = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|err| {
                tracing::warn!(error = %err, path = %path.display(), "could not load stats");
                Stats::default()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Stats::default(),
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "could not load stats");
                Stats::default()
            }
        };

        Ok(Self {
            path,
            stats: Mutex::new(stats),
        })
    }
}

#[async_trait]
impl StatsStore for FsStatsStore {
    async fn record(&self, success: bool, bytes: u64, at: NaiveDateTime) -> Result<Stats, String> {
        let mut stats = self.stats.lock().await;
        let mut updated = stats.clone();
        updated.record(success, bytes, at);
        write_json(&self.path, &updated).await?;

        *stats = updated.clone();
        Ok(updated)
    }

    async fn snapshot(&self) -> Result<Stats, String> {
        Ok(self.stats.lock().await.clone())
    }
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), String> {
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|err| format!("serialize {}: {err}", path.display()))?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|err| format!("write {}: {err}", path.display()))
}

// Stored names must stay inside their directory.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}
