use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use super::store;
use crate::error::StoreError;
use crate::model::history::{HistoryEntry, TranslationSource, TIMESTAMP_FORMAT};

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Newest-first log of past translations, never longer than `limit`.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
    limit: usize,
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn load(path: impl Into<PathBuf>, limit: usize) -> Self {
        let path = path.into();
        let limit = limit.max(1);
        let mut entries: Vec<HistoryEntry> = store::load_or_default(&path);
        entries.truncate(limit);
        info!(path = %path.display(), count = entries.len(), "history loaded");
        Self { path, limit, entries }
    }

    pub fn save(&self) -> Result<(), StoreError> {
        store::write_json(&self.path, &self.entries)
    }

    pub fn record(&mut self, original: &str, translation: &str, source: TranslationSource) -> &HistoryEntry {
        let entry = HistoryEntry {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            original: original.to_string(),
            translation: translation.to_string(),
            source,
        };

        self.entries.insert(0, entry);
        self.entries.truncate(self.limit);
        &self.entries[0]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replaces the log with the first `limit` records, order kept as given.
    pub fn import_replace(&mut self, mut records: Vec<HistoryEntry>) {
        records.truncate(self.limit);
        self.entries = records;
    }

    pub fn import_file(&mut self, path: &Path) -> Result<usize, StoreError> {
        let records: Vec<HistoryEntry> = store::read_json(path)?;
        self.import_replace(records);
        info!(path = %path.display(), count = self.entries.len(), "history imported");
        Ok(self.entries.len())
    }

    pub fn export_all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn export_file(&self, path: &Path) -> Result<(), StoreError> {
        store::write_json(path, self.export_all())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
