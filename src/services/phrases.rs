use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::info;

use super::store;
use crate::error::StoreError;
use crate::model::text::lenient_text;

/// Known translations keyed by exact source text.
#[derive(Debug, Clone, Default)]
pub struct PhraseDictionary {
    path: PathBuf,
    phrases: BTreeMap<String, String>,
}

/// Any JSON object is accepted; non-string values are kept in their text form.
fn from_json_object(raw: Map<String, Value>) -> BTreeMap<String, String> {
    raw.into_iter().map(|(k, v)| (k, lenient_text(v))).collect()
}

impl PhraseDictionary {
    /// Loads the dictionary backing `path`. Missing or corrupt files give an empty dictionary.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let raw: Map<String, Value> = store::load_or_default(&path);
        let phrases = from_json_object(raw);
        info!(path = %path.display(), count = phrases.len(), "phrase dictionary loaded");
        Self { path, phrases }
    }

    pub fn save(&self) -> Result<(), StoreError> {
        store::write_json(&self.path, &self.phrases)
    }

    pub fn lookup(&self, text: &str) -> Option<&str> {
        self.phrases.get(text).map(String::as_str)
    }

    /// Last write wins.
    pub fn insert(&mut self, text: impl Into<String>, translation: impl Into<String>) {
        self.phrases.insert(text.into(), translation.into());
    }

    /// Merges `records` in, overwriting existing keys.
    pub fn import_merge(&mut self, records: impl IntoIterator<Item = (String, String)>) {
        self.phrases.extend(records);
    }

    /// Merges a phrase file. Only a file that is not a JSON object is rejected.
    pub fn import_file(&mut self, path: &Path) -> Result<usize, StoreError> {
        let raw: Map<String, Value> = store::read_json(path)?;
        let imported = from_json_object(raw);
        let count = imported.len();
        self.import_merge(imported);
        info!(path = %path.display(), count, "phrases imported");
        Ok(count)
    }

    pub fn export_all(&self) -> &BTreeMap<String, String> {
        &self.phrases
    }

    pub fn export_file(&self, path: &Path) -> Result<(), StoreError> {
        store::write_json(path, self.export_all())
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}
