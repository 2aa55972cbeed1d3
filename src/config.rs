use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::services::{canvas, history, remote, store};

pub const CONFIG_FILE: &str = "lingo.json";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default = "default_phrases_path")]
    pub phrases_path: PathBuf,
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
}

fn default_phrases_path() -> PathBuf {
    PathBuf::from("phrases.json")
}
fn default_history_path() -> PathBuf {
    PathBuf::from("history.json")
}
fn default_endpoint() -> String {
    remote::DEFAULT_ENDPOINT.to_string()
}
fn default_timeout_secs() -> u64 {
    remote::DEFAULT_TIMEOUT_SECS
}
fn default_history_limit() -> usize {
    history::DEFAULT_HISTORY_LIMIT
}
fn default_canvas_width() -> u32 {
    canvas::DEFAULT_WIDTH
}
fn default_canvas_height() -> u32 {
    canvas::DEFAULT_HEIGHT
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            phrases_path: default_phrases_path(),
            history_path: default_history_path(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            history_limit: default_history_limit(),
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
        }
    }
}

impl AppConfig {
    /// Reads `path` if it exists. A broken file falls back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match store::read_json::<AppConfig>(path) {
            Ok(cfg) => {
                info!(path = %path.display(), "config loaded");
                cfg
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config unusable, using defaults");
                Self::default()
            }
        }
    }
}
