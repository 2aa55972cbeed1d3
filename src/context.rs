use std::time::Duration;

use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::TranslateError;
use crate::services::canvas::Canvas;
use crate::services::history::HistoryLog;
use crate::services::phrases::PhraseDictionary;
use crate::services::remote::{GoogleTranslate, RemoteTranslator};
use crate::services::resolver::Resolver;

/// Everything the core keeps between requests.
pub struct AppContext {
    pub phrases: PhraseDictionary,
    pub history: HistoryLog,
    pub resolver: Resolver,
    pub canvas: Canvas,
}

impl AppContext {
    pub fn open(cfg: &AppConfig) -> Result<Self, TranslateError> {
        let remote = GoogleTranslate::new(cfg.endpoint.clone(), Duration::from_secs(cfg.timeout_secs))?;
        Ok(Self::with_remote(cfg, Box::new(remote)))
    }

    pub fn with_remote(cfg: &AppConfig, remote: Box<dyn RemoteTranslator>) -> Self {
        Self {
            phrases: PhraseDictionary::load(&cfg.phrases_path),
            history: HistoryLog::load(&cfg.history_path, cfg.history_limit),
            resolver: Resolver::new(remote),
            canvas: Canvas::new(cfg.canvas_width, cfg.canvas_height),
        }
    }

    /// Writes both stores back. Returns false if either write failed.
    pub fn close(&self) -> bool {
        let mut ok = true;

        if let Err(e) = self.phrases.save() {
            error!(error = %e, "failed to save phrases");
            ok = false;
        }
        if let Err(e) = self.history.save() {
            error!(error = %e, "failed to save history");
            ok = false;
        }

        if ok {
            info!(phrases = self.phrases.len(), history = self.history.len(), "state saved");
        }
        ok
    }
}

/// Context over fresh stores in a temp dir. Keep the dir alive for as long as the context.
#[cfg(test)]
pub(crate) fn test_context(
    reply: Option<&str>,
) -> (AppContext, crate::services::resolver::fake::FakeRemote, AppConfig, tempfile::TempDir) {
    use crate::services::resolver::fake::FakeRemote;

    let dir = tempfile::TempDir::new().unwrap();
    let cfg = AppConfig {
        phrases_path: dir.path().join("phrases.json"),
        history_path: dir.path().join("history.json"),
        canvas_width: 100,
        canvas_height: 100,
        ..AppConfig::default()
    };
    let remote = match reply {
        Some(r) => FakeRemote::answering(r),
        None => FakeRemote::failing(),
    };
    let ctx = AppContext::with_remote(&cfg, Box::new(remote.clone()));
    (ctx, remote, cfg, dir)
}
