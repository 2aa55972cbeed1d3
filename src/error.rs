use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid json in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{} is not valid text in {encoding}", .path.display())]
    Encoding { path: PathBuf, encoding: &'static str },
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("invalid translation response: {0}")]
    Shape(&'static str),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("text is required")]
    EmptyText,
}

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
