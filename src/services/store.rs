use std::{
    fs,
    path::{Path, PathBuf},
};

use encoding_rs::{Encoding, UTF_8};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::PrettyFormatter;
use tracing::{debug, warn};

use crate::error::StoreError;

/// Reads a JSON document, honouring a UTF-8/UTF-16 BOM when one is present.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Startup load: a missing or unreadable store is an empty store.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    if !path.exists() {
        debug!(path = %path.display(), "store file missing, starting empty");
        return T::default();
    }

    match read_json(path) {
        Ok(v) => v,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "store file unusable, starting empty");
            T::default()
        }
    }
}

/// Pretty-prints `value` (4-space indent, non-ASCII kept) and replaces `path` in one rename.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;

    write_atomic(path, &buf)
}

fn read_text(path: &Path) -> Result<String, StoreError> {
    let bytes = fs::read(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (encoding, bom_len) = Encoding::for_bom(&bytes).unwrap_or((UTF_8, 0));
    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
    if had_errors {
        return Err(StoreError::Encoding {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        });
    }

    Ok(text.into_owned())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let tmp = tmp_path(path);
    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = tmp.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    fs::write(&tmp, bytes).map_err(write_err)?;

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "store".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");
        let mut map = HashMap::new();
        map.insert("кот".to_string(), "cat".to_string());

        write_json(&path, &map).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("кот"));
        assert!(raw.contains("\n    \""));
        assert!(!tmp_path(&path).exists());

        let back: HashMap<String, String> = read_json(&path).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_load_missing_or_corrupt_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        let v: Vec<String> = load_or_default(&path);
        assert!(v.is_empty());

        fs::write(&path, "{ not json").unwrap();
        let v: Vec<String> = load_or_default(&path);
        assert!(v.is_empty());
    }

    #[test]
    fn test_read_utf8_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bom.json");
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(br#"{"a": "b"}"#);
        fs::write(&path, bytes).unwrap();

        let map: HashMap<String, String> = read_json(&path).unwrap();
        assert_eq!(map.get("a").map(String::as_str), Some("b"));
    }

    #[test]
    fn test_read_utf16le_bom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("utf16.json");
        let mut bytes = vec![0xFF, 0xFE];
        for unit in r#"["да"]"#.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        fs::write(&path, bytes).unwrap();

        let v: Vec<String> = read_json(&path).unwrap();
        assert_eq!(v, vec!["да".to_string()]);
    }
}
