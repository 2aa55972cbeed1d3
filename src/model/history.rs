use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::text::de_lenient_text;

/// Timestamp layout shown in the history table, e.g. `16.10.2026 14:03:59`.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct HistoryEntry {
    #[serde(default, deserialize_with = "de_lenient_text")]
    pub timestamp: String,

    #[serde(default, deserialize_with = "de_lenient_text")]
    pub original: String,

    #[serde(default, deserialize_with = "de_lenient_text")]
    pub translation: String,

    #[serde(default, deserialize_with = "de_source")]
    pub source: TranslationSource,
}

/// Where a translation came from.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TranslationSource {
    Local,
    Online,
    // imported files may carry anything here
    #[default]
    Unknown,
}

fn de_source<'de, D>(deserializer: D) -> Result<TranslationSource, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if s == "local" => TranslationSource::Local,
        Value::String(s) if s == "online" => TranslationSource::Online,
        _ => TranslationSource::Unknown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_shape() {
        let entry = HistoryEntry {
            timestamp: "01.02.2026 10:00:00".into(),
            original: "hello".into(),
            translation: "привет".into(),
            source: TranslationSource::Online,
        };

        let v = serde_json::to_value(&entry).unwrap();
        assert_eq!(v["source"], "online");
        assert_eq!(v["translation"], "привет");
        assert_eq!(v.as_object().unwrap().len(), 4);

        let back: HistoryEntry = serde_json::from_value(v).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_missing_fields_default() {
        let entry: HistoryEntry =
            serde_json::from_str(r#"{"original": "cat", "source": "carrier pigeon"}"#).unwrap();
        assert_eq!(entry.original, "cat");
        assert_eq!(entry.timestamp, "");
        assert_eq!(entry.source, TranslationSource::Unknown);
    }

    #[test]
    fn test_non_string_fields_are_stringified() {
        let entry: HistoryEntry = serde_json::from_str(
            r#"{"timestamp": null, "original": 5, "translation": true, "source": 1}"#,
        )
        .unwrap();
        assert_eq!(entry.timestamp, "");
        assert_eq!(entry.original, "5");
        assert_eq!(entry.translation, "true");
        assert_eq!(entry.source, TranslationSource::Unknown);
    }
}
