use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text form of an imported JSON value: strings as-is, `null` as empty, anything else as JSON.
pub fn lenient_text(v: Value) -> String {
    match v {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn de_lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(lenient_text)
}
